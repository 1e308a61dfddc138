//! Single pin handles
//!
//! [`OutputLine`] and [`InputLine`] bind a port and a pin number so that
//! drivers written against `embedded-hal` (or the `portline-hal` pin traits)
//! can use them. An output line only ever writes BSRR, which makes it usable
//! as an SPI chip select or radio enable line toggled from an interrupt
//! handler.
//!
//! Handles do not configure the pin; use [`Port::setup`] first.

use core::convert::Infallible;
use core::fmt;

use embedded_hal::digital;
use portline_hal::{InputPin, Level, OutputPin};

use crate::gpio::PinId;
use crate::port::Port;
use crate::regs::{Mmio, RegisterAccess};

/// Output pin driven through the set/reset register
#[derive(Clone, Copy)]
pub struct OutputLine<R = Mmio> {
    port: Port<R>,
    pin: u8,
    inverted: bool,
}

impl OutputLine<Mmio> {
    /// Output line for a parsed pin name, honouring its inversion
    pub fn from_id(id: PinId) -> Self {
        Self {
            port: id.port,
            pin: id.pin,
            inverted: id.inverted,
        }
    }
}

impl<R: RegisterAccess> OutputLine<R> {
    /// Active-high output on pin `pin` of `port`
    pub fn new(port: Port<R>, pin: u8) -> Self {
        Self {
            port,
            pin,
            inverted: false,
        }
    }

    /// Same line, active-low
    pub fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    pub fn port(&self) -> &Port<R> {
        &self.port
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Drive the line to its active level
    #[inline]
    pub fn set_high(&self) {
        if self.inverted {
            self.port.clear_bit(self.pin);
        } else {
            self.port.set_bit(self.pin);
        }
    }

    /// Drive the line to its inactive level
    #[inline]
    pub fn set_low(&self) {
        if self.inverted {
            self.port.set_bit(self.pin);
        } else {
            self.port.clear_bit(self.pin);
        }
    }

    #[inline]
    pub fn set_level(&self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Whether the line is at its active level, per the output latch
    #[inline]
    pub fn is_set_high(&self) -> bool {
        self.port.output_bit(self.pin) != self.inverted
    }

    #[inline]
    pub fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    /// Flip the line
    ///
    /// Reads the latch, then issues one BSRR store.
    #[inline]
    pub fn toggle(&self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }
}

impl<R: RegisterAccess> fmt::Debug for OutputLine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.inverted { "!" } else { "" };
        write!(f, "OutputLine({}P{}{})", bang, self.port.letter(), self.pin)
    }
}

impl<R: RegisterAccess> OutputPin for OutputLine<R> {
    fn set_high(&self) {
        OutputLine::set_high(self)
    }

    fn set_low(&self) {
        OutputLine::set_low(self)
    }

    fn is_set_high(&self) -> bool {
        OutputLine::is_set_high(self)
    }
}

impl<R: RegisterAccess> digital::ErrorType for OutputLine<R> {
    type Error = Infallible;
}

impl<R: RegisterAccess> digital::OutputPin for OutputLine<R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        OutputLine::set_low(self);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        OutputLine::set_high(self);
        Ok(())
    }
}

impl<R: RegisterAccess> digital::StatefulOutputPin for OutputLine<R> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(OutputLine::is_set_high(self))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(OutputLine::is_set_low(self))
    }
}

/// Input pin sampled from the input data register
#[derive(Clone, Copy)]
pub struct InputLine<R = Mmio> {
    port: Port<R>,
    pin: u8,
    inverted: bool,
}

impl InputLine<Mmio> {
    /// Input line for a parsed pin name, honouring its inversion
    pub fn from_id(id: PinId) -> Self {
        Self {
            port: id.port,
            pin: id.pin,
            inverted: id.inverted,
        }
    }
}

impl<R: RegisterAccess> InputLine<R> {
    /// Active-high input on pin `pin` of `port`
    pub fn new(port: Port<R>, pin: u8) -> Self {
        Self {
            port,
            pin,
            inverted: false,
        }
    }

    /// Same line, active-low
    pub fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    pub fn port(&self) -> &Port<R> {
        &self.port
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Whether the line is at its active level
    #[inline]
    pub fn is_high(&self) -> bool {
        self.port.bit(self.pin) != self.inverted
    }

    #[inline]
    pub fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<R: RegisterAccess> fmt::Debug for InputLine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.inverted { "!" } else { "" };
        write!(f, "InputLine({}P{}{})", bang, self.port.letter(), self.pin)
    }
}

impl<R: RegisterAccess> InputPin for InputLine<R> {
    fn is_high(&self) -> bool {
        InputLine::is_high(self)
    }
}

impl<R: RegisterAccess> digital::ErrorType for InputLine<R> {
    type Error = Infallible;
}

impl<R: RegisterAccess> digital::InputPin for InputLine<R> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(InputLine::is_high(self))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(InputLine::is_low(self))
    }
}

impl<R: RegisterAccess> Port<R> {
    /// Output handle for pin `n`
    pub fn output_line(self, n: u8) -> OutputLine<R> {
        OutputLine::new(self, n)
    }

    /// Input handle for pin `n`
    pub fn input_line(self, n: u8) -> InputLine<R> {
        InputLine::new(self, n)
    }
}
