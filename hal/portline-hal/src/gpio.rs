//! Single pin abstractions
//!
//! Traits for one digital line, implemented by the pin handles of the
//! chip-specific crates.

/// Logical level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Digital output pin
///
/// Implementations in this workspace drive the pin through the port's
/// set/reset register, so every method is a single store and may be called
/// from interrupt handlers.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&self);

    /// Set the pin low (logic 0)
    fn set_low(&self);

    /// Drive the pin to `level`
    fn set_level(&self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the output latch is currently high
    fn is_set_high(&self) -> bool;

    /// Check if the output latch is currently low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    /// Invert the pin state
    ///
    /// Reading the latch and writing the new level are two bus accesses; a
    /// concurrent writer of the same pin between them wins.
    fn toggle(&self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Sample the pin as a [`Level`]
    fn level(&self) -> Level {
        Level::from(self.is_high())
    }
}
