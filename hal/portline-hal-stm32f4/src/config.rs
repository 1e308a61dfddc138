//! Pin configuration
//!
//! Convenience layer above the field accessors: a [`PinConfig`] bundles the
//! four per-pin fields and [`Port::setup`] applies it to a set of pins, the
//! way peripheral setup code configures a group of signals at once.
//!
//! Combinations are not checked (a pull on an analog pin is written as
//! given). Like the accessors it is built from, `setup` is
//! read-modify-write and belongs in initialization code.

use portline_hal::{Mode, OutputType, Pull, Speed};

use crate::pins::Pins;
use crate::port::Port;
use crate::regs::RegisterAccess;

/// Complete configuration of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub mode: Mode,
    pub output_type: OutputType,
    pub speed: Speed,
    pub pull: Pull,
}

impl PinConfig {
    /// Floating input
    pub const fn input() -> Self {
        Self {
            mode: Mode::Input,
            output_type: OutputType::PushPull,
            speed: Speed::Low,
            pull: Pull::None,
        }
    }

    /// Push-pull output, low speed
    pub const fn output() -> Self {
        Self {
            mode: Mode::Output,
            ..Self::input()
        }
    }

    /// Push-pull alternate function
    pub const fn alternate() -> Self {
        Self {
            mode: Mode::AlternateFunction,
            ..Self::input()
        }
    }

    /// Analog
    pub const fn analog() -> Self {
        Self {
            mode: Mode::Analog,
            ..Self::input()
        }
    }

    /// Same configuration with `pull`
    pub const fn with_pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    /// Same configuration with `speed`
    pub const fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Same configuration with an open-drain driver
    pub const fn open_drain(mut self) -> Self {
        self.output_type = OutputType::OpenDrain;
        self
    }
}

impl<R: RegisterAccess> Port<R> {
    /// Apply `config` to every pin in `pins`
    pub fn setup(&self, pins: Pins, config: &PinConfig) {
        #[cfg(feature = "defmt")]
        defmt::trace!("{}: setup {=u16:#x} {}", self, pins.bits(), config);

        for n in pins {
            self.set_output_type(n, config.output_type);
            self.set_speed(n, config.speed);
            self.set_pull(n, config.pull);
            // mode last, so the pin never drives with stale output settings
            self.set_mode(n, config.mode);
        }
    }

    /// Current configuration of pin `n`
    pub fn pin_config(&self, n: u8) -> PinConfig {
        PinConfig {
            mode: self.mode(n),
            output_type: self.output_type(n),
            speed: self.speed(n),
            pull: self.pull(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altfunc::AltFunc;
    use crate::model::PortModel;
    use crate::regs::Reg;

    #[test]
    fn test_builders() {
        let cfg = PinConfig::output().with_speed(Speed::High).open_drain();
        assert_eq!(cfg.mode, Mode::Output);
        assert_eq!(cfg.speed, Speed::High);
        assert_eq!(cfg.output_type, OutputType::OpenDrain);
        assert_eq!(cfg.pull, Pull::None);
        assert_eq!(PinConfig::default(), PinConfig::input());
    }

    #[test]
    fn test_uart_pin_setup() {
        // USART2 TX/RX on PA2/PA3
        let model = PortModel::new(0);
        let port = Port::new(&model);

        port.setup(Pins::PIN2, &PinConfig::alternate());
        port.setup(Pins::PIN3, &PinConfig::alternate().with_pull(Pull::Up));
        port.set_alt_func_pins(Pins::PIN2 | Pins::PIN3, AltFunc::USART1_3);

        assert_eq!(port.pin_config(2), PinConfig::alternate());
        assert_eq!(port.pin_config(3).pull, Pull::Up);
        assert_eq!(port.alt_func(2), AltFunc::USART1_3);
        assert_eq!(port.alt_func(3), AltFunc::USART1_3);
        assert_eq!(model.peek(Reg::Moder), 0b1010 << 4);
    }

    #[test]
    fn test_setup_leaves_other_pins() {
        let model = PortModel::new(1);
        model.poke(Reg::Moder, 0x5555_5555);
        let port = Port::new(&model);

        let cs = PinConfig::output().with_speed(Speed::High);
        port.setup(Pins::PIN6 | Pins::PIN9, &cs);

        for n in 0..16 {
            let expected = if n == 6 || n == 9 { Speed::High } else { Speed::Low };
            assert_eq!(port.speed(n), expected);
            assert_eq!(port.mode(n), Mode::Output);
        }
    }

    #[test]
    fn test_unchecked_combination_is_written_as_given() {
        let model = PortModel::new(0);
        let port = Port::new(&model);
        let odd = PinConfig::analog().with_pull(Pull::Down);
        port.setup(Pins::PIN0, &odd);
        assert_eq!(port.pin_config(0), odd);
    }

    #[test]
    fn test_empty_mask_touches_nothing() {
        let model = PortModel::new(0);
        let port = Port::new(&model);
        port.setup(Pins::NONE, &PinConfig::output());
        assert_eq!(model.writes(), 0);
    }
}
