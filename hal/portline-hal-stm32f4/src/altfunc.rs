//! Alternate function multiplexer
//!
//! Each pin has a 4-bit selector choosing which internal peripheral signal
//! drives it when the pin is in [`Mode::AlternateFunction`]. Pins 0-7 live in
//! AFRL and pins 8-15 in AFRH, eight selectors per register.
//!
//! [`Mode::AlternateFunction`]: portline_hal::Mode::AlternateFunction

use crate::pins::Pins;
use crate::port::Port;
use crate::regs::{Reg, RegisterAccess};

/// Alternate function selector (0-15)
///
/// The named constants follow the STM32F4 mapping; the exact signal behind a
/// number differs per pin, see the "alternate function mapping" table of the
/// datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AltFunc(u8);

impl AltFunc {
    /// MCO, RTC, SWD/JTAG, TRACE
    pub const SYSTEM: AltFunc = AltFunc(0);
    pub const TIM1_2: AltFunc = AltFunc(1);
    pub const TIM3_5: AltFunc = AltFunc(2);
    pub const TIM8_11: AltFunc = AltFunc(3);
    pub const I2C1_3: AltFunc = AltFunc(4);
    pub const SPI1_2: AltFunc = AltFunc(5);
    pub const SPI3: AltFunc = AltFunc(6);
    pub const USART1_3: AltFunc = AltFunc(7);
    pub const USART4_6: AltFunc = AltFunc(8);
    /// CAN1/2 and TIM12-14
    pub const CAN_TIM12_14: AltFunc = AltFunc(9);
    /// USB OTG FS/HS
    pub const OTG: AltFunc = AltFunc(10);
    pub const ETH: AltFunc = AltFunc(11);
    /// FSMC, SDIO and OTG HS (FS mode)
    pub const FSMC_SDIO: AltFunc = AltFunc(12);
    pub const DCMI: AltFunc = AltFunc(13);
    pub const EVENTOUT: AltFunc = AltFunc(15);

    /// Selector from a raw number, keeping the low four bits
    pub const fn new(number: u8) -> Self {
        AltFunc(number & 0xF)
    }

    /// Raw selector value
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for AltFunc {
    fn from(number: u8) -> Self {
        AltFunc::new(number)
    }
}

/// AF register and pin slot within it for pin `n`
#[inline(always)]
const fn af_slot(n: u8) -> (Reg, u8) {
    if n < 8 {
        (Reg::Afrl, n)
    } else {
        (Reg::Afrh, n.wrapping_sub(8))
    }
}

impl<R: RegisterAccess> Port<R> {
    /// Alternate function routed to pin `n`
    #[inline]
    pub fn alt_func(&self, n: u8) -> AltFunc {
        let (reg, slot) = af_slot(n);
        AltFunc(self.field(reg, slot, 4) as u8)
    }

    /// Route alternate function `af` to pin `n` (read-modify-write)
    #[inline]
    pub fn set_alt_func(&self, n: u8, af: AltFunc) {
        let (reg, slot) = af_slot(n);
        self.set_field(reg, slot, 4, af.0 as u32);
    }

    /// Route `af` to every pin in `pins`
    ///
    /// Does at most one read-modify-write per AF register.
    pub fn set_alt_func_pins(&self, pins: Pins, af: AltFunc) {
        let bits = pins.bits();
        for (reg, half) in [(Reg::Afrl, bits & 0xFF), (Reg::Afrh, bits >> 8)] {
            if half == 0 {
                continue;
            }
            let (mask, value) = (0..8)
                .filter(|slot| half & (1 << slot) != 0)
                .fold((0u32, 0u32), |(mask, value), slot| {
                    (mask | 0xF << (slot * 4), value | (af.0 as u32) << (slot * 4))
                });
            let current = self.regs.read(reg);
            self.regs.write(reg, current & !mask | value);
        }
    }
}
