//! Pin masks
//!
//! [`Pins`] names a set of pins of one port, one bit per pin, in the same
//! order as the data registers. Board code composes masks with `|`:
//!
//! ```ignore
//! let spi = Pins::PIN5 | Pins::PIN6 | Pins::PIN7;
//! port::A.set_alt_func_pins(spi, AltFunc::SPI1_2);
//! ```

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Set of pin positions within one port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pins(u16);

impl Pins {
    pub const NONE: Pins = Pins(0);
    pub const ALL: Pins = Pins(0xFFFF);

    pub const PIN0: Pins = Pins(1 << 0);
    pub const PIN1: Pins = Pins(1 << 1);
    pub const PIN2: Pins = Pins(1 << 2);
    pub const PIN3: Pins = Pins(1 << 3);
    pub const PIN4: Pins = Pins(1 << 4);
    pub const PIN5: Pins = Pins(1 << 5);
    pub const PIN6: Pins = Pins(1 << 6);
    pub const PIN7: Pins = Pins(1 << 7);
    pub const PIN8: Pins = Pins(1 << 8);
    pub const PIN9: Pins = Pins(1 << 9);
    pub const PIN10: Pins = Pins(1 << 10);
    pub const PIN11: Pins = Pins(1 << 11);
    pub const PIN12: Pins = Pins(1 << 12);
    pub const PIN13: Pins = Pins(1 << 13);
    pub const PIN14: Pins = Pins(1 << 14);
    pub const PIN15: Pins = Pins(1 << 15);

    /// Mask from raw bits
    pub const fn from_bits(bits: u16) -> Self {
        Pins(bits)
    }

    /// Mask holding only pin `n`; empty when `n` is not a valid pin
    pub const fn pin(n: u8) -> Self {
        if n < 16 {
            Pins(1 << n)
        } else {
            Pins(0)
        }
    }

    /// Raw bits
    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, n: u8) -> bool {
        n < 16 && self.0 & (1 << n) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the pin numbers in the mask, lowest first
    pub fn iter(self) -> PinsIter {
        PinsIter(self.0)
    }
}

impl From<u16> for Pins {
    fn from(bits: u16) -> Self {
        Pins(bits)
    }
}

impl From<Pins> for u16 {
    fn from(pins: Pins) -> Self {
        pins.0
    }
}

impl BitOr for Pins {
    type Output = Pins;

    fn bitor(self, rhs: Pins) -> Pins {
        Pins(self.0 | rhs.0)
    }
}

impl BitOrAssign for Pins {
    fn bitor_assign(&mut self, rhs: Pins) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Pins {
    type Output = Pins;

    fn bitand(self, rhs: Pins) -> Pins {
        Pins(self.0 & rhs.0)
    }
}

impl Not for Pins {
    type Output = Pins;

    fn not(self) -> Pins {
        Pins(!self.0)
    }
}

impl IntoIterator for Pins {
    type Item = u8;
    type IntoIter = PinsIter;

    fn into_iter(self) -> PinsIter {
        self.iter()
    }
}

/// Iterator over the pin numbers of a [`Pins`] mask
#[derive(Debug, Clone)]
pub struct PinsIter(u16);

impl Iterator for PinsIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let n = self.0.trailing_zeros() as u8;
        // clear lowest set bit
        self.0 &= self.0 - 1;
        Some(n)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for PinsIter {}
