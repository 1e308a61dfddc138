//! Atomic output operations
//!
//! The bit set/reset register (BSRR) changes output bits with a single bus
//! write: ones in the low half set the matching ODR bits, ones in the high
//! half clear them, zeros leave them alone. Nothing is read first, so these
//! are the operations to use when foreground code and interrupt handlers
//! drive outputs of the same port.
//!
//! BSRR is write-only. Read output levels back with
//! [`Port::output`](crate::Port::output).

use portline_hal::{AtomicOutput, Level};

use crate::pins::Pins;
use crate::port::Port;
use crate::regs::{Reg, RegisterAccess};

impl<R: RegisterAccess> Port<R> {
    /// Drive pin `n` high
    #[inline(always)]
    pub fn set_bit(&self, n: u8) {
        self.regs.write(Reg::Bsrr, 1u32.wrapping_shl(n as u32));
    }

    /// Drive pin `n` low
    #[inline(always)]
    pub fn clear_bit(&self, n: u8) {
        self.regs.write(Reg::Bsrr, 0x1_0000u32.wrapping_shl(n as u32));
    }

    /// Drive pin `n` to `level`
    #[inline(always)]
    pub fn write_bit(&self, n: u8, level: Level) {
        match level {
            Level::High => self.set_bit(n),
            Level::Low => self.clear_bit(n),
        }
    }

    /// Drive every pin in `pins` high
    #[inline(always)]
    pub fn set_bits(&self, pins: impl Into<Pins>) {
        self.regs.write(Reg::Bsrr, pins.into().bits() as u32);
    }

    /// Drive every pin in `pins` low
    #[inline(always)]
    pub fn clear_bits(&self, pins: impl Into<Pins>) {
        self.regs.write(Reg::Bsrr, (pins.into().bits() as u32) << 16);
    }

    /// Drive `set` high and `clear` low in one store
    ///
    /// A pin named in both ends up high.
    #[inline(always)]
    pub fn modify_bits(&self, set: impl Into<Pins>, clear: impl Into<Pins>) {
        let raw = (clear.into().bits() as u32) << 16 | set.into().bits() as u32;
        self.regs.write(Reg::Bsrr, raw);
    }

    /// Write the raw BSRR word
    ///
    /// High 16 bits select pins to clear, low 16 bits pins to set. Set has
    /// priority: a pin selected in both halves ends up high.
    #[inline(always)]
    pub fn clear_and_set(&self, raw: u32) {
        self.regs.write(Reg::Bsrr, raw);
    }
}

impl<R: RegisterAccess> AtomicOutput for Port<R> {
    fn clear_and_set(&self, raw: u32) {
        Port::clear_and_set(self, raw)
    }

    fn set_bits(&self, mask: u16) {
        Port::set_bits(self, mask)
    }

    fn clear_bits(&self, mask: u16) {
        Port::clear_bits(self, mask)
    }

    fn set_bit(&self, n: u8) {
        Port::set_bit(self, n)
    }

    fn clear_bit(&self, n: u8) {
        Port::clear_bit(self, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortModel;
    use proptest::prelude::*;

    #[test]
    fn test_set_bit_writes_low_half_only() {
        let model = PortModel::new(0);
        model.poke(Reg::Odr, 0b1000_0001);
        let port = Port::new(&model);

        port.set_bit(4);
        assert_eq!(port.output(), 0b1001_0001);
        assert_eq!(model.writes(), 1);
    }

    #[test]
    fn test_clear_bit_leaves_others() {
        let model = PortModel::new(0);
        model.poke(Reg::Odr, 0xFFFF);
        let port = Port::new(&model);

        port.clear_bit(15);
        assert_eq!(port.output(), 0x7FFF);
        port.clear_bit(0);
        assert_eq!(port.output(), 0x7FFE);
    }

    #[test]
    fn test_disjoint_set_then_clear_from_all_clear() {
        let model = PortModel::new(0);
        let port = Port::new(&model);

        port.set_bits(Pins::PIN1 | Pins::PIN2 | Pins::PIN9);
        port.clear_bits(Pins::PIN3 | Pins::PIN4);
        assert_eq!(port.output(), (Pins::PIN1 | Pins::PIN2 | Pins::PIN9).bits());
    }

    #[test]
    fn test_set_wins_when_bit_in_both_halves() {
        let model = PortModel::new(0);
        let port = Port::new(&model);

        // pin 6 requested in both halves, pin 7 clear only, pin 2 set only
        model.poke(Reg::Odr, 1 << 7);
        port.clear_and_set((1 << (6 + 16)) | (1 << (7 + 16)) | (1 << 6) | (1 << 2));
        assert_eq!(port.output(), (1 << 6) | (1 << 2));

        // and again starting from a high pin
        port.clear_and_set(0xFFFF_FFFF);
        assert_eq!(port.output(), 0xFFFF);
    }

    #[test]
    fn test_modify_bits_is_one_store() {
        let model = PortModel::new(0);
        model.poke(Reg::Odr, 0x00F0);
        let port = Port::new(&model);

        port.modify_bits(Pins::PIN0, Pins::PIN4 | Pins::PIN0);
        assert_eq!(model.writes(), 1);
        assert_eq!(port.output(), 0x00E1);
    }

    #[test]
    fn test_out_of_range_clear_is_a_no_op() {
        let model = PortModel::new(0);
        model.poke(Reg::Odr, 0x0001);
        let port = Port::new(&model);

        port.clear_bit(16);
        AtomicOutput::clear_bit(&port, 16);
        assert_eq!(port.output(), 0x0001);
    }

    #[test]
    fn test_write_bit() {
        let model = PortModel::new(0);
        let port = Port::new(&model);
        port.write_bit(11, Level::High);
        assert!(port.output_bit(11));
        port.write_bit(11, Level::Low);
        assert!(!port.output_bit(11));
    }

    #[test]
    fn test_through_trait() {
        fn blink<P: AtomicOutput>(port: &P) {
            port.set_bit(5);
            port.clear_bits(0x0003);
        }

        let model = PortModel::new(0);
        model.poke(Reg::Odr, 0x0003);
        let port = Port::new(&model);
        blink(&port);
        assert_eq!(port.output(), 1 << 5);
    }

    proptest! {
        #[test]
        fn prop_set_bit_changes_only_that_bit(pin in 0u8..16, initial in any::<u16>()) {
            let model = PortModel::new(0);
            model.poke(Reg::Odr, initial as u32);
            let port = Port::new(&model);

            port.set_bit(pin);
            prop_assert_eq!(port.output(), initial | (1 << pin));
        }

        #[test]
        fn prop_clear_bit_changes_only_that_bit(pin in 0u8..16, initial in any::<u16>()) {
            let model = PortModel::new(0);
            model.poke(Reg::Odr, initial as u32);
            let port = Port::new(&model);

            port.clear_bit(pin);
            prop_assert_eq!(port.output(), initial & !(1 << pin));
        }

        #[test]
        fn prop_disjoint_masks(set in any::<u16>(), clear in any::<u16>()) {
            let clear = clear & !set;
            let model = PortModel::new(0);
            let port = Port::new(&model);

            port.set_bits(set);
            port.clear_bits(clear);
            prop_assert_eq!(port.output(), set);
        }

        #[test]
        fn prop_clear_and_set_priority(initial in any::<u16>(), set in any::<u16>(), clear in any::<u16>()) {
            let model = PortModel::new(0);
            model.poke(Reg::Odr, initial as u32);
            let port = Port::new(&model);

            port.clear_and_set((clear as u32) << 16 | set as u32);
            prop_assert_eq!(port.output(), (initial & !clear) | set);
        }
    }
}
