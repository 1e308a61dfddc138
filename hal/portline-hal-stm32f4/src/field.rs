//! Per-pin field accessors
//!
//! Mode, output type, speed and pull are packed into one register each,
//! `width` bits per pin, pin 0 in the least significant bits. Reading a
//! field is one load. Writing one is a read-modify-write of the whole
//! register:
//!
//! ```text
//! reg = reg & !(mask << shift) | (value << shift)    shift = pin * width
//! ```
//!
//! Other pins' fields are preserved, but the sequence is not atomic. A
//! foreground writer and an interrupt handler touching the same register
//! (even for different pins) can lose an update. Keep configuration in
//! initialization code or serialize it yourself; use the atomic output
//! operations for anything that runs in interrupt context.
//!
//! Pin indices are not checked. The shift is taken modulo 32, so an
//! out-of-range pin silently lands on another pin's field.

use portline_hal::{Mode, OutputType, PinConfigure, Pull, Speed};

use crate::altfunc::AltFunc;
use crate::port::Port;
use crate::regs::{Reg, RegisterAccess};

#[inline(always)]
const fn field_mask(width: u32) -> u32 {
    (1 << width) - 1
}

impl<R: RegisterAccess> Port<R> {
    /// Extract the `width`-bit field of pin `n` from `reg`
    #[inline]
    pub(crate) fn field(&self, reg: Reg, n: u8, width: u32) -> u32 {
        let shift = (n as u32).wrapping_mul(width);
        self.regs.read(reg).wrapping_shr(shift) & field_mask(width)
    }

    /// Replace the `width`-bit field of pin `n` in `reg`
    #[inline]
    pub(crate) fn set_field(&self, reg: Reg, n: u8, width: u32, value: u32) {
        let shift = (n as u32).wrapping_mul(width);
        let mask = field_mask(width);
        let current = self.regs.read(reg);
        let updated = current & !mask.wrapping_shl(shift) | (value & mask).wrapping_shl(shift);
        self.regs.write(reg, updated);
    }

    /// Mode of pin `n`
    #[inline]
    pub fn mode(&self, n: u8) -> Mode {
        Mode::from_bits(self.field(Reg::Moder, n, 2))
    }

    /// Set the mode of pin `n` (read-modify-write)
    #[inline]
    pub fn set_mode(&self, n: u8, mode: Mode) {
        self.set_field(Reg::Moder, n, 2, mode.bits());
    }

    /// Output type of pin `n`
    #[inline]
    pub fn output_type(&self, n: u8) -> OutputType {
        OutputType::from_bits(self.field(Reg::Otyper, n, 1))
    }

    /// Set the output type of pin `n` (read-modify-write)
    #[inline]
    pub fn set_output_type(&self, n: u8, output_type: OutputType) {
        self.set_field(Reg::Otyper, n, 1, output_type.bits());
    }

    /// Output speed of pin `n`
    #[inline]
    pub fn speed(&self, n: u8) -> Speed {
        Speed::from_bits(self.field(Reg::Ospeedr, n, 2))
    }

    /// Set the output speed of pin `n` (read-modify-write)
    #[inline]
    pub fn set_speed(&self, n: u8, speed: Speed) {
        self.set_field(Reg::Ospeedr, n, 2, speed.bits());
    }

    /// Pull resistor of pin `n`
    #[inline]
    pub fn pull(&self, n: u8) -> Pull {
        Pull::from_bits(self.field(Reg::Pupdr, n, 2))
    }

    /// Set the pull resistor of pin `n` (read-modify-write)
    #[inline]
    pub fn set_pull(&self, n: u8, pull: Pull) {
        self.set_field(Reg::Pupdr, n, 2, pull.bits());
    }
}

impl<R: RegisterAccess> PinConfigure for Port<R> {
    fn mode(&self, n: u8) -> Mode {
        Port::mode(self, n)
    }

    fn set_mode(&self, n: u8, mode: Mode) {
        Port::set_mode(self, n, mode)
    }

    fn output_type(&self, n: u8) -> OutputType {
        Port::output_type(self, n)
    }

    fn set_output_type(&self, n: u8, output_type: OutputType) {
        Port::set_output_type(self, n, output_type)
    }

    fn speed(&self, n: u8) -> Speed {
        Port::speed(self, n)
    }

    fn set_speed(&self, n: u8, speed: Speed) {
        Port::set_speed(self, n, speed)
    }

    fn pull(&self, n: u8) -> Pull {
        Port::pull(self, n)
    }

    fn set_pull(&self, n: u8, pull: Pull) {
        Port::set_pull(self, n, pull)
    }

    fn alt_func(&self, n: u8) -> u8 {
        Port::alt_func(self, n).number()
    }

    fn set_alt_func(&self, n: u8, af: u8) {
        Port::set_alt_func(self, n, AltFunc::new(af))
    }
}
