//! Whole-port data access and configuration lock
//!
//! `load` and `bit` sample the input data register, which reflects the
//! electrical level of every pin. `store` replaces the output data register
//! in one write; it is not coordinated with BSRR writes from other contexts,
//! so a port driven from interrupts should stick to the atomic operations.

use crate::pins::Pins;
use crate::port::Port;
use crate::regs::{Reg, RegisterAccess};

/// Lock key bit in LCKR
const LCKK: u32 = 1 << 16;

/// Error from [`Port::lock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockError {
    /// LCKK did not read back as set after the key sequence
    SequenceRejected,
}

impl<R: RegisterAccess> Port<R> {
    /// Snapshot of the input data register
    #[inline]
    pub fn load(&self) -> u16 {
        self.regs.read(Reg::Idr) as u16
    }

    /// Replace the whole output data register
    #[inline]
    pub fn store(&self, bits: u16) {
        self.regs.write(Reg::Odr, bits as u32);
    }

    /// Input level of pin `n`
    #[inline]
    pub fn bit(&self, n: u8) -> bool {
        self.regs.read(Reg::Idr) & 1u32.wrapping_shl(n as u32) != 0
    }

    /// Snapshot of the output data register
    #[inline]
    pub fn output(&self) -> u16 {
        self.regs.read(Reg::Odr) as u16
    }

    /// Output latch of pin `n`
    #[inline]
    pub fn output_bit(&self, n: u8) -> bool {
        self.regs.read(Reg::Odr) & 1u32.wrapping_shl(n as u32) != 0
    }

    /// Freeze the configuration of `pins` until the next reset
    ///
    /// Runs the LCKR key sequence. Once it succeeds, mode, output type,
    /// speed, pull and alternate function of the locked pins ignore writes,
    /// and the lock itself cannot be changed. Output levels are not affected.
    ///
    /// The sequence must not be interleaved with another LCKR access.
    pub fn lock(&self, pins: Pins) -> Result<(), LockError> {
        let mask = pins.bits() as u32;
        self.regs.write(Reg::Lckr, LCKK | mask);
        self.regs.write(Reg::Lckr, mask);
        self.regs.write(Reg::Lckr, LCKK | mask);
        // first read completes the sequence, second one confirms it
        let _ = self.regs.read(Reg::Lckr);
        if self.regs.read(Reg::Lckr) & LCKK != 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("{}: locked pins {=u16:#x}", self, pins.bits());
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("{}: lock sequence rejected", self);
            Err(LockError::SequenceRejected)
        }
    }

    /// Whether the port configuration lock is active
    pub fn is_locked(&self) -> bool {
        self.regs.read(Reg::Lckr) & LCKK != 0
    }

    /// Pins covered by an active lock
    pub fn locked_pins(&self) -> Pins {
        let lckr = self.regs.read(Reg::Lckr);
        if lckr & LCKK != 0 {
            Pins::from_bits(lckr as u16)
        } else {
            Pins::NONE
        }
    }
}
