//! In-memory port model for host tests
//!
//! Behaves like one GPIO port as described in the reference manual:
//!
//! - BSRR is write-only; a write clears the ODR bits named in the high half,
//!   then sets the bits named in the low half, so set wins.
//! - IDR follows ODR for pins in output mode and the externally driven level
//!   for every other pin. Writes to IDR are ignored.
//! - LCKR accepts the key sequence (LCKK=1, LCKK=0, LCKK=1, read) with an
//!   unchanged pin mask; afterwards the configuration registers of the locked
//!   pins and LCKR itself ignore writes.

use core::cell::Cell;

use crate::port::{BASE, STRIDE};
use crate::regs::{Reg, RegisterAccess};

const LCKK: u32 = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockStep {
    Idle,
    FirstWrite(u32),
    SecondWrite(u32),
    ThirdWrite(u32),
    Locked,
}

pub(crate) struct PortModel {
    index: usize,
    regs: [Cell<u32>; 10],
    external: Cell<u16>,
    lock: Cell<LockStep>,
    reject_key: Cell<bool>,
    writes: Cell<usize>,
}

impl PortModel {
    /// Model of the `index`-th registry port, all registers at reset value 0
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            regs: Default::default(),
            external: Cell::new(0),
            lock: Cell::new(LockStep::Idle),
            reject_key: Cell::new(false),
            writes: Cell::new(0),
        }
    }

    /// Raw register content, bypassing access semantics
    pub(crate) fn peek(&self, reg: Reg) -> u32 {
        self.regs[reg.index()].get()
    }

    /// Preset a register, bypassing access semantics
    pub(crate) fn poke(&self, reg: Reg, value: u32) {
        self.regs[reg.index()].set(value);
    }

    /// Level applied to the pins from outside the chip
    pub(crate) fn drive_inputs(&self, levels: u16) {
        self.external.set(levels);
    }

    /// Make the lock sequence fail, as with a wrong key order on hardware
    pub(crate) fn reject_lock_key(&self) {
        self.reject_key.set(true);
    }

    /// Number of register stores performed through [`RegisterAccess`]
    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }

    fn locked_pins(&self) -> u32 {
        if self.lock.get() == LockStep::Locked {
            self.peek(Reg::Lckr) & 0xFFFF
        } else {
            0
        }
    }

    fn output_pins(&self) -> u16 {
        let moder = self.peek(Reg::Moder);
        (0..16)
            .filter(|n| (moder >> (n * 2)) & 0b11 == 0b01)
            .fold(0, |acc, n| acc | (1 << n))
    }

    /// Bits of `reg` that belong to locked pins
    fn frozen_bits(&self, reg: Reg) -> u32 {
        let locked = self.locked_pins();
        let (width, first) = match reg {
            Reg::Otyper => (1, 0),
            Reg::Moder | Reg::Ospeedr | Reg::Pupdr => (2, 0),
            Reg::Afrl => (4, 0),
            Reg::Afrh => (4, 8),
            _ => return 0,
        };
        let field = (1u32 << width) - 1;
        (0..32 / width)
            .filter(|i| locked & (1 << (i + first)) != 0)
            .fold(0, |acc, i| acc | (field << (i * width)))
    }

    fn lock_write(&self, value: u32) {
        let mask = value & 0xFFFF;
        let next = match (self.lock.get(), value & LCKK != 0) {
            (LockStep::Locked, _) => return,
            (LockStep::Idle, true) => LockStep::FirstWrite(mask),
            (LockStep::FirstWrite(m), false) if m == mask => LockStep::SecondWrite(mask),
            (LockStep::SecondWrite(m), true) if m == mask => LockStep::ThirdWrite(mask),
            (_, true) => LockStep::FirstWrite(mask),
            (_, false) => LockStep::Idle,
        };
        self.lock.set(next);
        self.poke(Reg::Lckr, mask);
    }

    fn lock_read(&self) -> u32 {
        if let LockStep::ThirdWrite(_) = self.lock.get() {
            if self.reject_key.get() {
                self.lock.set(LockStep::Idle);
            } else {
                self.lock.set(LockStep::Locked);
            }
        }
        match self.lock.get() {
            LockStep::Locked => self.peek(Reg::Lckr) | LCKK,
            _ => self.peek(Reg::Lckr),
        }
    }
}

unsafe impl RegisterAccess for PortModel {
    fn address(&self) -> usize {
        BASE + self.index * STRIDE
    }

    fn read(&self, reg: Reg) -> u32 {
        match reg {
            Reg::Bsrr => 0,
            Reg::Idr => {
                let outputs = self.output_pins();
                let odr = self.peek(Reg::Odr) as u16;
                ((odr & outputs) | (self.external.get() & !outputs)) as u32
            }
            Reg::Lckr => self.lock_read(),
            _ => self.peek(reg),
        }
    }

    fn write(&self, reg: Reg, value: u32) {
        self.writes.set(self.writes.get() + 1);
        match reg {
            Reg::Idr => {}
            Reg::Bsrr => {
                let odr = self.peek(Reg::Odr);
                let cleared = odr & !(value >> 16);
                self.poke(Reg::Odr, (cleared | value) & 0xFFFF);
            }
            Reg::Odr => self.poke(Reg::Odr, value & 0xFFFF),
            Reg::Lckr => self.lock_write(value),
            _ => {
                let frozen = self.frozen_bits(reg);
                let current = self.peek(reg);
                self.poke(reg, (current & frozen) | (value & !frozen));
            }
        }
    }
}
