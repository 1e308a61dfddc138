//! GPIO register block layout and raw access
//!
//! One port occupies ten consecutive 32-bit registers. The layout is shared
//! by the STM32F4 and STM32L1 families.
//!
//! All driver code reaches the registers through [`RegisterAccess`], which
//! the fixed-address [`Mmio`] backend implements with volatile loads and
//! stores. Nothing here caches a register value between calls.

use core::ptr::{read_volatile, write_volatile};

/// Hardware register block of one port
///
/// Never instantiated; it pins down the memory layout behind a port base
/// address, and the [`Reg`] offsets are checked against it at compile time.
#[repr(C)]
pub struct RegisterBlock {
    /// Mode, 2 bits per pin
    pub moder: u32,
    /// Output type, 1 bit per pin
    pub otyper: u32,
    /// Output speed, 2 bits per pin
    pub ospeedr: u32,
    /// Pull-up/pull-down, 2 bits per pin
    pub pupdr: u32,
    /// Input data, read-only
    pub idr: u32,
    /// Output data
    pub odr: u32,
    /// Bit set/reset, write-only: low half sets, high half clears
    pub bsrr: u32,
    /// Configuration lock
    pub lckr: u32,
    /// Alternate function, 4 bits per pin for pins 0-7
    pub afrl: u32,
    /// Alternate function, 4 bits per pin for pins 8-15
    pub afrh: u32,
}

/// Register selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    Moder,
    Otyper,
    Ospeedr,
    Pupdr,
    Idr,
    Odr,
    Bsrr,
    Lckr,
    Afrl,
    Afrh,
}

impl Reg {
    /// Every register in address order
    pub const ALL: [Reg; 10] = [
        Reg::Moder,
        Reg::Otyper,
        Reg::Ospeedr,
        Reg::Pupdr,
        Reg::Idr,
        Reg::Odr,
        Reg::Bsrr,
        Reg::Lckr,
        Reg::Afrl,
        Reg::Afrh,
    ];

    /// Byte offset from the port base address
    pub const fn offset(self) -> usize {
        match self {
            Reg::Moder => 0x00,
            Reg::Otyper => 0x04,
            Reg::Ospeedr => 0x08,
            Reg::Pupdr => 0x0C,
            Reg::Idr => 0x10,
            Reg::Odr => 0x14,
            Reg::Bsrr => 0x18,
            Reg::Lckr => 0x1C,
            Reg::Afrl => 0x20,
            Reg::Afrh => 0x24,
        }
    }

    /// Position in [`Reg::ALL`]
    pub const fn index(self) -> usize {
        self.offset() / 4
    }
}

const _: () = {
    use core::mem::{offset_of, size_of};
    assert!(offset_of!(RegisterBlock, moder) == Reg::Moder.offset());
    assert!(offset_of!(RegisterBlock, otyper) == Reg::Otyper.offset());
    assert!(offset_of!(RegisterBlock, ospeedr) == Reg::Ospeedr.offset());
    assert!(offset_of!(RegisterBlock, pupdr) == Reg::Pupdr.offset());
    assert!(offset_of!(RegisterBlock, idr) == Reg::Idr.offset());
    assert!(offset_of!(RegisterBlock, odr) == Reg::Odr.offset());
    assert!(offset_of!(RegisterBlock, bsrr) == Reg::Bsrr.offset());
    assert!(offset_of!(RegisterBlock, lckr) == Reg::Lckr.offset());
    assert!(offset_of!(RegisterBlock, afrl) == Reg::Afrl.offset());
    assert!(offset_of!(RegisterBlock, afrh) == Reg::Afrh.offset());
    assert!(size_of::<RegisterBlock>() == 0x28);
};

/// Raw register access for one port
///
/// # Safety
///
/// Implementors must perform every `read` and `write` as an actual access to
/// the register (no caching, no elision, no reordering with other accesses
/// made through the same implementor), and `address` must return the base
/// address the registers are decoded from.
pub unsafe trait RegisterAccess {
    /// Base address of the register block
    fn address(&self) -> usize;

    /// Load a register
    fn read(&self, reg: Reg) -> u32;

    /// Store a register
    fn write(&self, reg: Reg, value: u32);
}

unsafe impl<T: RegisterAccess + ?Sized> RegisterAccess for &T {
    #[inline(always)]
    fn address(&self) -> usize {
        (**self).address()
    }

    #[inline(always)]
    fn read(&self, reg: Reg) -> u32 {
        (**self).read(reg)
    }

    #[inline(always)]
    fn write(&self, reg: Reg, value: u32) {
        (**self).write(reg, value)
    }
}

/// Memory-mapped register block at a fixed address
///
/// Only the port registry can create one, so every `Mmio` points at a real
/// port.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    pub(crate) const fn at(base: usize) -> Self {
        Self { base }
    }

    #[inline(always)]
    fn register(&self, reg: Reg) -> *mut u32 {
        (self.base + reg.offset()) as *mut u32
    }
}

unsafe impl RegisterAccess for Mmio {
    #[inline(always)]
    fn address(&self) -> usize {
        self.base
    }

    #[inline(always)]
    fn read(&self, reg: Reg) -> u32 {
        // SAFETY: `base` comes from the port registry and is a valid,
        // aligned GPIO register block for the whole program.
        unsafe { read_volatile(self.register(reg)) }
    }

    #[inline(always)]
    fn write(&self, reg: Reg, value: u32) {
        // SAFETY: see `read`.
        unsafe { write_volatile(self.register(reg), value) }
    }
}

impl core::fmt::Debug for Mmio {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Mmio({:#010x})", self.base)
    }
}
