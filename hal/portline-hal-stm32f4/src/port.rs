//! Port registry
//!
//! The GPIO ports sit at `BASE + index * STRIDE` on the AHB1 bus. This module
//! exposes one constant handle per port letter; these handles (and the
//! [`PORTS`] table holding them) are the only way to reach the hardware.

use core::fmt;

use crate::regs::{Mmio, RegisterAccess};

/// Address of port A
pub const BASE: usize = 0x4002_0000;

/// Distance between two consecutive ports
pub const STRIDE: usize = 0x400;

/// Number of ports in the registry (A to K)
pub const PORT_COUNT: usize = 11;

/// Pins per port
pub const PINS_PER_PORT: usize = 16;

/// Handle to one GPIO port
///
/// A port is a hardware singleton that lives for the whole program. Handles
/// are plain copies of its address; any number of them may exist at once.
///
/// The methods fall in two groups with different concurrency guarantees:
///
/// - atomic output operations ([`set_bit`](Port::set_bit) and friends) are a
///   single store each and may be used from interrupt handlers,
/// - field accessors ([`set_mode`](Port::set_mode) and friends) read, modify
///   and write back a register shared by all pins of the port, and must not
///   run concurrently with another writer of the same register.
///
/// The port clock must be enabled before any register is touched.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Port<R = Mmio> {
    pub(crate) regs: R,
}

impl Port<Mmio> {
    const fn mmio(index: usize) -> Self {
        Self {
            regs: Mmio::at(BASE + index * STRIDE),
        }
    }

    /// Look up a port by letter (`'A'`..=`'K'`, case insensitive)
    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return None;
        }
        Self::from_number(letter as usize - 'A' as usize)
    }

    /// Look up a port by zero-based index
    pub fn from_number(index: usize) -> Option<Self> {
        PORTS.get(index).copied()
    }
}

impl<R: RegisterAccess> Port<R> {
    /// Wrap a register backend
    ///
    /// Registry ports are obtained from the constants ([`A`], [`B`], ...);
    /// this is for other [`RegisterAccess`] implementations.
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Zero-based port index, computed from the port address
    #[inline]
    pub fn number(&self) -> usize {
        self.regs.address().wrapping_sub(BASE) / STRIDE
    }

    /// Port letter, `'A'` for port 0
    pub fn letter(&self) -> char {
        b'A'.wrapping_add(self.number() as u8) as char
    }

    /// Register backend
    pub fn registers(&self) -> &R {
        &self.regs
    }
}

impl<R: RegisterAccess> fmt::Debug for Port<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}@{:#010x}", self.letter(), self.regs.address())
    }
}

#[cfg(feature = "defmt")]
impl<R: RegisterAccess> defmt::Format for Port<R> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "GPIO{}", self.letter())
    }
}

pub const A: Port = Port::mmio(0);
pub const B: Port = Port::mmio(1);
pub const C: Port = Port::mmio(2);
pub const D: Port = Port::mmio(3);
pub const E: Port = Port::mmio(4);
pub const F: Port = Port::mmio(5);
pub const G: Port = Port::mmio(6);
pub const H: Port = Port::mmio(7);
pub const I: Port = Port::mmio(8);
pub const J: Port = Port::mmio(9);
pub const K: Port = Port::mmio(10);

/// Every registry port in address order
pub const PORTS: [Port; PORT_COUNT] = [A, B, C, D, E, F, G, H, I, J, K];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortModel;

    #[test]
    fn test_number_follows_registry_order() {
        for (k, port) in PORTS.iter().enumerate() {
            assert_eq!(port.number(), k);
            assert_eq!(port.number(), (port.registers().address() - BASE) / STRIDE);
        }
        assert_eq!(A.number(), 0);
        assert_eq!(K.number(), 10);
    }

    #[test]
    fn test_addresses() {
        assert_eq!(A.registers().address(), 0x4002_0000);
        assert_eq!(B.registers().address(), 0x4002_0400);
        assert_eq!(H.registers().address(), 0x4002_1C00);
    }

    #[test]
    fn test_letters() {
        assert_eq!(A.letter(), 'A');
        assert_eq!(K.letter(), 'K');
        assert_eq!(Port::from_letter('c'), Some(C));
        assert_eq!(Port::from_letter('K'), Some(K));
        assert_eq!(Port::from_letter('L'), None);
        assert_eq!(Port::from_letter('1'), None);
        assert_eq!(Port::from_number(3), Some(D));
        assert_eq!(Port::from_number(PORT_COUNT), None);
    }

    #[test]
    fn test_custom_backend_number() {
        let model = PortModel::new(6);
        let port = Port::new(&model);
        assert_eq!(port.number(), 6);
        assert_eq!(port.letter(), 'G');
    }
}
