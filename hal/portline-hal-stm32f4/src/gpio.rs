//! Pin names and pin bookkeeping
//!
//! Board configuration refers to pins by name (`"PA0"`, `"!PB6"` for an
//! active-low line). This module turns such names into registry handles and
//! tracks which pins have been handed out, so that two peripherals are not
//! accidentally wired to the same pin.

use heapless::Vec;

use crate::port::{Port, PINS_PER_PORT, PORT_COUNT};

/// Upper bound on pins in the registry
pub const MAX_PINS: usize = PORT_COUNT * PINS_PER_PORT;

/// Error from pin lookup or allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Name is not of the form `P<letter><number>`
    InvalidFormat,
    /// Port letter outside the registry
    InvalidPort,
    /// Pin number outside 0-15
    InvalidPin,
    /// Pin already claimed
    AlreadyClaimed,
}

/// A pin of a registry port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: Port,
    pub pin: u8,
    /// Line is active-low
    pub inverted: bool,
}

impl PinId {
    /// Pin `pin` of `port`, active-high
    pub fn new(port: Port, pin: u8) -> Result<Self, PinError> {
        if pin as usize >= PINS_PER_PORT {
            return Err(PinError::InvalidPin);
        }
        Ok(Self {
            port,
            pin,
            inverted: false,
        })
    }

    /// Same pin, active-low
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }
}

/// Parse a pin name
///
/// Supports formats:
/// - "PA0" -> port A, pin 0
/// - "!PB1" -> port B, pin 1, inverted
/// - surrounding whitespace and a lowercase port letter are accepted
pub fn parse_pin(s: &str) -> Result<PinId, PinError> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let rest = s
        .strip_prefix('P')
        .or_else(|| s.strip_prefix('p'))
        .ok_or(PinError::InvalidFormat)?;

    let mut chars = rest.chars();
    let letter = chars.next().ok_or(PinError::InvalidFormat)?;
    if !letter.is_ascii_alphabetic() {
        return Err(PinError::InvalidFormat);
    }
    let port = Port::from_letter(letter).ok_or(PinError::InvalidPort)?;

    let number = chars.as_str();
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PinError::InvalidFormat);
    }
    let pin: u8 = number.parse().map_err(|_| PinError::InvalidPin)?;

    let id = PinId::new(port, pin)?;
    Ok(if inverted { id.inverted() } else { id })
}

/// Tracks claimed pins across all registry ports
pub struct PinAllocator {
    /// One claim mask per port
    claimed: [u16; PORT_COUNT],
    /// Claimed pins that were named active-low
    inverted: [u16; PORT_COUNT],
}

impl Default for PinAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PinAllocator {
    /// Create an allocator with every pin free
    pub const fn new() -> Self {
        Self {
            claimed: [0; PORT_COUNT],
            inverted: [0; PORT_COUNT],
        }
    }

    /// Claim a pin
    pub fn claim(&mut self, id: PinId) -> Result<(), PinError> {
        let (port, mask) = Self::slot(id)?;
        if self.claimed[port] & mask != 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("P{}{} claimed twice", id.port.letter(), id.pin);
            return Err(PinError::AlreadyClaimed);
        }
        self.claimed[port] |= mask;
        if id.inverted {
            self.inverted[port] |= mask;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("claimed P{}{}", id.port.letter(), id.pin);
        Ok(())
    }

    /// Parse `name` and claim the pin
    pub fn claim_named(&mut self, name: &str) -> Result<PinId, PinError> {
        let id = parse_pin(name)?;
        self.claim(id)?;
        Ok(id)
    }

    /// Release a pin
    pub fn release(&mut self, id: PinId) {
        if let Ok((port, mask)) = Self::slot(id) {
            self.claimed[port] &= !mask;
            self.inverted[port] &= !mask;
        }
    }

    /// Check if a pin is claimed
    pub fn is_claimed(&self, id: PinId) -> bool {
        match Self::slot(id) {
            Ok((port, mask)) => self.claimed[port] & mask != 0,
            Err(_) => false,
        }
    }

    /// Claimed pins of `port` as a raw mask
    pub fn claimed_mask(&self, port: Port) -> u16 {
        self.claimed.get(port.number()).copied().unwrap_or(0)
    }

    /// Every claimed pin, in port then pin order, with the polarity it was
    /// claimed with
    pub fn claimed(&self) -> Vec<PinId, MAX_PINS> {
        let mut out = Vec::new();
        for (index, (&mask, &inverted)) in self.claimed.iter().zip(&self.inverted).enumerate() {
            let Some(port) = Port::from_number(index) else {
                continue;
            };
            for pin in (0..PINS_PER_PORT as u8).filter(|n| mask & (1 << n) != 0) {
                // capacity covers every pin of every port
                let id = PinId {
                    port,
                    pin,
                    inverted: inverted & (1 << pin) != 0,
                };
                if out.push(id).is_err() {
                    return out;
                }
            }
        }
        out
    }

    fn slot(id: PinId) -> Result<(usize, u16), PinError> {
        let port = id.port.number();
        if port >= PORT_COUNT {
            return Err(PinError::InvalidPort);
        }
        if id.pin as usize >= PINS_PER_PORT {
            return Err(PinError::InvalidPin);
        }
        Ok((port, 1 << id.pin))
    }
}
