//! Port-level abstractions
//!
//! A port controller exposes two classes of operation with different
//! concurrency guarantees, and this module keeps them in separate traits:
//!
//! - [`AtomicOutput`]: every call is one store to a set/reset register. Safe
//!   to use from foreground code and interrupt handlers on the same port at
//!   the same time.
//! - [`PinConfigure`]: every setter is a read-modify-write of a register
//!   shared by all pins of the port. Two contexts writing the same register
//!   (even for different pins) race, so callers confine these to
//!   initialization or serialize them externally.
//!
//! The field enums below use the encoding shared by the STM32 port
//! controllers (two bits per pin for mode, speed and pull, one for output
//! type).

/// Pin mode, two bits per pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Digital input (reset state of most pins)
    #[default]
    Input = 0b00,
    /// General purpose output
    Output = 0b01,
    /// Pin driven by the peripheral selected with the alternate function mux
    AlternateFunction = 0b10,
    /// Analog (ADC/DAC), input buffer disabled
    Analog = 0b11,
}

impl Mode {
    /// All modes in encoding order
    pub const ALL: [Mode; 4] = [
        Mode::Input,
        Mode::Output,
        Mode::AlternateFunction,
        Mode::Analog,
    ];

    /// Decode the low two bits of `bits`
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Mode::Input,
            0b01 => Mode::Output,
            0b10 => Mode::AlternateFunction,
            _ => Mode::Analog,
        }
    }

    /// Raw field value
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// Output driver type, one bit per pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OutputType {
    /// Drives both high and low
    #[default]
    PushPull = 0,
    /// Drives low only, high is left floating
    OpenDrain = 1,
}

impl OutputType {
    /// All output types in encoding order
    pub const ALL: [OutputType; 2] = [OutputType::PushPull, OutputType::OpenDrain];

    /// Decode the low bit of `bits`
    pub const fn from_bits(bits: u32) -> Self {
        if bits & 1 == 0 {
            OutputType::PushPull
        } else {
            OutputType::OpenDrain
        }
    }

    /// Raw field value
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// Output slew rate, two bits per pin
///
/// The frequencies behind each step depend on the device and supply
/// voltage; see the datasheet of the part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Speed {
    #[default]
    Low = 0b00,
    Medium = 0b01,
    High = 0b10,
    VeryHigh = 0b11,
}

impl Speed {
    /// All speeds in encoding order
    pub const ALL: [Speed; 4] = [Speed::Low, Speed::Medium, Speed::High, Speed::VeryHigh];

    /// Decode the low two bits of `bits`
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Speed::Low,
            0b01 => Speed::Medium,
            0b10 => Speed::High,
            _ => Speed::VeryHigh,
        }
    }

    /// Raw field value
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// Internal pull resistor, two bits per pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pull {
    /// Floating
    #[default]
    None = 0b00,
    /// Weak pull-up
    Up = 0b01,
    /// Weak pull-down
    Down = 0b10,
}

impl Pull {
    /// All pull settings in encoding order
    pub const ALL: [Pull; 3] = [Pull::None, Pull::Up, Pull::Down];

    /// Decode the low two bits of `bits`
    ///
    /// `0b11` is reserved by the hardware; it reads back as [`Pull::None`].
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b01 => Pull::Up,
            0b10 => Pull::Down,
            _ => Pull::None,
        }
    }

    /// Raw field value
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// Output bit updates performed with a single store
///
/// Implementations write a set/reset register whose low half sets and whose
/// high half clears output bits. Nothing is read back, so these calls never
/// race with each other or with [`PinConfigure`] setters.
pub trait AtomicOutput {
    /// Write the raw set/reset word
    ///
    /// Low 16 bits select outputs to drive high, high 16 bits select outputs
    /// to drive low. A bit present in both halves ends up high.
    fn clear_and_set(&self, raw: u32);

    /// Drive every pin in `mask` high
    fn set_bits(&self, mask: u16) {
        self.clear_and_set(mask as u32);
    }

    /// Drive every pin in `mask` low
    fn clear_bits(&self, mask: u16) {
        self.clear_and_set((mask as u32) << 16);
    }

    /// Drive pin `n` high
    fn set_bit(&self, n: u8) {
        self.clear_and_set(1u32.wrapping_shl(n as u32));
    }

    /// Drive pin `n` low
    fn clear_bit(&self, n: u8) {
        self.clear_and_set(0x1_0000u32.wrapping_shl(n as u32));
    }
}

/// Per-pin configuration fields
///
/// Each setter reads the shared register, replaces the pin's field and writes
/// the register back. Not interrupt safe: see the module documentation.
/// Pin indices are not validated; an out-of-range index shifts modulo the
/// register width and lands on another pin's field.
pub trait PinConfigure {
    /// Current mode of pin `n`
    fn mode(&self, n: u8) -> Mode;
    /// Set the mode of pin `n`
    fn set_mode(&self, n: u8, mode: Mode);

    /// Current output type of pin `n`
    fn output_type(&self, n: u8) -> OutputType;
    /// Set the output type of pin `n`
    fn set_output_type(&self, n: u8, output_type: OutputType);

    /// Current output speed of pin `n`
    fn speed(&self, n: u8) -> Speed;
    /// Set the output speed of pin `n`
    fn set_speed(&self, n: u8, speed: Speed);

    /// Current pull resistor of pin `n`
    fn pull(&self, n: u8) -> Pull;
    /// Set the pull resistor of pin `n`
    fn set_pull(&self, n: u8, pull: Pull);

    /// Alternate function number (0-15) routed to pin `n`
    fn alt_func(&self, n: u8) -> u8;
    /// Route alternate function `af` (0-15) to pin `n`
    fn set_alt_func(&self, n: u8, af: u8);
}
