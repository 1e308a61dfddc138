//! GPIO port driver for STM32F4 and STM32L1 parts
//!
//! Both families share the same GPIO port block: ten 32-bit registers, a
//! 1 KiB window per port, ports A through K laid out from `0x4002_0000`.
//! This crate gives typed access to those ports on top of the
//! `portline-hal` traits.
//!
//! # Layers
//!
//! - [`regs`] - register block layout and the volatile access backend
//! - [`port`] - the closed registry of port handles ([`A`] .. [`K`])
//! - field accessors - mode, output type, speed, pull and alternate function
//!   per pin (read-modify-write, for initialization code)
//! - atomic output - single BSRR stores, safe against interrupt handlers
//! - bulk I/O and configuration lock
//! - [`PinConfig`], [`parse_pin`], [`PinAllocator`] and the single-pin
//!   [`OutputLine`] / [`InputLine`] handles for board setup
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting and logging
//!
//! # Example
//!
//! ```no_run
//! use portline_hal_stm32f4::{port, AltFunc, PinConfig, Pins};
//!
//! // USART2 on PA2/PA3, status LED on PA5
//! let gpioa = port::A;
//! gpioa.setup(Pins::PIN2 | Pins::PIN3, &PinConfig::alternate());
//! gpioa.set_alt_func_pins(Pins::PIN2 | Pins::PIN3, AltFunc::USART1_3);
//! gpioa.setup(Pins::PIN5, &PinConfig::output());
//! gpioa.set_bit(5);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod altfunc;
mod atomic;
pub mod config;
mod field;
pub mod gpio;
pub mod io;
pub mod line;
pub mod pins;
pub mod port;
pub mod regs;

#[cfg(test)]
mod model;

pub use altfunc::AltFunc;
pub use config::PinConfig;
pub use gpio::{parse_pin, PinAllocator, PinError, PinId};
pub use io::LockError;
pub use line::{InputLine, OutputLine};
pub use pins::Pins;
pub use port::{Port, A, B, BASE, C, D, E, F, G, H, I, J, K, PORTS, STRIDE};
pub use regs::{Mmio, Reg, RegisterAccess};

// Re-export shared types from portline-hal
pub use portline_hal::{AtomicOutput, Level, Mode, OutputType, PinConfigure, Pull, Speed};
