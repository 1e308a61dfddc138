//! Portline Hardware Abstraction Layer
//!
//! This crate defines the board-agnostic side of the Portline GPIO stack:
//! the pin configuration vocabulary shared by every port controller and the
//! traits that separate interrupt-safe output operations from the
//! read-modify-write configuration accessors.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Peripheral setup (UART, SPI, EXTI...)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  portline-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!         ┌───────────────────────┐
//!         │ portline-hal-stm32f4  │
//!         │  (register driver)    │
//!         └───────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`port::AtomicOutput`] - single-store output updates, safe from interrupts
//! - [`port::PinConfigure`] - per-pin field accessors (read-modify-write)
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - single pin digital I/O

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod port;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level, OutputPin};
pub use port::{AtomicOutput, Mode, OutputType, PinConfigure, Pull, Speed};
