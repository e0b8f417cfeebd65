//! rasterbus Hardware Abstraction Layer
//!
//! This crate defines the bus-level traits a display driver needs from a
//! chip-specific HAL. Display controllers only ever see these traits, so the
//! same driver runs on any MCU that can provide them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / rasterbus-core Canvas    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rasterbus-drivers (bus protocol)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rasterbus-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  serial (SPI) │       │ 8-bit parallel│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Select, command/data and strobe lines
//! - [`spi::SpiBus`] - Clocked serial byte output
//! - [`parallel::DataPort`] - 8 data lines written as one port
//! - [`pace::Pacer`] - Fixed inter-byte delay between bus writes
//! - [`DelayNs`] - Millisecond sleeps during controller start-up, taken
//!   from `embedded-hal`
//!
//! The hot path is infallible: a display write has no error channel, a
//! board that can fail a pin write has to deal with it below this layer.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
#[cfg(feature = "mock")]
pub mod mock;
pub mod pace;
pub mod parallel;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use gpio::OutputPin;
pub use pace::{ConfigError, NoPacer, Pacer, Pacing, SpinPacer};
pub use parallel::DataPort;
pub use spi::SpiBus;
