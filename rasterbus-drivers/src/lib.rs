//! Bus protocol drivers for TFT display controllers
//!
//! Each controller driver implements [`rasterbus_core::Device`], overriding
//! every primitive with a RAM-window version: one address window is
//! programmed per run and the pixels are streamed into it.
//!
//! # Supported controllers
//!
//! - [`st7735::St7735`] - 128x160 / 128x128 over SPI (B, R and S variants)
//! - [`ili9340::Ili9340`] - 240x320 over SPI (also sold as ILI9341)
//! - [`st7781::St7781`] - 240x320 over an 8-bit parallel bus
//!
//! # Layers
//!
//! - [`interface`] - select, command/data signalling and byte pacing for a
//!   serial or parallel bus
//! - [`command`] - declarative start-up sequences and their replay
//! - [`window`] - the accelerated primitives shared by all controllers

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod command;
pub mod ili9340;
pub mod interface;
pub mod st7735;
pub mod st7781;
pub mod window;

#[cfg(test)]
mod testing;

pub use ili9340::{Ili9340, Ili9341};
pub use interface::{Interface, Parallel8Interface, SpiInterface};
pub use st7735::{St7735, Variant};
pub use st7781::St7781;
