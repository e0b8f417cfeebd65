//! Board-agnostic graphics for small TFT panels
//!
//! This crate contains everything that does not depend on a specific
//! display controller:
//!
//! - Packed 16-bit color and signed coordinate primitives
//! - The [`Device`] contract a controller driver implements
//! - Generic fallbacks for every primitive a driver may leave unoptimized
//! - Shape rasterization (lines, circles, rounded rects, triangles, bitmaps)
//! - Fixed-cell and proportional (dense or RLE) font rendering
//! - The [`Canvas`] text/cursor state object
//!
//! Drivers are bound at compile time: every algorithm here is generic over
//! `D: Device`, so a driver's optimized span fill is called directly with
//! no vtable in between.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod color;
pub mod font;
pub mod geometry;
#[cfg(feature = "embedded-graphics")]
mod graphics;
pub mod raster;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use canvas::Canvas;
pub use color::Color565;
pub use font::{FixedFont, GfxFont, Glyph, GLCD_5X7};
pub use geometry::{Coord, Rotation, TextBounds, Viewport};
pub use raster::Shapes;
pub use traits::Device;
