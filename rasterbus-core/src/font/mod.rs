//! Font engine
//!
//! Two kinds of font are supported:
//!
//! - [`FixedFont`]: 5x8 cells plus one blank spacing column, the classic
//!   LCD character set, scaled by an integer factor
//! - [`GfxFont`]: proportional glyphs with per-glyph metrics, stored either
//!   as a dense bit stream or run-length encoded
//!
//! Cursor movement, newlines and wrapping are decided in one place
//! (`layout`) for both drawing and measuring, so a measured box always
//! matches what gets drawn.

mod fixed;
mod gfx;
mod glcd;
pub(crate) mod layout;
pub mod rle;

pub use fixed::{FixedFont, CELL_HEIGHT, CELL_WIDTH};
pub use gfx::{GfxFont, Glyph, RLE_FLAG};
pub use glcd::GLCD_5X7;
