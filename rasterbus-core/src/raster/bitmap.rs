//! 1-bit bitmap blits

use crate::color::Color565;
use crate::geometry::Coord;
use crate::traits::Device;

/// Bit order within each source byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Leftmost pixel in bit 7
    MsbFirst,
    /// Leftmost pixel in bit 0 (XBM)
    LsbFirst,
}

impl BitOrder {
    const fn mask(self, col: usize) -> u8 {
        match self {
            BitOrder::MsbFirst => 0x80 >> (col & 7),
            BitOrder::LsbFirst => 1 << (col & 7),
        }
    }
}

/// Blit a `w` x `h` bitmap, rows padded to whole bytes
///
/// Bytes missing from a short `bitmap` read as zero.
#[allow(clippy::too_many_arguments)]
pub fn blit<D: Device + ?Sized>(
    d: &mut D,
    x: Coord,
    y: Coord,
    bitmap: &[u8],
    w: Coord,
    h: Coord,
    order: BitOrder,
    color: Color565,
    bg: Option<Color565>,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let stride = (w as usize).div_ceil(8);

    for row in 0..h {
        for col in 0..w {
            let byte = bitmap
                .get(row as usize * stride + col as usize / 8)
                .copied()
                .unwrap_or(0);
            let (px, py) = (x.saturating_add(col), y.saturating_add(row));
            if byte & order.mask(col as usize) != 0 {
                d.draw_pixel(px, py, color);
            } else if let Some(bg) = bg {
                d.draw_pixel(px, py, bg);
            }
        }
    }
}
