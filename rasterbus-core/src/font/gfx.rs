//! Proportional glyph fonts

use super::rle::Runs;

/// Set in [`Glyph::bitmap_offset`] when the glyph is run-length encoded
pub const RLE_FLAG: u16 = 0x8000;

/// Metrics and bitmap location of one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    /// Offset into [`GfxFont::bitmap`]; [`RLE_FLAG`] selects run-length data
    pub bitmap_offset: u16,
    pub width: u8,
    pub height: u8,
    /// Cursor advance after this character
    pub x_advance: u8,
    /// Distance from the cursor to the left edge
    pub x_offset: i8,
    /// Distance from the cursor (baseline) to the top edge
    pub y_offset: i8,
}

impl Glyph {
    pub const fn is_rle(&self) -> bool {
        self.bitmap_offset & RLE_FLAG != 0
    }

    /// Byte offset of the bitmap data
    pub const fn offset(&self) -> usize {
        (self.bitmap_offset & !RLE_FLAG) as usize
    }

    /// True when the glyph draws anything at all
    pub const fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Proportional font covering the codes `first..=last`
#[derive(Debug, Clone, Copy)]
pub struct GfxFont<'a> {
    /// Shared bitmap data for all glyphs
    pub bitmap: &'a [u8],
    pub glyphs: &'a [Glyph],
    pub first: u16,
    pub last: u16,
    /// Line height
    pub y_advance: u8,
}

impl<'a> GfxFont<'a> {
    pub fn glyph(&self, code: u8) -> Option<&'a Glyph> {
        let code = u16::from(code);
        if code < self.first || code > self.last {
            return None;
        }
        self.glyphs.get(usize::from(code - self.first))
    }

    /// Visit each horizontal run of set pixels in `glyph`
    ///
    /// `f` receives `(row, column, length)` relative to the glyph's top-left
    /// corner. Runs never cross a row.
    pub fn for_each_span(&self, glyph: &Glyph, mut f: impl FnMut(u8, u8, u8)) {
        if !glyph.has_area() {
            return;
        }
        let data = self.bitmap.get(glyph.offset()..).unwrap_or(&[]);
        if glyph.is_rle() {
            rle_spans(data, glyph.width, glyph.height, &mut f);
        } else {
            dense_spans(data, glyph.width, glyph.height, &mut f);
        }
    }
}

/// Bits run MSB first and continue across rows without padding
fn dense_spans(data: &[u8], width: u8, height: u8, f: &mut impl FnMut(u8, u8, u8)) {
    let mut bit = 0usize;
    for row in 0..height {
        let mut start = None;
        for col in 0..width {
            let byte = data.get(bit >> 3).copied().unwrap_or(0);
            let set = byte & (0x80 >> (bit & 7)) != 0;
            bit += 1;
            match (set, start) {
                (true, None) => start = Some(col),
                (false, Some(s)) => {
                    f(row, s, col - s);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            f(row, s, width - s);
        }
    }
}

fn rle_spans(data: &[u8], width: u8, height: u8, f: &mut impl FnMut(u8, u8, u8)) {
    let w = u32::from(width);
    let area = w * u32::from(height);
    let mut pos = 0u32;
    let mut set = false;

    for run in Runs::new(data) {
        if pos >= area {
            break;
        }
        let mut left = u32::from(run).min(area - pos);
        if set {
            while left > 0 {
                let (row, col) = (pos / w, pos % w);
                let take = left.min(w - col);
                f(row as u8, col as u8, take as u8);
                pos += take;
                left -= take;
            }
        } else {
            pos += left;
        }
        set = !set;
    }
}
