//! Fixed-cell column fonts

/// Horizontal advance of one cell (5 glyph columns + 1 spacing column)
pub const CELL_WIDTH: i32 = 6;

/// Vertical advance of one line
pub const CELL_HEIGHT: i32 = 8;

/// Table of 5-column glyphs
///
/// Each byte is one column, least significant bit at the top.
#[derive(Debug, Clone, Copy)]
pub struct FixedFont<'a> {
    first: u8,
    glyphs: &'a [[u8; 5]],
}

impl<'a> FixedFont<'a> {
    /// Font whose first table entry is character `first`
    pub const fn new(first: u8, glyphs: &'a [[u8; 5]]) -> Self {
        Self { first, glyphs }
    }

    /// Columns for `code`, or `None` when the table has no entry for it
    ///
    /// Without `cp437`, codes from 176 up are shifted by one to match the
    /// legacy table layout that skipped a character.
    pub fn glyph(&self, code: u8, cp437: bool) -> Option<&'a [u8; 5]> {
        let code = if !cp437 && code >= 176 {
            code.wrapping_add(1)
        } else {
            code
        };
        let index = code.checked_sub(self.first)?;
        self.glyphs.get(usize::from(index))
    }
}
