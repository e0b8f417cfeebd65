//! Cursor advance and line wrapping
//!
//! Rendering and measuring both walk text through [`Layout`], which is the
//! only place that decides where a character lands.

use super::fixed::{CELL_HEIGHT, CELL_WIDTH};
use super::gfx::{GfxFont, Glyph};

/// Where one character ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement<'f> {
    /// Cursor moved (or not) without drawing
    Nothing,
    /// Fixed cell with its top-left corner at `(x, y)`
    Cell { x: i32, y: i32 },
    /// Proportional glyph with its cursor origin at `(x, y)`
    Glyph { x: i32, y: i32, glyph: &'f Glyph },
}

/// Box covered by a placement as `(x, y, w, h)`
pub(crate) fn extent(placement: &Placement<'_>, size: i32) -> Option<(i32, i32, i32, i32)> {
    match *placement {
        Placement::Nothing => None,
        Placement::Cell { x, y } => Some((x, y, CELL_WIDTH * size, CELL_HEIGHT * size)),
        Placement::Glyph { x, y, glyph } => Some((
            x + i32::from(glyph.x_offset) * size,
            y + i32::from(glyph.y_offset) * size,
            i32::from(glyph.width) * size,
            i32::from(glyph.height) * size,
        )),
    }
}

pub(crate) struct Layout<'f> {
    pub x: i32,
    pub y: i32,
    size: i32,
    wrap: bool,
    width: i32,
    font: Option<&'f GfxFont<'f>>,
}

impl<'f> Layout<'f> {
    pub fn new(
        x: i32,
        y: i32,
        size: u8,
        wrap: bool,
        width: i32,
        font: Option<&'f GfxFont<'f>>,
    ) -> Self {
        Self {
            x,
            y,
            size: i32::from(size.max(1)),
            wrap,
            width,
            font,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Advance past `c`, returning where it should be drawn
    pub fn place(&mut self, c: u8) -> Placement<'f> {
        match self.font {
            None => self.place_fixed(c),
            Some(font) => self.place_proportional(font, c),
        }
    }

    fn newline(&mut self, advance: i32) {
        self.x = 0;
        self.y += advance * self.size;
    }

    fn place_fixed(&mut self, c: u8) -> Placement<'f> {
        match c {
            b'\n' => {
                self.newline(CELL_HEIGHT);
                Placement::Nothing
            }
            b'\r' => Placement::Nothing,
            _ => {
                let placed = Placement::Cell { x: self.x, y: self.y };
                self.x += CELL_WIDTH * self.size;
                if self.wrap && self.x > self.width - CELL_WIDTH * self.size {
                    self.newline(CELL_HEIGHT);
                }
                placed
            }
        }
    }

    fn place_proportional(&mut self, font: &'f GfxFont<'f>, c: u8) -> Placement<'f> {
        match c {
            b'\n' => {
                self.newline(i32::from(font.y_advance));
                Placement::Nothing
            }
            b'\r' => Placement::Nothing,
            _ => {
                let Some(glyph) = font.glyph(c) else {
                    return Placement::Nothing;
                };
                let mut placed = Placement::Nothing;
                if glyph.has_area() {
                    let right = i32::from(glyph.x_offset) + i32::from(glyph.width);
                    if self.wrap && self.x + self.size * right > self.width {
                        self.newline(i32::from(font.y_advance));
                    }
                    placed = Placement::Glyph { x: self.x, y: self.y, glyph };
                }
                self.x += i32::from(glyph.x_advance) * self.size;
                placed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_newline_and_return() {
        let mut layout = Layout::new(12, 5, 2, true, 100, None);
        assert_eq!(layout.place(b'\r'), Placement::Nothing);
        assert_eq!((layout.x, layout.y), (12, 5));
        assert_eq!(layout.place(b'\n'), Placement::Nothing);
        assert_eq!((layout.x, layout.y), (0, 21));
    }

    #[test]
    fn test_fixed_wraps_after_last_fitting_cell() {
        // 20 px wide fits three 6 px cells
        let mut layout = Layout::new(0, 0, 1, true, 20, None);
        assert_eq!(layout.place(b'a'), Placement::Cell { x: 0, y: 0 });
        assert_eq!(layout.place(b'b'), Placement::Cell { x: 6, y: 0 });
        assert_eq!(layout.place(b'c'), Placement::Cell { x: 12, y: 0 });
        assert_eq!((layout.x, layout.y), (0, 8));
        assert_eq!(layout.place(b'd'), Placement::Cell { x: 0, y: 8 });
    }

    #[test]
    fn test_fixed_without_wrap_runs_off() {
        let mut layout = Layout::new(0, 0, 1, false, 20, None);
        for _ in 0..5 {
            layout.place(b'x');
        }
        assert_eq!((layout.x, layout.y), (30, 0));
    }

    #[test]
    fn test_proportional_skips_unknown_and_empty() {
        let glyphs = [
            Glyph { x_advance: 4, ..Glyph::default() },
            Glyph { width: 3, height: 5, x_advance: 4, y_offset: -5, ..Glyph::default() },
        ];
        let font = GfxFont { bitmap: &[], glyphs: &glyphs, first: 0x20, last: 0x21, y_advance: 7 };
        let mut layout = Layout::new(0, 10, 1, true, 50, Some(&font));

        assert_eq!(layout.place(b'~'), Placement::Nothing);
        assert_eq!(layout.x, 0);
        assert_eq!(layout.place(b' '), Placement::Nothing);
        assert_eq!(layout.x, 4);
        let placed = layout.place(b'!');
        assert_eq!(placed, Placement::Glyph { x: 4, y: 10, glyph: &glyphs[1] });
        assert_eq!(extent(&placed, 1), Some((4, 5, 3, 5)));
        layout.place(b'\n');
        assert_eq!((layout.x, layout.y), (0, 17));
    }

    #[test]
    fn test_proportional_wraps_before_overflowing_glyph() {
        let glyphs = [Glyph { width: 4, height: 4, x_advance: 5, x_offset: 1, y_offset: -4, ..Glyph::default() }];
        let font = GfxFont { bitmap: &[], glyphs: &glyphs, first: 0x41, last: 0x41, y_advance: 6 };
        let mut layout = Layout::new(0, 6, 2, true, 24, Some(&font));

        assert!(matches!(layout.place(b'A'), Placement::Glyph { x: 0, y: 6, .. }));
        // x = 10, right edge 10 + 2 * 5 = 20 fits
        assert!(matches!(layout.place(b'A'), Placement::Glyph { x: 10, y: 6, .. }));
        // x = 20, right edge 30 does not
        assert!(matches!(layout.place(b'A'), Placement::Glyph { x: 0, y: 18, .. }));
    }
}
