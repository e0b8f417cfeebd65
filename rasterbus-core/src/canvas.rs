//! Text and cursor state bound to one display
//!
//! A [`Canvas`] owns the driver together with everything text rendering
//! needs to remember between calls: cursor, colors, scale, wrapping and
//! the active font. It is a [`Device`] itself, forwarding every primitive
//! to the driver, so all [`Shapes`](crate::raster::Shapes) work on it
//! unchanged.

use core::fmt;

use crate::color::Color565;
use crate::font::layout::{extent, Layout, Placement};
use crate::font::{FixedFont, GfxFont, CELL_HEIGHT, CELL_WIDTH, GLCD_5X7};
use crate::geometry::{Coord, Rotation, TextBounds, Viewport};
use crate::traits::Device;

fn to_coord(v: i32) -> Coord {
    v.clamp(i32::from(Coord::MIN), i32::from(Coord::MAX)) as Coord
}

/// A [`Device`] plus text state: cursor, colors, scale, wrapping and font
///
/// Shapes and primitives pass straight through to the device; text is laid
/// out here, with the built-in 5x7 font or a proportional [`GfxFont`].
pub struct Canvas<'f, D> {
    device: D,
    cursor_x: Coord,
    cursor_y: Coord,
    text_color: Color565,
    text_bg: Color565,
    text_size: u8,
    wrap: bool,
    cp437: bool,
    font: Option<&'f GfxFont<'f>>,
    fixed_font: FixedFont<'f>,
}

impl<'f, D: Device> Canvas<'f, D> {
    /// Wrap a driver with default text state
    ///
    /// The cursor starts at the origin with white, transparent text at
    /// scale 1 in the built-in fixed font, wrapping at the right edge.
    pub fn new(device: D) -> Self {
        Self {
            device,
            cursor_x: 0,
            cursor_y: 0,
            text_color: Color565::WHITE,
            text_bg: Color565::WHITE,
            text_size: 1,
            wrap: true,
            cp437: false,
            font: None,
            fixed_font: GLCD_5X7,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Give back the driver
    pub fn release(self) -> D {
        self.device
    }

    pub fn set_cursor(&mut self, x: Coord, y: Coord) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn cursor(&self) -> (Coord, Coord) {
        (self.cursor_x, self.cursor_y)
    }

    /// Foreground only; the background is left untouched
    pub fn set_text_color(&mut self, color: Color565) {
        self.text_color = color;
        self.text_bg = color;
    }

    /// Foreground and background
    ///
    /// Fixed-font cells paint the background when it differs from the
    /// foreground. Proportional glyphs never do.
    pub fn set_text_colors(&mut self, color: Color565, bg: Color565) {
        self.text_color = color;
        self.text_bg = bg;
    }

    /// Scale factor; 0 is treated as 1
    pub fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    pub fn text_size(&self) -> u8 {
        self.text_size
    }

    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Use the full code page 437 layout of the fixed font
    pub fn cp437(&mut self, enable: bool) {
        self.cp437 = enable;
    }

    /// Switch between the fixed font (`None`) and a proportional font
    ///
    /// Fixed cells hang below the cursor while proportional glyphs sit on
    /// it as a baseline, so the cursor moves 6 px to keep text that follows
    /// on the same visual line.
    pub fn set_font(&mut self, font: Option<&'f GfxFont<'f>>) {
        match (self.font.is_some(), font.is_some()) {
            (false, true) => self.cursor_y = self.cursor_y.saturating_add(6),
            (true, false) => self.cursor_y = self.cursor_y.saturating_sub(6),
            _ => {}
        }
        self.font = font;
    }

    pub fn font(&self) -> Option<&'f GfxFont<'f>> {
        self.font
    }

    /// Replace the table used when no proportional font is set
    pub fn set_fixed_font(&mut self, font: FixedFont<'f>) {
        self.fixed_font = font;
    }

    fn layout(&self, x: Coord, y: Coord) -> Layout<'f> {
        Layout::new(
            i32::from(x),
            i32::from(y),
            self.text_size,
            self.wrap,
            i32::from(self.device.width()),
            self.font,
        )
    }

    /// Emit one byte at the cursor and advance it
    pub fn write_byte(&mut self, c: u8) {
        let mut layout = self.layout(self.cursor_x, self.cursor_y);
        let placement = layout.place(c);
        let size = layout.size();
        let (fg, bg) = (self.text_color, self.text_bg);

        match placement {
            Placement::Nothing => {}
            Placement::Cell { x, y } => self.draw_cell(x, y, c, fg, bg, size),
            Placement::Glyph { x, y, glyph } => {
                if let Some(font) = self.font {
                    draw_glyph(&mut self.device, font, glyph, x, y, fg, size);
                }
            }
        }

        self.cursor_x = to_coord(layout.x);
        self.cursor_y = to_coord(layout.y);
    }

    /// Draw one character at `(x, y)` in the active font without moving
    /// the cursor
    pub fn draw_char(&mut self, x: Coord, y: Coord, c: u8, color: Color565, bg: Color565, size: u8) {
        let (x, y, size) = (i32::from(x), i32::from(y), i32::from(size.max(1)));
        match self.font {
            None => self.draw_cell(x, y, c, color, bg, size),
            Some(font) => {
                if let Some(glyph) = font.glyph(c) {
                    draw_glyph(&mut self.device, font, glyph, x, y, color, size);
                }
            }
        }
    }

    fn draw_cell(&mut self, x: i32, y: i32, c: u8, fg: Color565, bg: Color565, size: i32) {
        let (width, height) = (i32::from(self.device.width()), i32::from(self.device.height()));
        if x >= width
            || y >= height
            || x + CELL_WIDTH * size - 1 < 0
            || y + CELL_HEIGHT * size - 1 < 0
        {
            return;
        }

        let columns = self.fixed_font.glyph(c, self.cp437).copied().unwrap_or([0; 5]);
        let opaque = bg != fg;

        for i in 0..CELL_WIDTH {
            let mut line = columns.get(i as usize).copied().unwrap_or(0);
            for j in 0..CELL_HEIGHT {
                let color = if line & 1 != 0 {
                    Some(fg)
                } else if opaque {
                    Some(bg)
                } else {
                    None
                };
                if let Some(color) = color {
                    if size == 1 {
                        self.device.draw_pixel(to_coord(x + i), to_coord(y + j), color);
                    } else {
                        self.device.fill_rect(
                            to_coord(x + i * size),
                            to_coord(y + j * size),
                            to_coord(size),
                            to_coord(size),
                            color,
                        );
                    }
                }
                line >>= 1;
            }
        }
    }

    /// Box that `text` would cover if printed with its cursor at `(x, y)`
    ///
    /// Uses the same wrapping as printing. Text that draws nothing gives a
    /// zero-sized box at `(x, y)`.
    pub fn text_bounds(&self, text: &str, x: Coord, y: Coord) -> TextBounds {
        let mut layout = self.layout(x, y);
        let size = layout.size();
        let mut bounds: Option<(i32, i32, i32, i32)> = None;

        for c in text.bytes() {
            let placement = layout.place(c);
            let Some((bx, by, bw, bh)) = extent(&placement, size) else {
                continue;
            };
            let (x1, y1) = (bx + bw - 1, by + bh - 1);
            bounds = Some(match bounds {
                None => (bx, by, x1, y1),
                Some((mx0, my0, mx1, my1)) => (mx0.min(bx), my0.min(by), mx1.max(x1), my1.max(y1)),
            });
        }

        match bounds {
            None => TextBounds { x, y, width: 0, height: 0 },
            Some((x0, y0, x1, y1)) => TextBounds {
                x: to_coord(x0),
                y: to_coord(y0),
                width: (x1 - x0 + 1).clamp(0, i32::from(u16::MAX)) as u16,
                height: (y1 - y0 + 1).clamp(0, i32::from(u16::MAX)) as u16,
            },
        }
    }
}

fn draw_glyph<D: Device>(
    device: &mut D,
    font: &GfxFont<'_>,
    glyph: &crate::font::Glyph,
    x: i32,
    y: i32,
    color: Color565,
    size: i32,
) {
    let left = x + i32::from(glyph.x_offset) * size;
    let top = y + i32::from(glyph.y_offset) * size;

    font.for_each_span(glyph, |row, col, len| {
        let (row, col, len) = (i32::from(row), i32::from(col), i32::from(len));
        if size == 1 {
            if len == 1 {
                device.draw_pixel(to_coord(left + col), to_coord(top + row), color);
            } else {
                device.draw_hline(to_coord(left + col), to_coord(top + row), to_coord(len), color);
            }
        } else {
            device.fill_rect(
                to_coord(left + col * size),
                to_coord(top + row * size),
                to_coord(len * size),
                to_coord(size),
                color,
            );
        }
    });
}

impl<D: Device> fmt::Write for Canvas<'_, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.bytes() {
            self.write_byte(c);
        }
        Ok(())
    }
}

impl<D: Device> Device for Canvas<'_, D> {
    fn viewport(&self) -> &Viewport {
        self.device.viewport()
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        self.device.viewport_mut()
    }

    fn draw_pixel(&mut self, x: Coord, y: Coord, color: Color565) {
        self.device.draw_pixel(x, y, color);
    }

    fn draw_vline(&mut self, x: Coord, y: Coord, h: Coord, color: Color565) {
        self.device.draw_vline(x, y, h, color);
    }

    fn draw_hline(&mut self, x: Coord, y: Coord, w: Coord, color: Color565) {
        self.device.draw_hline(x, y, w, color);
    }

    fn fill_rect(&mut self, x: Coord, y: Coord, w: Coord, h: Coord, color: Color565) {
        self.device.fill_rect(x, y, w, h, color);
    }

    fn fill_screen(&mut self, color: Color565) {
        self.device.fill_screen(color);
    }

    fn draw_line(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord, color: Color565) {
        self.device.draw_line(x0, y0, x1, y1, color);
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.device.set_rotation(rotation);
    }

    fn invert_display(&mut self, invert: bool) {
        self.device.invert_display(invert);
    }
}
