//! RAM-window primitives shared by all controllers
//!
//! These controllers auto-increment their RAM address inside a programmed
//! rectangle, so a run of pixels costs one window program plus a stream of
//! color words. The functions here clip in logical coordinates, program the
//! exact clipped rectangle and stream into it, producing the same pixels as
//! the generic primitives in [`rasterbus_core::raster::fallback`].
//!
//! Each function is one bus transaction.

use core::mem::swap;

use rasterbus_core::raster::fallback::clip_span;
use rasterbus_core::{Color565, Coord, Device};

use crate::command::dcs;
use crate::interface::Interface;

/// A controller with an auto-incrementing RAM address window
pub trait RamWindow: Device {
    type Bus: Interface;

    fn bus(&mut self) -> &mut Self::Bus;

    /// Program the inclusive logical rectangle `(x0, y0)..=(x1, y1)` and
    /// start a RAM write
    ///
    /// Called with the bus selected and the rectangle already clipped.
    fn program_window(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord);
}

pub fn pixel<W: RamWindow + ?Sized>(w: &mut W, x: Coord, y: Coord, color: Color565) {
    if !w.viewport().contains(x, y) {
        return;
    }
    w.bus().acquire();
    w.program_window(x, y, x, y);
    w.bus().data16_pre_command(color.raw());
    w.bus().release();
}

pub fn vline<W: RamWindow + ?Sized>(w: &mut W, x: Coord, y: Coord, h: Coord, color: Color565) {
    if x < 0 || x >= w.width() {
        return;
    }
    let Some((y, h)) = clip_span(y, h, w.height()) else {
        return;
    };
    stream(w, x, y, 1, h, color);
}

pub fn hline<W: RamWindow + ?Sized>(w: &mut W, x: Coord, y: Coord, len: Coord, color: Color565) {
    if y < 0 || y >= w.height() {
        return;
    }
    let Some((x, len)) = clip_span(x, len, w.width()) else {
        return;
    };
    stream(w, x, y, len, 1, color);
}

pub fn fill_rect<W: RamWindow + ?Sized>(
    w: &mut W,
    x: Coord,
    y: Coord,
    width: Coord,
    height: Coord,
    color: Color565,
) {
    let Some((x, width)) = clip_span(x, width, w.width()) else {
        return;
    };
    let Some((y, height)) = clip_span(y, height, w.height()) else {
        return;
    };
    stream(w, x, y, width, height, color);
}

pub fn fill_screen<W: RamWindow + ?Sized>(w: &mut W, color: Color565) {
    let (width, height) = (w.width(), w.height());
    fill_rect(w, 0, 0, width, height, color);
}

/// Clipped, non-empty rectangle
fn stream<W: RamWindow + ?Sized>(
    w: &mut W,
    x: Coord,
    y: Coord,
    width: Coord,
    height: Coord,
    color: Color565,
) {
    let count = u32::from(width.unsigned_abs()) * u32::from(height.unsigned_abs());
    w.bus().acquire();
    w.program_window(x, y, x + width - 1, y + height - 1);
    w.bus().stream16(color.raw(), count);
    w.bus().release();
}

/// Bresenham line, one window per straight run
///
/// The window is opened along the major axis up to the clipped end point and
/// only reprogrammed when the minor coordinate steps. Pixels before the line
/// enters the screen are skipped without touching the bus; once the minor
/// coordinate leaves the screen nothing further can be visible.
pub fn line<W: RamWindow + ?Sized>(
    w: &mut W,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
    color: Color565,
) {
    let (mut x0, mut y0, mut x1, mut y1) =
        (i32::from(x0), i32::from(y0), i32::from(x1), i32::from(y1));

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        swap(&mut x0, &mut y0);
        swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        swap(&mut x0, &mut x1);
        swap(&mut y0, &mut y1);
    }

    let (major, minor) = if steep {
        (i32::from(w.height()), i32::from(w.width()))
    } else {
        (i32::from(w.width()), i32::from(w.height()))
    };

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut err = dx / 2;

    if x1 < 0 || major <= 0 {
        return;
    }
    let x1 = x1.min(major - 1);
    if x0 > x1 {
        return;
    }

    let (mut x, mut y) = (x0, y0);
    while x < 0 || y < 0 || y >= minor {
        if x >= x1 {
            return;
        }
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
        x += 1;
    }

    w.bus().acquire();
    let mut program = true;
    loop {
        if program {
            if steep {
                w.program_window(y as Coord, x as Coord, y as Coord, x1 as Coord);
            } else {
                w.program_window(x as Coord, y as Coord, x1 as Coord, y as Coord);
            }
            program = false;
        }
        w.bus().pixel16_in_line(color.raw());
        if x >= x1 {
            break;
        }
        err -= dy;
        if err < 0 {
            y += ystep;
            if y < 0 || y >= minor {
                break;
            }
            err += dx;
            w.bus().line_reprogram_gap();
            program = true;
        } else {
            w.bus().line_step_gap();
        }
        x += 1;
    }
    w.bus().release();
}

/// Column/row window of a MIPI DCS controller, in controller coordinates
pub(crate) fn program_dcs<I: Interface + ?Sized>(iface: &mut I, x0: u16, y0: u16, x1: u16, y1: u16) {
    iface.command(dcs::CASET);
    iface.data16(x0);
    iface.data16_pre_command(x1);
    iface.command(dcs::RASET);
    iface.data16(y0);
    iface.data16_pre_command(y1);
    iface.command(dcs::RAMWR);
}
