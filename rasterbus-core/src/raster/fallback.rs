//! Generic primitive implementations
//!
//! Everything here is built on [`Device::draw_pixel`] (or on the other
//! primitives) and is what a driver gets when it does not override a
//! method. Optimized driver paths must match these pixel for pixel.

use core::mem::swap;

use crate::color::Color565;
use crate::geometry::Coord;
use crate::traits::Device;

/// Clip a run `[start, start + len)` to `[0, limit)`
///
/// Returns the clipped start and length, or `None` if nothing is left.
pub fn clip_span(start: Coord, len: Coord, limit: Coord) -> Option<(Coord, Coord)> {
    if len <= 0 || limit <= 0 {
        return None;
    }
    let lo = i32::from(start).max(0);
    let hi = (i32::from(start) + i32::from(len)).min(i32::from(limit));
    if lo >= hi {
        return None;
    }
    Some((lo as Coord, (hi - lo) as Coord))
}

/// Clip the inclusive range `[lo, hi]` to `[0, limit)`
///
/// Shapes compute their extents in `i32`, where corners far off screen
/// cannot overflow; this narrows them back to a start and length.
pub fn clip_range(lo: i32, hi: i32, limit: Coord) -> Option<(Coord, Coord)> {
    let (lo, hi) = (lo.max(0), hi.min(i32::from(limit) - 1));
    if lo > hi {
        return None;
    }
    Some((lo as Coord, (hi - lo + 1) as Coord))
}

/// Vertical run over rows `y0..=y1` in widened coordinates
pub fn vrun<D: Device + ?Sized>(d: &mut D, x: i32, y0: i32, y1: i32, color: Color565) {
    if x < 0 || x >= i32::from(d.width()) {
        return;
    }
    if let Some((y, h)) = clip_range(y0, y1, d.height()) {
        d.draw_vline(x as Coord, y, h, color);
    }
}

/// Horizontal run over columns `x0..=x1` in widened coordinates
pub fn hrun<D: Device + ?Sized>(d: &mut D, x0: i32, x1: i32, y: i32, color: Color565) {
    if y < 0 || y >= i32::from(d.height()) {
        return;
    }
    if let Some((x, w)) = clip_range(x0, x1, d.width()) {
        d.draw_hline(x, y as Coord, w, color);
    }
}

/// Filled rectangle with inclusive corners in widened coordinates
pub fn fill_area<D: Device + ?Sized>(
    d: &mut D,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color565,
) {
    let Some((x, w)) = clip_range(x0, x1, d.width()) else {
        return;
    };
    let Some((y, h)) = clip_range(y0, y1, d.height()) else {
        return;
    };
    d.fill_rect(x, y, w, h, color);
}

pub fn draw_vline<D: Device + ?Sized>(d: &mut D, x: Coord, y: Coord, h: Coord, color: Color565) {
    if x < 0 || x >= d.width() {
        return;
    }
    let Some((y, h)) = clip_span(y, h, d.height()) else {
        return;
    };
    for row in y..y + h {
        d.draw_pixel(x, row, color);
    }
}

pub fn draw_hline<D: Device + ?Sized>(d: &mut D, x: Coord, y: Coord, w: Coord, color: Color565) {
    if y < 0 || y >= d.height() {
        return;
    }
    let Some((x, w)) = clip_span(x, w, d.width()) else {
        return;
    };
    for col in x..x + w {
        d.draw_pixel(col, y, color);
    }
}

/// Column by column, through the device's own vertical run
pub fn fill_rect<D: Device + ?Sized>(
    d: &mut D,
    x: Coord,
    y: Coord,
    w: Coord,
    h: Coord,
    color: Color565,
) {
    if h <= 0 {
        return;
    }
    let Some((x, w)) = clip_span(x, w, d.width()) else {
        return;
    };
    for col in x..x + w {
        d.draw_vline(col, y, h, color);
    }
}

pub fn fill_screen<D: Device + ?Sized>(d: &mut D, color: Color565) {
    let (w, h) = (d.width(), d.height());
    d.fill_rect(0, 0, w, h, color);
}

/// Bresenham line
///
/// Endpoints are normalized (major axis along x, left to right) before
/// stepping, so both drawing directions give the same pixels.
pub fn draw_line<D: Device + ?Sized>(
    d: &mut D,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
    color: Color565,
) {
    bresenham(x0, y0, x1, y1, |x, y| d.draw_pixel(x, y, color));
}

/// Walk a Bresenham line, calling `plot` once per pixel
pub fn bresenham(x0: Coord, y0: Coord, x1: Coord, y1: Coord, mut plot: impl FnMut(Coord, Coord)) {
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

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut err = dx / 2;
    let mut y = y0;

    for x in x0..=x1 {
        if steep {
            plot(y as Coord, x as Coord);
        } else {
            plot(x as Coord, y as Coord);
        }
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::PixelGrid;
    use proptest::prelude::*;

    const RED: Color565 = Color565::RED;

    #[test]
    fn test_clip_span() {
        assert_eq!(clip_span(-2, 5, 10), Some((0, 3)));
        assert_eq!(clip_span(8, 5, 10), Some((8, 2)));
        assert_eq!(clip_span(10, 5, 10), None);
        assert_eq!(clip_span(3, 0, 10), None);
        assert_eq!(clip_span(3, -4, 10), None);
        assert_eq!(clip_span(Coord::MAX, Coord::MAX, 10), None);
    }

    #[test]
    fn test_clip_range_narrows_wide_extents() {
        assert_eq!(clip_range(-40_000, 40_000, 32), Some((0, 32)));
        assert_eq!(clip_range(30_000, 34_999, 32), None);
        assert_eq!(clip_range(5, 4, 32), None);
        assert_eq!(clip_range(31, 31, 32), Some((31, 1)));
        assert_eq!(clip_range(0, 3, 0), None);
    }

    #[test]
    fn test_wide_runs_clip_before_narrowing() {
        let mut grid = PixelGrid::new(8, 8);
        vrun(&mut grid, 70_000, 0, 7, RED);
        hrun(&mut grid, 0, 7, -70_000, RED);
        assert_eq!(grid.writes(), 0);

        hrun(&mut grid, -50_000, 50_000, 3, RED);
        vrun(&mut grid, 2, -50_000, 50_000, RED);
        assert_eq!(grid.row_span(3), Some((0, 7)));
        assert_eq!(grid.count(), 15);
        assert_eq!(grid.off_screen_writes(), 0);
    }

    #[test]
    fn test_hline_clips_at_right_edge() {
        let mut grid = PixelGrid::new(10, 4);
        grid.draw_hline(7, 1, 10, RED);
        assert_eq!(grid.count(), 3);
        assert!(grid.is_set(9, 1));
        assert!(!grid.is_set(6, 1));
    }

    #[test]
    fn test_vline_off_screen_is_noop() {
        let mut grid = PixelGrid::new(10, 4);
        grid.draw_vline(-1, 0, 4, RED);
        grid.draw_vline(10, 0, 4, RED);
        grid.draw_vline(2, 4, 4, RED);
        grid.draw_vline(2, -8, 4, RED);
        assert_eq!(grid.count(), 0);
        assert_eq!(grid.writes(), 0);
    }

    #[test]
    fn test_fill_screen_covers_rotated_area() {
        let mut grid = PixelGrid::new(6, 3);
        grid.set_rotation(crate::geometry::Rotation::Deg90);
        grid.fill_screen(RED);
        assert_eq!(grid.count(), 18);
    }

    #[test]
    fn test_line_endpoints_inclusive() {
        let mut grid = PixelGrid::new(16, 16);
        grid.draw_line(1, 1, 5, 3, RED);
        assert!(grid.is_set(1, 1));
        assert!(grid.is_set(5, 3));
        assert_eq!(grid.count(), 5);
    }

    #[test]
    fn test_single_point_line() {
        let mut grid = PixelGrid::new(4, 4);
        grid.draw_line(2, 2, 2, 2, RED);
        assert_eq!(grid.count(), 1);
    }

    proptest! {
        #[test]
        fn prop_line_is_direction_independent(
            x0 in -20i16..60, y0 in -20i16..60, x1 in -20i16..60, y1 in -20i16..60,
        ) {
            let mut forward = PixelGrid::new(40, 40);
            let mut backward = PixelGrid::new(40, 40);
            forward.draw_line(x0, y0, x1, y1, RED);
            backward.draw_line(x1, y1, x0, y0, RED);
            prop_assert_eq!(forward.pixels(), backward.pixels());
        }

        #[test]
        fn prop_empty_rect_draws_nothing(
            x in -50i16..50, y in -50i16..50, extent in -30i16..30, zero_width: bool,
        ) {
            let mut grid = PixelGrid::new(32, 32);
            let (w, h) = if zero_width { (0, extent) } else { (extent, 0) };
            grid.fill_rect(x, y, w, h, RED);
            fill_rect(&mut grid, x, y, w, h, RED);
            prop_assert_eq!(grid.writes(), 0);
        }

        #[test]
        fn prop_spans_stay_on_screen(
            x in -50i16..50, y in -50i16..50, len in -10i16..80,
        ) {
            let mut grid = PixelGrid::new(24, 16);
            grid.draw_hline(x, y, len, RED);
            grid.draw_vline(x, y, len, RED);
            prop_assert_eq!(grid.off_screen_writes(), 0);
        }
    }
}
