//! Shape rasterization
//!
//! All shapes are expressed in terms of the [`Device`] primitives, so a
//! driver that accelerates runs and rectangles speeds up every shape built
//! on them.

mod bitmap;
mod circle;
pub mod fallback;
mod triangle;

use crate::color::Color565;
use crate::geometry::Coord;
use crate::traits::Device;

/// Corner selectors for [`Shapes::draw_circle_helper`]
pub mod corner {
    pub const TOP_LEFT: u8 = 0x1;
    pub const TOP_RIGHT: u8 = 0x2;
    pub const BOTTOM_RIGHT: u8 = 0x4;
    pub const BOTTOM_LEFT: u8 = 0x8;
}

/// Half selectors for [`Shapes::fill_circle_helper`]
pub mod half {
    pub const RIGHT: u8 = 0x1;
    pub const LEFT: u8 = 0x2;
}

/// Shapes drawn on top of the device primitives
pub trait Shapes: Device {
    /// Rectangle outline
    fn draw_rect(&mut self, x: Coord, y: Coord, w: Coord, h: Coord, color: Color565) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x0, y0) = (i32::from(x), i32::from(y));
        let (x1, y1) = (x0 + i32::from(w) - 1, y0 + i32::from(h) - 1);
        fallback::hrun(self, x0, x1, y0, color);
        fallback::hrun(self, x0, x1, y1, color);
        fallback::vrun(self, x0, y0, y1, color);
        fallback::vrun(self, x1, y0, y1, color);
    }

    /// Midpoint circle outline of radius `r`
    fn draw_circle(&mut self, x0: Coord, y0: Coord, r: Coord, color: Color565) {
        circle::outline(self, x0, y0, r, color);
    }

    /// Quarter arcs selected by a [`corner`] mask
    fn draw_circle_helper(&mut self, x0: Coord, y0: Coord, r: Coord, corners: u8, color: Color565) {
        circle::arcs(self, i32::from(x0), i32::from(y0), r, corners, color);
    }

    fn fill_circle(&mut self, x0: Coord, y0: Coord, r: Coord, color: Color565) {
        if r < 0 {
            return;
        }
        let (cx, cy, r32) = (i32::from(x0), i32::from(y0), i32::from(r));
        fallback::vrun(self, cx, cy - r32, cy + r32, color);
        circle::fill_halves(self, cx, cy, r, half::RIGHT | half::LEFT, 0, color);
    }

    /// Filled half circles selected by a [`half`] mask
    ///
    /// Each vertical run is stretched by `delta` pixels downward, which is
    /// how rounded rectangles merge the corners with their straight middle.
    fn fill_circle_helper(
        &mut self,
        x0: Coord,
        y0: Coord,
        r: Coord,
        halves: u8,
        delta: Coord,
        color: Color565,
    ) {
        let (cx, cy) = (i32::from(x0), i32::from(y0));
        circle::fill_halves(self, cx, cy, r, halves, i32::from(delta), color);
    }

    fn draw_round_rect(&mut self, x: Coord, y: Coord, w: Coord, h: Coord, r: Coord, color: Color565) {
        if w <= 0 || h <= 0 {
            return;
        }
        let radius = r.clamp(0, w.min(h) / 2);
        let (x0, y0, r) = (i32::from(x), i32::from(y), i32::from(radius));
        let (x1, y1) = (x0 + i32::from(w) - 1, y0 + i32::from(h) - 1);
        fallback::hrun(self, x0 + r, x1 - r, y0, color);
        fallback::hrun(self, x0 + r, x1 - r, y1, color);
        fallback::vrun(self, x0, y0 + r, y1 - r, color);
        fallback::vrun(self, x1, y0 + r, y1 - r, color);

        circle::arcs(self, x0 + r, y0 + r, radius, corner::TOP_LEFT, color);
        circle::arcs(self, x1 - r, y0 + r, radius, corner::TOP_RIGHT, color);
        circle::arcs(self, x1 - r, y1 - r, radius, corner::BOTTOM_RIGHT, color);
        circle::arcs(self, x0 + r, y1 - r, radius, corner::BOTTOM_LEFT, color);
    }

    fn fill_round_rect(&mut self, x: Coord, y: Coord, w: Coord, h: Coord, r: Coord, color: Color565) {
        if w <= 0 || h <= 0 {
            return;
        }
        let radius = r.clamp(0, w.min(h) / 2);
        let (x0, y0, r) = (i32::from(x), i32::from(y), i32::from(radius));
        let (x1, y1) = (x0 + i32::from(w) - 1, y0 + i32::from(h) - 1);
        fallback::fill_area(self, x0 + r, y0, x1 - r, y1, color);

        let delta = i32::from(h) - 2 * r - 1;
        circle::fill_halves(self, x1 - r, y0 + r, radius, half::RIGHT, delta, color);
        circle::fill_halves(self, x0 + r, y0 + r, radius, half::LEFT, delta, color);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_triangle(
        &mut self,
        x0: Coord,
        y0: Coord,
        x1: Coord,
        y1: Coord,
        x2: Coord,
        y2: Coord,
        color: Color565,
    ) {
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }

    /// Scanline triangle fill, one horizontal run per row
    #[allow(clippy::too_many_arguments)]
    fn fill_triangle(
        &mut self,
        x0: Coord,
        y0: Coord,
        x1: Coord,
        y1: Coord,
        x2: Coord,
        y2: Coord,
        color: Color565,
    ) {
        triangle::fill(self, [(x0, y0), (x1, y1), (x2, y2)], color);
    }

    /// 1-bit bitmap, MSB first, unset bits left untouched
    fn draw_bitmap(&mut self, x: Coord, y: Coord, bits: &[u8], w: Coord, h: Coord, color: Color565) {
        bitmap::blit(self, x, y, bits, w, h, bitmap::BitOrder::MsbFirst, color, None);
    }

    /// 1-bit bitmap, MSB first, unset bits painted `bg`
    #[allow(clippy::too_many_arguments)]
    fn draw_bitmap_opaque(
        &mut self,
        x: Coord,
        y: Coord,
        bits: &[u8],
        w: Coord,
        h: Coord,
        color: Color565,
        bg: Color565,
    ) {
        bitmap::blit(self, x, y, bits, w, h, bitmap::BitOrder::MsbFirst, color, Some(bg));
    }

    /// 1-bit XBM bitmap, LSB first, unset bits left untouched
    fn draw_xbitmap(&mut self, x: Coord, y: Coord, bits: &[u8], w: Coord, h: Coord, color: Color565) {
        bitmap::blit(self, x, y, bits, w, h, bitmap::BitOrder::LsbFirst, color, None);
    }

    /// 1-bit XBM bitmap, LSB first, unset bits painted `bg`
    #[allow(clippy::too_many_arguments)]
    fn draw_xbitmap_opaque(
        &mut self,
        x: Coord,
        y: Coord,
        bits: &[u8],
        w: Coord,
        h: Coord,
        color: Color565,
        bg: Color565,
    ) {
        bitmap::blit(self, x, y, bits, w, h, bitmap::BitOrder::LsbFirst, color, Some(bg));
    }
}

// Blanket implementation for all Device types
impl<T: Device + ?Sized> Shapes for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::PixelGrid;
    use proptest::prelude::*;

    const FG: Color565 = Color565::WHITE;

    #[test]
    fn test_rect_outline_corners() {
        let mut grid = PixelGrid::new(10, 10);
        grid.draw_rect(1, 2, 4, 3, FG);
        assert_eq!(grid.count(), 10);
        for (x, y) in [(1, 2), (4, 2), (1, 4), (4, 4)] {
            assert!(grid.is_set(x, y));
        }
        assert!(!grid.is_set(2, 3));
    }

    #[test]
    fn test_one_pixel_rect() {
        let mut grid = PixelGrid::new(4, 4);
        grid.draw_rect(1, 1, 1, 1, FG);
        assert_eq!(grid.pixels(), vec![(1, 1)]);
    }

    #[test]
    fn test_round_rect_with_zero_radius_is_rect() {
        let mut round = PixelGrid::new(12, 12);
        let mut plain = PixelGrid::new(12, 12);
        round.draw_round_rect(2, 2, 7, 5, 0, FG);
        plain.draw_rect(2, 2, 7, 5, FG);
        assert_eq!(round.pixels(), plain.pixels());

        let mut round = PixelGrid::new(12, 12);
        let mut plain = PixelGrid::new(12, 12);
        round.fill_round_rect(2, 2, 7, 5, 0, FG);
        plain.fill_rect(2, 2, 7, 5, FG);
        assert_eq!(round.pixels(), plain.pixels());
    }

    #[test]
    fn test_fill_round_rect_skips_corners() {
        let mut grid = PixelGrid::new(20, 20);
        grid.fill_round_rect(0, 0, 12, 10, 3, FG);
        assert!(!grid.is_set(0, 0));
        assert!(!grid.is_set(11, 9));
        assert!(grid.is_set(6, 0));
        assert!(grid.is_set(0, 5));
        assert!(grid.is_set(11, 5));
        assert_eq!(grid.bounds_of(FG), Some((0, 0, 11, 9)));
    }

    #[test]
    fn test_fill_round_rect_covers_outline() {
        let mut outline = PixelGrid::new(30, 30);
        let mut filled = PixelGrid::new(30, 30);
        outline.draw_round_rect(3, 4, 20, 14, 5, FG);
        filled.fill_round_rect(3, 4, 20, 14, 5, FG);
        for p in outline.pixels() {
            assert!(filled.is_set(p.0, p.1), "{:?} missing from fill", p);
        }
    }

    #[test]
    fn test_triangle_outline_hits_vertices() {
        let mut grid = PixelGrid::new(20, 20);
        grid.draw_triangle(1, 1, 15, 3, 7, 12, FG);
        for (x, y) in [(1, 1), (15, 3), (7, 12)] {
            assert!(grid.is_set(x, y));
        }
    }

    #[test]
    fn test_far_rect_keeps_its_visible_edge() {
        let mut grid = PixelGrid::new(32, 32);
        grid.draw_rect(30_000, 0, 5_000, 5, FG);
        assert_eq!(grid.count(), 0);

        grid.draw_rect(-30_000, 2, 30_020, 10, FG);
        assert_eq!(grid.row_span(2), Some((0, 19)));
        assert_eq!(grid.row_span(11), Some((0, 19)));
        assert!(grid.is_set(19, 6));
        assert!(!grid.is_set(0, 6));
        assert_eq!(grid.off_screen_writes(), 0);
    }

    #[test]
    fn test_far_round_rects_clip_cleanly() {
        let mut grid = PixelGrid::new(32, 32);
        grid.draw_round_rect(30_000, 30_000, 5_000, 5_000, 100, FG);
        grid.fill_round_rect(30_000, 30_000, 5_000, 5_000, 100, FG);
        assert_eq!(grid.count(), 0);

        grid.fill_round_rect(-20_000, -20_000, 30_000, 30_000, 20, FG);
        assert_eq!(grid.count(), 32 * 32);

        let mut grid = PixelGrid::new(32, 32);
        grid.draw_round_rect(-20_000, 4, 20_010, 8, 2, FG);
        assert_eq!(grid.row_span(4), Some((0, 8)));
        assert!(grid.is_set(9, 7));
        assert_eq!(grid.off_screen_writes(), 0);
    }

    proptest! {
        #[test]
        fn prop_empty_shapes_draw_nothing(
            x in -20i16..40, y in -20i16..40, extent in -10i16..20, r in 0i16..8,
        ) {
            let mut grid = PixelGrid::new(32, 32);
            grid.draw_rect(x, y, 0, extent, FG);
            grid.draw_rect(x, y, extent, 0, FG);
            grid.draw_round_rect(x, y, 0, extent, r, FG);
            grid.fill_round_rect(x, y, extent, 0, r, FG);
            prop_assert_eq!(grid.writes(), 0);
        }
    }
}
