//! In-memory device for rasterizer tests

use std::collections::BTreeMap;

use crate::color::Color565;
use crate::geometry::{Coord, Viewport};
use crate::traits::Device;

/// Records every plotted pixel, keyed by logical coordinate
pub struct PixelGrid {
    viewport: Viewport,
    pixels: BTreeMap<(Coord, Coord), Color565>,
    writes: usize,
    off_screen: usize,
}

impl PixelGrid {
    pub fn new(width: Coord, height: Coord) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            pixels: BTreeMap::new(),
            writes: 0,
            off_screen: 0,
        }
    }

    pub fn is_set(&self, x: Coord, y: Coord) -> bool {
        self.pixels.contains_key(&(x, y))
    }

    pub fn color_at(&self, x: Coord, y: Coord) -> Option<Color565> {
        self.pixels.get(&(x, y)).copied()
    }

    /// Distinct pixels written
    pub fn count(&self) -> usize {
        self.pixels.len()
    }

    /// Total `draw_pixel` calls
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn off_screen_writes(&self) -> usize {
        self.off_screen
    }

    pub fn pixels(&self) -> Vec<(Coord, Coord)> {
        self.pixels.keys().copied().collect()
    }

    /// Pixels of one color
    pub fn pixels_of(&self, color: Color565) -> Vec<(Coord, Coord)> {
        self.pixels
            .iter()
            .filter(|(_, c)| **c == color)
            .map(|(p, _)| *p)
            .collect()
    }

    /// Inclusive x range of the pixels set in row `y`
    pub fn row_span(&self, y: Coord) -> Option<(Coord, Coord)> {
        let xs = self.pixels.keys().filter(|(_, py)| *py == y).map(|(x, _)| *x);
        let (mut lo, mut hi) = (Coord::MAX, Coord::MIN);
        let mut any = false;
        for x in xs {
            lo = lo.min(x);
            hi = hi.max(x);
            any = true;
        }
        any.then_some((lo, hi))
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of pixels of `color`
    pub fn bounds_of(&self, color: Color565) -> Option<(Coord, Coord, Coord, Coord)> {
        let pts = self.pixels_of(color);
        let first = *pts.first()?;
        Some(pts.iter().fold(
            (first.0, first.1, first.0, first.1),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        ))
    }
}

impl Device for PixelGrid {
    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn draw_pixel(&mut self, x: Coord, y: Coord, color: Color565) {
        self.writes += 1;
        if !self.viewport.contains(x, y) {
            self.off_screen += 1;
            return;
        }
        self.pixels.insert((x, y), color);
    }
}
