//! Device binding contract

use crate::color::Color565;
use crate::geometry::{Coord, Rotation, Viewport};
use crate::raster::fallback;

/// A pixel-addressable display
///
/// The only mandatory drawing primitive is [`draw_pixel`](Device::draw_pixel),
/// which must clip to the rotated viewport. Every other primitive has a
/// generic default built on top of it; a driver with a faster way to fill a
/// run (a single address window, say) overrides it. An override must draw
/// exactly the pixels the default draws:
///
/// - the start coordinate is inclusive
/// - a length or extent `<= 0` draws nothing
/// - nothing outside `[0, width) x [0, height)` is touched
///
/// All rasterizer and font code is generic over `D: Device`, so overrides
/// are resolved at compile time.
pub trait Device {
    /// Raw and rotated panel size
    fn viewport(&self) -> &Viewport;

    fn viewport_mut(&mut self) -> &mut Viewport;

    /// Plot one pixel, ignoring coordinates outside the viewport
    fn draw_pixel(&mut self, x: Coord, y: Coord, color: Color565);

    /// Vertical run of `h` pixels starting at `(x, y)`
    fn draw_vline(&mut self, x: Coord, y: Coord, h: Coord, color: Color565) {
        fallback::draw_vline(self, x, y, h, color);
    }

    /// Horizontal run of `w` pixels starting at `(x, y)`
    fn draw_hline(&mut self, x: Coord, y: Coord, w: Coord, color: Color565) {
        fallback::draw_hline(self, x, y, w, color);
    }

    fn fill_rect(&mut self, x: Coord, y: Coord, w: Coord, h: Coord, color: Color565) {
        fallback::fill_rect(self, x, y, w, h, color);
    }

    fn fill_screen(&mut self, color: Color565) {
        fallback::fill_screen(self, color);
    }

    /// Line between two inclusive endpoints
    fn draw_line(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord, color: Color565) {
        fallback::draw_line(self, x0, y0, x1, y1, color);
    }

    /// Change orientation
    ///
    /// The default only remaps the logical size. Drivers also reprogram the
    /// controller so that later address windows land where expected.
    fn set_rotation(&mut self, rotation: Rotation) {
        self.viewport_mut().set_rotation(rotation);
    }

    /// Hardware color inversion (no-op unless supported)
    fn invert_display(&mut self, _invert: bool) {}

    /// Logical width under the current rotation
    fn width(&self) -> Coord {
        self.viewport().width()
    }

    /// Logical height under the current rotation
    fn height(&self) -> Coord {
        self.viewport().height()
    }

    fn rotation(&self) -> Rotation {
        self.viewport().rotation()
    }
}

impl<T: Device + ?Sized> Device for &mut T {
    fn viewport(&self) -> &Viewport {
        T::viewport(self)
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        T::viewport_mut(self)
    }

    fn draw_pixel(&mut self, x: Coord, y: Coord, color: Color565) {
        T::draw_pixel(self, x, y, color)
    }

    fn draw_vline(&mut self, x: Coord, y: Coord, h: Coord, color: Color565) {
        T::draw_vline(self, x, y, h, color)
    }

    fn draw_hline(&mut self, x: Coord, y: Coord, w: Coord, color: Color565) {
        T::draw_hline(self, x, y, w, color)
    }

    fn fill_rect(&mut self, x: Coord, y: Coord, w: Coord, h: Coord, color: Color565) {
        T::fill_rect(self, x, y, w, h, color)
    }

    fn fill_screen(&mut self, color: Color565) {
        T::fill_screen(self, color)
    }

    fn draw_line(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord, color: Color565) {
        T::draw_line(self, x0, y0, x1, y1, color)
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        T::set_rotation(self, rotation)
    }

    fn invert_display(&mut self, invert: bool) {
        T::invert_display(self, invert)
    }
}
