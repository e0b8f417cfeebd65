//! `embedded-graphics` interop
//!
//! A [`Canvas`] is a [`DrawTarget`] for `Rgb565`, so any `embedded-graphics`
//! drawable renders through the device's own clipped runs and rectangles.

use core::convert::Infallible;

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{IntoStorage, Rgb565},
    primitives::Rectangle,
    Pixel,
};

use crate::{Canvas, Color565, Coord, Device};

impl From<Rgb565> for Color565 {
    fn from(color: Rgb565) -> Self {
        Color565(color.into_storage())
    }
}

fn coord(v: i32) -> Option<Coord> {
    Coord::try_from(v).ok()
}

impl<D: Device> DrawTarget for Canvas<'_, D> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Some(x), Some(y)) = (coord(point.x), coord(point.y)) {
                self.draw_pixel(x, y, color.into());
            }
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let (Some(x), Some(y)) = (coord(area.top_left.x), coord(area.top_left.y)) else {
            return Ok(());
        };
        let w = Coord::try_from(area.size.width).unwrap_or(0);
        let h = Coord::try_from(area.size.height).unwrap_or(0);
        self.fill_rect(x, y, w, h, color.into());
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color.into());
        Ok(())
    }
}

impl<D: Device> OriginDimensions for Canvas<'_, D> {
    fn size(&self) -> Size {
        Size::new(self.width().max(0) as u32, self.height().max(0) as u32)
    }
}
