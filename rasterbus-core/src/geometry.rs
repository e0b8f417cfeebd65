//! Coordinates, orientation and bounds

/// Signed screen coordinate
///
/// Shapes may start or extend off screen; anything outside the viewport is
/// clipped by the driver.
pub type Coord = i16;

/// Panel orientation in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Native portrait
    #[default]
    Deg0,
    /// Landscape
    Deg90,
    /// Portrait, upside down
    Deg180,
    /// Landscape, upside down
    Deg270,
}

impl Rotation {
    /// Rotation from a quarter-turn count; only the low two bits are used
    pub const fn from_index(index: u8) -> Self {
        match index & 3 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// Quarter-turn count (0-3)
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// True when logical width and height are swapped relative to the panel
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Raw panel size plus the logical size seen through the current rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Viewport {
    raw_width: Coord,
    raw_height: Coord,
    rotation: Rotation,
    width: Coord,
    height: Coord,
}

impl Viewport {
    /// Viewport of a `width` x `height` panel in its native orientation
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self {
            raw_width: width,
            raw_height: height,
            rotation: Rotation::Deg0,
            width,
            height,
        }
    }

    /// Change rotation and recompute the logical size
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        if rotation.swaps_axes() {
            self.width = self.raw_height;
            self.height = self.raw_width;
        } else {
            self.width = self.raw_width;
            self.height = self.raw_height;
        }
    }

    /// Logical width under the current rotation
    pub const fn width(&self) -> Coord {
        self.width
    }

    /// Logical height under the current rotation
    pub const fn height(&self) -> Coord {
        self.height
    }

    /// Panel width in native orientation
    pub const fn raw_width(&self) -> Coord {
        self.raw_width
    }

    /// Panel height in native orientation
    pub const fn raw_height(&self) -> Coord {
        self.raw_height
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Check if a logical coordinate is on screen
    pub const fn contains(&self, x: Coord, y: Coord) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

/// Smallest rectangle enclosing some rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextBounds {
    pub x: Coord,
    pub y: Coord,
    pub width: u16,
    pub height: u16,
}

impl TextBounds {
    /// True when nothing would be drawn
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_index_masks() {
        assert_eq!(Rotation::from_index(0), Rotation::Deg0);
        assert_eq!(Rotation::from_index(5), Rotation::Deg90);
        assert_eq!(Rotation::from_index(7).index(), 3);
    }

    #[test]
    fn test_viewport_rotation_swaps_size() {
        let mut vp = Viewport::new(128, 160);
        vp.set_rotation(Rotation::Deg90);
        assert_eq!((vp.width(), vp.height()), (160, 128));
        vp.set_rotation(Rotation::Deg180);
        assert_eq!((vp.width(), vp.height()), (128, 160));
        vp.set_rotation(Rotation::Deg270);
        assert_eq!((vp.width(), vp.height()), (160, 128));
        assert_eq!((vp.raw_width(), vp.raw_height()), (128, 160));
    }

    #[test]
    fn test_viewport_contains() {
        let vp = Viewport::new(10, 20);
        assert!(vp.contains(0, 0));
        assert!(vp.contains(9, 19));
        assert!(!vp.contains(10, 0));
        assert!(!vp.contains(0, -1));
    }
}
