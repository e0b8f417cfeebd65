//! Packed RGB565 color

/// 16-bit packed color, 5 bits red, 6 bits green, 5 bits blue
///
/// This is the native pixel format of every supported controller; it is
/// sent on the wire high byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color565(pub u16);

impl Color565 {
    pub const BLACK: Self = Self(0x0000);
    pub const BLUE: Self = Self(0x001F);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const CYAN: Self = Self(0x07FF);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const WHITE: Self = Self(0xFFFF);

    /// Pack 8-bit channels, dropping the low bits of each
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16))
    }

    /// Raw packed value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Wire order (high byte first)
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color565> for u16 {
    fn from(color: Color565) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_primaries() {
        assert_eq!(Color565::new(255, 0, 0), Color565::RED);
        assert_eq!(Color565::new(0, 255, 0), Color565::GREEN);
        assert_eq!(Color565::new(0, 0, 255), Color565::BLUE);
        assert_eq!(Color565::new(255, 255, 255), Color565::WHITE);
    }

    #[test]
    fn test_low_bits_are_dropped() {
        assert_eq!(Color565::new(0x07, 0x03, 0x07), Color565::BLACK);
        assert_eq!(Color565::new(0x08, 0x04, 0x08).raw(), 0x0821);
        assert_eq!(Color565(0xF81F).to_be_bytes(), [0xF8, 0x1F]);
    }
}
