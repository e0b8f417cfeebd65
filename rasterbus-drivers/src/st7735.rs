//! ST7735 / ST7735R / ST7735S driver
//!
//! 128x160 (or 128x128) 16-bit panels on a 4-wire serial bus. The "tab"
//! color of the protective film identifies the glass: each one needs its own
//! start-up sequence, RAM offset and subpixel order.

use rasterbus_core::{Color565, Coord, Device, Rotation, Viewport};
use rasterbus_hal::spi::{Mode, SpiConfig};
use rasterbus_hal::DelayNs;

use crate::command::{madctl, replay, validate, Step};
use crate::interface::Interface;
use crate::window::{self, RamWindow};

/// ST7735 command set
pub mod reg {
    pub use crate::command::dcs::*;

    /// Frame rate control, normal mode
    pub const FRMCTR1: u8 = 0xB1;
    /// Frame rate control, idle mode
    pub const FRMCTR2: u8 = 0xB2;
    /// Frame rate control, partial mode
    pub const FRMCTR3: u8 = 0xB3;
    /// Display inversion control
    pub const INVCTR: u8 = 0xB4;
    /// Display function setting
    pub const DISSET5: u8 = 0xB6;
    /// Power control 1 (GVDD)
    pub const PWCTR1: u8 = 0xC0;
    /// Power control 2 (VGH/VGL)
    pub const PWCTR2: u8 = 0xC1;
    /// Power control 3, normal mode
    pub const PWCTR3: u8 = 0xC2;
    /// Power control 4, idle mode
    pub const PWCTR4: u8 = 0xC3;
    /// Power control 5, partial mode
    pub const PWCTR5: u8 = 0xC4;
    /// VCOM control
    pub const VMCTR1: u8 = 0xC5;
    /// Positive gamma correction
    pub const GMCTRP1: u8 = 0xE0;
    /// Negative gamma correction
    pub const GMCTRN1: u8 = 0xE1;
    /// Power control 6, ST7735B only
    pub const PWCTR6: u8 = 0xFC;
}

/// Commands the ST7735 datasheets document
pub const DOCUMENTED: &[u8] = &[
    reg::NOP,
    reg::SWRESET,
    reg::SLPIN,
    reg::SLPOUT,
    reg::PTLON,
    reg::NORON,
    reg::INVOFF,
    reg::INVON,
    reg::GAMSET,
    reg::DISPOFF,
    reg::DISPON,
    reg::CASET,
    reg::RASET,
    reg::RAMWR,
    reg::MADCTL,
    reg::COLMOD,
    reg::FRMCTR1,
    reg::FRMCTR2,
    reg::FRMCTR3,
    reg::INVCTR,
    reg::DISSET5,
    reg::PWCTR1,
    reg::PWCTR2,
    reg::PWCTR3,
    reg::PWCTR4,
    reg::PWCTR5,
    reg::VMCTR1,
    reg::GMCTRP1,
    reg::GMCTRN1,
    reg::PWCTR6,
];

/// Serial bus settings the controller accepts (mode 0, up to 8 MHz on the
/// boards this was tuned for)
pub const SPI_CONFIG: SpiConfig = SpiConfig::new(8_000_000, Mode::Mode0);

/// Panel width in native orientation
pub const WIDTH: Coord = 128;
/// Panel height in native orientation (160 rows glass)
pub const HEIGHT: Coord = 160;
/// Panel height of the 1.44" glass
pub const HEIGHT_144: Coord = 128;

/// Panel and controller revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// First-generation ST7735B
    B,
    /// ST7735R/S, green tab, 1.8" glass
    GreenTab,
    /// ST7735R/S, red tab
    RedTab,
    /// ST7735S, black tab (RGB subpixel order)
    BlackTab,
    /// ST7735R, green tab, 1.44" 128x128 glass
    GreenTab144,
}

impl Variant {
    /// Native panel size
    pub const fn size(self) -> (Coord, Coord) {
        match self {
            Variant::GreenTab144 => (WIDTH, HEIGHT_144),
            _ => (WIDTH, HEIGHT),
        }
    }

    /// Column and row of controller RAM that maps to the first visible pixel
    pub const fn offsets(self) -> (Coord, Coord) {
        match self {
            Variant::GreenTab => (2, 1),
            Variant::GreenTab144 => (2, 3),
            _ => (0, 0),
        }
    }

    /// Subpixel order bit for MADCTL
    pub const fn color_order(self) -> u8 {
        match self {
            Variant::BlackTab => madctl::RGB,
            _ => madctl::BGR,
        }
    }
}

const B_INIT: &[Step<'static>] = &[
    Step::Command(reg::SWRESET),
    Step::SleepMs(50),
    Step::Command(reg::SLPOUT),
    Step::SleepMs(500),
    Step::Command(reg::COLMOD),
    Step::Data(&[0x05]), // 16-bit color
    Step::SleepMs(10),
    Step::Command(reg::FRMCTR1),
    Step::Data(&[0x00, 0x06, 0x03]), // fastest refresh, 6 lines front porch, 3 back
    Step::SleepMs(10),
    Step::Command(reg::MADCTL),
    Step::Data(&[0x08]),
    Step::Command(reg::DISSET5),
    Step::Data(&[0x15, 0x02]),
    Step::Command(reg::INVCTR),
    Step::Data(&[0x00]),
    Step::Command(reg::PWCTR1),
    Step::Data(&[0x02, 0x70]), // GVDD = 4.7V, 1.0uA
    Step::SleepMs(10),
    Step::Command(reg::PWCTR2),
    Step::Data(&[0x05]), // VGH = 14.7V, VGL = -7.35V
    Step::Command(reg::PWCTR3),
    Step::Data(&[0x01, 0x02]),
    Step::Command(reg::VMCTR1),
    Step::Data(&[0x3C, 0x38]), // VCOMH = 4V, VCOML = -1.1V
    Step::SleepMs(10),
    Step::Command(reg::PWCTR6),
    Step::Data(&[0x11, 0x15]),
    Step::Command(reg::GMCTRP1),
    Step::Data(&[
        0x09, 0x16, 0x09, 0x20, 0x21, 0x1B, 0x13, 0x19, 0x17, 0x15, 0x1E, 0x2B, 0x04, 0x05, 0x02,
        0x0E,
    ]),
    Step::Command(reg::GMCTRN1),
    Step::Data(&[
        0x0B, 0x14, 0x08, 0x1E, 0x22, 0x1D, 0x18, 0x1E, 0x1B, 0x1A, 0x24, 0x2B, 0x06, 0x06, 0x02,
        0x0F,
    ]),
    Step::SleepMs(10),
    Step::Command(reg::CASET),
    Step::Data(&[0x00, 0x02, 0x00, 0x81]), // columns 2..129
    Step::Command(reg::RASET),
    Step::Data(&[0x00, 0x02, 0x00, 0x81]),
    Step::Command(reg::NORON),
    Step::SleepMs(10),
    Step::Command(reg::DISPON),
    Step::SleepMs(500),
];

const R_INIT1: &[Step<'static>] = &[
    Step::Command(reg::SWRESET),
    Step::SleepMs(150),
    Step::Command(reg::SLPOUT),
    Step::SleepMs(500),
    Step::Command(reg::FRMCTR1),
    Step::Data(&[0x01, 0x2C, 0x2D]), // rate = fosc / (1 * 2 + 40) * (LINE + 2C + 2D)
    Step::Command(reg::FRMCTR2),
    Step::Data(&[0x01, 0x2C, 0x2D]),
    Step::Command(reg::FRMCTR3),
    Step::Data(&[0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D]), // dot inversion, then line inversion
    Step::Command(reg::INVCTR),
    Step::Data(&[0x07]), // no inversion
    Step::Command(reg::PWCTR1),
    Step::Data(&[0xA2, 0x02, 0x84]), // -4.6V, auto mode
    Step::Command(reg::PWCTR2),
    Step::Data(&[0xC5]),
    Step::Command(reg::PWCTR3),
    Step::Data(&[0x0A, 0x00]),
    Step::Command(reg::PWCTR4),
    Step::Data(&[0x8A, 0x2A]),
    Step::Command(reg::PWCTR5),
    Step::Data(&[0x8A, 0xEE]),
    Step::Command(reg::VMCTR1),
    Step::Data(&[0x0E]),
    Step::Command(reg::INVOFF),
    Step::Command(reg::MADCTL),
    Step::Data(&[madctl::MX | madctl::MY | madctl::BGR]),
    Step::Command(reg::COLMOD),
    Step::Data(&[0x05]),
];

const R_INIT2_GREEN: &[Step<'static>] = &[
    Step::Command(reg::CASET),
    Step::Data(&[0x00, 0x02, 0x00, 0x81]),
    Step::Command(reg::RASET),
    Step::Data(&[0x00, 0x01, 0x00, 0xA0]),
];

const R_INIT2_GREEN144: &[Step<'static>] = &[
    Step::Command(reg::CASET),
    Step::Data(&[0x00, 0x00, 0x00, 0x7F]),
    Step::Command(reg::RASET),
    Step::Data(&[0x00, 0x00, 0x00, 0x7F]),
];

const R_INIT2_RED: &[Step<'static>] = &[
    Step::Command(reg::CASET),
    Step::Data(&[0x00, 0x00, 0x00, 0x7F]),
    Step::Command(reg::RASET),
    Step::Data(&[0x00, 0x00, 0x00, 0x9F]),
];

const R_INIT3: &[Step<'static>] = &[
    Step::Command(reg::GMCTRP1),
    Step::Data(&[
        0x0F, 0x1A, 0x0F, 0x18, 0x2F, 0x28, 0x20, 0x22, 0x1F, 0x1B, 0x23, 0x37, 0x00, 0x07, 0x02,
        0x10,
    ]),
    Step::Command(reg::GMCTRN1),
    Step::Data(&[
        0x0F, 0x1B, 0x0F, 0x17, 0x33, 0x2C, 0x29, 0x2E, 0x30, 0x30, 0x39, 0x3F, 0x00, 0x07, 0x03,
        0x10,
    ]),
    Step::Command(reg::NORON),
    Step::SleepMs(10),
    Step::Command(reg::DISPON),
    Step::SleepMs(100),
];

const BLACK_TAB_ORDER: &[Step<'static>] = &[
    Step::Command(reg::MADCTL),
    Step::Data(&[madctl::MX | madctl::MY | madctl::RGB]),
];

const _: () = assert!(validate(B_INIT, DOCUMENTED));
const _: () = assert!(validate(R_INIT1, DOCUMENTED));
const _: () = assert!(validate(R_INIT2_GREEN, DOCUMENTED));
const _: () = assert!(validate(R_INIT2_GREEN144, DOCUMENTED));
const _: () = assert!(validate(R_INIT2_RED, DOCUMENTED));
const _: () = assert!(validate(R_INIT3, DOCUMENTED));
const _: () = assert!(validate(BLACK_TAB_ORDER, DOCUMENTED));

/// ST7735 display
pub struct St7735<I> {
    iface: I,
    variant: Variant,
    viewport: Viewport,
}

impl<I: Interface> St7735<I> {
    pub fn new(iface: I, variant: Variant) -> Self {
        let (width, height) = variant.size();
        Self {
            iface,
            variant,
            viewport: Viewport::new(width, height),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Run the start-up sequence for this variant
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        debug!("st7735: init {}", self.variant);
        let tables: [&[Step<'static>]; 4] = match self.variant {
            Variant::B => [B_INIT, &[], &[], &[]],
            Variant::GreenTab => [R_INIT1, R_INIT2_GREEN, R_INIT3, &[]],
            Variant::GreenTab144 => [R_INIT1, R_INIT2_GREEN144, R_INIT3, &[]],
            Variant::RedTab => [R_INIT1, R_INIT2_RED, R_INIT3, &[]],
            Variant::BlackTab => [R_INIT1, R_INIT2_RED, R_INIT3, BLACK_TAB_ORDER],
        };
        for steps in tables.into_iter().filter(|t| !t.is_empty()) {
            replay(&mut self.iface, delay, steps, false);
        }
    }

    /// Program an address window in logical coordinates, inclusive
    pub fn set_addr_window(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        self.iface.acquire();
        self.program_window(x0, y0, x1, y1);
        self.iface.release();
    }

    /// Write one pixel into the current window
    pub fn push_color(&mut self, color: Color565) {
        self.iface.acquire();
        self.iface.data16_pre_command(color.raw());
        self.iface.release();
    }

    /// Write `count` pixels of one color into the current window
    pub fn push_colors(&mut self, color: Color565, count: u32) {
        self.iface.acquire();
        self.iface.stream16(color.raw(), count);
        self.iface.release();
    }

    /// Give the interface back
    pub fn release(self) -> I {
        self.iface
    }
}

impl<I: Interface> RamWindow for St7735<I> {
    type Bus = I;

    fn bus(&mut self) -> &mut I {
        &mut self.iface
    }

    fn program_window(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        let (col, row) = self.variant.offsets();
        window::program_dcs(
            &mut self.iface,
            (x0 + col) as u16,
            (y0 + row) as u16,
            (x1 + col) as u16,
            (y1 + row) as u16,
        );
    }
}

impl<I: Interface> Device for St7735<I> {
    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn draw_pixel(&mut self, x: Coord, y: Coord, color: Color565) {
        window::pixel(self, x, y, color);
    }

    fn draw_vline(&mut self, x: Coord, y: Coord, h: Coord, color: Color565) {
        window::vline(self, x, y, h, color);
    }

    fn draw_hline(&mut self, x: Coord, y: Coord, w: Coord, color: Color565) {
        window::hline(self, x, y, w, color);
    }

    fn fill_rect(&mut self, x: Coord, y: Coord, w: Coord, h: Coord, color: Color565) {
        window::fill_rect(self, x, y, w, h, color);
    }

    fn fill_screen(&mut self, color: Color565) {
        window::fill_screen(self, color);
    }

    fn draw_line(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord, color: Color565) {
        window::line(self, x0, y0, x1, y1, color);
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        debug!("st7735: rotation {}", rotation);
        self.viewport.set_rotation(rotation);
        let orientation = match rotation {
            Rotation::Deg0 => madctl::MX | madctl::MY,
            Rotation::Deg90 => madctl::MY | madctl::MV,
            Rotation::Deg180 => 0,
            Rotation::Deg270 => madctl::MX | madctl::MV,
        };
        let value = orientation | self.variant.color_order();
        self.iface.acquire();
        self.iface.command(reg::MADCTL);
        self.iface.data(value);
        self.iface.release();
    }

    fn invert_display(&mut self, invert: bool) {
        debug!("st7735: invert {}", invert);
        self.iface.acquire();
        self.iface
            .command(if invert { reg::INVON } else { reg::INVOFF });
        self.iface.release();
    }
}
