//! ILI9340 / ILI9341 driver
//!
//! 240x320 16-bit panels on a 4-wire serial bus. The two parts share the
//! command set used here, so [`Ili9341`] is the same driver.

use rasterbus_core::{Color565, Coord, Device, Rotation, Viewport};
use rasterbus_hal::spi::{Mode, SpiConfig};
use rasterbus_hal::DelayNs;

use crate::command::{madctl, replay, validate, Step};
use crate::interface::Interface;
use crate::window::{self, RamWindow};

/// ILI9340 command set
pub mod reg {
    pub use crate::command::dcs::*;

    /// Page address set (DCS row address set)
    pub const PASET: u8 = RASET;
    /// Pixel format set (DCS COLMOD)
    pub const PIXFMT: u8 = COLMOD;
    /// Gamma set (DCS GAMSET)
    pub const GAMMASET: u8 = GAMSET;
    /// Frame rate control, normal mode
    pub const FRMCTR1: u8 = 0xB1;
    /// Display function control
    pub const DFUNCTR: u8 = 0xB6;
    /// Power control 1
    pub const PWCTR1: u8 = 0xC0;
    /// Power control 2
    pub const PWCTR2: u8 = 0xC1;
    /// VCOM control 1
    pub const VMCTR1: u8 = 0xC5;
    /// VCOM control 2
    pub const VMCTR2: u8 = 0xC7;
    /// Power control A
    pub const PWCTRA: u8 = 0xCB;
    /// Power control B
    pub const PWCTRB: u8 = 0xCF;
    /// Positive gamma correction
    pub const GMCTRP1: u8 = 0xE0;
    /// Negative gamma correction
    pub const GMCTRN1: u8 = 0xE1;
    /// Driver timing control A
    pub const DTCTRA: u8 = 0xE8;
    /// Driver timing control B
    pub const DTCTRB: u8 = 0xEA;
    /// Power on sequence control
    pub const PWSEQ: u8 = 0xED;
    /// Enable 3-gamma control
    pub const EN3G: u8 = 0xF2;
    /// Pump ratio control
    pub const PUMPRC: u8 = 0xF7;
}

/// Commands the ILI9340/ILI9341 datasheets document
pub const DOCUMENTED: &[u8] = &[
    reg::NOP,
    reg::SWRESET,
    reg::SLPIN,
    reg::SLPOUT,
    reg::PTLON,
    reg::NORON,
    reg::INVOFF,
    reg::INVON,
    reg::GAMMASET,
    reg::DISPOFF,
    reg::DISPON,
    reg::CASET,
    reg::PASET,
    reg::RAMWR,
    reg::MADCTL,
    reg::PIXFMT,
    reg::FRMCTR1,
    reg::DFUNCTR,
    reg::PWCTR1,
    reg::PWCTR2,
    reg::VMCTR1,
    reg::VMCTR2,
    reg::PWCTRA,
    reg::PWCTRB,
    reg::GMCTRP1,
    reg::GMCTRN1,
    reg::DTCTRA,
    reg::DTCTRB,
    reg::PWSEQ,
    reg::EN3G,
    reg::PUMPRC,
];

pub const SPI_CONFIG: SpiConfig = SpiConfig::new(8_000_000, Mode::Mode0);

pub const WIDTH: Coord = 240;
pub const HEIGHT: Coord = 320;

const INIT: &[Step<'static>] = &[
    Step::Command(reg::SWRESET),
    Step::SleepMs(5),
    Step::Command(reg::PWCTRB),
    Step::Data(&[0x00, 0xC1, 0x30]),
    Step::Command(reg::PWSEQ),
    Step::Data(&[0x64, 0x03, 0x12, 0x81]),
    Step::Command(reg::DTCTRA),
    Step::Data(&[0x85, 0x00, 0x78]),
    Step::Command(reg::PWCTRA),
    Step::Data(&[0x39, 0x2C, 0x00, 0x34, 0x02]),
    Step::Command(reg::PUMPRC),
    Step::Data(&[0x20]),
    Step::Command(reg::DTCTRB),
    Step::Data(&[0x00, 0x00]),
    Step::Command(reg::PWCTR1),
    Step::Data(&[0x23]), // VRH = 4.6V
    Step::Command(reg::PWCTR2),
    Step::Data(&[0x10]), // SAP, BT
    Step::Command(reg::VMCTR1),
    Step::Data(&[0x3E, 0x28]),
    Step::Command(reg::VMCTR2),
    Step::Data(&[0x86]),
    Step::Command(reg::MADCTL),
    Step::Data(&[madctl::MX | madctl::BGR]),
    Step::Command(reg::PIXFMT),
    Step::Data(&[0x55]), // 16 bits per pixel
    Step::Command(reg::FRMCTR1),
    Step::Data(&[0x00, 0x18]),
    Step::Command(reg::DFUNCTR),
    Step::Data(&[0x08, 0x82, 0x27]),
    Step::Command(reg::EN3G),
    Step::Data(&[0x00]), // 3-gamma off
    Step::Command(reg::GAMMASET),
    Step::Data(&[0x01]),
    Step::Command(reg::GMCTRP1),
    Step::Data(&[
        0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09, 0x00,
    ]),
    Step::Command(reg::GMCTRN1),
    Step::Data(&[
        0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36, 0x0F,
    ]),
    Step::Command(reg::SLPOUT),
    Step::SleepMs(120),
    Step::Command(reg::DISPON),
];

const _: () = assert!(validate(INIT, DOCUMENTED));

/// ILI9340 display
pub struct Ili9340<I> {
    iface: I,
    viewport: Viewport,
}

/// The ILI9341 is driven identically
pub type Ili9341<I> = Ili9340<I>;

impl<I: Interface> Ili9340<I> {
    pub const fn new(iface: I) -> Self {
        Self {
            iface,
            viewport: Viewport::new(WIDTH, HEIGHT),
        }
    }

    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        debug!("ili9340: init");
        replay(&mut self.iface, delay, INIT, false);
    }

    pub fn set_addr_window(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        self.iface.acquire();
        self.program_window(x0, y0, x1, y1);
        self.iface.release();
    }

    pub fn push_color(&mut self, color: Color565) {
        self.iface.acquire();
        self.iface.data16_pre_command(color.raw());
        self.iface.release();
    }

    pub fn push_colors(&mut self, color: Color565, count: u32) {
        self.iface.acquire();
        self.iface.stream16(color.raw(), count);
        self.iface.release();
    }

    pub fn release(self) -> I {
        self.iface
    }
}

impl<I: Interface> RamWindow for Ili9340<I> {
    type Bus = I;

    fn bus(&mut self) -> &mut I {
        &mut self.iface
    }

    fn program_window(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        window::program_dcs(&mut self.iface, x0 as u16, y0 as u16, x1 as u16, y1 as u16);
    }
}

impl<I: Interface> Device for Ili9340<I> {
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
        debug!("ili9340: rotation {}", rotation);
        self.viewport.set_rotation(rotation);
        let value = match rotation {
            Rotation::Deg0 => madctl::MX | madctl::BGR,
            Rotation::Deg90 => madctl::MV | madctl::BGR,
            Rotation::Deg180 => madctl::MY | madctl::BGR,
            Rotation::Deg270 => madctl::MV | madctl::MY | madctl::MX | madctl::BGR,
        };
        self.iface.acquire();
        self.iface.command(reg::MADCTL);
        self.iface.data(value);
        self.iface.release();
    }

    fn invert_display(&mut self, invert: bool) {
        debug!("ili9340: invert {}", invert);
        self.iface.acquire();
        self.iface
            .command(if invert { reg::INVON } else { reg::INVOFF });
        self.iface.release();
    }
}
