//! ST7781 driver
//!
//! 240x320 panel on an 8-bit parallel bus with 16-bit registers. The
//! controller has no orientation register for writes, so rotation is done
//! in software: the entry mode picks the address increment direction and
//! every window is mapped from logical to physical corners before it is
//! programmed.

use rasterbus_core::{Color565, Coord, Device, Rotation, Viewport};
use rasterbus_hal::DelayNs;

use crate::command::{replay, validate, Step};
use crate::interface::Interface;
use crate::window::{self, RamWindow};

/// ST7781 registers
pub mod reg {
    /// Driver code read
    pub const DRIVER_CODE: u8 = 0x00;
    /// Driver output control
    pub const DRIVER_OUTPUT: u8 = 0x01;
    /// LCD driving wave control
    pub const DRIVING_WAVE: u8 = 0x02;
    /// Entry mode: address increment direction and order
    pub const ENTRY_MODE: u8 = 0x03;
    /// Resize control
    pub const RESIZE: u8 = 0x04;
    /// Display control 1
    pub const DISPLAY_CTRL1: u8 = 0x07;
    /// Display control 2 (porches)
    pub const DISPLAY_CTRL2: u8 = 0x08;
    /// Display control 3
    pub const DISPLAY_CTRL3: u8 = 0x09;
    /// Display control 4
    pub const DISPLAY_CTRL4: u8 = 0x0A;
    /// RGB interface control 1
    pub const RGB_CTRL1: u8 = 0x0C;
    /// Frame marker position
    pub const FRAME_MARKER: u8 = 0x0D;
    /// RGB interface control 2
    pub const RGB_CTRL2: u8 = 0x0F;
    /// Power control 1
    pub const POWER_CTRL1: u8 = 0x10;
    /// GRAM horizontal address
    pub const HORZ: u8 = 0x20;
    /// GRAM vertical address
    pub const VERT: u8 = 0x21;
    /// Write to GRAM
    pub const WR_GRAM: u8 = 0x22;
    pub const GAMMA_01: u8 = 0x30;
    pub const GAMMA_02: u8 = 0x31;
    pub const GAMMA_03: u8 = 0x32;
    pub const GAMMA_04: u8 = 0x35;
    pub const GAMMA_05: u8 = 0x36;
    pub const GAMMA_06: u8 = 0x37;
    pub const GAMMA_07: u8 = 0x38;
    pub const GAMMA_08: u8 = 0x39;
    pub const GAMMA_09: u8 = 0x3C;
    pub const GAMMA_10: u8 = 0x3D;
    /// Window horizontal start
    pub const HSTRT: u8 = 0x50;
    /// Window horizontal end
    pub const HEND: u8 = 0x51;
    /// Window vertical start
    pub const VSTRT: u8 = 0x52;
    /// Window vertical end
    pub const VEND: u8 = 0x53;
    /// Gate scan control
    pub const GATE_SCAN: u8 = 0x60;
    /// Base image display control
    pub const BASE_IMAGE: u8 = 0x61;
    /// Vertical scroll control
    pub const VSCROLL: u8 = 0x6A;
    /// Partial image 1 display position
    pub const PIMG1_POS: u8 = 0x80;
    /// Partial image 1 start line
    pub const PIMG1_BEG: u8 = 0x81;
    /// Partial image 1 end line
    pub const PIMG1_END: u8 = 0x82;
    /// Partial image 2 display position
    pub const PIMG2_POS: u8 = 0x83;
    /// Partial image 2 start line
    pub const PIMG2_BEG: u8 = 0x84;
    /// Partial image 2 end line
    pub const PIMG2_END: u8 = 0x85;
    /// Panel interface control 1
    pub const PANEL_CTRL1: u8 = 0x90;
    /// Panel interface control 2
    pub const PANEL_CTRL2: u8 = 0x95;
    /// Power control 2
    pub const POWER_CTRL2: u8 = 0xB0;
    /// NVM command enable
    pub const NVM_CMD_ENABLE: u8 = 0xFF;
}

/// Registers the ST7781 datasheet documents
pub const DOCUMENTED: &[u8] = &[
    reg::DRIVER_CODE,
    reg::DRIVER_OUTPUT,
    reg::DRIVING_WAVE,
    reg::ENTRY_MODE,
    reg::RESIZE,
    reg::DISPLAY_CTRL1,
    reg::DISPLAY_CTRL2,
    reg::DISPLAY_CTRL3,
    reg::DISPLAY_CTRL4,
    reg::RGB_CTRL1,
    reg::FRAME_MARKER,
    reg::RGB_CTRL2,
    reg::POWER_CTRL1,
    reg::HORZ,
    reg::VERT,
    reg::WR_GRAM,
    reg::GAMMA_01,
    reg::GAMMA_02,
    reg::GAMMA_03,
    reg::GAMMA_04,
    reg::GAMMA_05,
    reg::GAMMA_06,
    reg::GAMMA_07,
    reg::GAMMA_08,
    reg::GAMMA_09,
    reg::GAMMA_10,
    reg::HSTRT,
    reg::HEND,
    reg::VSTRT,
    reg::VEND,
    reg::GATE_SCAN,
    reg::BASE_IMAGE,
    reg::VSCROLL,
    reg::PIMG1_POS,
    reg::PIMG1_BEG,
    reg::PIMG1_END,
    reg::PIMG2_POS,
    reg::PIMG2_BEG,
    reg::PIMG2_END,
    reg::PANEL_CTRL1,
    reg::PANEL_CTRL2,
    reg::POWER_CTRL2,
    reg::NVM_CMD_ENABLE,
];

pub const WIDTH: Coord = 240;
pub const HEIGHT: Coord = 320;

/// Entry mode: horizontal address increments
const ID0: u16 = 0x10;
/// Entry mode: vertical address increments
const ID1: u16 = 0x20;
/// Entry mode: vertical address moves first
const AM: u16 = 0x08;
/// Entry mode: BGR subpixel order
const BGR: u16 = 0x1000;

const fn write(reg: u8, value: u16) -> [Step<'static>; 2] {
    [Step::Command(reg), Step::Word(value)]
}

const INIT: &[Step<'static>] = &{
    use reg::*;
    let t = [
        write(DRIVER_OUTPUT, 0x0100),
        write(DRIVING_WAVE, 0x0700),
        write(ENTRY_MODE, BGR | ID1 | ID0),
        write(RESIZE, 0x0000),
        write(DISPLAY_CTRL2, 0x0302),
        write(DISPLAY_CTRL4, 0x0000),
        write(RGB_CTRL1, 0x0000),
        write(FRAME_MARKER, 0x0000),
        write(RGB_CTRL2, 0x0000),
        write(GAMMA_01, 0x0000),
        write(GAMMA_02, 0x0405),
        write(GAMMA_03, 0x0203),
        write(GAMMA_04, 0x0004),
        write(GAMMA_05, 0x0B07),
        write(GAMMA_06, 0x0000),
        write(GAMMA_07, 0x0405),
        write(GAMMA_08, 0x0203),
        write(GAMMA_09, 0x0004),
        write(GAMMA_10, 0x0B07),
        write(HORZ, 0x0000),
        write(VERT, 0x0000),
        write(HSTRT, 0x0000),
        write(HEND, 0x00EF),
        write(VSTRT, 0x0000),
        write(VEND, 0x013F),
        write(GATE_SCAN, 0xA700),
        write(BASE_IMAGE, 0x0001),
        write(PANEL_CTRL1, 0x003A),
        write(PANEL_CTRL2, 0x021E),
        write(PIMG1_POS, 0x0000),
        write(PIMG1_BEG, 0x0000),
        write(PIMG1_END, 0x0000),
        write(PIMG2_POS, 0x0000),
        write(PIMG2_BEG, 0x0000),
        write(PIMG2_END, 0x0000),
        write(NVM_CMD_ENABLE, 0x0001),
        write(POWER_CTRL2, 0x140D),
        write(NVM_CMD_ENABLE, 0x0000),
        write(DISPLAY_CTRL1, 0x0133),
        write(POWER_CTRL1, 0x14E0),
        write(DISPLAY_CTRL1, 0x0133),
    ];
    // Sleeps go after these writes (index into `t`, milliseconds)
    let sleeps: [(usize, u16); 5] = [(8, 100), (24, 100), (37, 100), (38, 50), (39, 100)];

    let mut out = [Step::SleepMs(0); 2 * 41 + 5];
    let (mut i, mut o, mut s) = (0, 0, 0);
    while i < t.len() {
        out[o] = t[i][0];
        out[o + 1] = t[i][1];
        o += 2;
        if s < sleeps.len() && sleeps[s].0 == i {
            out[o] = Step::SleepMs(sleeps[s].1);
            o += 1;
            s += 1;
        }
        i += 1;
    }
    out
};

const _: () = assert!(validate(INIT, DOCUMENTED));

/// Entry mode for each rotation, with BGR order
const fn entry_mode(rotation: Rotation) -> u16 {
    let id_am = match rotation {
        Rotation::Deg0 => ID1 | ID0,
        Rotation::Deg90 => ID1 | AM,
        Rotation::Deg180 => 0,
        Rotation::Deg270 => ID0 | AM,
    };
    BGR | id_am
}

/// Physical window and start address for a logical rectangle
///
/// Returns `(h0, h1, v0, v1, h, v)` for the inclusive logical corners
/// `(x0, y0)` and `(x1, y1)`; `(h, v)` is where logical `(x0, y0)` lands.
pub(crate) const fn map_window(
    rotation: Rotation,
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
) -> (u16, u16, u16, u16, u16, u16) {
    const W: u16 = WIDTH as u16 - 1;
    const H: u16 = HEIGHT as u16 - 1;
    match rotation {
        Rotation::Deg0 => (x0, x1, y0, y1, x0, y0),
        Rotation::Deg90 => (W - y1, W - y0, x0, x1, W - y0, x0),
        Rotation::Deg180 => (W - x1, W - x0, H - y1, H - y0, W - x0, H - y0),
        Rotation::Deg270 => (y0, y1, H - x1, H - x0, y0, H - x0),
    }
}

/// ST7781 display
pub struct St7781<I> {
    iface: I,
    viewport: Viewport,
}

impl<I: Interface> St7781<I> {
    pub const fn new(iface: I) -> Self {
        Self {
            iface,
            viewport: Viewport::new(WIDTH, HEIGHT),
        }
    }

    /// Program the registers, clear to black and apply the current rotation
    ///
    /// The bus is released during every sleep.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        debug!("st7781: init");
        replay(&mut self.iface, delay, INIT, true);
        self.fill_screen(Color565::BLACK);
        let rotation = self.viewport.rotation();
        self.set_rotation(rotation);
    }

    pub fn set_addr_window(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        self.iface.acquire();
        self.program_window(x0, y0, x1, y1);
        self.iface.release();
    }

    pub fn push_color(&mut self, color: Color565) {
        self.iface.acquire();
        self.iface.data16(color.raw());
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

    fn write_register(&mut self, reg: u8, value: u16) {
        self.iface.command(reg);
        self.iface.data16(value);
    }
}

impl<I: Interface> RamWindow for St7781<I> {
    type Bus = I;

    fn bus(&mut self) -> &mut I {
        &mut self.iface
    }

    fn program_window(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        let (h0, h1, v0, v1, h, v) = map_window(
            self.viewport.rotation(),
            x0 as u16,
            y0 as u16,
            x1 as u16,
            y1 as u16,
        );
        self.write_register(reg::HSTRT, h0);
        self.write_register(reg::HEND, h1);
        self.write_register(reg::VSTRT, v0);
        self.write_register(reg::VEND, v1);
        self.write_register(reg::HORZ, h);
        self.write_register(reg::VERT, v);
        self.iface.command(reg::WR_GRAM);
    }
}

impl<I: Interface> Device for St7781<I> {
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
        debug!("st7781: rotation {}", rotation);
        self.viewport.set_rotation(rotation);
        let (w, h) = (self.width(), self.height());
        self.iface.acquire();
        self.write_register(reg::ENTRY_MODE, entry_mode(rotation));
        self.program_window(0, 0, w - 1, h - 1);
        self.iface.release();
    }
}
