//! Bus-stream decoders for driver tests
//!
//! The panels here replay a recorded [`BusLog`] the way a controller would
//! and keep the resulting frame memory, so tests compare what ends up on
//! the glass instead of byte sequences.

use std::collections::BTreeMap;

use rasterbus_hal::mock::{BusEvent, BusLog, Line, MockPacer, MockPin, MockPort, MockSpi};
use rasterbus_hal::Pacing;

use crate::command::dcs;
use crate::interface::{Parallel8Interface, SpiInterface};

pub const LOG_SIZE: usize = 16384;

pub type Log = BusLog<LOG_SIZE>;

pub type MockSerial<'a> = SpiInterface<
    MockSpi<'a, LOG_SIZE>,
    MockPin<'a, LOG_SIZE>,
    MockPin<'a, LOG_SIZE>,
    MockPacer<'a, LOG_SIZE>,
>;

pub type MockParallel<'a> = Parallel8Interface<
    MockPort<'a, LOG_SIZE>,
    MockPin<'a, LOG_SIZE>,
    MockPin<'a, LOG_SIZE>,
    MockPin<'a, LOG_SIZE>,
>;

pub fn serial(log: &Log, pacing: Pacing) -> MockSerial<'_> {
    SpiInterface::new(
        log.spi(),
        log.pin(Line::Cs),
        log.pin(Line::Dc),
        log.pacer(),
        pacing,
    )
}

pub fn parallel(log: &Log) -> MockParallel<'_> {
    Parallel8Interface::new(
        log.port(),
        log.pin(Line::Cs),
        log.pin(Line::Dc),
        log.pin(Line::Wr),
    )
}

fn recorded(log: &Log) -> Vec<BusEvent> {
    assert_eq!(log.dropped(), 0, "bus log overflow");
    log.events().iter().copied().collect()
}

/// Frame memory of a MIPI DCS controller (CASET/RASET/RAMWR)
#[derive(Default)]
pub struct SerialPanel {
    /// Pixels by controller column and row
    pub pixels: BTreeMap<(u16, u16), u16>,
    /// RAMWR commands seen
    pub windows: usize,
    /// Acquire/release pairs seen
    pub transactions: usize,
    /// Last MADCTL argument
    pub madctl: Option<u8>,
    /// Every command byte in order
    pub commands: Vec<u8>,
}

impl SerialPanel {
    pub fn decode(log: &Log) -> Self {
        let mut panel = Self::default();
        let mut selected = false;
        let mut dc = true;
        let mut cmd = dcs::NOP;
        let mut args: Vec<u8> = Vec::new();
        let (mut cols, mut rows) = ((0u16, 0u16), (0u16, 0u16));
        let mut cursor = (0u16, 0u16);
        let mut half: Option<u8> = None;

        for event in recorded(log) {
            match event {
                BusEvent::Pin(Line::Cs, high) => {
                    assert!(high || !selected, "nested select");
                    if high && selected {
                        panel.transactions += 1;
                    }
                    selected = !high;
                }
                BusEvent::Pin(Line::Dc, high) => dc = high,
                BusEvent::Byte(byte) => {
                    assert!(selected, "byte {byte:#04x} sent while deselected");
                    if !dc {
                        cmd = byte;
                        args.clear();
                        half = None;
                        panel.commands.push(byte);
                        if cmd == dcs::RAMWR {
                            panel.windows += 1;
                            cursor = (cols.0, rows.0);
                        }
                        continue;
                    }
                    if cmd == dcs::RAMWR {
                        let Some(hi) = half.take() else {
                            half = Some(byte);
                            continue;
                        };
                        assert!(cursor.1 <= rows.1, "pixel written past the window");
                        panel
                            .pixels
                            .insert(cursor, u16::from_be_bytes([hi, byte]));
                        cursor.0 += 1;
                        if cursor.0 > cols.1 {
                            cursor = (cols.0, cursor.1 + 1);
                        }
                        continue;
                    }
                    args.push(byte);
                    match (cmd, args.as_slice()) {
                        (dcs::CASET, &[a, b, c, d]) => {
                            cols = (u16::from_be_bytes([a, b]), u16::from_be_bytes([c, d]))
                        }
                        (dcs::RASET, &[a, b, c, d]) => {
                            rows = (u16::from_be_bytes([a, b]), u16::from_be_bytes([c, d]))
                        }
                        (dcs::MADCTL, &[m]) => panel.madctl = Some(m),
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        assert!(!selected, "transaction left open");
        panel
    }

    pub fn count_command(&self, cmd: u8) -> usize {
        self.commands.iter().filter(|c| **c == cmd).count()
    }
}

/// Frame memory of an ST7781-style controller with 16-bit registers
#[derive(Default)]
pub struct ParallelPanel {
    /// Pixels by physical (horizontal, vertical) address
    pub pixels: BTreeMap<(u16, u16), u16>,
    /// Last value written to each register
    pub registers: BTreeMap<u8, u16>,
    /// Register writes in order
    pub writes: Vec<(u8, u16)>,
    pub windows: usize,
}

const ENTRY_MODE: u8 = 0x03;
const HORZ: u8 = 0x20;
const VERT: u8 = 0x21;
const WR_GRAM: u8 = 0x22;

impl ParallelPanel {
    pub fn decode(log: &Log) -> Self {
        let mut panel = Self::default();
        let mut selected = false;
        let mut rs = true;
        let mut index: Vec<u8> = Vec::new();
        let mut reg = 0u8;
        let mut half: Option<u8> = None;
        let (mut h, mut v) = (0u16, 0u16);

        for event in recorded(log) {
            match event {
                BusEvent::Pin(Line::Cs, high) => selected = !high,
                BusEvent::Pin(Line::Dc, high) => {
                    if high && !rs {
                        assert_eq!(index.len(), 2, "register index is two bytes");
                        assert_eq!(index[0], 0x00);
                        reg = index[1];
                        if reg == WR_GRAM {
                            panel.windows += 1;
                            h = panel.reg(HORZ);
                            v = panel.reg(VERT);
                        }
                        half = None;
                    }
                    if !high {
                        index.clear();
                    }
                    rs = high;
                }
                BusEvent::Byte(byte) => {
                    assert!(selected, "byte {byte:#04x} sent while deselected");
                    if !rs {
                        index.push(byte);
                        continue;
                    }
                    let Some(hi) = half.take() else {
                        half = Some(byte);
                        continue;
                    };
                    let word = u16::from_be_bytes([hi, byte]);
                    if reg == WR_GRAM {
                        panel.pixels.insert((h, v), word);
                        (h, v) = panel.advance(h, v);
                    } else {
                        panel.registers.insert(reg, word);
                        panel.writes.push((reg, word));
                    }
                }
                _ => {}
            }
        }
        panel
    }

    pub fn reg(&self, reg: u8) -> u16 {
        self.registers.get(&reg).copied().unwrap_or(0)
    }

    /// Address after one GRAM write, following the entry mode's I/D and AM bits
    fn advance(&self, h: u16, v: u16) -> (u16, u16) {
        let mode = self.reg(ENTRY_MODE);
        let h_inc = mode & 0x10 != 0;
        let v_inc = mode & 0x20 != 0;
        let vertical_first = mode & 0x08 != 0;
        let (hs, he) = (self.reg(0x50), self.reg(0x51));
        let (vs, ve) = (self.reg(0x52), self.reg(0x53));

        let step = |pos: u16, inc: bool, lo: u16, hi: u16| -> (u16, bool) {
            if inc {
                if pos >= hi {
                    (lo, true)
                } else {
                    (pos + 1, false)
                }
            } else if pos <= lo {
                (hi, true)
            } else {
                (pos - 1, false)
            }
        };

        if vertical_first {
            let (v, wrapped) = step(v, v_inc, vs, ve);
            let h = if wrapped { step(h, h_inc, hs, he).0 } else { h };
            (h, v)
        } else {
            let (h, wrapped) = step(h, h_inc, hs, he);
            let v = if wrapped { step(v, v_inc, vs, ve).0 } else { v };
            (h, v)
        }
    }
}
