//! Controller start-up sequences
//!
//! A start-up sequence is a constant slice of [`Step`]s replayed once by
//! [`replay`]. The replay loop streams bytes and sleeps; it never interprets
//! a command. Every shipped table is checked at compile time by
//! [`validate`] against the list of commands its controller documents.

use rasterbus_hal::DelayNs;

use crate::interface::Interface;

/// MIPI DCS command codes common to the serial controllers
pub mod dcs {
    /// No operation
    pub const NOP: u8 = 0x00;
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Enter sleep mode
    pub const SLPIN: u8 = 0x10;
    /// Exit sleep mode
    pub const SLPOUT: u8 = 0x11;
    /// Partial mode on
    pub const PTLON: u8 = 0x12;
    /// Normal display mode on
    pub const NORON: u8 = 0x13;
    /// Display inversion off
    pub const INVOFF: u8 = 0x20;
    /// Display inversion on
    pub const INVON: u8 = 0x21;
    /// Gamma curve select
    pub const GAMSET: u8 = 0x26;
    /// Display off
    pub const DISPOFF: u8 = 0x28;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Row (page) address set
    pub const RASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory access control
    pub const MADCTL: u8 = 0x36;
    /// Interface pixel format
    pub const COLMOD: u8 = 0x3A;
}

/// Bits of the [`dcs::MADCTL`] argument
pub mod madctl {
    /// Row address order (mirror Y)
    pub const MY: u8 = 0x80;
    /// Column address order (mirror X)
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// Vertical refresh order
    pub const ML: u8 = 0x10;
    /// Blue-green-red subpixel order
    pub const BGR: u8 = 0x08;
    /// Red-green-blue subpixel order
    pub const RGB: u8 = 0x00;
    /// Horizontal refresh order
    pub const MH: u8 = 0x04;
}

/// One element of a start-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Command byte or register index
    Command(u8),
    /// Argument bytes for the preceding command
    Data(&'a [u8]),
    /// 16-bit register value for the preceding command, high byte first
    Word(u16),
    /// Sleep before the next step
    SleepMs(u16),
}

/// Stream `steps` to the controller
///
/// The sequence runs as one transaction. With `release_during_sleep` the bus
/// is released for every sleep and acquired again afterwards, for buses
/// whose lines are shared with other peripherals.
pub fn replay<I, D>(iface: &mut I, delay: &mut D, steps: &[Step<'_>], release_during_sleep: bool)
where
    I: Interface + ?Sized,
    D: DelayNs + ?Sized,
{
    trace!("replay: {} steps", steps.len());
    iface.acquire();
    for step in steps {
        match *step {
            Step::Command(cmd) => iface.command(cmd),
            Step::Data(bytes) => {
                for &byte in bytes {
                    iface.data(byte);
                }
            }
            Step::Word(word) => iface.data16(word),
            Step::SleepMs(ms) => {
                if release_during_sleep {
                    iface.release();
                    delay.delay_ms(u32::from(ms));
                    iface.acquire();
                } else {
                    delay.delay_ms(u32::from(ms));
                }
            }
        }
    }
    iface.release();
}

/// Check a sequence against the commands a controller documents
///
/// Fails on a command missing from `documented`, on arguments that do not
/// follow a command (a sleep ends the argument list) and on empty argument
/// slices.
pub const fn validate(steps: &[Step<'_>], documented: &[u8]) -> bool {
    let mut open = false;
    let mut i = 0;
    while i < steps.len() {
        match steps[i] {
            Step::Command(cmd) => {
                if !contains(documented, cmd) {
                    return false;
                }
                open = true;
            }
            Step::Data(bytes) => {
                if !open || bytes.is_empty() {
                    return false;
                }
            }
            Step::Word(_) => {
                if !open {
                    return false;
                }
            }
            Step::SleepMs(_) => open = false,
        }
        i += 1;
    }
    true
}

const fn contains(set: &[u8], value: u8) -> bool {
    let mut i = 0;
    while i < set.len() {
        if set[i] == value {
            return true;
        }
        i += 1;
    }
    false
}
