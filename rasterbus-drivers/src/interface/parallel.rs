//! 8-bit parallel (8080-style) interface

use rasterbus_hal::{DataPort, OutputPin};

use super::Interface;

/// 8 data lines with select, register-select and write strobe
///
/// Controllers on this bus use 16-bit registers: a command is the register
/// index sent as two bytes (`0x00`, index) with RS low, data words are sent
/// high byte first. Every byte is latched by a WR low-to-high strobe, which
/// is slow enough that no extra pacing is needed.
pub struct Parallel8Interface<PORT, CS, RS, WR> {
    port: PORT,
    cs: CS,
    rs: RS,
    wr: WR,
    selected: bool,
}

impl<PORT, CS, RS, WR> Parallel8Interface<PORT, CS, RS, WR>
where
    PORT: DataPort,
    CS: OutputPin,
    RS: OutputPin,
    WR: OutputPin,
{
    pub fn new(port: PORT, mut cs: CS, mut rs: RS, mut wr: WR) -> Self {
        cs.set_high();
        rs.set_high();
        wr.set_high();
        Self {
            port,
            cs,
            rs,
            wr,
            selected: false,
        }
    }

    pub fn release_parts(self) -> (PORT, CS, RS, WR) {
        (self.port, self.cs, self.rs, self.wr)
    }

    #[inline(always)]
    fn strobe(&mut self, byte: u8) {
        self.wr.set_low();
        self.port.write(byte);
        self.wr.set_high();
    }
}

impl<PORT, CS, RS, WR> Interface for Parallel8Interface<PORT, CS, RS, WR>
where
    PORT: DataPort,
    CS: OutputPin,
    RS: OutputPin,
    WR: OutputPin,
{
    fn acquire(&mut self) {
        debug_assert!(!self.selected, "nested bus acquire");
        self.cs.set_low();
        self.selected = true;
    }

    fn release(&mut self) {
        debug_assert!(self.selected, "bus released without acquire");
        self.cs.set_high();
        self.selected = false;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn command(&mut self, cmd: u8) {
        self.rs.set_low();
        self.strobe(0x00);
        self.strobe(cmd);
        self.rs.set_high();
    }

    fn data(&mut self, byte: u8) {
        self.strobe(byte);
    }

    fn data16(&mut self, word: u16) {
        let [hi, lo] = word.to_be_bytes();
        self.strobe(hi);
        self.strobe(lo);
    }
}
