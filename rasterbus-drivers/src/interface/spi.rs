//! Serial interface: SPI plus a D/C line

use rasterbus_hal::{OutputPin, Pacer, Pacing, SpiBus};

use super::Interface;

/// 4-wire serial interface
///
/// D/C is held high (data) between commands and only dropped for the
/// command byte itself. Every byte is followed by a pacing budget taken from
/// the [`Pacing`] profile:
///
/// | byte                                  | budget        |
/// |---------------------------------------|---------------|
/// | command, or last data byte before one | `pre_command` |
/// | other data bytes                      | `byte`        |
/// | second byte of a repeated pixel       | `stream`      |
pub struct SpiInterface<SPI, CS, DC, P> {
    spi: SPI,
    cs: CS,
    dc: DC,
    pacer: P,
    pacing: Pacing,
    selected: bool,
}

impl<SPI, CS, DC, P> SpiInterface<SPI, CS, DC, P>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    P: Pacer,
{
    /// Take ownership of the bus and park both control lines high
    pub fn new(spi: SPI, mut cs: CS, mut dc: DC, pacer: P, pacing: Pacing) -> Self {
        cs.set_high();
        dc.set_high();
        Self {
            spi,
            cs,
            dc,
            pacer,
            pacing,
            selected: false,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Give the peripherals back
    pub fn release_parts(self) -> (SPI, CS, DC, P) {
        (self.spi, self.cs, self.dc, self.pacer)
    }

    #[inline(always)]
    fn send(&mut self, byte: u8, cycles: u32) {
        self.spi.write(byte);
        self.pacer.pace(cycles);
    }
}

impl<SPI, CS, DC, P> Interface for SpiInterface<SPI, CS, DC, P>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    P: Pacer,
{
    fn acquire(&mut self) {
        debug_assert!(!self.selected, "nested bus acquire");
        self.cs.set_low();
        self.selected = true;
    }

    fn release(&mut self) {
        debug_assert!(self.selected, "bus released without acquire");
        self.spi.flush();
        self.cs.set_high();
        self.selected = false;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn command(&mut self, cmd: u8) {
        self.dc.set_low();
        self.send(cmd, self.pacing.pre_command);
        self.dc.set_high();
    }

    fn data(&mut self, byte: u8) {
        self.send(byte, self.pacing.byte);
    }

    fn data16(&mut self, word: u16) {
        let [hi, lo] = word.to_be_bytes();
        self.send(hi, self.pacing.byte);
        self.send(lo, self.pacing.byte);
    }

    fn data16_pre_command(&mut self, word: u16) {
        let [hi, lo] = word.to_be_bytes();
        self.send(hi, self.pacing.byte);
        self.send(lo, self.pacing.pre_command);
    }

    fn stream16(&mut self, word: u16, count: u32) {
        let [hi, lo] = word.to_be_bytes();
        for _ in 0..count {
            self.send(hi, self.pacing.byte);
            self.send(lo, self.pacing.stream);
        }
    }

    fn pixel16_in_line(&mut self, word: u16) {
        let [hi, lo] = word.to_be_bytes();
        self.send(hi, self.pacing.byte);
        self.spi.write(lo);
    }

    fn line_step_gap(&mut self) {
        self.pacer.pace(self.pacing.line_step);
    }

    fn line_reprogram_gap(&mut self) {
        self.pacer.pace(self.pacing.pre_command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterbus_hal::mock::{BusEvent, BusLog, Line};

    use BusEvent::{Byte, Pace, Pin};

    #[test]
    fn test_new_parks_lines_high() {
        let log = BusLog::<8>::new();
        let _iface = SpiInterface::new(
            log.spi(),
            log.pin(Line::Cs),
            log.pin(Line::Dc),
            log.pacer(),
            Pacing::AVR_SPI_DIV2,
        );
        assert_eq!(
            log.events().as_slice(),
            &[Pin(Line::Cs, true), Pin(Line::Dc, true)]
        );
    }

    #[test]
    fn test_command_then_data_pacing() {
        let log = BusLog::<32>::new();
        let mut iface = SpiInterface::new(
            log.spi(),
            log.pin(Line::Cs),
            log.pin(Line::Dc),
            log.pacer(),
            Pacing::AVR_SPI_DIV2,
        );
        log.clear();

        iface.acquire();
        iface.command(0x2A);
        iface.data16(0x0102);
        iface.data16_pre_command(0x0304);
        iface.release();

        assert_eq!(
            log.events().as_slice(),
            &[
                Pin(Line::Cs, false),
                Pin(Line::Dc, false),
                Byte(0x2A),
                Pace(15),
                Pin(Line::Dc, true),
                Byte(0x01),
                Pace(17),
                Byte(0x02),
                Pace(17),
                Byte(0x03),
                Pace(17),
                Byte(0x04),
                Pace(15),
                Pin(Line::Cs, true),
            ]
        );
    }

    #[test]
    fn test_stream_uses_short_budget() {
        let log = BusLog::<16>::new();
        let mut iface = SpiInterface::new(
            log.spi(),
            log.pin(Line::Cs),
            log.pin(Line::Dc),
            log.pacer(),
            Pacing::AVR_SPI_DIV2,
        );
        log.clear();

        iface.stream16(0xF800, 2);

        assert_eq!(
            log.events().as_slice(),
            &[
                Byte(0xF8),
                Pace(17),
                Byte(0x00),
                Pace(13),
                Byte(0xF8),
                Pace(17),
                Byte(0x00),
                Pace(13),
            ]
        );
    }

    #[test]
    fn test_line_pixel_leaves_gap_to_caller() {
        let log = BusLog::<8>::new();
        let mut iface = SpiInterface::new(
            log.spi(),
            log.pin(Line::Cs),
            log.pin(Line::Dc),
            log.pacer(),
            Pacing::AVR_SPI_DIV2,
        );
        log.clear();

        iface.pixel16_in_line(0x1234);
        iface.line_step_gap();

        assert_eq!(
            log.events().as_slice(),
            &[Byte(0x12), Pace(17), Byte(0x34), Pace(10)]
        );
    }

    #[test]
    fn test_line_pixel_before_new_window_waits_for_command_gap() {
        let log = BusLog::<16>::new();
        let mut iface = SpiInterface::new(
            log.spi(),
            log.pin(Line::Cs),
            log.pin(Line::Dc),
            log.pacer(),
            Pacing::AVR_SPI_DIV2,
        );
        iface.acquire();
        log.clear();

        iface.pixel16_in_line(0x1234);
        iface.line_reprogram_gap();
        iface.command(0x2A);

        assert_eq!(
            log.events().as_slice(),
            &[
                Byte(0x12),
                Pace(17),
                Byte(0x34),
                Pace(15),
                Pin(Line::Dc, false),
                Byte(0x2A),
                Pace(15),
                Pin(Line::Dc, true),
            ]
        );
    }

    #[test]
    fn test_transaction_pairs_select() {
        let log = BusLog::<8>::new();
        let mut iface = SpiInterface::new(
            log.spi(),
            log.pin(Line::Cs),
            log.pin(Line::Dc),
            log.pacer(),
            Pacing::NONE,
        );
        log.clear();

        let selected = iface.transaction(|bus| {
            bus.data(0xAA);
            bus.is_selected()
        });

        assert!(selected);
        assert!(!iface.is_selected());
        assert_eq!(
            log.events().as_slice(),
            &[Pin(Line::Cs, false), Byte(0xAA), Pin(Line::Cs, true)]
        );
    }

    #[test]
    #[should_panic(expected = "nested bus acquire")]
    fn test_nested_acquire_panics_in_debug() {
        let log = BusLog::<8>::new();
        let mut iface = SpiInterface::new(
            log.spi(),
            log.pin(Line::Cs),
            log.pin(Line::Dc),
            log.pacer(),
            Pacing::NONE,
        );
        iface.acquire();
        iface.acquire();
    }
}
