//! Recording bus doubles
//!
//! Every mock writes into one shared [`BusLog`], so a test sees the exact
//! interleaving of select/command lines, data bytes, pacing and sleeps the
//! driver produced. Storage is a fixed-capacity `heapless::Vec`; events past
//! the capacity are counted but not stored.

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::{DataPort, OutputPin, Pacer, SpiBus};

/// Control line a [`MockPin`] stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Chip select (active low)
    Cs,
    /// Command/data (a.k.a. RS), low for command
    Dc,
    /// Parallel write strobe
    Wr,
}

/// One recorded bus action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    /// A control line was driven
    Pin(Line, bool),
    /// A byte was put on the bus
    Byte(u8),
    /// The pacer was asked for this many cycles
    Pace(u32),
    /// A blocking delay in nanoseconds
    DelayNs(u32),
}

/// Shared event log
pub struct BusLog<const N: usize> {
    events: RefCell<Vec<BusEvent, N>>,
    dropped: Cell<usize>,
}

impl<const N: usize> Default for BusLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BusLog<N> {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            dropped: Cell::new(0),
        }
    }

    /// Append an event
    pub fn record(&self, event: BusEvent) {
        if self.events.borrow_mut().push(event).is_err() {
            self.dropped.set(self.dropped.get() + 1);
        }
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<BusEvent, N> {
        self.events.borrow().clone()
    }

    /// Events that did not fit
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Forget all recorded events
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        self.dropped.set(0);
    }

    /// Count events matching `pred`
    pub fn count(&self, pred: impl Fn(&BusEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    /// Create a pin bound to this log
    pub fn pin(&self, line: Line) -> MockPin<'_, N> {
        MockPin { log: self, line }
    }

    /// Create an SPI bus bound to this log
    pub fn spi(&self) -> MockSpi<'_, N> {
        MockSpi { log: self }
    }

    /// Create a parallel data port bound to this log
    pub fn port(&self) -> MockPort<'_, N> {
        MockPort { log: self }
    }

    /// Create a pacer bound to this log
    pub fn pacer(&self) -> MockPacer<'_, N> {
        MockPacer { log: self }
    }

    /// Create a delay provider bound to this log
    pub fn delay(&self) -> MockDelay<'_, N> {
        MockDelay { log: self }
    }
}

/// Output pin that records every level change
pub struct MockPin<'a, const N: usize> {
    log: &'a BusLog<N>,
    line: Line,
}

impl<const N: usize> OutputPin for MockPin<'_, N> {
    fn set_high(&mut self) {
        self.log.record(BusEvent::Pin(self.line, true));
    }

    fn set_low(&mut self) {
        self.log.record(BusEvent::Pin(self.line, false));
    }
}

/// SPI bus that records every byte
pub struct MockSpi<'a, const N: usize> {
    log: &'a BusLog<N>,
}

impl<const N: usize> SpiBus for MockSpi<'_, N> {
    fn write(&mut self, byte: u8) {
        self.log.record(BusEvent::Byte(byte));
    }
}

/// Parallel port that records every byte
pub struct MockPort<'a, const N: usize> {
    log: &'a BusLog<N>,
}

impl<const N: usize> DataPort for MockPort<'_, N> {
    fn write(&mut self, byte: u8) {
        self.log.record(BusEvent::Byte(byte));
    }
}

/// Pacer that records requested budgets; zero budgets are not recorded
pub struct MockPacer<'a, const N: usize> {
    log: &'a BusLog<N>,
}

impl<const N: usize> Pacer for MockPacer<'_, N> {
    fn pace(&mut self, cycles: u32) {
        if cycles > 0 {
            self.log.record(BusEvent::Pace(cycles));
        }
    }
}

/// Delay provider that records instead of sleeping
pub struct MockDelay<'a, const N: usize> {
    log: &'a BusLog<N>,
}

impl<const N: usize> DelayNs for MockDelay<'_, N> {
    fn delay_ns(&mut self, ns: u32) {
        self.log.record(BusEvent::DelayNs(ns));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let log = BusLog::<8>::new();
        let mut cs = log.pin(Line::Cs);
        let mut spi = log.spi();
        let mut pacer = log.pacer();

        cs.set_low();
        spi.write(0x2A);
        pacer.pace(0);
        pacer.pace(17);
        cs.set_high();

        assert_eq!(
            log.events().as_slice(),
            &[
                BusEvent::Pin(Line::Cs, false),
                BusEvent::Byte(0x2A),
                BusEvent::Pace(17),
                BusEvent::Pin(Line::Cs, true),
            ]
        );
    }

    #[test]
    fn test_log_overflow_is_counted() {
        let log = BusLog::<2>::new();
        let mut spi = log.spi();
        for b in 0..5 {
            spi.write(b);
        }
        assert_eq!(log.events().len(), 2);
        assert_eq!(log.dropped(), 3);

        log.clear();
        assert_eq!(log.dropped(), 0);
        assert!(log.events().is_empty());
    }
}
