//! SPI bus abstractions
//!
//! Display controllers are write-only SPI slaves: the driver pushes bytes
//! MSB first and never reads back, so the bus trait is reduced to a single
//! byte write.

/// SPI bus master (write only)
///
/// `write` starts shifting `byte` out and may return before the transfer
/// has finished. The driver is responsible for not issuing the next write
/// until the peripheral is ready again, see [`crate::pace`].
pub trait SpiBus {
    /// Start transmitting one byte
    fn write(&mut self, byte: u8);

    /// Block until the last byte has left the shift register
    ///
    /// Called before the select line is released. The default assumes
    /// `write` is already blocking.
    fn flush(&mut self) {}
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    fn write(&mut self, byte: u8) {
        (**self).write(byte);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

/// SPI configuration
///
/// Drivers export the configuration their controller requires; the board
/// code applies it to the peripheral before handing the bus over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl SpiConfig {
    /// Create a configuration from a clock frequency and an SPI mode
    pub const fn new(frequency: u32, mode: Mode) -> Self {
        let (polarity, phase) = mode.split();
        Self {
            frequency,
            polarity,
            phase,
        }
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 8_000_000, // 8 MHz, DIV2 on a 16 MHz part
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Split into polarity and phase
    pub const fn split(self) -> (Polarity, Phase) {
        match self {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        mode.split()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_split() {
        let cfg = SpiConfig::new(1_000_000, Mode::Mode3);
        assert_eq!(cfg.polarity, Polarity::IdleHigh);
        assert_eq!(cfg.phase, Phase::CaptureOnSecondTransition);
        assert_eq!(SpiConfig::new(8_000_000, Mode::Mode0), SpiConfig::default());
    }
}
