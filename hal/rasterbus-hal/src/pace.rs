//! Inter-byte bus pacing
//!
//! A display controller samples its input at a fixed rate. When the MCU can
//! issue bus writes faster than that, every write has to be followed by a
//! minimum number of idle CPU cycles or the next byte overwrites the one
//! still being shifted out. The interfaces in the driver crate call
//! [`Pacer::pace`] after each byte with a cycle count from a [`Pacing`]
//! profile; how those cycles are burned is up to the platform.

/// Errors reported when building a pacer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Calibration of zero cycles per loop iteration
    ZeroCalibration,
}

/// Fixed-delay primitive invoked between consecutive bus writes
pub trait Pacer {
    /// Wait at least `cycles` CPU cycles
    ///
    /// `pace(0)` must return immediately.
    fn pace(&mut self, cycles: u32);
}

impl<T: Pacer + ?Sized> Pacer for &mut T {
    fn pace(&mut self, cycles: u32) {
        (**self).pace(cycles);
    }
}

/// Cycle budgets for one bus/clock combination
///
/// The three byte budgets differ because the surrounding code already
/// spends cycles the controller can count towards its sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pacing {
    /// After an ordinary command argument or data byte
    pub byte: u32,
    /// After the last byte before the command/data line toggles
    pub pre_command: u32,
    /// After the second byte of a pixel inside a repeat loop
    pub stream: u32,
    /// Between line-drawing pixels that do not move the RAM window
    pub line_step: u32,
}

impl Pacing {
    /// Hardware SPI at F_CPU/2 on an 8-bit AVR: one byte every 18 cycles.
    ///
    /// The byte write itself costs one cycle, the remaining 17 are padded.
    /// Toggling D/C afterwards costs 2, the repeat loop costs 4 and the line
    /// loop's own bookkeeping covers the rest of its budget.
    pub const AVR_SPI_DIV2: Self = Self {
        byte: 17,
        pre_command: 15,
        stream: 13,
        line_step: 10,
    };

    /// Blocking buses (bit-banged SPI, parallel ports) need no padding
    pub const NONE: Self = Self {
        byte: 0,
        pre_command: 0,
        stream: 0,
        line_step: 0,
    };
}

impl Default for Pacing {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pacer for buses whose writes already block until done
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

impl Pacer for NoPacer {
    #[inline(always)]
    fn pace(&mut self, _cycles: u32) {}
}

/// Busy-wait pacer calibrated in CPU cycles per loop iteration
///
/// One iteration of the spin loop costs a platform dependent number of
/// cycles; `pace(n)` spins `ceil(n / cycles_per_iteration)` times so the
/// delay never falls short of the budget.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinPacer {
    cycles_per_iteration: u32,
}

impl SpinPacer {
    /// Create a pacer for a loop costing `cycles_per_iteration` cycles
    pub const fn new(cycles_per_iteration: u32) -> Result<Self, ConfigError> {
        if cycles_per_iteration == 0 {
            return Err(ConfigError::ZeroCalibration);
        }
        Ok(Self {
            cycles_per_iteration,
        })
    }

    /// Number of loop iterations used for a budget of `cycles`
    pub const fn iterations(&self, cycles: u32) -> u32 {
        cycles.div_ceil(self.cycles_per_iteration)
    }
}

impl Pacer for SpinPacer {
    #[inline(always)]
    fn pace(&mut self, cycles: u32) {
        for _ in 0..self.iterations(cycles) {
            core::hint::spin_loop();
        }
    }
}
