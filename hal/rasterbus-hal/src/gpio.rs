//! GPIO pin abstractions
//!
//! Display buses only drive lines, they never sample them, so only the
//! output side is modelled here.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. Writes are expected to take effect immediately,
/// drivers rely on that when toggling command/data lines between bytes.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }
}
