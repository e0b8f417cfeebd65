//! 8-bit parallel bus abstractions
//!
//! 8080-style panels latch eight data lines on the rising edge of a write
//! strobe. The data lines are modelled as one port; the strobe, select and
//! register-select lines are ordinary [`OutputPin`](crate::OutputPin)s
//! owned by the driver interface.

/// Eight data lines written together
pub trait DataPort {
    /// Drive D0..D7 to the bits of `byte` (D0 = bit 0)
    fn write(&mut self, byte: u8);
}

impl<T: DataPort + ?Sized> DataPort for &mut T {
    fn write(&mut self, byte: u8) {
        (**self).write(byte);
    }
}
