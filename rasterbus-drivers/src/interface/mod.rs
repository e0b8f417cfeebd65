//! Controller bus interfaces
//!
//! An [`Interface`] is the transport between a driver and its controller.
//! It owns the select line and the command/data discriminator and knows how
//! long to pause after each byte; it does not know what any command means.
//!
//! Every drawing call is one transaction: [`acquire`](Interface::acquire),
//! any number of commands and data, then exactly one
//! [`release`](Interface::release). Transactions never nest.

mod parallel;
mod spi;

pub use parallel::Parallel8Interface;
pub use spi::SpiInterface;

/// Byte transport to a display controller
pub trait Interface {
    /// Select the controller
    ///
    /// Acquiring while already selected is a programming error.
    fn acquire(&mut self);

    /// Deselect the controller, ending the transaction
    fn release(&mut self);

    /// True between `acquire` and `release`
    fn is_selected(&self) -> bool;

    /// Send a command (register index) and return the bus to data mode
    fn command(&mut self, cmd: u8);

    /// One command argument byte
    fn data(&mut self, byte: u8);

    /// A 16-bit value, high byte first
    fn data16(&mut self, word: u16);

    /// A 16-bit value that is the last thing sent before a command
    fn data16_pre_command(&mut self, word: u16) {
        self.data16(word);
    }

    /// The same 16-bit value `count` times
    fn stream16(&mut self, word: u16, count: u32) {
        for _ in 0..count {
            self.data16(word);
        }
    }

    /// One pixel inside a line run
    ///
    /// Followed by [`line_step_gap`](Interface::line_step_gap), by
    /// [`line_reprogram_gap`](Interface::line_reprogram_gap) or by the
    /// release that ends the line, each of which supplies the remaining pause.
    fn pixel16_in_line(&mut self, word: u16) {
        self.data16(word);
    }

    /// Pause between two line pixels that share a window
    fn line_step_gap(&mut self) {}

    /// Pause between the last pixel of a line run and the command that
    /// opens the next window
    fn line_reprogram_gap(&mut self) {}

    /// Run `f` inside one acquire/release pair
    fn transaction<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        self.acquire();
        let result = f(self);
        self.release();
        result
    }
}

impl<T: Interface + ?Sized> Interface for &mut T {
    fn acquire(&mut self) {
        (**self).acquire();
    }

    fn release(&mut self) {
        (**self).release();
    }

    fn is_selected(&self) -> bool {
        (**self).is_selected()
    }

    fn command(&mut self, cmd: u8) {
        (**self).command(cmd);
    }

    fn data(&mut self, byte: u8) {
        (**self).data(byte);
    }

    fn data16(&mut self, word: u16) {
        (**self).data16(word);
    }

    fn data16_pre_command(&mut self, word: u16) {
        (**self).data16_pre_command(word);
    }

    fn stream16(&mut self, word: u16, count: u32) {
        (**self).stream16(word, count);
    }

    fn pixel16_in_line(&mut self, word: u16) {
        (**self).pixel16_in_line(word);
    }

    fn line_step_gap(&mut self) {
        (**self).line_step_gap();
    }

    fn line_reprogram_gap(&mut self) {
        (**self).line_reprogram_gap();
    }
}
