//! Run-length glyph encoding
//!
//! A glyph bitmap is a row-major pixel stream described by alternating run
//! lengths, starting with a run of clear pixels (which may be empty). Each
//! run length is one byte when below 128, otherwise two bytes:
//!
//! ```text
//! 0xxxxxxx            run of x pixels (0..=127)
//! 1hhhhhhh llllllll   run of (h << 8 | l) pixels (up to 32767)
//! ```
//!
//! Runs continue across row boundaries.

/// Longest run a single length field can hold
pub const MAX_RUN: u16 = 0x7FFF;

/// Decoder yielding run lengths in order
///
/// The caller tracks the alternating color and knows when the glyph area is
/// full; the iterator just stops at the end of the data or on a truncated
/// two-byte length.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Runs<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Iterator for Runs<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        let head = *self.data.get(self.pos)?;
        self.pos += 1;
        if head < 0x80 {
            return Some(u16::from(head));
        }
        let low = *self.data.get(self.pos)?;
        self.pos += 1;
        Some((u16::from(head & 0x7F) << 8) | u16::from(low))
    }
}

/// Encoding failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer too small
    BufferFull,
}

/// Encode a row-major pixel stream (`true` = set) into `out`
///
/// Returns the number of bytes written. Runs longer than [`MAX_RUN`] are
/// split with an empty run of the other color in between.
pub fn encode<I>(pixels: I, out: &mut [u8]) -> Result<usize, EncodeError>
where
    I: IntoIterator<Item = bool>,
{
    let mut writer = Writer { out, len: 0 };
    let mut current = false;
    let mut count: u32 = 0;

    for pixel in pixels {
        if pixel == current {
            count += 1;
        } else {
            writer.run(count)?;
            current = pixel;
            count = 1;
        }
    }
    writer.run(count)?;

    Ok(writer.len)
}

struct Writer<'a> {
    out: &'a mut [u8],
    len: usize,
}

impl Writer<'_> {
    fn push(&mut self, byte: u8) -> Result<(), EncodeError> {
        let slot = self.out.get_mut(self.len).ok_or(EncodeError::BufferFull)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }

    fn field(&mut self, n: u16) -> Result<(), EncodeError> {
        if n < 0x80 {
            self.push(n as u8)
        } else {
            self.push(0x80 | (n >> 8) as u8)?;
            self.push(n as u8)
        }
    }

    fn run(&mut self, mut n: u32) -> Result<(), EncodeError> {
        let max = u32::from(MAX_RUN);
        while n > max {
            self.field(MAX_RUN)?;
            self.field(0)?;
            n -= max;
        }
        self.field(n as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(data: &[u8], area: usize) -> Vec<bool> {
        let mut pixels = Vec::with_capacity(area);
        let mut set = false;
        for run in Runs::new(data) {
            for _ in 0..run {
                if pixels.len() < area {
                    pixels.push(set);
                }
            }
            set = !set;
        }
        pixels
    }

    #[test]
    fn test_decode_long_run() {
        let runs: Vec<u16> = Runs::new(&[0x05, 0x81, 0x2C, 0x00]).collect();
        assert_eq!(runs, vec![5, 300, 0]);
    }

    #[test]
    fn test_truncated_long_run_stops() {
        let runs: Vec<u16> = Runs::new(&[0x03, 0x81]).collect();
        assert_eq!(runs, vec![3]);
    }

    #[test]
    fn test_alternating_round_trip() {
        let pixels: Vec<bool> = (0..64).map(|i| (i + i / 8) % 2 == 0).collect();
        let mut buf = [0u8; 80];
        let n = encode(pixels.iter().copied(), &mut buf).unwrap();
        assert_eq!(buf[0], 0);
        assert_eq!(decode(&buf[..n], pixels.len()), pixels);
    }

    #[test]
    fn test_all_set_round_trip() {
        let pixels = vec![true; 300];
        let mut buf = [0u8; 8];
        let n = encode(pixels.iter().copied(), &mut buf).unwrap();
        assert_eq!(&buf[..n], &[0x00, 0x81, 0x2C]);
        assert_eq!(decode(&buf[..n], pixels.len()), pixels);
    }

    #[test]
    fn test_all_clear_round_trip() {
        let pixels = vec![false; 40];
        let mut buf = [0u8; 8];
        let n = encode(pixels.iter().copied(), &mut buf).unwrap();
        assert_eq!(&buf[..n], &[40]);
        assert_eq!(decode(&buf[..n], pixels.len()), pixels);
    }

    #[test]
    fn test_overlong_run_is_split() {
        let mut buf = [0u8; 16];
        let n = encode(core::iter::repeat(false).take(40_000), &mut buf).unwrap();
        assert_eq!(&buf[..n], &[0xFF, 0xFF, 0x00, 0x9C, 0x41]);
        assert_eq!(decode(&buf[..n], 40_000).len(), 40_000);
    }

    #[test]
    fn test_buffer_full() {
        let mut buf = [0u8; 2];
        let pixels = [false, true, false, true];
        assert_eq!(encode(pixels, &mut buf), Err(EncodeError::BufferFull));
    }
}
