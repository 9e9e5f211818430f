//! Byte sources with awkward behavior, for exercising the decoder.
//!
//! - [`Stutter`] hands out one byte per read and reports "no data yet"
//!   (`WouldBlock` or `Interrupted`) before each one, like a non-blocking
//!   socket that is being polled in a loop.
//! - [`FailAfter`] serves a prefix of its data and then fails with a fixed
//!   I/O error, like a connection reset mid-stream.
//! - [`sample_record`] builds a small mixed-type record in either byte order.

use std::io::{self, Read};

use endian_stream::{ByteOrder, ByteSource};

/// Source that stalls before every byte.
pub struct Stutter<'a> {
    data: &'a [u8],
    stalls_per_byte: usize,
    stalled: usize,
    kind: io::ErrorKind,
    /// Total number of stalls reported so far.
    pub stalls: usize,
}

impl<'a> Stutter<'a> {
    /// Stall with `WouldBlock` `stalls_per_byte` times before each byte.
    pub fn would_block(data: &'a [u8], stalls_per_byte: usize) -> Self {
        Self::with_kind(data, stalls_per_byte, io::ErrorKind::WouldBlock)
    }

    /// Stall with `Interrupted` `stalls_per_byte` times before each byte.
    pub fn interrupted(data: &'a [u8], stalls_per_byte: usize) -> Self {
        Self::with_kind(data, stalls_per_byte, io::ErrorKind::Interrupted)
    }

    fn with_kind(data: &'a [u8], stalls_per_byte: usize, kind: io::ErrorKind) -> Self {
        Self {
            data,
            stalls_per_byte,
            stalled: 0,
            kind,
            stalls: 0,
        }
    }
}

impl Read for Stutter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.data.is_empty() {
            return Ok(0);
        }
        if self.stalled < self.stalls_per_byte {
            self.stalled += 1;
            self.stalls += 1;
            return Err(io::Error::from(self.kind));
        }
        self.stalled = 0;
        buf[0] = self.data[0];
        self.data = &self.data[1..];
        Ok(1)
    }
}

impl ByteSource for Stutter<'_> {}

/// Source that fails with `kind` once `limit` bytes have been served.
pub struct FailAfter<'a> {
    data: &'a [u8],
    remaining: usize,
    kind: io::ErrorKind,
}

impl<'a> FailAfter<'a> {
    pub fn new(data: &'a [u8], limit: usize, kind: io::ErrorKind) -> Self {
        Self {
            data,
            remaining: limit,
            kind,
        }
    }
}

impl Read for FailAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(self.kind, "source failed"));
        }
        let n = buf.len().min(self.remaining).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        self.remaining -= n;
        Ok(n)
    }
}

impl ByteSource for FailAfter<'_> {}

/// A record of every primitive the decoder handles, in `order`:
///
/// ```text
/// bool(true) i8(-5) u16(0xBEEF) i32(-2) u64(u64::MAX - 1)
/// f32(1.5) f64(-0.25) "name\0" [0xAA, 0xBB]
/// ```
pub fn sample_record(order: ByteOrder) -> Vec<u8> {
    let mut out = vec![0x01, (-5i8).to_ne_bytes()[0]];
    match order {
        ByteOrder::BigEndian => {
            out.extend_from_slice(&0xBEEFu16.to_be_bytes());
            out.extend_from_slice(&(-2i32).to_be_bytes());
            out.extend_from_slice(&(u64::MAX - 1).to_be_bytes());
            out.extend_from_slice(&1.5f32.to_be_bytes());
            out.extend_from_slice(&(-0.25f64).to_be_bytes());
        }
        ByteOrder::LittleEndian => {
            out.extend_from_slice(&0xBEEFu16.to_le_bytes());
            out.extend_from_slice(&(-2i32).to_le_bytes());
            out.extend_from_slice(&(u64::MAX - 1).to_le_bytes());
            out.extend_from_slice(&1.5f32.to_le_bytes());
            out.extend_from_slice(&(-0.25f64).to_le_bytes());
        }
    }
    out.extend_from_slice(b"name\0");
    out.extend_from_slice(&[0xAA, 0xBB]);
    out
}
