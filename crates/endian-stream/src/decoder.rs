use std::io::{self, Cursor, Read, SeekFrom};

use crate::byte_order::ByteOrder;
use crate::error::{Capability, DecodeError};
use crate::source::ByteSource;

/// Scratch buffer size for [`Decoder::skip_bytes`].
const SKIP_CHUNK: usize = 4096;

/// Sequential decoder for fixed-width primitives over a [`ByteSource`].
///
/// The byte order is chosen once at construction. Every read consumes bytes
/// from the front of the source; the decoder keeps an `offset` counter of
/// how far it has gone (or the absolute position after a [`seek`]), which is
/// reported in errors.
///
/// Fixed-width reads are all-or-nothing: the caller gets the whole value or
/// a [`DecodeError`]. After an error the source may have been partially
/// consumed, so the stream should be treated as finished.
///
/// # Example
///
/// ```
/// use endian_stream::{ByteOrder, Decoder};
///
/// let mut decoder = Decoder::from_bytes(b"\x00\x2A\x01name\x00", ByteOrder::BigEndian);
/// assert_eq!(decoder.read_u16().unwrap(), 42);
/// assert!(decoder.read_bool().unwrap());
/// assert_eq!(decoder.read_null_terminated_string().unwrap(), "name");
/// ```
///
/// [`seek`]: Decoder::seek
#[derive(Debug)]
pub struct Decoder<R> {
    source: R,
    order: ByteOrder,
    offset: u64,
}

impl<T: AsRef<[u8]>> Decoder<Cursor<T>> {
    /// Decode from bytes already in memory.
    ///
    /// The data is wrapped in an [`io::Cursor`], so the decoder supports
    /// both [`seek`](Decoder::seek) and [`peek`](Decoder::peek).
    #[must_use]
    pub fn from_bytes(data: T, order: ByteOrder) -> Self {
        Self::new(Cursor::new(data), order)
    }
}

/// Generates the unsigned read for one width and its signed twin, which
/// reinterprets the unsigned bit pattern.
macro_rules! fixed_width_reads {
    ($(
        $width:literal => $read_u:ident -> $u:ty as $assemble:ident, $read_i:ident -> $i:ty;
    )+) => {
        $(
            #[doc = concat!("Read a `", stringify!($u), "` from the next ", stringify!($width), " bytes.")]
            ///
            /// # Errors
            ///
            /// [`DecodeError::UnexpectedEof`] if the source ends first,
            /// [`DecodeError::Io`] for any other source failure.
            pub fn $read_u(&mut self) -> Result<$u, DecodeError> {
                let bytes: [u8; $width] = self.read_array()?;
                Ok(self.order.$assemble(bytes))
            }

            #[doc = concat!("Read a two's-complement `", stringify!($i), "` from the next ", stringify!($width), " bytes.")]
            ///
            /// # Errors
            ///
            #[doc = concat!("Same as [`Decoder::", stringify!($read_u), "`].")]
            #[allow(clippy::cast_possible_wrap)]
            pub fn $read_i(&mut self) -> Result<$i, DecodeError> {
                Ok(self.$read_u()? as $i)
            }
        )+
    };
}

impl<R: ByteSource> Decoder<R> {
    /// Wrap `source`, decoding multi-byte values in `order`.
    #[must_use]
    pub fn new(source: R, order: ByteOrder) -> Self {
        Self {
            source,
            order,
            offset: 0,
        }
    }

    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes consumed since construction, or the absolute position
    /// returned by the last successful [`seek`](Self::seek).
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    #[must_use]
    pub fn into_inner(self) -> R {
        self.source
    }

    // ── Stream introspection ─────────────────────────────────────────────

    /// Seek the underlying source, returning the new absolute position.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnsupportedOperation`] if the source cannot seek;
    ///   nothing is moved.
    /// - [`DecodeError::Io`] if the source rejects the seek.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, DecodeError> {
        let Some(result) = self.source.try_seek(pos) else {
            tracing::trace!(offset = self.offset, "seek refused by byte source");
            return Err(DecodeError::UnsupportedOperation {
                capability: Capability::Seek,
            });
        };
        let position = result?;
        self.offset = position;
        Ok(position)
    }

    /// Return the next `n` bytes without consuming them.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnsupportedOperation`] if the source cannot peek.
    /// - [`DecodeError::UnexpectedEof`] if fewer than `n` bytes remain.
    /// - [`DecodeError::Io`] if the source fails while filling its buffer.
    pub fn peek(&mut self, n: usize) -> Result<&[u8], DecodeError> {
        let offset = self.offset;
        match self.source.try_peek(n) {
            None => {
                tracing::trace!(offset, n, "peek refused by byte source");
                Err(DecodeError::UnsupportedOperation {
                    capability: Capability::Peek,
                })
            }
            Some(Err(e)) => Err(DecodeError::Io(e)),
            Some(Ok(bytes)) if bytes.len() < n => Err(DecodeError::UnexpectedEof {
                offset,
                expected: n as u64,
                read: bytes.len() as u64,
            }),
            Some(Ok(bytes)) => Ok(bytes),
        }
    }

    // ── Raw access ───────────────────────────────────────────────────────

    /// Issue a single read into `buf` and return how many bytes arrived.
    ///
    /// Short reads are returned as they are. `Ok(0)` on a non-empty
    /// buffer means end of stream.
    ///
    /// # Errors
    ///
    /// Whatever the source reports, as [`DecodeError::Io`].
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        Ok(self.read(buf)?)
    }

    /// Read everything up to end of stream.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Io`] if the source fails before end of stream.
    pub fn read_all(&mut self) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        let result = self.source.read_to_end(&mut out);
        self.offset += out.len() as u64;
        result?;
        Ok(out)
    }

    /// Read exactly one byte.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if the source is exhausted.
    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte: [u8; 1] = self.read_array()?;
        Ok(byte[0])
    }

    /// Read exactly `count` bytes.
    ///
    /// Either the full block is returned or an error is; a short stream
    /// never produces a partial vector. The buffer grows with the data
    /// that actually arrives, so a bogus length read from a corrupt header
    /// fails on end of stream instead of allocating `count` up front.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnexpectedEof`] if fewer than `count` bytes remain.
    /// - [`DecodeError::Io`] for any other source failure.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, DecodeError> {
        let start = self.offset;
        let expected = count as u64;

        let mut out = Vec::new();
        let result = self.source.by_ref().take(expected).read_to_end(&mut out);
        self.offset += out.len() as u64;
        result?;

        if out.len() < count {
            return Err(DecodeError::UnexpectedEof {
                offset: start,
                expected,
                read: out.len() as u64,
            });
        }
        Ok(out)
    }

    /// Discard exactly `count` bytes.
    ///
    /// Bytes discarded before a failure still count toward
    /// [`offset`](Self::offset).
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnexpectedEof`] if the source ends first.
    /// - [`DecodeError::Io`] for any other source failure.
    pub fn skip_bytes(&mut self, count: u64) -> Result<(), DecodeError> {
        let start = self.offset;
        let mut scratch = [0u8; SKIP_CHUNK];
        let mut skipped = 0u64;

        while skipped < count {
            let want = usize::try_from(count - skipped).map_or(SKIP_CHUNK, |n| n.min(SKIP_CHUNK));
            match self.source.read(&mut scratch[..want]) {
                Ok(0) => {
                    return Err(DecodeError::UnexpectedEof {
                        offset: start,
                        expected: count,
                        read: skipped,
                    });
                }
                Ok(n) => {
                    skipped += n as u64;
                    self.offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    // ── Typed primitives ─────────────────────────────────────────────────

    /// Read one byte; any nonzero value is `true`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if the source is exhausted.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if the source is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_byte()
    }

    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] if the source is exhausted.
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.read_u8()? as i8)
    }

    fixed_width_reads! {
        2 => read_u16 -> u16 as u16, read_i16 -> i16;
        4 => read_u32 -> u32 as u32, read_i32 -> i32;
        8 => read_u64 -> u64 as u64, read_i64 -> i64;
    }

    /// Read an IEEE-754 binary32 from the bit pattern of [`read_u32`](Self::read_u32).
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::read_u32`].
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read an IEEE-754 binary64 from the bit pattern of [`read_u64`](Self::read_u64).
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::read_u64`].
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    // ── Null-terminated strings ──────────────────────────────────────────

    /// Read bytes up to a `0x00` terminator, which is consumed but not
    /// returned.
    ///
    /// Bytes are pulled one at a time so nothing past the terminator is
    /// consumed. `Interrupted` and `WouldBlock` mean "no data yet" and are
    /// retried in a loop; only `Ok(0)` counts as end of stream.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnexpectedEof`] if the stream was already empty.
    /// - [`DecodeError::MissingTerminator`] if at least one byte was read
    ///   and the stream ended before a terminator.
    /// - [`DecodeError::Io`] for any other source failure.
    pub fn read_null_terminated_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        let start = self.offset;
        let mut out = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            match self.source.read(&mut byte) {
                Ok(0) if out.is_empty() => {
                    return Err(DecodeError::UnexpectedEof {
                        offset: start,
                        expected: 1,
                        read: 0,
                    });
                }
                Ok(0) => {
                    tracing::trace!(offset = start, read = out.len(), "string ended without terminator");
                    return Err(DecodeError::MissingTerminator {
                        offset: start,
                        read: out.len() as u64,
                    });
                }
                Ok(_) => {
                    self.offset += 1;
                    if byte[0] == 0x00 {
                        return Ok(out);
                    }
                    out.push(byte[0]);
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                    ) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a null-terminated UTF-8 string.
    ///
    /// # Errors
    ///
    /// Everything [`read_null_terminated_bytes`](Self::read_null_terminated_bytes)
    /// returns, plus [`DecodeError::InvalidUtf8`]; the bytes, terminator
    /// included, have been consumed in that case.
    pub fn read_null_terminated_string(&mut self) -> Result<String, DecodeError> {
        let start = self.offset;
        let bytes = self.read_null_terminated_bytes()?;
        String::from_utf8(bytes).map_err(|source| DecodeError::InvalidUtf8 {
            offset: start,
            source,
        })
    }

    /// Fill a fixed-size array, retrying interrupted reads.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let start = self.offset;
        let mut buf = [0u8; N];
        let mut filled = 0;

        while filled < N {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(DecodeError::UnexpectedEof {
                        offset: start,
                        expected: N as u64,
                        read: filled as u64,
                    });
                }
                Ok(n) => {
                    filled += n;
                    self.offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(buf)
    }
}

impl<R: ByteSource> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.source.read(buf)?;
        self.offset += n as u64;
        Ok(n)
    }
}
