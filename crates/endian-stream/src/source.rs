use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// A sequential byte source with optional random access and lookahead.
///
/// Every source can be read. Seeking and peeking are capabilities a source
/// may or may not have; the default methods return `None` to say "not
/// supported", and the [`Decoder`](crate::Decoder) turns that into
/// [`DecodeError::UnsupportedOperation`](crate::DecodeError::UnsupportedOperation).
///
/// ```text
/// ┌─────────────────────────────┬──────┬──────┐
/// │ Source                      │ Seek │ Peek │
/// ├─────────────────────────────┼──────┼──────┤
/// │ io::Cursor<T: AsRef<[u8]>>  │ yes  │ yes  │
/// │ &[u8]                       │ no   │ yes  │
/// │ std::fs::File               │ yes  │ no   │
/// │ Sequential<R: Read>         │ no   │ no   │
/// │ Seekable<R: Read + Seek>    │ yes  │ no   │
/// │ Lookahead<R: Read>          │ no   │ yes  │
/// └─────────────────────────────┴──────┴──────┘
/// ```
///
/// `&mut S` and `Box<S>` forward to `S`, so a decoder can borrow a source
/// the caller keeps ownership of.
pub trait ByteSource: Read {
    /// Move to `pos`, returning the new absolute position.
    ///
    /// `None` if this source cannot seek.
    fn try_seek(&mut self, _pos: SeekFrom) -> Option<io::Result<u64>> {
        None
    }

    /// Return up to `n` upcoming bytes without consuming them.
    ///
    /// Fewer than `n` bytes are returned only when the stream ends first.
    /// `None` if this source cannot peek.
    fn try_peek(&mut self, _n: usize) -> Option<io::Result<&[u8]>> {
        None
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn try_seek(&mut self, pos: SeekFrom) -> Option<io::Result<u64>> {
        (**self).try_seek(pos)
    }

    fn try_peek(&mut self, n: usize) -> Option<io::Result<&[u8]>> {
        (**self).try_peek(n)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn try_seek(&mut self, pos: SeekFrom) -> Option<io::Result<u64>> {
        (**self).try_seek(pos)
    }

    fn try_peek(&mut self, n: usize) -> Option<io::Result<&[u8]>> {
        (**self).try_peek(n)
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn try_seek(&mut self, pos: SeekFrom) -> Option<io::Result<u64>> {
        Some(self.seek(pos))
    }

    fn try_peek(&mut self, n: usize) -> Option<io::Result<&[u8]>> {
        let position = self.position();
        let data = self.get_ref().as_ref();
        // A cursor may sit past the end after a seek.
        let start = usize::try_from(position).map_or(data.len(), |p| p.min(data.len()));
        let end = start.saturating_add(n).min(data.len());
        Some(Ok(&data[start..end]))
    }
}

impl ByteSource for &[u8] {
    fn try_peek(&mut self, n: usize) -> Option<io::Result<&[u8]>> {
        let data: &[u8] = self;
        Some(Ok(&data[..n.min(data.len())]))
    }
}

impl ByteSource for File {
    fn try_seek(&mut self, pos: SeekFrom) -> Option<io::Result<u64>> {
        Some(self.seek(pos))
    }
}

// ── Sequential ───────────────────────────────────────────────────────────────

/// Read-only view of any reader: neither seekable nor peekable.
///
/// Useful for pipes, sockets and anything else where the decoder must not
/// assume more than forward reads, even if the concrete type could do more.
#[derive(Debug)]
pub struct Sequential<R>(R);

impl<R: Read> Sequential<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self(inner)
    }

    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Read> Read for Sequential<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read> ByteSource for Sequential<R> {}

// ── Seekable ─────────────────────────────────────────────────────────────────

/// Exposes the seek capability of any `Read + Seek` type, such as
/// `BufReader<File>`.
#[derive(Debug)]
pub struct Seekable<R>(R);

impl<R: Read + Seek> Seekable<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self(inner)
    }

    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Read + Seek> Read for Seekable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read + Seek> ByteSource for Seekable<R> {
    fn try_seek(&mut self, pos: SeekFrom) -> Option<io::Result<u64>> {
        Some(self.0.seek(pos))
    }
}

// ── Lookahead ────────────────────────────────────────────────────────────────

/// Size of each refill from the inner reader while peeking.
const REFILL_CHUNK: usize = 512;

/// Adds peek support to any reader by holding peeked bytes in a buffer.
///
/// Buffered bytes are handed out by later reads before the inner reader is
/// touched again, so peeking never changes what the stream yields.
///
/// ```text
///            pos              buf.len()
///             │                   │
///   buf: [....|###################]   ← ### = peeked, not yet consumed
///                                      then inner reader
/// ```
#[derive(Debug)]
pub struct Lookahead<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
}

impl<R: Read> Lookahead<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Number of bytes currently held in the lookahead buffer.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap the inner reader, discarding any buffered bytes.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Buffer at least `n` bytes, or everything up to end of stream.
    fn fill_to(&mut self, n: usize) -> io::Result<()> {
        if self.pos > 0 {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }

        let mut chunk = [0u8; REFILL_CHUNK];
        while self.buf.len() < n {
            let want = (n - self.buf.len()).min(REFILL_CHUNK);
            match self.inner.read(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(read) => self.buf.extend_from_slice(&chunk[..read]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for Lookahead<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.buf.len() {
            return self.inner.read(out);
        }

        let n = out.len().min(self.buf.len() - self.pos);
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;

        if self.pos == self.buf.len() {
            self.buf.clear();
            self.pos = 0;
        }
        Ok(n)
    }
}

impl<R: Read> ByteSource for Lookahead<R> {
    fn try_peek(&mut self, n: usize) -> Option<io::Result<&[u8]>> {
        if let Err(e) = self.fill_to(n) {
            return Some(Err(e));
        }
        let end = n.min(self.buf.len());
        Some(Ok(&self.buf[..end]))
    }
}
