use std::fmt;

/// An optional capability of a [`ByteSource`](crate::ByteSource).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Random access via `seek`.
    Seek,
    /// Lookahead via `peek`.
    Peek,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seek => f.write_str("seek"),
            Self::Peek => f.write_str("peek"),
        }
    }
}

/// Errors that can occur while decoding from a byte source.
///
/// ```text
///   DecodeError
///   ├── UnexpectedEof          ← fixed-width read, peek or skip ran out of bytes
///   ├── MissingTerminator      ← string started but the stream ended before 0x00
///   ├── UnsupportedOperation   ← seek/peek on a source without that capability
///   ├── InvalidUtf8            ← null-terminated string is not valid UTF-8
///   └── Io(std::io::Error)     ← anything else the source reported
/// ```
///
/// Every `offset` is the decoder position at which the failing operation
/// started, not where the source ran dry.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes were available than the operation required.
    ///
    /// On a source that cannot rewind, the `read` bytes have been consumed
    /// and are lost.
    #[error("unexpected end of stream at offset {offset}: needed {expected} bytes, got {read}")]
    UnexpectedEof { offset: u64, expected: u64, read: u64 },

    /// A null-terminated string read consumed at least one content byte
    /// and then hit end of stream.
    ///
    /// Kept apart from [`DecodeError::UnexpectedEof`], which is what an
    /// already-exhausted stream produces.
    #[error("null terminator not found before end of stream ({read} bytes read from offset {offset})")]
    MissingTerminator { offset: u64, read: u64 },

    /// The source does not support the requested capability.
    #[error("byte source does not support {capability}")]
    UnsupportedOperation { capability: Capability },

    /// A null-terminated string was read but its bytes are not UTF-8.
    #[error("invalid UTF-8 in null-terminated string at offset {offset}")]
    InvalidUtf8 {
        offset: u64,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Any other failure reported by the underlying source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Whether this error means the stream ran out of data, in either of
    /// its two forms.
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof { .. } | Self::MissingTerminator { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_display() {
        assert_eq!(Capability::Seek.to_string(), "seek");
        assert_eq!(Capability::Peek.to_string(), "peek");
    }

    #[test]
    fn unsupported_message_names_capability() {
        let err = DecodeError::UnsupportedOperation {
            capability: Capability::Peek,
        };
        assert_eq!(err.to_string(), "byte source does not support peek");
    }

    #[test]
    fn io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = DecodeError::from(io);
        assert!(matches!(err, DecodeError::Io(_)));
        assert_eq!(err.to_string(), "pipe closed");
        assert!(!err.is_end_of_stream());
    }

    #[test]
    fn end_of_stream_covers_both_forms() {
        let eof = DecodeError::UnexpectedEof {
            offset: 0,
            expected: 4,
            read: 1,
        };
        let unterminated = DecodeError::MissingTerminator { offset: 0, read: 3 };
        assert!(eof.is_end_of_stream());
        assert!(unterminated.is_end_of_stream());
    }
}
