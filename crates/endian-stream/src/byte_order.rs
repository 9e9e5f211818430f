use std::fmt;
use std::str::FromStr;

/// Byte ordering used to assemble multi-byte values.
///
/// Fixed when a [`Decoder`](crate::Decoder) is built and never changes for
/// that decoder.
///
/// ```text
/// value 0x0102_0304 as u32
///
///   BigEndian     [0x01, 0x02, 0x03, 0x04]   most significant byte first
///   LittleEndian  [0x04, 0x03, 0x02, 0x01]   least significant byte first
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    /// The byte order of the target platform.
    pub const NATIVE: Self = if cfg!(target_endian = "big") {
        Self::BigEndian
    } else {
        Self::LittleEndian
    };

    /// Network byte order.
    pub const NETWORK: Self = Self::BigEndian;

    #[must_use]
    pub fn is_big_endian(self) -> bool {
        self == Self::BigEndian
    }

    pub(crate) fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::BigEndian => u16::from_be_bytes(bytes),
            Self::LittleEndian => u16::from_le_bytes(bytes),
        }
    }

    pub(crate) fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::BigEndian => u32::from_be_bytes(bytes),
            Self::LittleEndian => u32::from_le_bytes(bytes),
        }
    }

    pub(crate) fn u64(self, bytes: [u8; 8]) -> u64 {
        match self {
            Self::BigEndian => u64::from_be_bytes(bytes),
            Self::LittleEndian => u64::from_le_bytes(bytes),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BigEndian => f.write_str("big-endian"),
            Self::LittleEndian => f.write_str("little-endian"),
        }
    }
}

/// Returned when a string does not name a byte order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown byte order {0:?}: expected big, little or native")]
pub struct ParseByteOrderError(String);

impl FromStr for ByteOrder {
    type Err = ParseByteOrderError;

    /// Accepts `big`, `be`, `big-endian`, `network`, `little`, `le`,
    /// `little-endian` and `native`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "big" | "be" | "big-endian" | "network" => Ok(Self::BigEndian),
            "little" | "le" | "little-endian" => Ok(Self::LittleEndian),
            "native" => Ok(Self::NATIVE),
            _ => Err(ParseByteOrderError(s.to_owned())),
        }
    }
}
