#![warn(clippy::pedantic)]

pub mod byte_order;
pub mod decoder;
pub mod error;
pub mod source;

pub use byte_order::{ByteOrder, ParseByteOrderError};
pub use decoder::Decoder;
pub use error::{Capability, DecodeError};
pub use source::{ByteSource, Lookahead, Seekable, Sequential};
