#![no_main]

use libfuzzer_sys::fuzz_target;
use endian_stream::{ByteOrder, DecodeError, Decoder, Sequential};

// Fuzz target: read_null_terminated_bytes against a reference split.
//
// The result must be exactly the bytes before the first 0x00, and the
// two end-of-stream outcomes must follow whether any byte was present.
fuzz_target!(|data: &[u8]| {
    let mut d = Decoder::new(Sequential::new(data), ByteOrder::BigEndian);

    match (d.read_null_terminated_bytes(), data.iter().position(|&b| b == 0)) {
        (Ok(bytes), Some(end)) => {
            assert_eq!(bytes, &data[..end]);
            assert_eq!(d.offset(), end as u64 + 1);
        }
        (Err(DecodeError::UnexpectedEof { read: 0, .. }), None) => assert!(data.is_empty()),
        (Err(DecodeError::MissingTerminator { read, .. }), None) => {
            assert_eq!(read, data.len() as u64);
            assert!(!data.is_empty());
        }
        (other, end) => panic!("unexpected outcome {other:?} for terminator at {end:?}"),
    }
});
