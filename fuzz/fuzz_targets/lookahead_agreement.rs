#![no_main]

use libfuzzer_sys::fuzz_target;
use endian_stream::{ByteOrder, Decoder, Lookahead, Sequential};

// Fuzz target: a Lookahead-wrapped source yields the same stream as the
// raw bytes, however peeks and reads are interleaved.
//
// The first byte of input drives the peek/read pattern; the rest is the
// stream itself.
fuzz_target!(|data: &[u8]| {
    let Some((&pattern, stream)) = data.split_first() else {
        return;
    };

    let mut d = Decoder::new(Lookahead::new(Sequential::new(stream)), ByteOrder::NATIVE);
    let mut seen = Vec::with_capacity(stream.len());
    let mut step = 0u32;

    loop {
        let width = usize::from(pattern.rotate_left(step) & 0x0F) + 1;
        step += 1;

        if let Ok(peeked) = d.peek(width) {
            let expected = &stream[seen.len()..seen.len() + width];
            assert_eq!(peeked, expected);
        }

        match d.read_bytes(width) {
            Ok(bytes) => seen.extend_from_slice(&bytes),
            Err(_) => break,
        }
    }

    // The failing read drained whatever tail was left.
    assert_eq!(d.offset(), stream.len() as u64);
    assert_eq!(&seen[..], &stream[..seen.len()]);
});
