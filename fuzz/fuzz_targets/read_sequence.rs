#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use endian_stream::{ByteOrder, Decoder};

#[derive(Arbitrary, Debug)]
enum Op {
    Bool,
    I8,
    U16,
    I32,
    U64,
    F32,
    F64,
    Bytes(u16),
    Skip(u16),
    CString,
    Peek(u8),
}

#[derive(Arbitrary, Debug)]
struct Input {
    big_endian: bool,
    ops: Vec<Op>,
    data: Vec<u8>,
}

// Fuzz target: arbitrary sequences of primitive reads over arbitrary bytes.
//
// Catches bugs in:
// - Offset accounting (must never pass the end of the data)
// - Short-read handling for every width
// - Interaction between peek and subsequent reads
fuzz_target!(|input: Input| {
    let order = if input.big_endian {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
    let mut d = Decoder::from_bytes(input.data.as_slice(), order);

    for op in input.ops {
        let before = d.offset();
        let ok = match op {
            Op::Bool => d.read_bool().is_ok(),
            Op::I8 => d.read_i8().is_ok(),
            Op::U16 => d.read_u16().is_ok(),
            Op::I32 => d.read_i32().is_ok(),
            Op::U64 => d.read_u64().is_ok(),
            Op::F32 => d.read_f32().is_ok(),
            Op::F64 => d.read_f64().is_ok(),
            Op::Bytes(n) => match d.read_bytes(usize::from(n)) {
                Ok(bytes) => {
                    assert_eq!(bytes.len(), usize::from(n));
                    true
                }
                Err(_) => false,
            },
            Op::Skip(n) => d.skip_bytes(u64::from(n)).is_ok(),
            Op::CString => d.read_null_terminated_bytes().is_ok(),
            Op::Peek(n) => {
                let peeked = d.peek(usize::from(n)).map(<[u8]>::to_vec);
                assert_eq!(d.offset(), before);
                peeked.is_ok()
            }
        };

        assert!(d.offset() >= before);
        assert!(d.offset() <= input.data.len() as u64);
        if !ok {
            break;
        }
    }
});
