//! Fixed-width decoding across both byte orders.
//!
//! Covers the documented bit-pattern cases (negative two's complement,
//! IEEE-754 1.0), the width/order round trip, and the all-or-nothing
//! behavior of short reads.

use std::io::Cursor;

use endian_stream::{ByteOrder, DecodeError, Decoder, Sequential};
use endian_stream_tests::sample_record;

const ORDERS: [ByteOrder; 2] = [ByteOrder::BigEndian, ByteOrder::LittleEndian];

fn decoder(bytes: &[u8], order: ByteOrder) -> Decoder<Cursor<&[u8]>> {
    Decoder::from_bytes(bytes, order)
}

// ── Documented bit patterns ──────────────────────────────────────────────────

#[test]
fn all_ones_minus_one_is_negative_two() {
    let be32 = [0xFF, 0xFF, 0xFF, 0xFE];
    assert_eq!(decoder(&be32, ByteOrder::BigEndian).read_i32().unwrap(), -2);
    assert_eq!(
        decoder(&be32, ByteOrder::BigEndian).read_u32().unwrap(),
        4_294_967_294
    );

    assert_eq!(
        decoder(&[0xFF, 0xFE], ByteOrder::BigEndian).read_i16().unwrap(),
        -2
    );
    assert_eq!(
        decoder(&[0xFE, 0xFF], ByteOrder::LittleEndian).read_i16().unwrap(),
        -2
    );

    let be64 = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE];
    assert_eq!(decoder(&be64, ByteOrder::BigEndian).read_i64().unwrap(), -2);
    assert_eq!(
        decoder(&be64, ByteOrder::BigEndian).read_u64().unwrap(),
        u64::MAX - 1
    );
}

#[test]
fn float_one_big_endian() {
    let f32_one = [0x3F, 0x80, 0x00, 0x00];
    let f64_one = [0x3F, 0xF0, 0, 0, 0, 0, 0, 0];
    assert!((decoder(&f32_one, ByteOrder::BigEndian).read_f32().unwrap() - 1.0).abs() < f32::EPSILON);
    assert!((decoder(&f64_one, ByteOrder::BigEndian).read_f64().unwrap() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn float_specials_keep_their_bits() {
    let mut d = decoder(
        &[0x80, 0x00, 0x00, 0x00, 0x7F, 0x80, 0x00, 0x00],
        ByteOrder::BigEndian,
    );
    let negative_zero = d.read_f32().unwrap();
    assert_eq!(negative_zero.to_bits(), 0x8000_0000);
    assert_eq!(d.read_f32().unwrap(), f32::INFINITY);
}

#[test]
fn bool_nonzero_is_true() {
    for byte in 1..=u8::MAX {
        assert!(decoder(&[byte], ByteOrder::BigEndian).read_bool().unwrap());
    }
    assert!(!decoder(&[0x00], ByteOrder::BigEndian).read_bool().unwrap());
}

#[test]
fn single_byte_reads_ignore_order() {
    for order in ORDERS {
        let mut d = decoder(&[0x80, 0x80, 0x80], order);
        assert_eq!(d.read_i8().unwrap(), -128);
        assert_eq!(d.read_u8().unwrap(), 0x80);
        assert_eq!(d.read_byte().unwrap(), 0x80);
    }
}

// ── Round trip ───────────────────────────────────────────────────────────────

#[test]
fn decoded_values_reencode_to_the_same_bytes() {
    let bytes: Vec<u8> = (0x11..=0x18).collect();

    for order in ORDERS {
        let mut d = decoder(&bytes, order);
        let reencoded = match order {
            ByteOrder::BigEndian => d.read_u64().unwrap().to_be_bytes(),
            ByteOrder::LittleEndian => d.read_u64().unwrap().to_le_bytes(),
        };
        assert_eq!(reencoded, bytes.as_slice(), "u64 {order}");

        let mut d = decoder(&bytes[..4], order);
        let reencoded = match order {
            ByteOrder::BigEndian => d.read_i32().unwrap().to_be_bytes(),
            ByteOrder::LittleEndian => d.read_i32().unwrap().to_le_bytes(),
        };
        assert_eq!(reencoded, &bytes[..4], "i32 {order}");

        let mut d = decoder(&bytes[..2], order);
        let reencoded = match order {
            ByteOrder::BigEndian => d.read_u16().unwrap().to_be_bytes(),
            ByteOrder::LittleEndian => d.read_u16().unwrap().to_le_bytes(),
        };
        assert_eq!(reencoded, &bytes[..2], "u16 {order}");

        assert_eq!(decoder(&bytes[..1], order).read_i8().unwrap().to_ne_bytes(), [0x11u8]);
    }
}

#[test]
fn orders_disagree_on_multi_byte_values() {
    let bytes = [0x12, 0x34];
    assert_eq!(decoder(&bytes, ByteOrder::BigEndian).read_u16().unwrap(), 0x1234);
    assert_eq!(
        decoder(&bytes, ByteOrder::LittleEndian).read_u16().unwrap(),
        0x3412
    );
}

#[test]
fn sample_record_decodes_in_both_orders() {
    for order in ORDERS {
        let bytes = sample_record(order);
        let mut d = Decoder::new(Sequential::new(bytes.as_slice()), order);

        assert!(d.read_bool().unwrap());
        assert_eq!(d.read_i8().unwrap(), -5);
        assert_eq!(d.read_u16().unwrap(), 0xBEEF);
        assert_eq!(d.read_i32().unwrap(), -2);
        assert_eq!(d.read_u64().unwrap(), u64::MAX - 1);
        assert_eq!(d.read_f32().unwrap().to_bits(), 1.5f32.to_bits());
        assert_eq!(d.read_f64().unwrap().to_bits(), (-0.25f64).to_bits());
        assert_eq!(d.read_null_terminated_string().unwrap(), "name");
        assert_eq!(d.read_bytes(2).unwrap(), vec![0xAAu8, 0xBB]);
        assert_eq!(d.offset(), bytes.len() as u64);
        assert!(d.read_all().unwrap().is_empty());
    }
}

// ── Short reads ──────────────────────────────────────────────────────────────

#[test]
fn every_width_fails_on_short_input() {
    let short = [0xAB; 7];
    for order in ORDERS {
        assert!(matches!(
            decoder(&short[..1], order).read_u16(),
            Err(DecodeError::UnexpectedEof { expected: 2, read: 1, .. })
        ));
        assert!(matches!(
            decoder(&short[..3], order).read_f32(),
            Err(DecodeError::UnexpectedEof { expected: 4, read: 3, .. })
        ));
        assert!(matches!(
            decoder(&short, order).read_i64(),
            Err(DecodeError::UnexpectedEof { expected: 8, read: 7, .. })
        ));
        assert!(matches!(
            decoder(&[], order).read_bool(),
            Err(DecodeError::UnexpectedEof { expected: 1, read: 0, .. })
        ));
    }
}

#[test]
fn read_bytes_never_returns_partial_block() {
    let mut d = Decoder::new(Sequential::new(&b"abc"[..]), ByteOrder::BigEndian);
    let err = d.read_bytes(5).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedEof {
            offset: 0,
            expected: 5,
            read: 3
        }
    ));
    // The sequential source could not rewind; the short bytes are gone.
    assert_eq!(d.offset(), 3);
    assert!(d.read_all().unwrap().is_empty());
}

#[test]
fn read_byte_leaves_the_rest_untouched() {
    let data = b"\x07tail";
    let mut d = decoder(data, ByteOrder::LittleEndian);
    assert_eq!(d.read_byte().unwrap(), 0x07);
    assert_eq!(d.read_all().unwrap(), b"tail");
}

#[test]
fn skip_then_read() {
    let mut d = decoder(b"\x00\x00\x00\x00\x2A\x00", ByteOrder::LittleEndian);
    d.skip_bytes(4).unwrap();
    assert_eq!(d.read_u16().unwrap(), 42);
    assert!(matches!(
        d.skip_bytes(1),
        Err(DecodeError::UnexpectedEof {
            offset: 6,
            expected: 1,
            read: 0
        })
    ));
}
