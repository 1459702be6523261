use bitmatch_core::{BitString, ByteOrder};
use num_bigint::BigInt;

use crate::engine::{Int, MatchCursor, MatchError, Matched, Signedness};

fn cursor(bytes: &[u8]) -> MatchCursor {
    MatchCursor::new(BitString::from_bytes(bytes.to_vec()), 1)
}

fn small(
    c: &mut MatchCursor,
    width: u64,
    signedness: Signedness,
    order: ByteOrder,
) -> i64 {
    match c.extract_integer(width, signedness, order).unwrap() {
        Matched::Value(Int::Small(v)) => v,
        other => panic!("expected small integer, got {other:?}"),
    }
}

#[test]
fn zero_width_yields_zero_without_moving() {
    let mut c = cursor(&[0xAB]);
    let v = small(&mut c, 0, Signedness::Unsigned, ByteOrder::Big);
    assert_eq!(v, 0);
    assert_eq!(c.offset(), 0);
}

#[test]
fn insufficient_bits_is_no_match() {
    let mut c = cursor(&[0xAB, 0xCD]);
    let got = c
        .extract_integer(20, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert!(got.is_no_match());
    assert_eq!(c.offset(), 0);

    let got = c
        .extract_integer(100, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert!(got.is_no_match());
    assert_eq!(c.offset(), 0);
}

#[test]
fn successive_unaligned_fields() {
    let mut c = MatchCursor::new(BitString::from_bits(vec![0xAB, 0xCD, 0xE0], 20), 1);
    assert_eq!(small(&mut c, 12, Signedness::Unsigned, ByteOrder::Big), 0xABC);
    assert_eq!(c.offset(), 12);
    assert_eq!(small(&mut c, 8, Signedness::Unsigned, ByteOrder::Big), 0xDE);
    assert_eq!(c.offset(), 20);
    assert_eq!(c.remaining_bits(), 0);
}

#[test]
fn signed_narrow_fields_sign_extend() {
    let mut c = cursor(&[0xF0]);
    assert_eq!(small(&mut c, 4, Signedness::Signed, ByteOrder::Big), -1);

    let mut c = cursor(&[0xAB, 0xC0]);
    assert_eq!(small(&mut c, 12, Signedness::Signed, ByteOrder::Big), -1348);

    let mut c = cursor(&[0x2B, 0xC0]);
    assert_eq!(small(&mut c, 12, Signedness::Signed, ByteOrder::Big), 0x2BC);
}

#[test]
fn little_endian_reverses_the_full_32_bit_pattern() {
    let mut c = cursor(&[0x12, 0x34, 0x56, 0x78]);
    assert_eq!(
        small(&mut c, 32, Signedness::Unsigned, ByteOrder::Little),
        0x7856_3412
    );

    let mut c = cursor(&[0x12, 0x34]);
    assert_eq!(
        small(&mut c, 16, Signedness::Unsigned, ByteOrder::Little),
        0x3412_0000
    );
}

#[test]
fn wide_fields_up_to_64_bits() {
    let mut c = cursor(&[0xFF; 5]);
    assert_eq!(
        small(&mut c, 40, Signedness::Unsigned, ByteOrder::Big),
        0xFF_FFFF_FFFF
    );

    let mut c = cursor(&[0xFF; 5]);
    assert_eq!(small(&mut c, 40, Signedness::Signed, ByteOrder::Big), -1);
}

#[test]
fn little_endian_beyond_32_bits_is_fatal() {
    let mut c = cursor(&[0xFF; 6]);
    assert_eq!(
        c.extract_integer(48, Signedness::Unsigned, ByteOrder::Little),
        Err(MatchError::UnsupportedByteOrder { width: 48 })
    );
    assert_eq!(c.offset(), 0);
}

#[test]
fn full_64_bit_unsigned_overflows_into_big() {
    let mut c = cursor(&[0xFF; 8]);
    let got = c
        .extract_integer(64, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert_eq!(got, Matched::Value(Int::Big(BigInt::from(u64::MAX))));
    assert_eq!(c.offset(), 64);

    let mut c = cursor(&[0xFF; 8]);
    assert_eq!(small(&mut c, 64, Signedness::Signed, ByteOrder::Big), -1);
}

#[test]
fn beyond_64_bits_whole_byte_widths() {
    let mut c = cursor(&[0xFF; 10]);
    let expected = (BigInt::from(1) << 80) - 1;
    let got = c
        .extract_integer(80, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert_eq!(got, Matched::Value(Int::Big(expected)));
    assert_eq!(c.offset(), 80);

    let mut c = cursor(&[0xFF; 10]);
    assert_eq!(small(&mut c, 80, Signedness::Signed, ByteOrder::Big), -1);
}

#[test]
fn beyond_64_bits_partial_lead_byte() {
    // 68 bits: a 4-bit lead plus eight full bytes.
    let mut c = cursor(&[0xFF; 9]);
    assert_eq!(small(&mut c, 68, Signedness::Signed, ByteOrder::Big), -1);
    assert_eq!(c.offset(), 68);

    let mut c = cursor(&[0xFF; 9]);
    let expected = (BigInt::from(1) << 68) - 1;
    let got = c
        .extract_integer(68, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert_eq!(got, Matched::Value(Int::Big(expected)));
}

#[test]
fn big_results_normalize_back_to_small() {
    // 72 bits whose value fits i64 comes back as Small.
    let mut c = cursor(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x12, 0x34]);
    assert_eq!(
        small(&mut c, 72, Signedness::Unsigned, ByteOrder::Big),
        0x1234
    );
}
