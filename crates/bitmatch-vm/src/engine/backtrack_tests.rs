//! End-to-end clause-style scenarios combining extraction with
//! checkpoint save and restore.

use bitmatch_core::{BitString, ByteOrder};
use serde_json::json;

use crate::engine::{Int, MatchCursor, MatchInput, Matched, SegmentSize, Signedness};

#[test]
fn failed_clause_restores_and_next_clause_matches() {
    // A two-clause pattern over a tagged frame: <<1, len, _:len/bytes>>
    // or <<2, value:16>>. The input carries tag 2, so the first clause
    // fails at the literal and the second runs from the checkpoint.
    let input = BitString::from_bytes(vec![0x02, 0xBE, 0xEF]);
    let mut c = MatchInput::from(input).start_match(1);
    c.save(0).unwrap();

    let tag_one = BitString::from_bytes(vec![0x01]);
    assert!(c.match_literal(&tag_one).is_no_match());

    c.restore(0).unwrap();
    let tag_two = BitString::from_bytes(vec![0x02]);
    assert_eq!(c.match_literal(&tag_two), Matched::Value(()));
    let value = c
        .extract_integer(16, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert_eq!(value, Matched::Value(Int::Small(0xBEEF)));
    assert!(c.has_exact_tail(0));
}

#[test]
fn deep_clause_failure_rewinds_consumed_fields() {
    // First clause consumes a header and then misses on a literal; the
    // restore must rewind past everything the clause consumed.
    let input = BitString::from_bytes(vec![0x05, 0x00, 0x07]);
    let mut c = MatchCursor::new(input, 2);
    c.save(0).unwrap();

    let header = c
        .extract_integer(8, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert_eq!(header, Matched::Value(Int::Small(5)));
    let miss = BitString::from_bytes(vec![0xFF]);
    assert!(c.match_literal(&miss).is_no_match());

    c.restore(0).unwrap();
    assert_eq!(c.offset(), 0);
    let whole = c
        .extract_integer(24, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert_eq!(whole, Matched::Value(Int::Small(0x050007)));
}

#[test]
fn cursor_survives_across_clause_boundaries() {
    // A clause binds the tail as a sub-bitstring and a later match
    // resumes over it through the input boundary.
    let input = BitString::from_bytes(vec![0x01, 0xAB, 0xCD]);
    let mut c = MatchInput::from(input).start_match(1);
    let _tag = c
        .extract_integer(8, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();

    let mut resumed = MatchInput::from(c).start_match(2);
    assert_eq!(resumed.offset(), 8);
    let rest = resumed
        .extract_bits(SegmentSize::All)
        .unwrap()
        .value()
        .unwrap();
    assert_eq!(rest, BitString::from_bytes(vec![0xAB, 0xCD]));
}

#[test]
fn tail_binding_after_partial_consumption() {
    let input = BitString::from_bytes(vec![0xAB, 0xCD, 0xEF]);
    let mut c = MatchCursor::new(input, 1);
    let _head = c
        .extract_integer(12, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    let tail = c.into_tail();
    assert_eq!(tail.bit_len(), 12);
    assert_eq!(tail.bits_at(0, 12), 0xDEF);
}

#[test]
fn extracted_values_serialize() {
    let input = BitString::from_bytes(vec![0x02, 0xBE, 0xEF]);
    let mut c = MatchCursor::new(input, 1);
    let value = c
        .extract_integer(8, Signedness::Unsigned, ByteOrder::Big)
        .unwrap();
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({ "Value": { "Small": 2 } })
    );

    let rest = c.extract_bits(SegmentSize::All).unwrap().value().unwrap();
    assert_eq!(
        serde_json::to_value(&rest).unwrap(),
        json!({ "bit_len": 16, "bytes": [0xBE, 0xEF] })
    );
}
