//! Width-, sign-, and endian-aware integer extraction.

use bitmatch_core::ByteOrder;
use num_bigint::BigInt;
use serde::Serialize;

use super::cursor::MatchCursor;
use super::error::{MatchError, Matched};

/// Whether an extracted field is interpreted as two's-complement signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// Extracted integer value.
///
/// Any value representable as `i64` is `Small`; `Big` appears only for
/// widths beyond 64 bits whose value does not fit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Int {
    Small(i64),
    Big(BigInt),
}

impl Int {
    fn from_bigint(value: BigInt) -> Self {
        match i64::try_from(&value) {
            Ok(small) => Int::Small(small),
            Err(_) => Int::Big(value),
        }
    }
}

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Int::Small(value)
    }
}

impl MatchCursor {
    /// Extract a `width_bits`-wide integer at the current offset.
    ///
    /// Zero width yields 0 without moving the cursor. Fewer than
    /// `width_bits` remaining bits is a no-match, offset untouched. On
    /// success the offset advances by exactly `width_bits`.
    ///
    /// Widths up to 32 are read as a 32-bit big-endian pattern; a
    /// little-endian request reverses the four constituent bytes before
    /// interpretation. Widths of 33-64 support big-endian only; a
    /// little-endian request there is a fatal error. Wider fields go
    /// through explicit two's-complement byte assembly into a `BigInt`.
    pub fn extract_integer(
        &mut self,
        width_bits: u64,
        signedness: Signedness,
        byte_order: ByteOrder,
    ) -> Result<Matched<Int>, MatchError> {
        if width_bits == 0 {
            return Ok(Matched::Value(Int::Small(0)));
        }
        if self.remaining_bits() < width_bits {
            return Ok(Matched::NoMatch);
        }

        if width_bits <= 32 {
            Ok(Matched::Value(self.take_int32(
                width_bits as u32,
                signedness,
                byte_order,
            )))
        } else if width_bits <= 64 {
            if byte_order == ByteOrder::Little {
                return Err(MatchError::UnsupportedByteOrder { width: width_bits });
            }
            Ok(Matched::Value(self.take_int64(width_bits as u32, signedness)))
        } else {
            Ok(Matched::Value(self.take_bigint(width_bits, signedness)))
        }
    }

    fn take_int32(&mut self, width: u32, signedness: Signedness, byte_order: ByteOrder) -> Int {
        let mut value = self.source().bits_at(self.offset(), width) as u32;
        if byte_order == ByteOrder::Little {
            // Reversal is over the full 32-bit pattern, not the logical width.
            value = value.swap_bytes();
        }
        let value = match signedness {
            Signedness::Signed => sign_extend_32(value, width) as i64,
            Signedness::Unsigned => value as i64,
        };
        self.advance(width as u64);
        Int::Small(value)
    }

    fn take_int64(&mut self, width: u32, signedness: Signedness) -> Int {
        let value = self.source().bits_at(self.offset(), width);
        self.advance(width as u64);
        match signedness {
            Signedness::Signed => Int::Small(sign_extend_64(value, width)),
            Signedness::Unsigned => match i64::try_from(value) {
                Ok(small) => Int::Small(small),
                Err(_) => Int::Big(BigInt::from(value)),
            },
        }
    }

    /// Assemble a big-endian two's-complement byte sequence and hand it
    /// to the big-integer facility. The partial-leading-byte and
    /// sign-extension rules here are part of the observable contract.
    fn take_bigint(&mut self, width_bits: u64, signedness: Signedness) -> Int {
        let lead_bits = (width_bits % 8) as u32;
        let full_bytes = width_bits / 8;
        let mut pos = self.offset();
        let mut data = Vec::with_capacity(full_bytes as usize + 1);

        if lead_bits != 0 {
            // Leading partial byte, widened to a full octet; its top
            // bits carry the sign when the field is signed.
            let mut lead = self.source().bits_at(pos, lead_bits) as u8;
            if signedness == Signedness::Signed {
                lead = sign_extend_8(lead, lead_bits);
            }
            data.push(lead);
            pos += lead_bits as u64;
        } else if signedness == Signedness::Unsigned {
            // Whole-byte unsigned width: a zero byte up front forces the
            // two's-complement interpretation non-negative.
            data.push(0);
        }

        for _ in 0..full_bytes {
            data.push(self.source().bits_at(pos, 8) as u8);
            pos += 8;
        }

        self.advance(width_bits);
        Int::from_bigint(BigInt::from_signed_bytes_be(&data))
    }
}

/// Sign-extend the low `width` bits of `value` to the full 32 bits.
fn sign_extend_32(value: u32, width: u32) -> i32 {
    let shift = 32 - width;
    ((value << shift) as i32) >> shift
}

/// Sign-extend the low `width` bits of `value` to the full 64 bits.
fn sign_extend_64(value: u64, width: u32) -> i64 {
    let shift = 64 - width;
    ((value << shift) as i64) >> shift
}

/// Sign-extend the low `width` bits of `value` to a full octet.
fn sign_extend_8(value: u8, width: u32) -> u8 {
    let shift = 8 - width;
    (((value << shift) as i8) >> shift) as u8
}
