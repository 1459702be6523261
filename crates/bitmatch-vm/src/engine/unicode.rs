//! Validated UTF-8, UTF-16, and UTF-32 decoding at the cursor.
//!
//! All three decoders require the offset to be octet-aligned and leave
//! it untouched on any failure. A successful decode advances past the
//! encoded scalar and never yields a surrogate, a noncharacter with low
//! sixteen bits FFFE or FFFF, or a value above U+10FFFF.

use bitmatch_core::ByteOrder;

use super::cursor::MatchCursor;
use super::error::Matched;

/// Largest scalar encodable in `len` UTF-8 bytes, indexed by `len`.
const UTF8_MAX: [u32; 5] = [0, 0x7F, 0x7FF, 0xFFFF, 0x1F_FFFF];

const HIGH_SURROGATE: u32 = 0xD800;
const LOW_SURROGATE: u32 = 0xDC00;

/// Unicode scalar values the decoders accept.
fn is_valid_scalar(c: u32) -> bool {
    (c & !0x7FF) != HIGH_SURROGATE && (c & 0xFFFF) < 0xFFFE && c < 0x11_0000
}

impl MatchCursor {
    /// Decode one UTF-8 encoded scalar at the current offset.
    ///
    /// Overlong encodings, truncated or malformed sequences, lead bytes
    /// announcing more than four bytes, and invalid scalars are all a
    /// no-match, as is a non-octet-aligned offset.
    pub fn decode_utf8(&mut self) -> Matched<char> {
        if !self.is_unit_aligned(8) || self.remaining_bits() < 8 {
            return Matched::NoMatch;
        }
        let mut pos = self.offset();
        let lead = self.source().octet_at(pos / 8);
        pos += 8;

        if lead < 0x80 {
            self.advance(8);
            return Matched::Value(lead as char);
        }

        let len = lead.leading_ones();
        // A bare continuation byte or a 5+-byte lead never starts a
        // valid sequence.
        if len == 1 || len > 4 {
            return Matched::NoMatch;
        }

        let mut acc = (lead & (0x7F >> len)) as u32;
        for _ in 1..len {
            if self.source().bit_len() - pos < 8 {
                return Matched::NoMatch;
            }
            let byte = self.source().octet_at(pos / 8);
            if byte & 0xC0 != 0x80 {
                return Matched::NoMatch;
            }
            acc = (acc << 6) | (byte & 0x3F) as u32;
            pos += 8;
        }

        // Overlong: the scalar fits a shorter sequence.
        if acc <= UTF8_MAX[len as usize - 1] {
            return Matched::NoMatch;
        }
        if !is_valid_scalar(acc) {
            return Matched::NoMatch;
        }

        let consumed = pos - self.offset();
        self.advance(consumed);
        Matched::Value(char::from_u32(acc).expect("validated scalar is a char"))
    }

    /// Decode one UTF-16 encoded scalar at the current offset.
    ///
    /// A high surrogate must be followed by a low surrogate; a lone
    /// surrogate of either kind is a no-match.
    pub fn decode_utf16(&mut self, byte_order: ByteOrder) -> Matched<char> {
        if !self.is_unit_aligned(8) || self.remaining_bits() < 16 {
            return Matched::NoMatch;
        }
        let byte0 = self.offset() / 8;
        let w1 = self.source().unit16_at(byte0, byte_order) as u32;

        if (w1 & !0x3FF) == HIGH_SURROGATE {
            if self.remaining_bits() < 32 {
                return Matched::NoMatch;
            }
            let w2 = self.source().unit16_at(byte0 + 2, byte_order) as u32;
            if (w2 & !0x3FF) != LOW_SURROGATE {
                return Matched::NoMatch;
            }
            let acc = ((w1 & 0x3FF) << 10) + (w2 & 0x3FF) + 0x1_0000;
            if !is_valid_scalar(acc) {
                return Matched::NoMatch;
            }
            self.advance(32);
            return Matched::Value(char::from_u32(acc).expect("validated scalar is a char"));
        }

        if !is_valid_scalar(w1) {
            return Matched::NoMatch;
        }
        self.advance(16);
        Matched::Value(char::from_u32(w1).expect("validated scalar is a char"))
    }

    /// Decode one UTF-32 encoded scalar at the current offset.
    pub fn decode_utf32(&mut self, byte_order: ByteOrder) -> Matched<char> {
        if !self.is_unit_aligned(8) || self.remaining_bits() < 32 {
            return Matched::NoMatch;
        }
        let acc = self.source().unit32_at(self.offset() / 8, byte_order);
        if acc & 0x8000_0000 != 0 || !is_valid_scalar(acc) {
            return Matched::NoMatch;
        }
        self.advance(32);
        Matched::Value(char::from_u32(acc).expect("validated scalar is a char"))
    }

    /// Skip one UTF-8 encoded scalar, validating it fully.
    pub fn skip_utf8(&mut self) -> Matched<()> {
        self.decode_utf8().map(|_| ())
    }

    /// Skip one UTF-16 encoded scalar, validating it fully.
    pub fn skip_utf16(&mut self, byte_order: ByteOrder) -> Matched<()> {
        self.decode_utf16(byte_order).map(|_| ())
    }

    /// Skip one UTF-32 encoded scalar, validating it fully.
    pub fn skip_utf32(&mut self, byte_order: ByteOrder) -> Matched<()> {
        self.decode_utf32(byte_order).map(|_| ())
    }
}
