//! Sub-bitstring extraction, skips, and literal comparison.

use bitmatch_core::BitString;

use super::cursor::MatchCursor;
use super::error::{MatchError, Matched};

/// Requested size of an extracted sub-bitstring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentSize {
    /// Everything left after the current offset.
    All,
    /// An explicit bit count.
    Bits(u64),
    /// A unit multiplier applied to a count. The reference behavior
    /// never defined unit semantics for this path, so requesting it is
    /// a contract error rather than a guess.
    Scaled { unit_bits: u64, count: u64 },
}

impl MatchCursor {
    /// Extract a sub-bitstring at the current offset.
    ///
    /// The result is a zero-copy view sharing the backing storage. A
    /// size exceeding the remaining bits is a no-match, offset
    /// untouched.
    pub fn extract_bits(&mut self, size: SegmentSize) -> Result<Matched<BitString>, MatchError> {
        let want = match size {
            SegmentSize::All => self.remaining_bits(),
            SegmentSize::Bits(n) => n,
            SegmentSize::Scaled { unit_bits, count } => {
                return Err(MatchError::ScaledSegmentSize {
                    unit: unit_bits,
                    count,
                });
            }
        };
        if want > self.remaining_bits() {
            return Ok(Matched::NoMatch);
        }
        let view = self.source().substring(self.offset(), want);
        self.advance(want);
        Ok(Matched::Value(view))
    }

    /// Skip `unit_bits * count` bits without producing a value.
    pub fn skip_bits(&mut self, unit_bits: u64, count: u64) -> Matched<()> {
        let Some(want) = unit_bits.checked_mul(count) else {
            // Overflowing u64 certainly exceeds the input.
            return Matched::NoMatch;
        };
        if want > self.remaining_bits() {
            return Matched::NoMatch;
        }
        self.advance(want);
        Matched::Value(())
    }

    /// Compare `literal` against the bits at the current offset.
    ///
    /// Octet-by-octet, the final partial octet over its valid bit count
    /// only. On a full match the offset advances by the literal's bit
    /// length; any mismatch leaves it untouched.
    pub fn match_literal(&mut self, literal: &BitString) -> Matched<()> {
        let len = literal.bit_len();
        if len > self.remaining_bits() {
            return Matched::NoMatch;
        }
        let base = self.offset();
        let mut pos = 0u64;
        while pos < len {
            let take = (len - pos).min(8) as u32;
            if self.source().bits_at(base + pos, take) != literal.bits_at(pos, take) {
                return Matched::NoMatch;
            }
            pos += take as u64;
        }
        self.advance(len);
        Matched::Value(())
    }
}
