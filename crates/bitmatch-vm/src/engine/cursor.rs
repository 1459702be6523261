//! Match cursor: position, segment marker, and checkpoint slots.

use bitmatch_core::BitString;

use super::error::MatchError;

/// Mutable match position over an immutable [`BitString`].
///
/// A cursor is a plain value: the backing storage is shared, the offset
/// and checkpoint slots are owned. `Clone` duplicates the cursor for
/// fan-out; two clones never observe each other's movement. Capacity
/// growth goes through [`ensure_slots`](Self::ensure_slots), which
/// consumes the cursor and returns a (possibly new) value rather than
/// resizing an array other copies could be holding.
#[derive(Clone, Debug)]
pub struct MatchCursor {
    bits: BitString,
    /// Current position, in bits. Invariant: `offset <= bits.bit_len()`.
    offset: u64,
    /// Segment-start marker, independent of the indexed slots.
    start_offset: u64,
    /// Checkpoint slots; each holds 0 or an offset saved by `save`.
    slots: Vec<u64>,
}

impl MatchCursor {
    /// Create a cursor at offset 0 with at least one checkpoint slot.
    pub fn new(bits: BitString, n_slots: usize) -> Self {
        Self {
            bits,
            offset: 0,
            start_offset: 0,
            slots: vec![0; n_slots.max(1)],
        }
    }

    /// Grow the checkpoint-slot array to at least `n_slots`.
    ///
    /// Returns the cursor unchanged when capacity already suffices;
    /// otherwise returns a new cursor value carrying the offset, the
    /// segment-start marker, and slot 0.
    pub fn ensure_slots(self, n_slots: usize) -> Self {
        if self.slots.len() >= n_slots {
            return self;
        }
        let mut grown = Self::new(self.bits, n_slots);
        grown.offset = self.offset;
        grown.start_offset = self.start_offset;
        grown.slots[0] = self.slots[0];
        grown
    }

    /// The backing bit string.
    #[inline]
    pub fn source(&self) -> &BitString {
        &self.bits
    }

    /// Current offset in bits from the start of the backing bit string.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of checkpoint slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Bits left between the offset and the end of the bit string.
    #[inline]
    pub fn remaining_bits(&self) -> u64 {
        self.bits.bit_len() - self.offset
    }

    /// Save the current offset into a checkpoint slot.
    pub fn save(&mut self, slot: usize) -> Result<(), MatchError> {
        self.check_slot(slot)?;
        self.slots[slot] = self.offset;
        Ok(())
    }

    /// Restore the offset from a checkpoint slot.
    pub fn restore(&mut self, slot: usize) -> Result<(), MatchError> {
        self.check_slot(slot)?;
        self.offset = self.slots[slot];
        Ok(())
    }

    fn check_slot(&self, slot: usize) -> Result<(), MatchError> {
        if slot >= self.slots.len() {
            return Err(MatchError::SlotOutOfRange {
                slot,
                capacity: self.slots.len(),
            });
        }
        Ok(())
    }

    /// Mark the current offset as the segment start.
    pub fn mark_start(&mut self) {
        self.start_offset = self.offset;
    }

    /// Rewind the offset to the segment-start marker.
    pub fn rewind_to_start(&mut self) {
        self.offset = self.start_offset;
    }

    /// True when the offset is a whole number of `unit_bits` units.
    ///
    /// Caller contract: `unit_bits >= 1`.
    pub fn is_unit_aligned(&self, unit_bits: u64) -> bool {
        debug_assert!(unit_bits > 0, "alignment unit must be at least 1");
        self.offset % unit_bits == 0
    }

    /// True when exactly `expected_bits` bits remain.
    pub fn has_exact_tail(&self, expected_bits: u64) -> bool {
        self.remaining_bits() == expected_bits
    }

    /// Consume the cursor, returning the unconsumed tail as a zero-copy
    /// view of the backing storage.
    pub fn into_tail(self) -> BitString {
        let remaining = self.bits.bit_len() - self.offset;
        self.bits.substring(self.offset, remaining)
    }

    /// Advance past bits a successful operation consumed.
    #[inline]
    pub(crate) fn advance(&mut self, bits: u64) {
        debug_assert!(bits <= self.remaining_bits());
        self.offset += bits;
    }
}

/// Subject of a match at the compiled-code boundary.
///
/// Generated matching code may begin a match over a plain bit string or
/// over a cursor handed back by an earlier clause. The host resolves its
/// tagged term to one of these variants once, at this boundary; a term
/// that is neither never reaches the engine.
#[derive(Clone, Debug)]
pub enum MatchInput {
    Bits(BitString),
    Cursor(MatchCursor),
}

impl MatchInput {
    /// Begin a match with at least `n_slots` checkpoint slots.
    ///
    /// A bit string gets a fresh cursor at offset 0; an existing cursor
    /// keeps its position and is grown as needed.
    pub fn start_match(self, n_slots: usize) -> MatchCursor {
        match self {
            MatchInput::Bits(bits) => MatchCursor::new(bits, n_slots),
            MatchInput::Cursor(cursor) => cursor.ensure_slots(n_slots),
        }
    }
}

impl From<BitString> for MatchInput {
    fn from(bits: BitString) -> Self {
        MatchInput::Bits(bits)
    }
}

impl From<MatchCursor> for MatchInput {
    fn from(cursor: MatchCursor) -> Self {
        MatchInput::Cursor(cursor)
    }
}
