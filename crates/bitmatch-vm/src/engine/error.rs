//! Failure channels for match operations.
//!
//! Every fallible operation resolves to exactly one of three outcomes:
//! success with a value, [`Matched::NoMatch`], or a fatal [`MatchError`].
//! The two failure channels are disjoint: no-match is routine control
//! flow for matching code, while a `MatchError` means the generated
//! matching code (or its compiler) passed a structurally invalid
//! argument.

use serde::Serialize;

/// Soft result of a match operation.
///
/// `NoMatch` means the data at the current position did not satisfy the
/// requested pattern: insufficient remaining bits, a literal mismatch,
/// an invalid Unicode sequence. Matching code branches on it to try the
/// next alternative clause. A no-match guarantees the cursor offset is
/// exactly what it was on entry.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Matched<T> {
    /// The pattern matched and the cursor advanced.
    Value(T),
    /// The data did not satisfy the pattern; the cursor is unchanged.
    NoMatch,
}

impl<T> Matched<T> {
    /// True for the no-match outcome.
    #[inline]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Matched::NoMatch)
    }

    /// The matched value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Matched::Value(v) => Some(v),
            Matched::NoMatch => None,
        }
    }

    /// Map the matched value, keeping no-match as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Matched<U> {
        match self {
            Matched::Value(v) => Matched::Value(f(v)),
            Matched::NoMatch => Matched::NoMatch,
        }
    }
}

/// Fatal contract violation by the caller of the engine.
///
/// These indicate a bug in the generated matching code or its compiler,
/// never a property of the input data, and are not recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// Checkpoint slot index at or beyond the cursor's slot capacity.
    #[error("checkpoint slot {slot} out of range for cursor with {capacity} slots")]
    SlotOutOfRange { slot: usize, capacity: usize },

    /// Little-endian extraction of a 33-64 bit integer. The reference
    /// behavior never defined this combination; it fails loudly instead
    /// of silently misreading.
    #[error("little-endian byte order unsupported for {width}-bit integer extraction")]
    UnsupportedByteOrder { width: u64 },

    /// Unit-scaled segment sizes have no defined semantics.
    #[error("scaled segment size {count} x {unit} bits is not implemented")]
    ScaledSegmentSize { unit: u64, count: u64 },
}
