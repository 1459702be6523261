//! Bit-syntax match engine.
//!
//! This crate provides the runtime that compiled matching code calls to
//! decompose an immutable bit-string into typed fields: integers of any
//! width and endianness, zero-copy sub-bitstrings, validated Unicode
//! scalars, and exact literal comparisons, with checkpoint slots for
//! backtracking across failed alternative clauses.

pub mod engine;

// Re-export commonly used items at crate root
pub use bitmatch_core::{BitString, ByteOrder};
pub use engine::{Int, MatchCursor, MatchError, MatchInput, Matched, SegmentSize, Signedness};
