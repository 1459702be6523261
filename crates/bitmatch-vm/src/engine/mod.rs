//! Match engine for decomposing bit-strings into typed fields.
//!
//! Compiled matching code creates a [`MatchCursor`] over a `BitString`,
//! then runs a sequence of extraction, decoding, and predicate
//! operations against it, saving and restoring checkpoint slots to
//! backtrack when an alternative clause fails.

mod cursor;
mod error;
mod integer;
mod segment;
mod unicode;

#[cfg(test)]
mod backtrack_tests;
#[cfg(test)]
mod integer_tests;

pub use cursor::{MatchCursor, MatchInput};
pub use error::{MatchError, Matched};
pub use integer::{Int, Signedness};
pub use segment::SegmentSize;
