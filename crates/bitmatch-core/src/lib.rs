#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core value types for bitmatch.
//!
//! A [`BitString`] is an immutable, sharable, bit-addressable byte
//! sequence: the storage that match cursors in `bitmatch-vm` decompose
//! into typed fields. Sub-range views are zero-copy and share one
//! allocation, so many cursors can read the same bits concurrently.

mod bitstring;


pub use bitstring::{BitString, ByteOrder};
