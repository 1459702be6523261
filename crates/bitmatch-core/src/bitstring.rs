//! Immutable bit-addressable byte sequences.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Byte order for multi-octet unit reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    /// The byte order of the host platform.
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }
}

/// Immutable bit string backed by shared storage.
///
/// A `BitString` is a view over `Arc<[u8]>` bytes: a bit offset plus a
/// bit length. [`substring`](Self::substring) produces views sharing the
/// same allocation, so slicing is O(1) and never copies. The storage is
/// never mutated after construction; any number of views and match
/// cursors may read it concurrently.
///
/// Bit 0 is the most significant bit of the first byte in the view.
#[derive(Clone)]
pub struct BitString {
    data: Arc<[u8]>,
    bit_offset: u64,
    bit_len: u64,
}

impl BitString {
    /// Create a bit string covering `bytes` in full.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        let data = bytes.into();
        let bit_len = data.len() as u64 * 8;
        Self {
            data,
            bit_offset: 0,
            bit_len,
        }
    }

    /// Create a bit string covering the first `bit_len` bits of `bytes`.
    ///
    /// Panics when `bit_len` exceeds the bits available in `bytes`.
    pub fn from_bits(bytes: impl Into<Arc<[u8]>>, bit_len: u64) -> Self {
        let data = bytes.into();
        assert!(
            bit_len <= data.len() as u64 * 8,
            "bit length {} exceeds {} available bits",
            bit_len,
            data.len() as u64 * 8
        );
        Self {
            data,
            bit_offset: 0,
            bit_len,
        }
    }

    /// Length in bits.
    #[inline]
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Check if the bit string holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Read `width` bits (at most 64) starting at `bit_offset`, as an
    /// unsigned integer with the first bit in the most significant
    /// position.
    ///
    /// Panics when the requested range is out of bounds; callers check
    /// remaining bits before reading.
    pub fn bits_at(&self, bit_offset: u64, width: u32) -> u64 {
        assert!(width <= 64, "bit read width {width} exceeds 64");
        assert!(
            bit_offset + width as u64 <= self.bit_len,
            "bit read {}..{} out of range for {} bits",
            bit_offset,
            bit_offset + width as u64,
            self.bit_len
        );

        let mut pos = self.bit_offset + bit_offset;
        let mut remaining = width;
        let mut acc = 0u64;
        while remaining > 0 {
            let byte = self.data[(pos / 8) as usize] as u64;
            let avail = 8 - (pos % 8) as u32;
            let take = remaining.min(avail);
            let chunk = (byte >> (avail - take)) & ((1u64 << take) - 1);
            acc = (acc << take) | chunk;
            pos += take as u64;
            remaining -= take;
        }
        acc
    }

    /// Read the octet starting at byte offset `byte_index` (relative to
    /// this view, which need not be byte-aligned in its storage).
    #[inline]
    pub fn octet_at(&self, byte_index: u64) -> u8 {
        self.bits_at(byte_index * 8, 8) as u8
    }

    /// Read a 16-bit unit at byte offset `byte_index`, honoring `order`.
    pub fn unit16_at(&self, byte_index: u64, order: ByteOrder) -> u16 {
        let b = [self.octet_at(byte_index), self.octet_at(byte_index + 1)];
        match order {
            ByteOrder::Big => u16::from_be_bytes(b),
            ByteOrder::Little => u16::from_le_bytes(b),
        }
    }

    /// Read a 32-bit unit at byte offset `byte_index`, honoring `order`.
    pub fn unit32_at(&self, byte_index: u64, order: ByteOrder) -> u32 {
        let b = [
            self.octet_at(byte_index),
            self.octet_at(byte_index + 1),
            self.octet_at(byte_index + 2),
            self.octet_at(byte_index + 3),
        ];
        match order {
            ByteOrder::Big => u32::from_be_bytes(b),
            ByteOrder::Little => u32::from_le_bytes(b),
        }
    }

    /// Zero-copy sub-range view of `bit_len` bits starting at `bit_offset`.
    ///
    /// The view shares this bit string's storage. Panics when the range
    /// is out of bounds.
    pub fn substring(&self, bit_offset: u64, bit_len: u64) -> Self {
        assert!(
            bit_offset + bit_len <= self.bit_len,
            "substring {}..{} out of range for {} bits",
            bit_offset,
            bit_offset + bit_len,
            self.bit_len
        );
        Self {
            data: Arc::clone(&self.data),
            bit_offset: self.bit_offset + bit_offset,
            bit_len,
        }
    }

    /// Copy out the bits as packed bytes, final partial octet
    /// left-aligned and zero-padded.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bit_len.div_ceil(8) as usize);
        let mut pos = 0u64;
        while pos < self.bit_len {
            let take = (self.bit_len - pos).min(8) as u32;
            out.push((self.bits_at(pos, take) as u8) << (8 - take));
            pos += take as u64;
        }
        out
    }
}

/// Content equality at bit granularity: lengths must match, and the
/// final partial octet is compared over its valid bits only.
impl PartialEq for BitString {
    fn eq(&self, other: &Self) -> bool {
        if self.bit_len != other.bit_len {
            return false;
        }
        let mut pos = 0u64;
        while pos < self.bit_len {
            let take = (self.bit_len - pos).min(8) as u32;
            if self.bits_at(pos, take) != other.bits_at(pos, take) {
                return false;
            }
            pos += take as u64;
        }
        true
    }
}

impl Eq for BitString {}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitString")
            .field("bit_len", &self.bit_len)
            .field("bytes", &format_args!("{:02x?}", self.to_bytes()))
            .finish()
    }
}

impl Serialize for BitString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("BitString", 2)?;
        s.serialize_field("bit_len", &self.bit_len)?;
        s.serialize_field("bytes", &self.to_bytes())?;
        s.end()
    }
}
