use crate::error::{BloomError, Result};
use bitvec::{order::Lsb0, vec::BitVec};

/// Fixed-length packed bit array backed by 64-bit words.
///
/// The length is set at construction and never changes. Positions at or past
/// [`BitArray::len`] are a caller bug and panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec<u64, Lsb0>,
}

impl BitArray {
    /// Allocates a zeroed array of `len` bits.
    ///
    /// Memory is reserved fallibly so an oversized filter reports
    /// [`BloomError::AllocationFailed`] instead of aborting the process.
    pub fn new(len: usize) -> Result<Self> {
        let words = len.div_ceil(64);
        let mut storage: Vec<u64> = Vec::new();
        storage
            .try_reserve_exact(words)
            .map_err(|_| BloomError::AllocationFailed {
                bytes: words.saturating_mul(8),
            })?;
        storage.resize(words, 0);

        let mut bits = BitVec::from_vec(storage);
        bits.truncate(len);
        Ok(Self { bits })
    }

    #[inline]
    pub fn set(&mut self, pos: usize) {
        self.bits.set(pos, true);
    }

    #[inline]
    pub fn test(&self, pos: usize) -> bool {
        self.bits[pos]
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.bits.as_raw_slice().len() * 8
    }
}
