const MURMUR_M: u64 = 0xc6a4a7935bd1e995;
const MURMUR_R: u32 = 47;

/// 64-bit MurmurHash2 (variant 64A).
///
/// Full 8-byte words are read little-endian so results do not depend on the
/// host byte order. The seed is folded into the initial accumulator.
pub fn murmur64a(key: &[u8], seed: u32) -> u64 {
    let mut h = u64::from(seed) ^ (key.len() as u64).wrapping_mul(MURMUR_M);

    let mut tail = key;
    while let Some((word, rest)) = tail.split_first_chunk::<8>() {
        let mut k = u64::from_le_bytes(*word);
        k = k.wrapping_mul(MURMUR_M);
        k ^= k >> MURMUR_R;
        k = k.wrapping_mul(MURMUR_M);

        h ^= k;
        h = h.wrapping_mul(MURMUR_M);
        tail = rest;
    }

    if !tail.is_empty() {
        for (i, &byte) in tail.iter().enumerate() {
            h ^= u64::from(byte) << (8 * i);
        }
        h = h.wrapping_mul(MURMUR_M);
    }

    h ^= h >> MURMUR_R;
    h = h.wrapping_mul(MURMUR_M);
    h ^= h >> MURMUR_R;
    h
}

/// Folds a 64-bit hash into 32 bits (high half xor low half).
#[inline]
pub fn mix64(v: u64) -> u32 {
    ((v >> 32) ^ v) as u32
}

/// Probe positions for one key: `(h1 + i * h2) mod m` for `i` in `0..k`.
///
/// Hashing happens once in [`Probes::new`]; iterating is pure arithmetic, so
/// the same `Probes` can be replayed against several bit arrays of the same
/// size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probes {
    h1: u64,
    h2: u64,
    num_hashes: usize,
    bit_vector_size: usize,
    next: usize,
}

impl Probes {
    pub fn new(item: &[u8], num_hashes: usize, bit_vector_size: usize) -> Self {
        debug_assert!(bit_vector_size > 0);
        let h1 = murmur64a(item, 0);
        let h2 = murmur64a(item, mix64(h1));
        Self {
            h1,
            h2,
            num_hashes,
            bit_vector_size,
            next: 0,
        }
    }

    pub fn hashes(&self) -> (u64, u64) {
        (self.h1, self.h2)
    }
}

impl Iterator for Probes {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.num_hashes {
            return None;
        }
        let i = self.next as u64;
        self.next += 1;
        let pos = self.h1.wrapping_add(i.wrapping_mul(self.h2))
            % self.bit_vector_size as u64;
        Some(pos as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.num_hashes - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Probes {}
