use crate::bits::BitArray;
use crate::error::Result;
use crate::hash::Probes;
use crate::params::BloomParams;
use crate::traits::BloomFilterStats;

/// One Bloom filter generation: a bit array plus the number of inserts it
/// has absorbed since it was last cleared.
#[derive(Debug, Clone)]
pub struct Filter {
    bits: BitArray,
    params: BloomParams,
    insert_count: usize,
}

impl Filter {
    pub fn new(params: &BloomParams) -> Result<Self> {
        Ok(Self {
            bits: BitArray::new(params.bit_vector_size)?,
            params: *params,
            insert_count: 0,
        })
    }

    /// Probe positions of `item` in this filter's bit array.
    pub fn probes(&self, item: &[u8]) -> Probes {
        Probes::new(item, self.params.num_hashes, self.bits.len())
    }

    /// Never rejects: past capacity the filter just gets less accurate.
    pub fn insert(&mut self, item: &[u8]) {
        let probes = self.probes(item);
        self.insert_probes(probes);
    }

    pub fn contains(&self, item: &[u8]) -> bool {
        self.contains_probes(self.probes(item))
    }

    pub(crate) fn insert_probes(&mut self, probes: Probes) {
        for pos in probes {
            self.bits.set(pos);
        }
        self.insert_count += 1;
    }

    pub(crate) fn contains_probes(&self, mut probes: Probes) -> bool {
        probes.all(|pos| self.bits.test(pos))
    }

    pub fn clear(&mut self) {
        self.bits.clear();
        self.insert_count = 0;
    }

    pub fn insert_count(&self) -> usize {
        self.insert_count
    }

    pub fn num_hashes(&self) -> usize {
        self.params.num_hashes
    }

    pub fn bits(&self) -> &BitArray {
        &self.bits
    }

    /// Fraction of bits currently set.
    pub fn fill_ratio(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Probability that a key never inserted still tests positive, given the
    /// current fill: `fill_ratio ^ k`.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powi(self.params.num_hashes as i32)
    }
}

impl BloomFilterStats for Filter {
    fn capacity(&self) -> usize {
        self.params.capacity
    }

    fn false_positive_rate(&self) -> f64 {
        self.params.false_positive_rate
    }

    fn insert_count(&self) -> usize {
        self.insert_count
    }

    fn num_hashes(&self) -> usize {
        self.params.num_hashes
    }

    fn bit_vector_size(&self) -> usize {
        self.bits.len()
    }
}
