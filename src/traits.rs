/// Read-only sizing and usage figures.
pub trait BloomFilterStats {
    fn capacity(&self) -> usize;
    fn false_positive_rate(&self) -> f64;
    /// Inserts absorbed by the filter that answers lookups.
    fn insert_count(&self) -> usize;
    fn num_hashes(&self) -> usize;
    fn bit_vector_size(&self) -> usize;

    /// Share of capacity used by the current generation.
    fn load_factor(&self) -> f64 {
        self.insert_count() as f64 / self.capacity() as f64
    }
}
