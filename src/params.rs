//! Filter sizing.
//!
//! `m = ceil(-ln(p) * n / ln(2)^2)`, then padded to the next 64-bit word
//! boundary. `k = floor(ln(2) * m / n) + 1`.
//!
//! Both the padding and the extra probe change the measured false positive
//! rate, so they are kept as named constants rather than folded into an
//! "optimal" formula.
use crate::config::BloomFilterConfig;

/// Bit arrays are always a whole number of 64-bit words.
pub const WORD_BITS: usize = 64;

/// Added to the theoretical probe count.
pub const HASH_COUNT_BIAS: usize = 1;

/// Number of bits needed for `n` items at false positive rate `fpr`.
///
/// The raw size is padded to the *next* word boundary: a size that is
/// already aligned still gains one extra word.
pub fn optimal_bit_vector_size(n: usize, fpr: f64) -> usize {
    let ln2 = std::f64::consts::LN_2;
    let raw = ((-(n as f64) * fpr.ln()) / (ln2 * ln2)).ceil() as usize;
    (raw - raw % WORD_BITS)
        .checked_add(WORD_BITS)
        .unwrap_or(usize::MAX - usize::MAX % WORD_BITS)
}

pub fn optimal_num_hashes(n: usize, m: usize) -> usize {
    ((m as f64 / n as f64) * std::f64::consts::LN_2).floor() as usize
        + HASH_COUNT_BIAS
}

/// `floor(capacity * fraction)`.
pub fn threshold_count(capacity: usize, fraction: f64) -> usize {
    (capacity as f64 * fraction) as usize
}

/// Derived parameters calculated once from a validated [`BloomFilterConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    pub capacity: usize,
    pub false_positive_rate: f64,
    pub bit_vector_size: usize,
    pub num_hashes: usize,
    /// Insert count at which writes are mirrored into the auxiliary filter.
    pub double_write_at: usize,
    /// Insert count at which the filters rotate.
    pub rotate_at: usize,
}

impl BloomParams {
    pub fn size_in_bytes(&self) -> usize {
        self.bit_vector_size / 8
    }
}

impl From<&BloomFilterConfig> for BloomParams {
    fn from(config: &BloomFilterConfig) -> Self {
        let bit_vector_size =
            optimal_bit_vector_size(config.capacity, config.false_positive_rate);
        let num_hashes = optimal_num_hashes(config.capacity, bit_vector_size);

        Self {
            capacity: config.capacity,
            false_positive_rate: config.false_positive_rate,
            bit_vector_size,
            num_hashes,
            double_write_at: threshold_count(
                config.capacity,
                config.double_write_threshold,
            ),
            rotate_at: threshold_count(config.capacity, config.rotation_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BloomFilterConfigBuilder;

    #[test]
    fn test_size_is_word_aligned() {
        for n in [1, 7, 10, 64, 1000, 12_345, 100_000] {
            for p in [0.5, 0.1, 0.01, 0.001, 0.00001] {
                let m = optimal_bit_vector_size(n, p);
                assert_eq!(m % WORD_BITS, 0, "n={n} p={p} m={m}");
                assert!(m > 0);
            }
        }
    }

    #[test]
    fn test_small_filter_sizing() {
        // ceil(11.51 * 10 / 0.4805) = 240, padded to 256
        let m = optimal_bit_vector_size(10, 0.00001);
        assert_eq!(m, 256);
        assert_eq!(optimal_num_hashes(10, m), 18);
    }

    #[test]
    fn test_probe_count_has_bias() {
        let n = 10_000;
        let m = optimal_bit_vector_size(n, 0.01);
        let theoretical = (m as f64 / n as f64 * std::f64::consts::LN_2).floor();
        assert_eq!(optimal_num_hashes(n, m), theoretical as usize + 1);
    }

    #[test]
    fn test_threshold_truncates() {
        assert_eq!(threshold_count(10, 0.5), 5);
        assert_eq!(threshold_count(10, 0.8), 8);
        assert_eq!(threshold_count(3, 0.5), 1);
        assert_eq!(threshold_count(1, 0.8), 0);
    }

    #[test]
    fn test_params_from_config() {
        let config = BloomFilterConfigBuilder::default()
            .capacity(100_000)
            .build()
            .unwrap();
        let params = BloomParams::from(&config);

        assert_eq!(params.double_write_at, 50_000);
        assert_eq!(params.rotate_at, 80_000);
        assert_eq!(params.size_in_bytes() * 8, params.bit_vector_size);
        assert!(params.num_hashes >= 17);
    }
}
