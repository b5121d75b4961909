use rotating_bloom::{
    BloomFilterConfig, BloomFilterConfigBuilder, RotatingBloomFilter,
};

/// Integer keys are hashed as their little-endian bytes.
#[allow(dead_code)]
pub fn key(i: u64) -> [u8; 8] {
    i.to_le_bytes()
}

/// Config with logging turned off so test output stays readable
#[allow(dead_code)]
pub fn quiet_config(capacity: usize, expire: bool) -> BloomFilterConfig {
    BloomFilterConfigBuilder::default()
        .capacity(capacity)
        .expire(expire)
        .verbose(false)
        .build()
        .expect("Failed to build test config")
}

#[allow(dead_code)]
pub fn create_test_filter(
    capacity: usize,
    expire: bool,
    fpr: f64,
) -> RotatingBloomFilter {
    let mut config = quiet_config(capacity, expire);
    config.false_positive_rate = fpr;
    RotatingBloomFilter::new(config).expect("Failed to create test filter")
}

/// Consistent byte keys: `test_item_000000`, `test_item_000001`, ...
#[allow(dead_code)]
pub fn generate_test_items(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("test_item_{:06}", i).into_bytes())
        .collect()
}
