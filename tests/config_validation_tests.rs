mod common;

use common::test_utils::quiet_config;
use rotating_bloom::{
    BloomError, BloomFilterConfig, BloomFilterConfigBuilder, BloomParams,
    RotatingBloomFilter, optimal_bit_vector_size,
};

#[cfg(test)]
mod capacity_validation_tests {
    use super::*;

    #[test]
    fn test_zero_capacity_fails() {
        let config = BloomFilterConfigBuilder::default()
            .capacity(0)
            .build()
            .unwrap();

        assert_eq!(config.validate(), Err(BloomError::ZeroCapacity));
        assert!(matches!(
            RotatingBloomFilter::new(config),
            Err(BloomError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_minimum_valid_capacity() {
        let mut filter = RotatingBloomFilter::new(quiet_config(1, true)).unwrap();

        // Both thresholds truncate to 0: every insert mirrors and rotates,
        // and the new primary always holds the latest key.
        for i in 0u32..10 {
            filter.insert(&i.to_le_bytes());
            assert!(filter.contains(&i.to_le_bytes()));
        }
        assert_eq!(filter.rotations(), 10);
    }
}

#[cfg(test)]
mod false_positive_rate_validation_tests {
    use super::*;

    fn with_rate(rate: f64) -> BloomFilterConfig {
        BloomFilterConfigBuilder::default()
            .false_positive_rate(rate)
            .build()
            .unwrap()
    }

    #[test]
    fn test_out_of_range_rates_fail() {
        for rate in [0.0, 1.0, -0.1, 1.5] {
            assert_eq!(
                with_rate(rate).validate(),
                Err(BloomError::InvalidFalsePositiveRate { rate }),
                "rate {rate} should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_rates_succeed() {
        for rate in [0.5, 0.01, 0.00001, 1e-12] {
            assert!(with_rate(rate).validate().is_ok(), "rate {rate}");
        }
    }

    #[test]
    fn test_error_message() {
        let err = with_rate(2.0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "False positive rate must be between 0 and 1, got 2"
        );
    }
}

#[cfg(test)]
mod threshold_validation_tests {
    use super::*;

    fn with_thresholds(double_write: f64, rotation: f64) -> BloomFilterConfig {
        BloomFilterConfigBuilder::default()
            .double_write_threshold(double_write)
            .rotation_threshold(rotation)
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_thresholds_valid() {
        assert!(with_thresholds(0.5, 0.8).validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        assert_eq!(
            with_thresholds(0.0, 0.8).validate(),
            Err(BloomError::InvalidThreshold {
                name: "double_write_threshold",
                value: 0.0
            })
        );
        assert_eq!(
            with_thresholds(0.5, 1.0).validate(),
            Err(BloomError::InvalidThreshold {
                name: "rotation_threshold",
                value: 1.0
            })
        );
    }

    #[test]
    fn test_rotation_must_exceed_double_write() {
        for (dw, rot) in [(0.8, 0.5), (0.6, 0.6)] {
            assert_eq!(
                with_thresholds(dw, rot).validate(),
                Err(BloomError::ThresholdOrder {
                    double_write: dw,
                    rotation: rot
                })
            );
        }
    }

    #[test]
    fn test_invalid_thresholds_fail_non_expiring_too() {
        let mut config = with_thresholds(0.9, 0.1);
        config.expire = false;
        assert!(RotatingBloomFilter::new(config).is_err());
    }
}

#[cfg(test)]
mod sizing_tests {
    use super::*;

    #[test]
    fn test_bit_array_sizes_are_word_aligned() {
        for capacity in [1, 10, 333, 1_000, 99_999, 1_000_000] {
            for rate in [0.3, 0.01, 0.0001, 0.00001] {
                let config = BloomFilterConfigBuilder::default()
                    .capacity(capacity)
                    .false_positive_rate(rate)
                    .build()
                    .unwrap();
                let params = BloomParams::from(&config);
                assert_eq!(params.bit_vector_size % 64, 0);
                assert!(params.num_hashes >= 1);
            }
        }
    }

    #[test]
    fn test_lower_rate_needs_more_bits() {
        assert!(
            optimal_bit_vector_size(1_000, 0.001)
                > optimal_bit_vector_size(1_000, 0.01)
        );
    }

    #[test]
    fn test_huge_capacity_reports_allocation_failure() {
        let config = BloomFilterConfigBuilder::default()
            .capacity(usize::MAX / 2)
            .verbose(false)
            .build()
            .unwrap();

        assert!(matches!(
            RotatingBloomFilter::new(config),
            Err(BloomError::AllocationFailed { .. })
        ));
    }
}
