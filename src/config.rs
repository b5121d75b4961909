use crate::error::{BloomError, Result};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Construction parameters for a [`RotatingBloomFilter`](crate::RotatingBloomFilter).
///
/// Immutable once the filter is built; every slot of one filter shares it.
#[derive(Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
#[builder(pattern = "owned")]
#[serde(default)]
pub struct BloomFilterConfig {
    /// Maximum number of expected items per generation
    #[builder(default = "100_000")]
    pub capacity: usize,

    /// Keep a second filter and rotate instead of saturating
    #[builder(default = "false")]
    pub expire: bool,

    /// Target false positive rate (0.0 to 1.0)
    #[builder(default = "0.00001")]
    pub false_positive_rate: f64,

    /// Fraction of capacity at which inserts are mirrored into the auxiliary filter
    #[builder(default = "0.5")]
    pub double_write_threshold: f64,

    /// Fraction of capacity at which the filters swap roles
    #[builder(default = "0.8")]
    pub rotation_threshold: f64,

    /// Log construction and rotation events at info level
    #[builder(default = "true")]
    pub verbose: bool,
}

impl Default for BloomFilterConfig {
    fn default() -> Self {
        Self {
            capacity: 100_000,
            expire: false,
            false_positive_rate: 0.00001,
            double_write_threshold: 0.5,
            rotation_threshold: 0.8,
            verbose: true,
        }
    }
}

impl BloomFilterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(BloomError::ZeroCapacity);
        }
        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0) {
            return Err(BloomError::InvalidFalsePositiveRate {
                rate: self.false_positive_rate,
            });
        }
        check_fraction("double_write_threshold", self.double_write_threshold)?;
        check_fraction("rotation_threshold", self.rotation_threshold)?;
        if self.rotation_threshold <= self.double_write_threshold {
            return Err(BloomError::ThresholdOrder {
                double_write: self.double_write_threshold,
                rotation: self.rotation_threshold,
            });
        }
        Ok(())
    }
}

// Written as a negated range check so NaN is rejected too.
fn check_fraction(name: &'static str, value: f64) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(BloomError::InvalidThreshold { name, value });
    }
    Ok(())
}
