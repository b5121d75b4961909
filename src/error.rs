use thiserror::Error;

pub type Result<T> = std::result::Result<T, BloomError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BloomError {
    #[error("Capacity must be greater than 0")]
    ZeroCapacity,

    #[error("False positive rate must be between 0 and 1, got {rate}")]
    InvalidFalsePositiveRate { rate: f64 },

    #[error("Threshold {name} must be between 0 and 1, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error(
        "Rotation threshold ({rotation}) must exceed double-write threshold ({double_write})"
    )]
    ThresholdOrder { double_write: f64, rotation: f64 },

    #[error("Failed to allocate {bytes} bytes for bit array")]
    AllocationFailed { bytes: usize },
}
