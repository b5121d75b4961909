//! Fixed-memory Bloom filter with approximate expiration.
//!
//! Answers "has this key been seen recently?" with a bounded false positive
//! rate and no false negatives for keys inserted in the current window, using
//! memory fixed at construction no matter how many keys flow through.
//!
//! HowTo:
//!    * Sizing: bit count `m` and probe count `k` are derived once from the
//!      expected capacity `n` and target false positive rate `p`.
//!    * Probes: two 64-bit MurmurHash2 values `h1`, `h2` per key give
//!      `k` positions `(h1 + i * h2) mod m`.
//!    * Expiration: two equally sized filters, a primary and an auxiliary.
//!
//! Insertion:
//!     * Every key is written into the primary.
//!     * Once the primary holds `double_write_threshold * n` keys, each new
//!       key is written into the auxiliary as well.
//!     * At `rotation_threshold * n` keys the auxiliary becomes primary and
//!       the old primary is cleared to collect the next generation.
//! Query:
//!     * Only the primary is consulted.
//! Expiration:
//!     * Keys inserted shortly before a rotation were mirrored into the new
//!       primary and stay visible; older keys vanish with the cleared filter.
//!       The forget boundary is approximate, not a sharp time or count.
//!
//! Without expiration a single filter is kept and simply fills up past
//! capacity, trading accuracy for continuity; crossing the rotation threshold
//! is reported as [`InsertOutcome::CapacityExceeded`] and a `tracing` warning.
//!
//! ```
//! use rotating_bloom::{BloomFilterConfigBuilder, RotatingBloomFilter};
//!
//! let config = BloomFilterConfigBuilder::default()
//!     .capacity(10)
//!     .expire(true)
//!     .build()
//!     .unwrap();
//! let mut filter = RotatingBloomFilter::new(config).unwrap();
//!
//! filter.insert(b"seen");
//! assert!(filter.contains(b"seen"));
//! ```
pub mod bits;
pub mod common;
mod config;
mod error;
pub mod filter;
pub mod hash;
pub mod params;
mod rotating;
pub mod stats;
mod traits;

pub use bits::BitArray;
pub use config::{
    BloomFilterConfig, BloomFilterConfigBuilder, BloomFilterConfigBuilderError,
};
pub use error::{BloomError, Result};
pub use filter::Filter;
pub use hash::{Probes, mix64, murmur64a};
pub use params::{BloomParams, optimal_bit_vector_size, optimal_num_hashes};
pub use rotating::{InsertOutcome, Phase, RotatingBloomFilter, Slot};
pub use stats::{FilterSnapshot, SlotRole, SlotSnapshot};
pub use traits::BloomFilterStats;
