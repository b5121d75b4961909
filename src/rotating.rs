use crate::config::BloomFilterConfig;
use crate::error::Result;
use crate::filter::Filter;
use crate::params::BloomParams;
use crate::stats::{FilterSnapshot, SlotRole, SlotSnapshot};
use crate::traits::BloomFilterStats;
use serde::Serialize;
use tracing::{debug, info, warn};

/// One of the two slots of an expiring filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Slot {
    Zero,
    One,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::Zero => 0,
            Slot::One => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Slot::Zero => Slot::One,
            Slot::One => Slot::Zero,
        }
    }
}

/// Where the primary filter sits relative to the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Below the double-write threshold: inserts go to the primary only.
    Accumulating,
    /// Inserts are mirrored into the auxiliary filter.
    DoubleWriting,
    /// Non-expiring filter past its rotation threshold.
    Saturated,
}

/// What an insert did beyond setting bits in the primary filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    Accumulated,
    DoubleWritten,
    /// The auxiliary became primary and the old primary was cleared.
    Rotated,
    /// Non-expiring filter is at or past the rotation threshold and keeps
    /// filling with a rising false positive rate.
    CapacityExceeded,
}

/// True for the single insert at which `count` first reaches `threshold`.
/// A threshold that truncated to 0 is reached by the first insert.
fn reaches_threshold(count: usize, threshold: usize) -> bool {
    count == threshold.max(1)
}

#[derive(Debug, Clone)]
enum Slots {
    Single(Filter),
    Dual { slots: [Filter; 2], primary: Slot },
}

/// Bloom filter with approximate expiration.
///
/// With `expire` set, two filters of identical size are kept. Every insert
/// lands in the primary; once the primary reaches the double-write threshold
/// inserts are mirrored into the auxiliary, and at the rotation threshold the
/// auxiliary takes over as primary while the old primary is cleared. Keys
/// written shortly before a rotation therefore survive it, older keys do
/// not. Lookups only consult the primary.
///
/// Without `expire` there is a single filter that never rotates.
///
/// Not synchronised. Callers that share one instance across threads must
/// wrap the whole filter in a lock, since a rotation must never interleave
/// with other operations.
#[derive(Debug, Clone)]
pub struct RotatingBloomFilter {
    config: BloomFilterConfig,
    params: BloomParams,
    slots: Slots,
    rotations: u64,
}

impl RotatingBloomFilter {
    pub fn new(config: BloomFilterConfig) -> Result<Self> {
        config.validate()?;

        let params = BloomParams::from(&config);
        let slots = if config.expire {
            Slots::Dual {
                slots: [Filter::new(&params)?, Filter::new(&params)?],
                primary: Slot::Zero,
            }
        } else {
            Slots::Single(Filter::new(&params)?)
        };

        if config.verbose {
            info!(
                size_bytes = params.size_in_bytes(),
                capacity = config.capacity,
                false_positive_rate = config.false_positive_rate,
                expire = config.expire,
                num_hashes = params.num_hashes,
                "Bloom filter created"
            );
        }

        Ok(Self {
            config,
            params,
            slots,
            rotations: 0,
        })
    }

    pub fn insert(&mut self, item: &[u8]) -> InsertOutcome {
        match &mut self.slots {
            Slots::Single(filter) => {
                let probes = filter.probes(item);
                filter.insert_probes(probes);

                let count = filter.insert_count();
                if count < self.params.rotate_at {
                    return InsertOutcome::Accumulated;
                }
                if reaches_threshold(count, self.params.rotate_at) {
                    warn!(
                        insert_count = count,
                        capacity = self.config.capacity,
                        "Bloom filter reached {:.1}% of capacity",
                        self.params.rotate_at as f64 * 100.0
                            / self.config.capacity as f64
                    );
                }
                InsertOutcome::CapacityExceeded
            }
            Slots::Dual { slots, primary } => {
                let [first, second] = slots;
                let (main, aux) = match *primary {
                    Slot::Zero => (first, second),
                    Slot::One => (second, first),
                };

                let probes = main.probes(item);
                main.insert_probes(probes);

                let count = main.insert_count();
                let mut outcome = InsertOutcome::Accumulated;
                if count >= self.params.double_write_at {
                    aux.insert_probes(probes);
                    outcome = InsertOutcome::DoubleWritten;
                }

                if count >= self.params.rotate_at {
                    *primary = primary.other();
                    main.clear();
                    self.rotations += 1;
                    outcome = InsertOutcome::Rotated;

                    if self.config.verbose {
                        info!(
                            primary = primary.index(),
                            primary_count = aux.insert_count(),
                            rotations = self.rotations,
                            "Bloom filter rotated"
                        );
                    }
                }
                outcome
            }
        }
    }

    /// Checks the primary filter only.
    pub fn contains(&self, item: &[u8]) -> bool {
        self.primary_filter().contains(item)
    }

    /// Empties every slot and makes slot 0 primary again.
    pub fn clear(&mut self) {
        match &mut self.slots {
            Slots::Single(filter) => filter.clear(),
            Slots::Dual { slots, primary } => {
                for filter in slots.iter_mut() {
                    filter.clear();
                }
                *primary = Slot::Zero;
            }
        }
        debug!("Bloom filter cleared");
    }

    pub fn config(&self) -> &BloomFilterConfig {
        &self.config
    }

    pub fn params(&self) -> &BloomParams {
        &self.params
    }

    pub fn is_expiring(&self) -> bool {
        matches!(self.slots, Slots::Dual { .. })
    }

    pub fn primary(&self) -> Slot {
        match &self.slots {
            Slots::Single(_) => Slot::Zero,
            Slots::Dual { primary, .. } => *primary,
        }
    }

    pub fn primary_filter(&self) -> &Filter {
        match &self.slots {
            Slots::Single(filter) => filter,
            Slots::Dual { slots, primary } => &slots[primary.index()],
        }
    }

    /// `None` for a non-expiring filter.
    pub fn auxiliary_filter(&self) -> Option<&Filter> {
        match &self.slots {
            Slots::Single(_) => None,
            Slots::Dual { slots, primary } => {
                Some(&slots[primary.other().index()])
            }
        }
    }

    pub fn phase(&self) -> Phase {
        let count = self.primary_filter().insert_count();
        if count == 0 {
            return Phase::Accumulating;
        }
        if !self.is_expiring() && count >= self.params.rotate_at {
            Phase::Saturated
        } else if self.is_expiring() && count >= self.params.double_write_at {
            Phase::DoubleWriting
        } else {
            Phase::Accumulating
        }
    }

    /// Number of rotations since construction. [`clear`](Self::clear) does
    /// not reset it.
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Bytes held by all allocated bit arrays.
    pub fn memory_usage_bytes(&self) -> usize {
        match &self.slots {
            Slots::Single(filter) => filter.bits().size_in_bytes(),
            Slots::Dual { slots, .. } => {
                slots.iter().map(|f| f.bits().size_in_bytes()).sum()
            }
        }
    }

    /// Point-in-time description of the filter. Has no side effects; see
    /// [`FilterSnapshot`]'s `Display` impl for a text rendering.
    pub fn snapshot(&self) -> FilterSnapshot {
        let primary = self.primary();
        let slots = match &self.slots {
            Slots::Single(filter) => {
                vec![SlotSnapshot::new(Slot::Zero, SlotRole::Primary, filter)]
            }
            Slots::Dual { slots, .. } => [Slot::Zero, Slot::One]
                .into_iter()
                .map(|slot| {
                    let role = if slot == primary {
                        SlotRole::Primary
                    } else {
                        SlotRole::Auxiliary
                    };
                    SlotSnapshot::new(slot, role, &slots[slot.index()])
                })
                .collect(),
        };

        FilterSnapshot {
            capacity: self.config.capacity,
            false_positive_rate: self.config.false_positive_rate,
            expire: self.is_expiring(),
            bit_vector_size: self.params.bit_vector_size,
            memory_bytes: self.memory_usage_bytes(),
            num_hashes: self.params.num_hashes,
            double_write_threshold: self.params.double_write_at,
            rotation_threshold: self.params.rotate_at,
            primary: primary.index(),
            phase: self.phase(),
            rotations: self.rotations,
            slots,
        }
    }
}

impl BloomFilterStats for RotatingBloomFilter {
    fn capacity(&self) -> usize {
        self.config.capacity
    }

    fn false_positive_rate(&self) -> f64 {
        self.config.false_positive_rate
    }

    fn insert_count(&self) -> usize {
        self.primary_filter().insert_count()
    }

    fn num_hashes(&self) -> usize {
        self.params.num_hashes
    }

    fn bit_vector_size(&self) -> usize {
        self.params.bit_vector_size
    }
}
