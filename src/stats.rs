//! Structured, side-effect free description of a filter's state.
use crate::common::bytes2hr;
use crate::filter::Filter;
use crate::rotating::{Phase, Slot};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    Primary,
    Auxiliary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSnapshot {
    pub index: usize,
    pub role: SlotRole,
    pub insert_count: usize,
    pub fill_ratio: f64,
}

impl SlotSnapshot {
    pub(crate) fn new(slot: Slot, role: SlotRole, filter: &Filter) -> Self {
        Self {
            index: slot.index(),
            role,
            insert_count: filter.insert_count(),
            fill_ratio: filter.fill_ratio(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSnapshot {
    pub capacity: usize,
    pub false_positive_rate: f64,
    pub expire: bool,
    pub bit_vector_size: usize,
    pub memory_bytes: usize,
    pub num_hashes: usize,
    pub double_write_threshold: usize,
    pub rotation_threshold: usize,
    pub primary: usize,
    pub phase: Phase,
    pub rotations: u64,
    pub slots: Vec<SlotSnapshot>,
}

impl FilterSnapshot {
    pub fn slot(&self, role: SlotRole) -> Option<&SlotSnapshot> {
        self.slots.iter().find(|s| s.role == role)
    }
}

impl fmt::Display for FilterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bloom Filter Info:")?;
        writeln!(f, "  Capacity: {}", self.capacity)?;
        writeln!(f, "  False positive rate: {}", self.false_positive_rate)?;
        writeln!(f, "  With expiration: {}", self.expire)?;
        writeln!(
            f,
            "  Size: {} bits per filter, {} total",
            self.bit_vector_size,
            bytes2hr(self.memory_bytes)
        )?;
        writeln!(f, "  Threshold (double-write): {}", self.double_write_threshold)?;
        writeln!(f, "  Threshold (rotate): {}", self.rotation_threshold)?;
        writeln!(f, "  Bits per item: {}", self.num_hashes)?;
        writeln!(f, "  Phase: {:?}, rotations: {}", self.phase, self.rotations)?;
        for slot in &self.slots {
            let label = match slot.role {
                SlotRole::Primary => "Current",
                SlotRole::Auxiliary => "Auxiliary",
            };
            writeln!(f, "  {label} [{}] filter", slot.index)?;
            writeln!(
                f,
                "   - {} items, {:.2}% bits set",
                slot.insert_count,
                slot.fill_ratio * 100.0
            )?;
        }
        Ok(())
    }
}
