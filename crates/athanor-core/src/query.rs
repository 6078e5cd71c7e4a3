//! Read-only query API for inspecting session state.
//!
//! Snapshot types aggregate engine state into convenient views for UI and
//! FFI consumers. All types are owned copies -- no references into internal
//! engine storage.

use crate::economy::CalcinationRequirements;
use crate::fixed::{Fixed64, Ticks};
use crate::id::{ResourceId, WorkerId};

/// An aggregated view of one tier-1 element, including the price of its
/// next upgrade and the gate for its next calcination.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    pub id: ResourceId,
    pub name: String,
    pub quantity: Fixed64,
    pub lifetime: Fixed64,
    pub level: u32,
    pub calcinations: u32,
    pub purity: Fixed64,
    /// Energy price of the next extractor level.
    pub upgrade_cost: u64,
    /// What the next calcination requires.
    pub next_calcination: CalcinationRequirements,
}

/// An aggregated view of one compound.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSnapshot {
    pub id: ResourceId,
    pub name: String,
    pub tier: u8,
    pub quantity: Fixed64,
    pub discovered: bool,
}

/// An aggregated view of one worker.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerSnapshot {
    pub id: WorkerId,
    pub worker_type: String,
    pub level: u32,
    pub assignment: Option<ResourceId>,
    pub rate: Fixed64,
}

/// Session-level totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSummary {
    pub tick: Ticks,
    pub energy: u64,
    /// Sum of every quantity held, compounds included.
    pub total_quantity: Fixed64,
    pub discoveries: usize,
    pub workers: usize,
}
