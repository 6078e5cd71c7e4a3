use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Handle for a worker instance in the roster. Generational, so a stale
    /// handle from a previous session state never aliases a new worker.
    pub struct WorkerId;
}

/// Identifies a resource (element or compound) in the catalog.
/// Cheap to copy and compare; ordered so recipe multisets can be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

/// Identifies a worker type in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerTypeId(pub u32);
