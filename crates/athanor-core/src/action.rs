//! Player actions as a tagged union, plus their receipts and failures.
//!
//! Every mutating operation on the engine exists both as a direct method and
//! as an [`Action`] dispatched through [`crate::engine::Engine::apply`], so
//! hosts can drive the engine reducer-style from a single entry point.
//!
//! Failures are expected business-rule outcomes, not exceptional conditions:
//! a failed action never mutates the ledger, and retrying without a state
//! change deterministically returns the same failure.

use crate::fixed::Fixed64;
use crate::id::{ResourceId, WorkerId, WorkerTypeId};

// ---------------------------------------------------------------------------
// Action enum
// ---------------------------------------------------------------------------

/// A single player action submitted to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Manually gather one unit (times purity) of an element.
    Gather { element: ResourceId },
    /// Combine 2..=3 held resources into a compound.
    Transmute { selection: Vec<ResourceId> },
    /// Buy the next extractor level for an element with energy.
    UpgradeExtractor { element: ResourceId },
    /// Prestige-reset an element for a permanent purity bonus.
    Calcinate { element: ResourceId },
    /// Buy a new worker of the given type with resources.
    CreateWorker { worker_type: WorkerTypeId },
    /// Point a worker at an element, replacing any prior assignment.
    AssignWorker {
        worker: WorkerId,
        element: ResourceId,
    },
}

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

/// What a successful action did. One variant per action kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionReceipt {
    Gathered(GatherReceipt),
    Transmuted(TransmuteReceipt),
    Upgraded(UpgradeReceipt),
    Calcinated(CalcinationReceipt),
    WorkerCreated(CreateWorkerReceipt),
    WorkerAssigned,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatherReceipt {
    pub element: ResourceId,
    /// Amount actually added: `1 * purity`.
    pub amount: Fixed64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmuteReceipt {
    pub compound: ResourceId,
    /// True only the first time this compound was ever crafted.
    pub is_new: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeReceipt {
    pub element: ResourceId,
    pub new_level: u32,
    /// Energy paid.
    pub cost: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalcinationReceipt {
    pub element: ResourceId,
    /// Total calcinations after this one.
    pub calcinations: u32,
    /// New permanent purity bonus.
    pub purity: Fixed64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateWorkerReceipt {
    pub worker: WorkerId,
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// Expected business-rule failures. Every variant leaves the ledger exactly
/// as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("unknown resource: {0:?}")]
    UnknownResource(ResourceId),
    #[error("'{0}' is not a tier-1 element")]
    NotAnElement(String),
    #[error("selection has {0} entries, expected 2..=3")]
    SelectionSize(usize),
    #[error("insufficient resource: {0}")]
    InsufficientResource(String),
    #[error("unknown combination")]
    UnknownCombination,
    #[error("insufficient energy: need {cost}, have {available}")]
    InsufficientEnergy { cost: u64, available: u64 },
    #[error(
        "requirements not met: need level {required_level} and {required_production} total produced"
    )]
    RequirementsNotMet {
        required_level: u32,
        required_production: u64,
    },
    #[error("unknown worker type: {0:?}")]
    UnknownWorkerType(WorkerTypeId),
    #[error("cannot afford '{worker_type}': need {required} {resource}, have {held}")]
    CannotAfford {
        worker_type: String,
        resource: String,
        required: u32,
        held: Fixed64,
    },
    #[error("invalid worker index")]
    InvalidWorker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_problem() {
        let err = ActionError::InsufficientResource("fire".to_string());
        assert_eq!(err.to_string(), "insufficient resource: fire");

        let err = ActionError::InsufficientEnergy {
            cost: 15,
            available: 3,
        };
        assert_eq!(err.to_string(), "insufficient energy: need 15, have 3");

        let err = ActionError::RequirementsNotMet {
            required_level: 10,
            required_production: 1000,
        };
        assert!(err.to_string().contains("level 10"));
        assert!(err.to_string().contains("1000 total produced"));
    }

    #[test]
    fn cannot_afford_names_the_shortfall() {
        let err = ActionError::CannotAfford {
            worker_type: "golem".to_string(),
            resource: "earth".to_string(),
            required: 50,
            held: Fixed64::from_num(12.5),
        };
        let msg = err.to_string();
        assert!(msg.contains("golem"));
        assert!(msg.contains("earth"));
        assert!(msg.contains("50"));
    }
}
