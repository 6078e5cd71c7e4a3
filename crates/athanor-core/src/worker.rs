use crate::fixed::Fixed64;
use crate::id::{ResourceId, WorkerId, WorkerTypeId};
use crate::sim::StateHash;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

/// A passive production unit. Contributes `rate * purity(target)` to its
/// assigned element every tick; contributes nothing while unassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub kind: WorkerTypeId,
    pub level: u32,
    /// Target element, or `None` while idle. A worker is assigned to at most
    /// one element; reassignment overwrites without proration.
    pub assignment: Option<ResourceId>,
    /// Units contributed per tick before the target's purity bonus.
    pub rate: Fixed64,
}

/// All workers owned by a session, behind stable generational handles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    workers: SlotMap<WorkerId, Worker>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            workers: SlotMap::with_key(),
        }
    }

    /// Append a new level-1, unassigned worker. Cost validation is the
    /// engine's job; the roster only stores.
    pub fn hire(&mut self, kind: WorkerTypeId, rate: Fixed64) -> WorkerId {
        self.workers.insert(Worker {
            kind,
            level: 1,
            assignment: None,
            rate,
        })
    }

    pub fn get(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.get(id)
    }

    pub fn get_mut(&mut self, id: WorkerId) -> Option<&mut Worker> {
        self.workers.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Workers in slot order. Deterministic for identical hire sequences.
    pub fn iter(&self) -> impl Iterator<Item = (WorkerId, &Worker)> {
        self.workers.iter()
    }

    /// Feed the roster into a state hash, in slot order.
    pub fn hash_into(&self, hash: &mut StateHash) {
        hash.write_u64(self.workers.len() as u64);
        for (_, worker) in self.workers.iter() {
            hash.write_u32(worker.kind.0);
            hash.write_u32(worker.level);
            match worker.assignment {
                Some(target) => {
                    hash.write_u32(1);
                    hash.write_u32(target.0);
                }
                None => hash.write_u32(0),
            }
            hash.write_fixed64(worker.rate);
        }
    }
}
