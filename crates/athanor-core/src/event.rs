//! Typed engine events with bounded per-kind buffers.
//!
//! Events are recorded as ticks and player actions mutate the ledger, and
//! drained in batch by the caller (UI, audio, analytics, tests). Each kind
//! has its own fixed-capacity ring buffer; when full, the oldest entries are
//! dropped. Kinds can be suppressed, which skips recording entirely.

use crate::fixed::{Fixed64, Ticks};
use crate::id::{ResourceId, WorkerId, WorkerTypeId};

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A session event. All events carry the tick at which they occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A transmutation succeeded. `is_new` marks a first-ever discovery.
    CompoundTransmuted {
        compound: ResourceId,
        is_new: bool,
        tick: Ticks,
    },
    /// An extractor upgrade was purchased.
    ExtractorUpgraded {
        element: ResourceId,
        new_level: u32,
        cost: u64,
        tick: Ticks,
    },
    /// A prestige reset completed.
    ElementCalcinated {
        element: ResourceId,
        calcinations: u32,
        purity: Fixed64,
        tick: Ticks,
    },
    /// A worker was created (unassigned, level 1).
    WorkerCreated {
        worker: WorkerId,
        kind: WorkerTypeId,
        tick: Ticks,
    },
    /// A worker's assignment was set or replaced.
    WorkerAssigned {
        worker: WorkerId,
        element: ResourceId,
        tick: Ticks,
    },
    /// The per-tick energy income, recorded only when non-zero.
    EnergyCondensed { amount: u64, tick: Ticks },
}

/// Discriminant tag for event types, used for suppression and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CompoundTransmuted,
    ExtractorUpgraded,
    ElementCalcinated,
    WorkerCreated,
    WorkerAssigned,
    EnergyCondensed,
}

const EVENT_KIND_COUNT: usize = 6;

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::CompoundTransmuted { .. } => EventKind::CompoundTransmuted,
            Event::ExtractorUpgraded { .. } => EventKind::ExtractorUpgraded,
            Event::ElementCalcinated { .. } => EventKind::ElementCalcinated,
            Event::WorkerCreated { .. } => EventKind::WorkerCreated,
            Event::WorkerAssigned { .. } => EventKind::WorkerAssigned,
            Event::EnergyCondensed { .. } => EventKind::EnergyCondensed,
        }
    }
}

impl EventKind {
    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// EventBuffer
// ---------------------------------------------------------------------------

/// A fixed-capacity ring of events. When full, the oldest entry is dropped.
#[derive(Debug)]
pub struct EventBuffer {
    events: Vec<Option<Event>>,
    head: usize,
    len: usize,
    /// Total events ever written, including dropped ones.
    total_written: u64,
}

impl EventBuffer {
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            total_written: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events[self.head] = Some(event);
        self.head = (self.head + 1) % self.capacity();
        if self.len < self.capacity() {
            self.len += 1;
        }
        self.total_written += 1;
    }

    pub fn capacity(&self) -> usize {
        self.events.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Remove and return all buffered events, oldest first.
    pub fn drain(&mut self) -> Vec<Event> {
        let capacity = self.capacity();
        let start = (self.head + capacity - self.len) % capacity;
        let mut out = Vec::with_capacity(self.len);
        for i in 0..self.len {
            if let Some(event) = self.events[(start + i) % capacity].take() {
                out.push(event);
            }
        }
        self.len = 0;
        out
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default per-kind buffer capacity.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// One ring buffer per event kind, plus suppression flags. Suppressed kinds
/// are never recorded and cost nothing.
#[derive(Debug)]
pub struct EventBus {
    buffers: Vec<EventBuffer>,
    suppressed: [bool; EVENT_KIND_COUNT],
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: (0..EVENT_KIND_COUNT).map(|_| EventBuffer::new(capacity)).collect(),
            suppressed: [false; EVENT_KIND_COUNT],
        }
    }

    pub fn suppress(&mut self, kind: EventKind) {
        self.suppressed[kind.index()] = true;
    }

    pub fn unsuppress(&mut self, kind: EventKind) {
        self.suppressed[kind.index()] = false;
    }

    pub fn is_suppressed(&self, kind: EventKind) -> bool {
        self.suppressed[kind.index()]
    }

    pub fn record(&mut self, event: Event) {
        let kind = event.kind();
        if self.suppressed[kind.index()] {
            return;
        }
        self.buffers[kind.index()].push(event);
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.buffers[kind.index()].len()
    }

    /// Drain one kind's buffer, oldest first.
    pub fn drain(&mut self, kind: EventKind) -> Vec<Event> {
        self.buffers[kind.index()].drain()
    }

    /// Drain every buffer, grouped by kind in declaration order. Cross-kind
    /// interleaving is not preserved.
    pub fn drain_all(&mut self) -> Vec<Event> {
        let mut out = Vec::new();
        for buffer in &mut self.buffers {
            out.append(&mut buffer.drain());
        }
        out
    }
}
