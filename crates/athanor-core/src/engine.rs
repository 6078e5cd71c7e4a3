//! The session engine: owns the catalog, ledger, and roster, and applies the
//! per-tick pipeline plus the six player actions.
//!
//! # Architecture
//!
//! The `Engine` owns:
//! - A [`Catalog`] (elements, compound recipes, worker types; immutable)
//! - A [`Ledger`] (quantities, extractor state, energy, discoveries)
//! - A [`Roster`] (workers behind stable handles)
//! - A [`SimState`] (tick counter)
//! - An [`EventBus`] for typed session events
//!
//! # Four-Phase Tick
//!
//! Each `advance_tick()` runs:
//! 1. **Extraction** -- every element gains `base_rate * level * purity`
//! 2. **Workers** -- every assigned worker adds `rate * purity(target)`
//! 3. **Condensation** -- `energy += floor(total held / 1000)`, read from
//!    the post-production ledger
//! 4. **Bookkeeping** -- tick counter and state hash
//!
//! The phase order is load-bearing: energy income depends on quantities
//! written by phases 1 and 2.
//!
//! # Threading
//!
//! The engine expects a single logical caller and run-to-completion calls.
//! A multi-threaded host must serialize every mutating call (tick advance
//! and all actions) behind one mutual-exclusion boundary; none of them are
//! designed to interleave.

use crate::action::{
    Action, ActionError, ActionReceipt, CalcinationReceipt, CreateWorkerReceipt, GatherReceipt,
    TransmuteReceipt, UpgradeReceipt,
};
use crate::catalog::{Catalog, MAX_RECIPE_INPUTS, MIN_RECIPE_INPUTS};
use crate::economy;
use crate::event::{Event, EventBus};
use crate::fixed::{Fixed64, Ticks};
use crate::id::{ResourceId, WorkerId, WorkerTypeId};
use crate::ledger::{Extractor, Ledger, STARTING_ENERGY};
use crate::query::{CompoundSnapshot, ElementSnapshot, LedgerSummary, WorkerSnapshot};
use crate::sim::{SimState, StateHash};
use crate::worker::Roster;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The core session engine. One instance per independent session; no hidden
/// process-wide state.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    ledger: Ledger,
    roster: Roster,
    sim_state: SimState,
    /// Typed event buffers, drained by the caller.
    pub event_bus: EventBus,
    last_state_hash: u64,
}

impl Engine {
    /// Create a session with the default starting energy stock.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_starting_energy(catalog, STARTING_ENERGY)
    }

    pub fn with_starting_energy(catalog: Catalog, energy: u64) -> Self {
        let ledger = Ledger::new(&catalog, energy);
        let mut engine = Self {
            catalog,
            ledger,
            roster: Roster::new(),
            sim_state: SimState::new(),
            event_bus: EventBus::default(),
            last_state_hash: 0,
        };
        engine.refresh_state_hash();
        engine
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn tick(&self) -> Ticks {
        self.sim_state.tick
    }

    /// Hash of the full session state, refreshed after every tick and every
    /// successful action. Two sessions fed identical inputs hash identically.
    pub fn state_hash(&self) -> u64 {
        self.last_state_hash
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the simulation by one tick. Cannot fail; pure bookkeeping.
    pub fn advance_tick(&mut self) {
        // Phase 1: extraction.
        for (id, base_rate) in self.catalog.elements() {
            let Some((level, purity)) = self
                .ledger
                .extractor(id)
                .map(|ext| (ext.level, ext.purity))
            else {
                continue;
            };
            let production = base_rate * Fixed64::from_num(level) * purity;
            self.ledger.produce(id, production);
        }

        // Phase 2: workers. Additive to, and independent of, extraction.
        for (_, worker) in self.roster.iter() {
            let Some(target) = worker.assignment else {
                continue;
            };
            let Some(purity) = self.ledger.extractor(target).map(|ext| ext.purity) else {
                continue;
            };
            self.ledger.produce(target, worker.rate * purity);
        }

        // Phase 3: condensation, reading the post-production totals.
        let total = self.ledger.total_quantity();
        let gain = (total / Fixed64::from_num(1000)).to_num::<u64>();
        self.ledger.add_energy(gain);
        if gain > 0 {
            self.event_bus.record(Event::EnergyCondensed {
                amount: gain,
                tick: self.sim_state.tick,
            });
        }

        // Phase 4: bookkeeping.
        self.sim_state.tick += 1;
        self.refresh_state_hash();
    }

    /// Run `n` ticks back to back (host catch-up convenience).
    pub fn advance_ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.advance_tick();
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Dispatch a tagged action. Equivalent to calling the matching method.
    pub fn apply(&mut self, action: Action) -> Result<ActionReceipt, ActionError> {
        match action {
            Action::Gather { element } => self.gather(element).map(ActionReceipt::Gathered),
            Action::Transmute { selection } => {
                self.transmute(&selection).map(ActionReceipt::Transmuted)
            }
            Action::UpgradeExtractor { element } => {
                self.upgrade_extractor(element).map(ActionReceipt::Upgraded)
            }
            Action::Calcinate { element } => self.calcinate(element).map(ActionReceipt::Calcinated),
            Action::CreateWorker { worker_type } => self
                .create_worker(worker_type)
                .map(ActionReceipt::WorkerCreated),
            Action::AssignWorker { worker, element } => self
                .assign_worker(worker, element)
                .map(|()| ActionReceipt::WorkerAssigned),
        }
    }

    /// Manually gather one unit (times purity) of an element.
    pub fn gather(&mut self, element: ResourceId) -> Result<GatherReceipt, ActionError> {
        let amount = self.require_extractor(element)?.purity;
        self.ledger.produce(element, amount);
        self.refresh_state_hash();
        Ok(GatherReceipt { element, amount })
    }

    /// Combine 2..=3 held resources into a compound.
    ///
    /// Preconditions are checked in order, short-circuiting on the first
    /// failure: selection arity, then holdings (each selected entry needs
    /// quantity >= 1), then an exact recipe match on the full multiset.
    pub fn transmute(&mut self, selection: &[ResourceId]) -> Result<TransmuteReceipt, ActionError> {
        if !(MIN_RECIPE_INPUTS..=MAX_RECIPE_INPUTS).contains(&selection.len()) {
            return Err(ActionError::SelectionSize(selection.len()));
        }
        for &id in selection {
            let def = self
                .catalog
                .resource(id)
                .ok_or(ActionError::UnknownResource(id))?;
            if self.ledger.quantity(id) < Fixed64::from_num(1) {
                return Err(ActionError::InsufficientResource(def.name.clone()));
            }
        }

        let mut normalized = selection.to_vec();
        normalized.sort_unstable();
        let compound = self
            .catalog
            .resolve_recipe(&normalized)
            .ok_or(ActionError::UnknownCombination)?;

        // Duplicate selections may overdraw a single holding; clamp at zero
        // rather than going negative.
        for &id in selection {
            let _ = self.ledger.withdraw_clamped(id, Fixed64::from_num(1));
        }
        self.ledger.deposit(compound, Fixed64::from_num(1));
        let is_new = self.ledger.record_discovery(compound);

        self.event_bus.record(Event::CompoundTransmuted {
            compound,
            is_new,
            tick: self.sim_state.tick,
        });
        self.refresh_state_hash();
        Ok(TransmuteReceipt { compound, is_new })
    }

    /// Buy the next extractor level for an element. The cost is a pure
    /// geometric curve on the current level; there is no level cap.
    pub fn upgrade_extractor(
        &mut self,
        element: ResourceId,
    ) -> Result<UpgradeReceipt, ActionError> {
        let level = self.require_extractor(element)?.level;
        let cost = economy::upgrade_cost(level);
        match self.ledger.upgrade_extractor(element, cost) {
            Some(new_level) => {
                self.event_bus.record(Event::ExtractorUpgraded {
                    element,
                    new_level,
                    cost,
                    tick: self.sim_state.tick,
                });
                self.refresh_state_hash();
                Ok(UpgradeReceipt {
                    element,
                    new_level,
                    cost,
                })
            }
            None => Err(ActionError::InsufficientEnergy {
                cost,
                available: self.ledger.energy(),
            }),
        }
    }

    /// Prestige-reset an element: level and lifetime reset, calcination
    /// count up, purity bonus permanently raised. Held quantity untouched.
    pub fn calcinate(&mut self, element: ResourceId) -> Result<CalcinationReceipt, ActionError> {
        let ext = self.require_extractor(element)?;
        let requirements = economy::calcination_requirements(ext.calcinations);
        if ext.level < requirements.level || !lifetime_meets(ext.lifetime, requirements.production)
        {
            return Err(ActionError::RequirementsNotMet {
                required_level: requirements.level,
                required_production: requirements.production,
            });
        }
        match self.ledger.calcinate(element) {
            Some((calcinations, purity)) => {
                self.event_bus.record(Event::ElementCalcinated {
                    element,
                    calcinations,
                    purity,
                    tick: self.sim_state.tick,
                });
                self.refresh_state_hash();
                Ok(CalcinationReceipt {
                    element,
                    calcinations,
                    purity,
                })
            }
            None => Err(ActionError::UnknownResource(element)),
        }
    }

    /// Buy a new worker with resources (not energy). The whole acquisition
    /// cost is checked before anything is deducted.
    pub fn create_worker(
        &mut self,
        worker_type: WorkerTypeId,
    ) -> Result<CreateWorkerReceipt, ActionError> {
        let def = self
            .catalog
            .worker_type(worker_type)
            .ok_or(ActionError::UnknownWorkerType(worker_type))?;

        for entry in &def.cost {
            let held = self.ledger.quantity(entry.resource);
            if held < Fixed64::from_num(entry.amount) {
                return Err(ActionError::CannotAfford {
                    worker_type: def.name.clone(),
                    resource: self.resource_name(entry.resource),
                    required: entry.amount,
                    held,
                });
            }
        }

        // Every input is covered; deduct and hire as one commit.
        let rate = def.production_rate();
        for entry in &def.cost {
            let _ = self
                .ledger
                .withdraw_clamped(entry.resource, Fixed64::from_num(entry.amount));
        }
        let worker = self.roster.hire(worker_type, rate);

        self.event_bus.record(Event::WorkerCreated {
            worker,
            kind: worker_type,
            tick: self.sim_state.tick,
        });
        self.refresh_state_hash();
        Ok(CreateWorkerReceipt { worker })
    }

    /// Point a worker at an element. Free; replaces any prior assignment
    /// without proration.
    pub fn assign_worker(
        &mut self,
        worker: WorkerId,
        element: ResourceId,
    ) -> Result<(), ActionError> {
        if self.roster.get(worker).is_none() {
            return Err(ActionError::InvalidWorker);
        }
        let _ = self.require_extractor(element)?;
        if let Some(w) = self.roster.get_mut(worker) {
            w.assignment = Some(element);
        }
        self.event_bus.record(Event::WorkerAssigned {
            worker,
            element,
            tick: self.sim_state.tick,
        });
        self.refresh_state_hash();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Snapshot one element, or `None` for compounds and unknown ids.
    pub fn element_snapshot(&self, id: ResourceId) -> Option<ElementSnapshot> {
        let def = self.catalog.resource(id)?;
        let ext = self.ledger.extractor(id)?;
        Some(ElementSnapshot {
            id,
            name: def.name.clone(),
            quantity: self.ledger.quantity(id),
            lifetime: ext.lifetime,
            level: ext.level,
            calcinations: ext.calcinations,
            purity: ext.purity,
            upgrade_cost: economy::upgrade_cost(ext.level),
            next_calcination: economy::calcination_requirements(ext.calcinations),
        })
    }

    /// Snapshots of every element, in id order.
    pub fn element_snapshots(&self) -> Vec<ElementSnapshot> {
        self.catalog
            .elements()
            .filter_map(|(id, _)| self.element_snapshot(id))
            .collect()
    }

    /// Snapshots of every compound, in id order.
    pub fn compound_snapshots(&self) -> Vec<CompoundSnapshot> {
        self.catalog
            .compounds()
            .map(|(id, def)| CompoundSnapshot {
                id,
                name: def.name.clone(),
                tier: def.tier,
                quantity: self.ledger.quantity(id),
                discovered: self.ledger.is_discovered(id),
            })
            .collect()
    }

    /// Snapshots of every worker, in hire order.
    pub fn worker_snapshots(&self) -> Vec<WorkerSnapshot> {
        self.roster
            .iter()
            .map(|(id, worker)| WorkerSnapshot {
                id,
                worker_type: self
                    .catalog
                    .worker_type(worker.kind)
                    .map(|def| def.name.clone())
                    .unwrap_or_default(),
                level: worker.level,
                assignment: worker.assignment,
                rate: worker.rate,
            })
            .collect()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            tick: self.sim_state.tick,
            energy: self.ledger.energy(),
            total_quantity: self.ledger.total_quantity(),
            discoveries: self.ledger.discoveries().len(),
            workers: self.roster.len(),
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn require_extractor(&self, id: ResourceId) -> Result<&Extractor, ActionError> {
        let def = self
            .catalog
            .resource(id)
            .ok_or(ActionError::UnknownResource(id))?;
        self.ledger
            .extractor(id)
            .ok_or_else(|| ActionError::NotAnElement(def.name.clone()))
    }

    fn resource_name(&self, id: ResourceId) -> String {
        self.catalog
            .resource(id)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| format!("resource#{}", id.0))
    }

    fn refresh_state_hash(&mut self) {
        let mut hash = StateHash::new();
        hash.write_u64(self.sim_state.tick);
        self.ledger.hash_into(&mut hash);
        self.roster.hash_into(&mut hash);
        self.last_state_hash = hash.finish();
    }
}

// Lifetime totals live in Q32.32, so a requirement beyond that range can
// never be met; saturated requirements always gate.
fn lifetime_meets(lifetime: Fixed64, required: u64) -> bool {
    if required > i32::MAX as u64 {
        return false;
    }
    lifetime >= Fixed64::from_num(required as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn tick_produces_rate_times_level_times_purity() {
        let mut engine = new_engine();
        engine.advance_tick();

        // Level 1, purity 1.0, base rate 1: one unit per element per tick.
        assert_eq!(engine.ledger().quantity(fire()), fixed(1.0));
        assert_eq!(engine.ledger().quantity(water()), fixed(1.0));
        assert_eq!(engine.tick(), 1);
    }

    #[test]
    fn tick_respects_upgrade_level() {
        let mut engine = energized_engine(1_000);
        engine.upgrade_extractor(fire()).unwrap();
        engine.upgrade_extractor(fire()).unwrap();

        engine.advance_tick();
        assert_eq!(engine.ledger().quantity(fire()), fixed(3.0));
        assert_eq!(engine.ledger().quantity(water()), fixed(1.0));
    }

    #[test]
    fn unassigned_worker_contributes_nothing() {
        let mut engine = new_engine();
        for _ in 0..50 {
            engine.gather(earth()).unwrap();
        }
        // The golem consumes all 50 earth, so extraction is the only income.
        engine.create_worker(golem()).unwrap();
        let before = engine.ledger().quantity(earth());
        engine.advance_tick();
        // Only base extraction; the idle golem adds nothing.
        assert_eq!(engine.ledger().quantity(earth()), before + fixed(1.0));
    }

    #[test]
    fn energy_gain_reads_post_production_totals() {
        let mut engine = energized_engine(0);
        // 998 across the ledger pre-tick; extraction adds 4 (one per
        // element), so condensation sees 1002 and yields 1.
        for _ in 0..499 {
            engine.gather(fire()).unwrap();
            engine.gather(water()).unwrap();
        }
        engine.advance_tick();
        assert_eq!(engine.ledger().energy(), 1);
    }

    #[test]
    fn energy_gain_counts_compounds() {
        let mut engine = energized_engine(0);
        for _ in 0..600 {
            engine.gather(fire()).unwrap();
            engine.gather(water()).unwrap();
        }
        for _ in 0..400 {
            engine.transmute(&[fire(), water()]).unwrap();
        }
        // 200 fire + 200 water + 400 steam = 800 held; extraction adds 4.
        engine.advance_tick();
        assert_eq!(engine.ledger().energy(), 0);

        for _ in 0..100 {
            engine.gather(earth()).unwrap();
            engine.gather(air()).unwrap();
        }
        // 1004 held + 4 extracted.
        engine.advance_tick();
        assert_eq!(engine.ledger().energy(), 1);
    }

    #[test]
    fn gather_applies_purity() {
        let mut engine = new_engine();
        let receipt = engine.gather(fire()).unwrap();
        assert_eq!(receipt.amount, fixed(1.0));
        assert_eq!(engine.ledger().quantity(fire()), fixed(1.0));
        assert_eq!(engine.ledger().extractor(fire()).unwrap().lifetime, fixed(1.0));
    }

    #[test]
    fn gather_rejects_compounds_and_unknowns() {
        let mut engine = new_engine();
        assert!(matches!(
            engine.gather(steam()),
            Err(ActionError::NotAnElement(_))
        ));
        assert!(matches!(
            engine.gather(ResourceId(999)),
            Err(ActionError::UnknownResource(_))
        ));
    }

    #[test]
    fn apply_dispatches_like_direct_calls() {
        let mut engine = new_engine();
        let receipt = engine
            .apply(Action::Gather { element: fire() })
            .unwrap();
        assert!(matches!(receipt, ActionReceipt::Gathered(_)));

        let err = engine
            .apply(Action::Transmute {
                selection: vec![fire()],
            })
            .unwrap_err();
        assert_eq!(err, ActionError::SelectionSize(1));
    }

    #[test]
    fn failed_action_leaves_state_hash_unchanged() {
        let mut engine = new_engine();
        engine.gather(fire()).unwrap();
        let before = engine.state_hash();

        assert!(engine.transmute(&[fire(), fire()]).is_err());
        assert!(engine.upgrade_extractor(steam()).is_err());
        assert!(engine.calcinate(fire()).is_err());
        assert!(engine.create_worker(golem()).is_err());
        assert!(engine
            .assign_worker(WorkerId::default(), fire())
            .is_err());

        assert_eq!(engine.state_hash(), before);
    }

    #[test]
    fn snapshots_aggregate_state() {
        let mut engine = new_engine();
        engine.gather(fire()).unwrap();
        engine.gather(water()).unwrap();
        engine.transmute(&[fire(), water()]).unwrap();

        let fire_snap = engine.element_snapshot(fire()).unwrap();
        assert_eq!(fire_snap.name, "fire");
        assert_eq!(fire_snap.quantity, fixed(0.0));
        assert_eq!(fire_snap.lifetime, fixed(1.0));
        assert_eq!(fire_snap.upgrade_cost, 10);
        assert_eq!(fire_snap.next_calcination.level, 10);

        let compounds = engine.compound_snapshots();
        let steam_snap = compounds.iter().find(|c| c.id == steam()).unwrap();
        assert!(steam_snap.discovered);
        assert_eq!(steam_snap.quantity, fixed(1.0));

        assert!(engine.element_snapshot(steam()).is_none());

        let summary = engine.summary();
        assert_eq!(summary.discoveries, 1);
        assert_eq!(summary.workers, 0);
    }

    #[test]
    fn two_sessions_replaying_identical_inputs_agree() {
        let build = || {
            let mut engine = new_engine();
            for _ in 0..12 {
                engine.gather(fire()).unwrap();
                engine.gather(water()).unwrap();
                engine.advance_tick();
            }
            let _ = engine.transmute(&[fire(), water()]);
            engine
        };
        assert_eq!(build().state_hash(), build().state_hash());
    }
}
