use crate::catalog::Catalog;
use crate::economy;
use crate::fixed::Fixed64;
use crate::id::ResourceId;
use crate::sim::StateHash;
use serde::{Deserialize, Serialize};

/// Energy stock for a fresh session.
pub const STARTING_ENERGY: u64 = 100;

/// Mutable extraction state, carried only by tier-1 elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extractor {
    /// Current upgrade level. Starts at 1; reset to 1 by calcination.
    pub level: u32,
    /// Lifetime production. Monotone except for the calcination reset.
    pub lifetime: Fixed64,
    /// How many calcinations this element has undergone.
    pub calcinations: u32,
    /// Permanent production multiplier, `1 + 0.15 * calcinations`.
    pub purity: Fixed64,
}

impl Extractor {
    fn new() -> Self {
        Self {
            level: 1,
            lifetime: Fixed64::ZERO,
            calcinations: 0,
            purity: economy::purity_bonus(0),
        }
    }
}

/// The mutable quantities a session holds, indexed by [`ResourceId`].
///
/// Quantities saturate at the Fixed64 upper bound rather than wrapping;
/// withdrawals clamp at zero. Energy spends are all-or-nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    quantities: Vec<Fixed64>,
    /// Parallel to `quantities`; `Some` only for tier-1 elements.
    extractors: Vec<Option<Extractor>>,
    energy: u64,
    /// Compounds crafted at least once, in first-craft order.
    discoveries: Vec<ResourceId>,
}

impl Ledger {
    /// Fresh session state: everything at zero, all extractors at level 1
    /// with purity 1.0.
    pub fn new(catalog: &Catalog, starting_energy: u64) -> Self {
        let count = catalog.resource_count();
        let mut extractors: Vec<Option<Extractor>> = vec![None; count];
        for (id, _) in catalog.elements() {
            extractors[id.0 as usize] = Some(Extractor::new());
        }
        Self {
            quantities: vec![Fixed64::ZERO; count],
            extractors,
            energy: starting_energy,
            discoveries: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Quantities
    // -----------------------------------------------------------------------

    pub fn quantity(&self, id: ResourceId) -> Fixed64 {
        self.quantities
            .get(id.0 as usize)
            .copied()
            .unwrap_or(Fixed64::ZERO)
    }

    /// Add to a resource's quantity without touching its lifetime total.
    /// Used for transmutation outputs.
    pub fn deposit(&mut self, id: ResourceId, amount: Fixed64) {
        if let Some(q) = self.quantities.get_mut(id.0 as usize) {
            *q = q.saturating_add(amount);
        }
    }

    /// Add production: quantity plus, for elements, the lifetime total.
    pub fn produce(&mut self, id: ResourceId, amount: Fixed64) {
        if let Some(q) = self.quantities.get_mut(id.0 as usize) {
            *q = q.saturating_add(amount);
            if let Some(ext) = self.extractors[id.0 as usize].as_mut() {
                ext.lifetime = ext.lifetime.saturating_add(amount);
            }
        }
    }

    /// Remove up to `amount`, clamping at zero.
    #[must_use = "returns the amount actually removed, which may be less than requested"]
    pub fn withdraw_clamped(&mut self, id: ResourceId, amount: Fixed64) -> Fixed64 {
        let Some(q) = self.quantities.get_mut(id.0 as usize) else {
            return Fixed64::ZERO;
        };
        let removed = amount.min(*q);
        *q -= removed;
        removed
    }

    /// Sum of every quantity held, compounds included.
    pub fn total_quantity(&self) -> Fixed64 {
        self.quantities
            .iter()
            .fold(Fixed64::ZERO, |acc, q| acc.saturating_add(*q))
    }

    // -----------------------------------------------------------------------
    // Extractors
    // -----------------------------------------------------------------------

    pub fn extractor(&self, id: ResourceId) -> Option<&Extractor> {
        self.extractors.get(id.0 as usize).and_then(|e| e.as_ref())
    }

    /// Spend `cost` energy and raise the extractor level by one, as one
    /// atomic commit. Returns the new level, or `None` (and no mutation) if
    /// the id has no extractor or the energy is short.
    pub fn upgrade_extractor(&mut self, id: ResourceId, cost: u64) -> Option<u32> {
        if self.energy < cost {
            return None;
        }
        let ext = self.extractors.get_mut(id.0 as usize)?.as_mut()?;
        self.energy -= cost;
        ext.level += 1;
        Some(ext.level)
    }

    /// Perform the prestige reset: level back to 1, lifetime to zero, one
    /// more calcination, purity recomputed. Held quantity is untouched.
    /// Returns the new (calcination count, purity).
    pub fn calcinate(&mut self, id: ResourceId) -> Option<(u32, Fixed64)> {
        let ext = self.extractors.get_mut(id.0 as usize)?.as_mut()?;
        ext.calcinations += 1;
        ext.level = 1;
        ext.lifetime = Fixed64::ZERO;
        ext.purity = economy::purity_bonus(ext.calcinations);
        Some((ext.calcinations, ext.purity))
    }

    // -----------------------------------------------------------------------
    // Energy
    // -----------------------------------------------------------------------

    pub fn energy(&self) -> u64 {
        self.energy
    }

    pub fn add_energy(&mut self, amount: u64) {
        self.energy = self.energy.saturating_add(amount);
    }

    // -----------------------------------------------------------------------
    // Discoveries
    // -----------------------------------------------------------------------

    /// Record a compound as discovered. Returns true the first time only.
    pub fn record_discovery(&mut self, id: ResourceId) -> bool {
        if self.discoveries.contains(&id) {
            return false;
        }
        self.discoveries.push(id);
        true
    }

    pub fn is_discovered(&self, id: ResourceId) -> bool {
        self.discoveries.contains(&id)
    }

    /// Discovered compounds in first-craft order.
    pub fn discoveries(&self) -> &[ResourceId] {
        &self.discoveries
    }

    // -----------------------------------------------------------------------
    // Hashing
    // -----------------------------------------------------------------------

    /// Feed the full ledger state into a state hash, in id order.
    pub fn hash_into(&self, hash: &mut StateHash) {
        hash.write_u64(self.energy);
        for q in &self.quantities {
            hash.write_fixed64(*q);
        }
        for ext in self.extractors.iter().flatten() {
            hash.write_u32(ext.level);
            hash.write_u32(ext.calcinations);
            hash.write_fixed64(ext.lifetime);
        }
        for id in &self.discoveries {
            hash.write_u32(id.0);
        }
    }
}
