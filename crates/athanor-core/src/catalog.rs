use crate::fixed::Fixed64;
use crate::id::{ResourceId, WorkerTypeId};
use std::collections::HashMap;

/// Minimum number of inputs a transmutation recipe may have.
pub const MIN_RECIPE_INPUTS: usize = 2;
/// Maximum number of inputs a transmutation recipe may have.
pub const MAX_RECIPE_INPUTS: usize = 3;

/// How a resource comes into being.
#[derive(Debug, Clone)]
pub enum ResourceKind {
    /// Tier-1 element, generated passively every tick.
    Element {
        /// Units produced per tick at extractor level 1, purity 1.0.
        base_rate: Fixed64,
    },
    /// Tier >= 2 compound, produced by transmutation. Inputs are stored as a
    /// sorted multiset so matching is order-independent.
    Compound { inputs: Vec<ResourceId> },
}

/// A resource definition in the catalog.
#[derive(Debug, Clone)]
pub struct ResourceDef {
    pub name: String,
    pub tier: u8,
    pub kind: ResourceKind,
}

impl ResourceDef {
    pub fn is_element(&self) -> bool {
        matches!(self.kind, ResourceKind::Element { .. })
    }
}

/// One entry of a worker type's acquisition cost.
#[derive(Debug, Clone)]
pub struct CostEntry {
    pub resource: ResourceId,
    pub amount: u32,
}

/// A worker type definition.
#[derive(Debug, Clone)]
pub struct WorkerTypeDef {
    pub name: String,
    /// Resources consumed, all-or-nothing, when a worker of this type is
    /// created. Paid in resources, not energy.
    pub cost: Vec<CostEntry>,
    /// Percent figure; 100 yields one unit per tick before purity bonuses.
    pub base_efficiency: u32,
}

impl WorkerTypeDef {
    /// Units contributed per tick before the target element's purity bonus.
    pub fn production_rate(&self) -> Fixed64 {
        Fixed64::from_num(self.base_efficiency) / Fixed64::from_num(100)
    }
}

/// Builder for constructing an immutable Catalog.
/// Two-phase lifecycle: registration -> validated freeze.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    resources: Vec<ResourceDef>,
    resource_name_to_id: HashMap<String, ResourceId>,
    worker_types: Vec<WorkerTypeDef>,
    worker_name_to_id: HashMap<String, WorkerTypeId>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tier-1 element with its passive generation rate.
    pub fn register_element(&mut self, name: &str, base_rate: Fixed64) -> ResourceId {
        let id = ResourceId(self.resources.len() as u32);
        self.resources.push(ResourceDef {
            name: name.to_string(),
            tier: 1,
            kind: ResourceKind::Element { base_rate },
        });
        self.resource_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Register a compound with its recipe multiset. Inputs may be elements
    /// or other compounds; duplicates are meaningful (a recipe may require
    /// two of the same input).
    pub fn register_compound(
        &mut self,
        name: &str,
        tier: u8,
        mut inputs: Vec<ResourceId>,
    ) -> ResourceId {
        let id = ResourceId(self.resources.len() as u32);
        inputs.sort_unstable();
        self.resources.push(ResourceDef {
            name: name.to_string(),
            tier,
            kind: ResourceKind::Compound { inputs },
        });
        self.resource_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Register a worker type with its acquisition cost and base efficiency.
    pub fn register_worker_type(
        &mut self,
        name: &str,
        cost: Vec<CostEntry>,
        base_efficiency: u32,
    ) -> WorkerTypeId {
        let id = WorkerTypeId(self.worker_types.len() as u32);
        self.worker_types.push(WorkerTypeDef {
            name: name.to_string(),
            cost,
            base_efficiency,
        });
        self.worker_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Lookup resource ID by name.
    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.resource_name_to_id.get(name).copied()
    }

    /// Lookup worker type ID by name.
    pub fn worker_type_id(&self, name: &str) -> Option<WorkerTypeId> {
        self.worker_name_to_id.get(name).copied()
    }

    /// Validate and freeze into an immutable catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        if self.resource_name_to_id.len() != self.resources.len() {
            return Err(self.find_duplicate_resource_name());
        }
        if self.worker_name_to_id.len() != self.worker_types.len() {
            return Err(self.find_duplicate_worker_name());
        }

        let mut recipe_index: HashMap<Vec<ResourceId>, ResourceId> = HashMap::new();
        for (idx, def) in self.resources.iter().enumerate() {
            let id = ResourceId(idx as u32);
            match &def.kind {
                ResourceKind::Element { .. } => {}
                ResourceKind::Compound { inputs } => {
                    if def.tier < 2 {
                        return Err(CatalogError::CompoundTier {
                            compound: def.name.clone(),
                            tier: def.tier,
                        });
                    }
                    if !(MIN_RECIPE_INPUTS..=MAX_RECIPE_INPUTS).contains(&inputs.len()) {
                        return Err(CatalogError::RecipeArity {
                            compound: def.name.clone(),
                            len: inputs.len(),
                        });
                    }
                    for &input in inputs {
                        if input.0 as usize >= self.resources.len() {
                            return Err(CatalogError::InvalidResourceRef(input));
                        }
                    }
                    // Every recipe's normalized multiset must be unique, or
                    // resolution would be ambiguous.
                    if let Some(&prior) = recipe_index.get(inputs) {
                        return Err(CatalogError::AmbiguousRecipe {
                            first: self.resources[prior.0 as usize].name.clone(),
                            second: def.name.clone(),
                        });
                    }
                    recipe_index.insert(inputs.clone(), id);
                }
            }
        }

        for def in &self.worker_types {
            if def.cost.is_empty() {
                return Err(CatalogError::EmptyCost(def.name.clone()));
            }
            if def.base_efficiency == 0 {
                return Err(CatalogError::ZeroEfficiency(def.name.clone()));
            }
            for entry in &def.cost {
                if entry.resource.0 as usize >= self.resources.len() {
                    return Err(CatalogError::InvalidResourceRef(entry.resource));
                }
            }
        }

        Ok(Catalog {
            resources: self.resources,
            resource_name_to_id: self.resource_name_to_id,
            worker_types: self.worker_types,
            worker_name_to_id: self.worker_name_to_id,
            recipe_index,
        })
    }

    fn find_duplicate_resource_name(&self) -> CatalogError {
        let mut seen = std::collections::HashSet::new();
        for def in &self.resources {
            if !seen.insert(def.name.as_str()) {
                return CatalogError::DuplicateName(def.name.clone());
            }
        }
        CatalogError::DuplicateName(String::new())
    }

    fn find_duplicate_worker_name(&self) -> CatalogError {
        let mut seen = std::collections::HashSet::new();
        for def in &self.worker_types {
            if !seen.insert(def.name.as_str()) {
                return CatalogError::DuplicateName(def.name.clone());
            }
        }
        CatalogError::DuplicateName(String::new())
    }
}

/// Immutable catalog. Frozen after build(). Never mutated by the engine.
#[derive(Debug)]
pub struct Catalog {
    resources: Vec<ResourceDef>,
    resource_name_to_id: HashMap<String, ResourceId>,
    worker_types: Vec<WorkerTypeDef>,
    worker_name_to_id: HashMap<String, WorkerTypeId>,
    /// Normalized (sorted) recipe multiset -> compound.
    recipe_index: HashMap<Vec<ResourceId>, ResourceId>,
}

impl Catalog {
    pub fn resource(&self, id: ResourceId) -> Option<&ResourceDef> {
        self.resources.get(id.0 as usize)
    }

    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.resource_name_to_id.get(name).copied()
    }

    pub fn worker_type(&self, id: WorkerTypeId) -> Option<&WorkerTypeDef> {
        self.worker_types.get(id.0 as usize)
    }

    pub fn worker_type_id(&self, name: &str) -> Option<WorkerTypeId> {
        self.worker_name_to_id.get(name).copied()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn worker_type_count(&self) -> usize {
        self.worker_types.len()
    }

    /// Tier-1 elements with their base generation rates, in id order.
    pub fn elements(&self) -> impl Iterator<Item = (ResourceId, Fixed64)> + '_ {
        self.resources
            .iter()
            .enumerate()
            .filter_map(|(idx, def)| match &def.kind {
                ResourceKind::Element { base_rate } => {
                    Some((ResourceId(idx as u32), *base_rate))
                }
                ResourceKind::Compound { .. } => None,
            })
    }

    /// Compounds with their definitions, in id order.
    pub fn compounds(&self) -> impl Iterator<Item = (ResourceId, &ResourceDef)> + '_ {
        self.resources
            .iter()
            .enumerate()
            .filter(|(_, def)| !def.is_element())
            .map(|(idx, def)| (ResourceId(idx as u32), def))
    }

    /// Resolve a normalized (sorted) input multiset to its compound.
    /// The match is exact: subsets and supersets never resolve.
    pub fn resolve_recipe(&self, normalized: &[ResourceId]) -> Option<ResourceId> {
        self.recipe_index.get(normalized).copied()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate name: '{0}'")]
    DuplicateName(String),
    #[error("invalid resource reference: {0:?}")]
    InvalidResourceRef(ResourceId),
    #[error("recipe for '{compound}' has {len} inputs, expected 2..=3")]
    RecipeArity { compound: String, len: usize },
    #[error("compound '{compound}' must have tier >= 2, got {tier}")]
    CompoundTier { compound: String, tier: u8 },
    #[error("recipes for '{first}' and '{second}' share the same input multiset")]
    AmbiguousRecipe { first: String, second: String },
    #[error("worker type '{0}' has an empty acquisition cost")]
    EmptyCost(String),
    #[error("worker type '{0}' has zero base efficiency")]
    ZeroEfficiency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_builder() -> CatalogBuilder {
        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        let water = b.register_element("water", Fixed64::from_num(1));
        b.register_compound("steam", 2, vec![fire, water]);
        b.register_worker_type(
            "apprentice",
            vec![
                CostEntry { resource: fire, amount: 10 },
                CostEntry { resource: water, amount: 10 },
            ],
            100,
        );
        b
    }

    #[test]
    fn register_and_build() {
        let catalog = setup_builder().build().unwrap();
        assert_eq!(catalog.resource_count(), 3);
        assert_eq!(catalog.worker_type_count(), 1);
        assert_eq!(catalog.elements().count(), 2);
        assert_eq!(catalog.compounds().count(), 1);
    }

    #[test]
    fn lookup_by_name() {
        let catalog = setup_builder().build().unwrap();
        assert!(catalog.resource_id("fire").is_some());
        assert!(catalog.resource_id("phlogiston").is_none());
        assert!(catalog.worker_type_id("apprentice").is_some());
    }

    #[test]
    fn recipe_resolution_is_order_independent() {
        let catalog = setup_builder().build().unwrap();
        let fire = catalog.resource_id("fire").unwrap();
        let water = catalog.resource_id("water").unwrap();
        let steam = catalog.resource_id("steam").unwrap();

        let mut selection = vec![water, fire];
        selection.sort_unstable();
        assert_eq!(catalog.resolve_recipe(&selection), Some(steam));
    }

    #[test]
    fn subset_does_not_resolve() {
        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        let water = b.register_element("water", Fixed64::from_num(1));
        let air = b.register_element("air", Fixed64::from_num(1));
        b.register_compound("steam", 2, vec![fire, water]);
        let catalog = b.build().unwrap();

        let mut selection = vec![fire, water, air];
        selection.sort_unstable();
        assert_eq!(catalog.resolve_recipe(&selection), None);
    }

    #[test]
    fn duplicate_inputs_are_distinct_recipes() {
        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        let earth = b.register_element("earth", Fixed64::from_num(1));
        b.register_compound("lava", 2, vec![fire, earth]);
        b.register_compound("glass", 3, vec![fire, fire, earth]);
        let catalog = b.build().unwrap();

        let mut single = vec![fire, earth];
        single.sort_unstable();
        let mut double = vec![fire, fire, earth];
        double.sort_unstable();
        assert_eq!(
            catalog.resolve_recipe(&single),
            catalog.resource_id("lava")
        );
        assert_eq!(
            catalog.resolve_recipe(&double),
            catalog.resource_id("glass")
        );
    }

    #[test]
    fn ambiguous_recipe_fails_build() {
        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        let earth = b.register_element("earth", Fixed64::from_num(1));
        b.register_compound("lava", 2, vec![fire, earth]);
        b.register_compound("glass", 2, vec![earth, fire]);
        match b.build() {
            Err(CatalogError::AmbiguousRecipe { first, second }) => {
                assert_eq!(first, "lava");
                assert_eq!(second, "glass");
            }
            other => panic!("expected AmbiguousRecipe, got {other:?}"),
        }
    }

    #[test]
    fn recipe_arity_is_enforced() {
        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        b.register_compound("ember", 2, vec![fire]);
        assert!(matches!(
            b.build(),
            Err(CatalogError::RecipeArity { len: 1, .. })
        ));

        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        b.register_compound("inferno", 2, vec![fire, fire, fire, fire]);
        assert!(matches!(
            b.build(),
            Err(CatalogError::RecipeArity { len: 4, .. })
        ));
    }

    #[test]
    fn compound_tier_must_be_at_least_two() {
        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        let water = b.register_element("water", Fixed64::from_num(1));
        b.register_compound("steam", 1, vec![fire, water]);
        assert!(matches!(b.build(), Err(CatalogError::CompoundTier { .. })));
    }

    #[test]
    fn invalid_recipe_ref_fails_build() {
        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        b.register_compound("void", 2, vec![fire, ResourceId(999)]);
        assert!(matches!(
            b.build(),
            Err(CatalogError::InvalidResourceRef(ResourceId(999)))
        ));
    }

    #[test]
    fn invalid_cost_ref_fails_build() {
        let mut b = CatalogBuilder::new();
        b.register_element("fire", Fixed64::from_num(1));
        b.register_worker_type(
            "golem",
            vec![CostEntry { resource: ResourceId(42), amount: 1 }],
            200,
        );
        assert!(matches!(
            b.build(),
            Err(CatalogError::InvalidResourceRef(ResourceId(42)))
        ));
    }

    #[test]
    fn worker_type_validation() {
        let mut b = CatalogBuilder::new();
        b.register_element("fire", Fixed64::from_num(1));
        b.register_worker_type("freeloader", vec![], 100);
        assert!(matches!(b.build(), Err(CatalogError::EmptyCost(_))));

        let mut b = CatalogBuilder::new();
        let fire = b.register_element("fire", Fixed64::from_num(1));
        b.register_worker_type(
            "sloth",
            vec![CostEntry { resource: fire, amount: 1 }],
            0,
        );
        assert!(matches!(b.build(), Err(CatalogError::ZeroEfficiency(_))));
    }

    #[test]
    fn duplicate_resource_name_fails_build() {
        let mut b = CatalogBuilder::new();
        b.register_element("fire", Fixed64::from_num(1));
        b.register_element("fire", Fixed64::from_num(2));
        match b.build() {
            Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "fire"),
            other => panic!("expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn production_rate_derives_from_efficiency() {
        let catalog = setup_builder().build().unwrap();
        let apprentice = catalog.worker_type_id("apprentice").unwrap();
        let def = catalog.worker_type(apprentice).unwrap();
        assert_eq!(def.production_rate(), Fixed64::from_num(1));
    }

    #[test]
    fn empty_catalog_builds() {
        let catalog = CatalogBuilder::new().build().unwrap();
        assert_eq!(catalog.resource_count(), 0);
        assert_eq!(catalog.worker_type_count(), 0);
    }
}
