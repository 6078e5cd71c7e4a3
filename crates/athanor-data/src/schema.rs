//! Serde data file structs for catalog content definitions.
//!
//! These structs define the on-disk format for elements, compounds, and
//! worker types. They are deserialized from RON, JSON, or TOML data files
//! and then resolved into engine types by the loader.

use serde::Deserialize;
use std::collections::BTreeMap;

/// A tier-1 element definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementData {
    pub name: String,
    /// Units generated per tick at extractor level 1.
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_rate() -> f64 {
    1.0
}

/// A compound definition in a data file. The recipe lists input names; a
/// name may repeat when the recipe needs more than one of it.
#[derive(Debug, Clone, Deserialize)]
pub struct CompoundData {
    pub name: String,
    #[serde(default = "default_tier")]
    pub tier: u8,
    pub recipe: Vec<String>,
}

fn default_tier() -> u8 {
    2
}

/// A worker type definition in a data file. Costs are resource name ->
/// amount; a BTreeMap keeps resolution order deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerTypeData {
    pub name: String,
    pub cost: BTreeMap<String, u32>,
    /// Percent figure; 100 yields one unit per tick.
    pub efficiency: u32,
}

/// Root document: one catalog per file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogData {
    pub elements: Vec<ElementData>,
    #[serde(default)]
    pub compounds: Vec<CompoundData>,
    #[serde(default)]
    pub workers: Vec<WorkerTypeData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let data: CatalogData =
            serde_json::from_str(r#"{ "elements": [ { "name": "fire" } ] }"#).unwrap();
        assert_eq!(data.elements[0].rate, 1.0);
        assert!(data.compounds.is_empty());
        assert!(data.workers.is_empty());
    }

    #[test]
    fn recipe_names_may_repeat() {
        let data: CatalogData = serde_json::from_str(
            r#"{
                "elements": [ { "name": "fire" }, { "name": "earth" } ],
                "compounds": [
                    { "name": "glass", "tier": 3, "recipe": ["fire", "fire", "earth"] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(data.compounds[0].recipe.len(), 3);
        assert_eq!(data.compounds[0].tier, 3);
    }
}
