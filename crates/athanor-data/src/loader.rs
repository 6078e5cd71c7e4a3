//! Resolution pipeline: reads data files, resolves name references, builds
//! an engine catalog.
//!
//! Provides format detection (RON/JSON/TOML by extension), deserialization
//! helpers, and the resolver that turns [`CatalogData`] into a validated
//! [`Catalog`].

use crate::schema::CatalogData;
use athanor_core::catalog::{Catalog, CatalogBuilder, CatalogError, CostEntry};
use athanor_core::fixed::Fixed64;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading catalog data.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {source_name}: {detail}")]
    Parse {
        source_name: String,
        detail: String,
    },

    /// A name reference could not be resolved.
    #[error("unresolved resource reference '{name}' in {context}")]
    UnresolvedRef { name: String, context: String },

    /// The resolved content failed catalog validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Parse catalog data from a string in the given format. `source_name` is
/// used for error reporting only.
pub fn parse_catalog_str(
    content: &str,
    format: Format,
    source_name: &str,
) -> Result<CatalogData, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        source_name: source_name.to_string(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and parse it according to its extension.
pub fn load_catalog_data(path: &Path) -> Result<CatalogData, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_catalog_str(&content, format, &path.display().to_string())
}

// ===========================================================================
// Resolution
// ===========================================================================

/// Resolve parsed data into a validated catalog. Elements are registered
/// first, so compound recipes and worker costs may reference any element or
/// any earlier compound by name.
pub fn resolve_catalog(data: &CatalogData) -> Result<Catalog, DataLoadError> {
    let mut builder = CatalogBuilder::new();

    for element in &data.elements {
        builder.register_element(&element.name, Fixed64::from_num(element.rate));
    }

    for compound in &data.compounds {
        let inputs = compound
            .recipe
            .iter()
            .map(|name| {
                builder
                    .resource_id(name)
                    .ok_or_else(|| DataLoadError::UnresolvedRef {
                        name: name.clone(),
                        context: format!("compound '{}'", compound.name),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        builder.register_compound(&compound.name, compound.tier, inputs);
    }

    for worker in &data.workers {
        let cost = worker
            .cost
            .iter()
            .map(|(name, &amount)| {
                builder
                    .resource_id(name)
                    .map(|resource| CostEntry { resource, amount })
                    .ok_or_else(|| DataLoadError::UnresolvedRef {
                        name: name.clone(),
                        context: format!("worker type '{}'", worker.name),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        builder.register_worker_type(&worker.name, cost, worker.efficiency);
    }

    Ok(builder.build()?)
}

/// Load and resolve a catalog from a data file in one step.
pub fn load_catalog(path: &Path) -> Result<Catalog, DataLoadError> {
    resolve_catalog(&load_catalog_data(path)?)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RON_CATALOG: &str = r#"(
        elements: [
            (name: "fire", rate: 1.0),
            (name: "water", rate: 1.0),
        ],
        compounds: [
            (name: "steam", tier: 2, recipe: ["fire", "water"]),
        ],
        workers: [
            (name: "apprentice", cost: { "fire": 10, "water": 10 }, efficiency: 100),
        ],
    )"#;

    const JSON_CATALOG: &str = r#"{
        "elements": [
            { "name": "fire", "rate": 1.0 },
            { "name": "water", "rate": 1.0 }
        ],
        "compounds": [
            { "name": "steam", "tier": 2, "recipe": ["fire", "water"] }
        ],
        "workers": [
            { "name": "apprentice", "cost": { "fire": 10, "water": 10 }, "efficiency": 100 }
        ]
    }"#;

    const TOML_CATALOG: &str = r#"
        [[elements]]
        name = "fire"
        rate = 1.0

        [[elements]]
        name = "water"
        rate = 1.0

        [[compounds]]
        name = "steam"
        tier = 2
        recipe = ["fire", "water"]

        [[workers]]
        name = "apprentice"
        efficiency = 100

        [workers.cost]
        fire = 10
        water = 10
    "#;

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(
            detect_format(Path::new("alchemy.ron")).unwrap(),
            Format::Ron
        );
        assert_eq!(
            detect_format(Path::new("alchemy.toml")).unwrap(),
            Format::Toml
        );
        assert_eq!(
            detect_format(Path::new("alchemy.json")).unwrap(),
            Format::Json
        );
        assert!(matches!(
            detect_format(Path::new("alchemy.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn all_three_formats_resolve_identically() {
        for (content, format) in [
            (RON_CATALOG, Format::Ron),
            (JSON_CATALOG, Format::Json),
            (TOML_CATALOG, Format::Toml),
        ] {
            let data = parse_catalog_str(content, format, "inline").unwrap();
            let catalog = resolve_catalog(&data).unwrap();
            assert_eq!(catalog.resource_count(), 3, "{format:?}");
            assert_eq!(catalog.worker_type_count(), 1, "{format:?}");

            let fire = catalog.resource_id("fire").unwrap();
            let water = catalog.resource_id("water").unwrap();
            let mut selection = vec![water, fire];
            selection.sort_unstable();
            assert_eq!(
                catalog.resolve_recipe(&selection),
                catalog.resource_id("steam"),
                "{format:?}"
            );
        }
    }

    #[test]
    fn parse_error_names_the_source() {
        let err = parse_catalog_str("not json", Format::Json, "broken.json").unwrap_err();
        match err {
            DataLoadError::Parse { source_name, .. } => assert_eq!(source_name, "broken.json"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn unresolved_recipe_reference_is_reported() {
        let data = parse_catalog_str(
            r#"{
                "elements": [ { "name": "fire" } ],
                "compounds": [ { "name": "steam", "recipe": ["fire", "wgtr"] } ]
            }"#,
            Format::Json,
            "inline",
        )
        .unwrap();
        match resolve_catalog(&data) {
            Err(DataLoadError::UnresolvedRef { name, context }) => {
                assert_eq!(name, "wgtr");
                assert!(context.contains("steam"));
            }
            other => panic!("expected UnresolvedRef, got {other:?}"),
        }
    }

    #[test]
    fn catalog_validation_errors_propagate() {
        // Two compounds with the same multiset fail catalog validation.
        let data = parse_catalog_str(
            r#"{
                "elements": [ { "name": "water" }, { "name": "air" } ],
                "compounds": [
                    { "name": "ice", "recipe": ["water", "air"] },
                    { "name": "cloud", "recipe": ["air", "water"] }
                ]
            }"#,
            Format::Json,
            "inline",
        )
        .unwrap();
        assert!(matches!(
            resolve_catalog(&data),
            Err(DataLoadError::Catalog(CatalogError::AmbiguousRecipe { .. }))
        ));
    }

    #[test]
    fn load_catalog_from_disk() {
        let dir = std::env::temp_dir().join("athanor-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("alchemy.json");
        std::fs::write(&path, JSON_CATALOG).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.resource_count(), 3);

        std::fs::remove_file(&path).ok();
    }
}
