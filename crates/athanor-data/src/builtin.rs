//! The builtin alchemy catalog: the four classical elements, their
//! compounds, and the homunculus worker roster.
//!
//! Recipes form a unique multiset per compound. Glass takes a second fire
//! to keep it distinct from lava.

use athanor_core::catalog::{Catalog, CatalogBuilder, CostEntry};
use athanor_core::fixed::Fixed64;

/// Build the default catalog.
pub fn default_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();

    // -- Elements (tier 1) --
    let fire = b.register_element("fire", Fixed64::from_num(1));
    let water = b.register_element("water", Fixed64::from_num(1));
    let earth = b.register_element("earth", Fixed64::from_num(1));
    let air = b.register_element("air", Fixed64::from_num(1));

    // -- Basic compounds (tier 2) --
    b.register_compound("steam", 2, vec![fire, water]);
    b.register_compound("mud", 2, vec![earth, water]);
    b.register_compound("dust", 2, vec![earth, air]);
    b.register_compound("lava", 2, vec![fire, earth]);
    b.register_compound("ice", 2, vec![water, air]);

    // -- Advanced compounds (tier 3) --
    let lightning = b.register_compound("lightning", 3, vec![fire, air]);
    b.register_compound("plant", 3, vec![earth, water, air]);
    let metal = b.register_compound("metal", 3, vec![fire, earth, air]);
    b.register_compound("glass", 3, vec![fire, fire, earth]);

    // -- Worker types --
    b.register_worker_type(
        "apprentice",
        vec![
            CostEntry { resource: fire, amount: 10 },
            CostEntry { resource: water, amount: 10 },
            CostEntry { resource: earth, amount: 10 },
            CostEntry { resource: air, amount: 10 },
        ],
        100,
    );
    b.register_worker_type(
        "elemental",
        vec![
            CostEntry { resource: fire, amount: 25 },
            CostEntry { resource: water, amount: 25 },
            CostEntry { resource: lightning, amount: 5 },
        ],
        150,
    );
    b.register_worker_type(
        "golem",
        vec![
            CostEntry { resource: earth, amount: 50 },
            CostEntry { resource: metal, amount: 10 },
        ],
        200,
    );

    b.build().expect("builtin catalog is valid")
}
