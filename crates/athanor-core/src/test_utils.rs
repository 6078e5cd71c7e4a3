//! Shared test helpers for unit, integration, and benchmark code.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so the helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::catalog::{Catalog, CatalogBuilder, CostEntry};
use crate::engine::Engine;
use crate::fixed::Fixed64;
use crate::id::{ResourceId, WorkerTypeId};

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

// ===========================================================================
// Resource constructors
// ===========================================================================
//
// Ids follow the registration order of `alchemy_catalog()`.

// Elements
pub fn fire() -> ResourceId {
    ResourceId(0)
}
pub fn water() -> ResourceId {
    ResourceId(1)
}
pub fn earth() -> ResourceId {
    ResourceId(2)
}
pub fn air() -> ResourceId {
    ResourceId(3)
}

// Compounds
pub fn steam() -> ResourceId {
    ResourceId(4)
}
pub fn mud() -> ResourceId {
    ResourceId(5)
}
pub fn lava() -> ResourceId {
    ResourceId(6)
}
pub fn plant() -> ResourceId {
    ResourceId(7)
}
pub fn glass() -> ResourceId {
    ResourceId(8)
}

// Worker types
pub fn apprentice() -> WorkerTypeId {
    WorkerTypeId(0)
}
pub fn golem() -> WorkerTypeId {
    WorkerTypeId(1)
}

// ===========================================================================
// Catalog and engine builders
// ===========================================================================

/// The four classical elements plus a handful of compounds and two worker
/// types. Mirrors the shape of the builtin content without depending on the
/// data crate.
pub fn alchemy_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    let fire = b.register_element("fire", fixed(1.0));
    let water = b.register_element("water", fixed(1.0));
    let earth = b.register_element("earth", fixed(1.0));
    let air = b.register_element("air", fixed(1.0));

    b.register_compound("steam", 2, vec![fire, water]);
    b.register_compound("mud", 2, vec![earth, water]);
    b.register_compound("lava", 2, vec![fire, earth]);
    b.register_compound("plant", 3, vec![earth, water, air]);
    b.register_compound("glass", 3, vec![fire, fire, earth]);

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
        "golem",
        vec![CostEntry { resource: earth, amount: 50 }],
        200,
    );

    b.build().expect("test catalog is valid")
}

/// A fresh engine over the test catalog with the default starting energy.
pub fn new_engine() -> Engine {
    Engine::new(alchemy_catalog())
}

/// A fresh engine with a chosen energy stock.
pub fn energized_engine(energy: u64) -> Engine {
    Engine::with_starting_energy(alchemy_catalog(), energy)
}

/// Raise an element's extractor to `target_level` (energy must suffice).
pub fn upgrade_to(engine: &mut Engine, element: ResourceId, target_level: u32) {
    while engine
        .ledger()
        .extractor(element)
        .map(|ext| ext.level)
        .unwrap_or(target_level)
        < target_level
    {
        engine
            .upgrade_extractor(element)
            .expect("enough energy to reach target level");
    }
}

/// An engine mid-session: upgraded extractors and a couple of assigned
/// workers. Useful for benches.
pub fn busy_engine() -> Engine {
    let mut engine = energized_engine(100_000);
    upgrade_to(&mut engine, fire(), 5);
    upgrade_to(&mut engine, water(), 4);

    for _ in 0..60 {
        engine.gather(fire()).expect("gather fire");
        engine.gather(water()).expect("gather water");
        engine.gather(earth()).expect("gather earth");
        engine.gather(air()).expect("gather air");
    }
    let apprentice_worker = engine
        .create_worker(apprentice())
        .expect("afford apprentice")
        .worker;
    let golem_worker = engine.create_worker(golem()).expect("afford golem").worker;
    engine
        .assign_worker(apprentice_worker, fire())
        .expect("assign apprentice");
    engine
        .assign_worker(golem_worker, earth())
        .expect("assign golem");
    engine
}
