//! A short headless play session over the builtin catalog.
//!
//! Gathers elements by hand, lets the extractors tick, buys an upgrade,
//! hires a worker, and prints the ledger after each stage.
//!
//! Run with: `cargo run -p athanor-data --example idle_session`

use athanor_core::engine::Engine;
use athanor_core::fixed::fixed64_to_f64;
use athanor_data::builtin::default_catalog;

fn print_summary(engine: &Engine, label: &str) {
    let summary = engine.summary();
    println!(
        "[{label}] tick={} energy={} total_held={:.1} discoveries={} workers={}",
        summary.tick,
        summary.energy,
        fixed64_to_f64(summary.total_quantity),
        summary.discoveries,
        summary.workers,
    );
    for element in engine.element_snapshots() {
        println!(
            "  {:<6} qty={:>8.2} level={} purity={:.2} next_upgrade={} energy",
            element.name,
            fixed64_to_f64(element.quantity),
            element.level,
            fixed64_to_f64(element.purity),
            element.upgrade_cost,
        );
    }
}

fn main() {
    let mut engine = Engine::new(default_catalog());
    let fire = engine.catalog().resource_id("fire").expect("fire exists");
    let earth = engine.catalog().resource_id("earth").expect("earth exists");
    let golem = engine
        .catalog()
        .worker_type_id("golem")
        .expect("golem exists");
    let metal = engine.catalog().resource_id("metal").expect("metal exists");
    let air = engine.catalog().resource_id("air").expect("air exists");

    // --- Stage 1: gather by hand ---

    for _ in 0..5 {
        engine.gather(fire).expect("fire is an element");
    }
    print_summary(&engine, "after gathering");

    // --- Stage 2: let the extractors run for a minute ---

    engine.advance_ticks(60);
    print_summary(&engine, "after 60 ticks");

    // --- Stage 3: invest energy into the fire extractor ---

    match engine.upgrade_extractor(fire) {
        Ok(receipt) => println!(
            "upgraded fire extractor to level {} for {} energy",
            receipt.new_level, receipt.cost
        ),
        Err(err) => println!("upgrade failed: {err}"),
    }

    // --- Stage 4: hire a golem and put it on earth duty ---

    // A golem costs 50 earth and 10 metal; craft the metal first.
    for _ in 0..10 {
        let receipt = engine
            .transmute(&[fire, earth, air])
            .expect("metal transmutation");
        if receipt.is_new {
            let name = &engine
                .catalog()
                .resource(receipt.compound)
                .expect("compound exists")
                .name;
            println!("discovered {name}!");
        }
    }
    let worker = engine.create_worker(golem).expect("afford golem").worker;
    engine.assign_worker(worker, earth).expect("assign golem");
    println!(
        "hired a golem ({:.0} metal left after paying its cost)",
        fixed64_to_f64(engine.ledger().quantity(metal))
    );

    engine.advance_ticks(60);
    print_summary(&engine, "after the golem's first minute");
}
