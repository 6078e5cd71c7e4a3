//! Walks the full discovery log: crafts every compound in the builtin
//! catalog once, bottom tier first, and prints the grimoire as it grows.
//!
//! Run with: `cargo run -p athanor-data --example transmutation_lab`

use athanor_core::catalog::ResourceKind;
use athanor_core::engine::Engine;
use athanor_core::id::ResourceId;
use athanor_data::builtin::default_catalog;

fn main() {
    let mut engine = Engine::new(default_catalog());

    // Stock up: every recipe input is an element in the builtin catalog,
    // so a pile of each element covers the whole discovery log.
    let elements: Vec<ResourceId> = engine.catalog().elements().map(|(id, _)| id).collect();
    for &element in &elements {
        for _ in 0..10 {
            engine.gather(element).expect("elements are gatherable");
        }
    }

    // Craft each compound from its own recipe, in catalog order.
    let recipes: Vec<(String, Vec<ResourceId>)> = engine
        .catalog()
        .compounds()
        .map(|(_, def)| {
            let inputs = match &def.kind {
                ResourceKind::Compound { inputs } => inputs.clone(),
                ResourceKind::Element { .. } => unreachable!("compounds() yields compounds"),
            };
            (def.name.clone(), inputs)
        })
        .collect();

    for (name, inputs) in recipes {
        match engine.transmute(&inputs) {
            Ok(receipt) => {
                let tag = if receipt.is_new { "NEW" } else { "dup" };
                println!("[{tag}] transmuted {name}");
            }
            Err(err) => println!("[err] {name}: {err}"),
        }
    }

    // The grimoire, in discovery order.
    println!("\ngrimoire:");
    for &id in engine.ledger().discoveries() {
        let def = engine.catalog().resource(id).expect("discovered compounds exist");
        println!("  tier {} - {}", def.tier, def.name);
    }
}
