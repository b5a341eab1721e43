//! Store inspector for memgraph
//!
//! Prints entity, relation and observation counts, type histograms, and any
//! relations whose endpoints are missing.
//!
//! Usage: `cargo run --example inspect_store -- [path]` (defaults to
//! `MEMORY_FILE_PATH` resolution).

use memgraph::{GraphStore, StoreConfig};
use std::collections::BTreeMap;
use std::env;

fn main() -> memgraph::Result<()> {
    let config = match env::args().nth(1) {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::from_env()?,
    };
    println!("Store: {}", config.path.display());

    let store = GraphStore::from_config(&config);
    let graph = store.read_graph()?;
    let stats = graph.stats();
    println!("Entity count: {}", stats.entities);
    println!("Relation count: {}", stats.relations);
    println!("Observation count: {}", stats.observations);

    // Entity types by frequency
    println!("\n--- Entity types ---");
    let mut types: BTreeMap<&str, usize> = BTreeMap::new();
    for entity in &graph.entities {
        *types.entry(entity.entity_type.as_str()).or_default() += 1;
    }
    for (entity_type, count) in &types {
        println!("  {entity_type}: {count}");
    }

    // Relation types by frequency
    println!("\n--- Relation types ---");
    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for relation in &graph.relations {
        *kinds.entry(relation.relation_type.as_str()).or_default() += 1;
    }
    for (relation_type, count) in &kinds {
        println!("  {relation_type}: {count}");
    }

    let dangling = graph.dangling_relations();
    if !dangling.is_empty() {
        println!("\n--- Dangling relations ({}) ---", dangling.len());
        for relation in dangling.iter().take(20) {
            println!(
                "  {} --{}--> {}",
                relation.from, relation.relation_type, relation.to
            );
        }
    }

    Ok(())
}
