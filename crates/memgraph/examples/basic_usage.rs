//! Basic usage example for memgraph
//!
//! This example demonstrates:
//! - Opening a file-backed store
//! - Adding entities, relations and observations
//! - Searching and opening nodes

use memgraph::{Entity, GraphStore, ObservationInput, Relation};

fn main() -> memgraph::Result<()> {
    // Create a persistent store (or use in_memory() for testing)
    let store = GraphStore::open("./example.jsonl");

    println!("Creating a small knowledge graph...\n");

    let created = store.create_entities(vec![
        Entity::new("Alice", "Person", ["Likes coffee"]),
        Entity::new("Bob", "Person", ["Plays chess"]),
        Entity::new("Acme", "Company", ["Makes anvils"]),
    ])?;
    for entity in &created {
        println!("✓ Added entity: {} ({})", entity.name, entity.entity_type);
    }

    let created = store.create_relations(vec![
        Relation::new("Alice", "Acme", "works_at"),
        Relation::new("Bob", "Acme", "works_at"),
        Relation::new("Alice", "Bob", "knows"),
    ])?;
    println!("✓ Added {} relations", created.len());

    let added = store.add_observations(vec![ObservationInput::new(
        "Alice",
        ["Likes coffee", "Lives in Lyon"],
    )])?;
    for result in &added {
        println!(
            "✓ {}: +{:?}",
            result.entity_name, result.added_observations
        );
    }

    println!("\n--- search_nodes(\"COFFEE\") ---");
    let found = store.search_nodes("COFFEE")?;
    for entity in &found.entities {
        println!("  {} [{}]", entity.name, entity.entity_type);
    }

    println!("\n--- open_nodes([Alice, Bob]) ---");
    let opened = store.open_nodes(&["Alice".to_string(), "Bob".to_string()])?;
    for relation in &opened.relations {
        println!("  {} --{}--> {}", relation.from, relation.relation_type, relation.to);
    }

    let stats = store.stats()?;
    println!(
        "\n{} entities, {} relations, {} observations",
        stats.entities, stats.relations, stats.observations
    );

    Ok(())
}
