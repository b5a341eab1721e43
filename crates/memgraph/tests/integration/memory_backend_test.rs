//! Integration test for stores on a MemoryBackend: what each operation
//! persists, inspected through a shared backend handle.

use memgraph::storage::codec;
use memgraph::{
    Entity, GraphStore, KnowledgeGraph, MemoryBackend, ObservationDeletion, Relation,
};

fn attach(backend: &MemoryBackend) -> GraphStore {
    GraphStore::with_backend(Box::new(backend.clone()))
}

fn persisted(backend: &MemoryBackend) -> KnowledgeGraph {
    codec::decode(&backend.contents().unwrap_or_default()).unwrap()
}

#[test]
fn test_every_mutation_persists() {
    let backend = MemoryBackend::new();
    let store = attach(&backend);

    store
        .create_entities(vec![
            Entity::new("A", "node", ["a1", "a2"]),
            Entity::new("B", "node", Vec::<String>::new()),
        ])
        .unwrap();
    assert_eq!(persisted(&backend).entity_count(), 2);

    store
        .create_relations(vec![Relation::new("A", "B", "links")])
        .unwrap();
    assert_eq!(persisted(&backend).relation_count(), 1);

    store
        .delete_observations(vec![ObservationDeletion::new("A", ["a1"])])
        .unwrap();
    assert_eq!(
        persisted(&backend).entity("A").unwrap().observations,
        vec!["a2"]
    );

    store
        .delete_relations(&[Relation::new("A", "B", "links")])
        .unwrap();
    assert_eq!(persisted(&backend).relation_count(), 0);

    store.delete_entities(&["B".to_string()]).unwrap();
    assert_eq!(persisted(&backend).entity_count(), 1);
}

#[test]
fn test_no_op_deletes_still_persist() {
    let backend = MemoryBackend::new();
    let store = attach(&backend);

    store.delete_relations(&[Relation::new("X", "Y", "z")]).unwrap();
    assert_eq!(backend.contents().as_deref(), Some(""));
}

#[test]
fn test_two_stores_on_one_backend_see_each_other() {
    let backend = MemoryBackend::new();
    let writer = attach(&backend);
    let reader = attach(&backend);
    assert_eq!(writer.identity(), reader.identity());

    writer
        .create_entities(vec![Entity::new("A", "node", Vec::<String>::new())])
        .unwrap();
    assert_eq!(reader.read_graph().unwrap().entity_count(), 1);
}

#[test]
fn test_store_decodes_existing_contents() {
    let backend = MemoryBackend::with_contents(
        r#"{"type":"entity","name":"Seed","entityType":"node","observations":["s"]}"#,
    );
    let store = attach(&backend);

    let found = store.search_nodes("seed").unwrap();
    assert_eq!(found.entities.len(), 1);
}

#[test]
fn test_clear_returns_to_cold_start() {
    let backend = MemoryBackend::new();
    let store = attach(&backend);
    store
        .create_entities(vec![Entity::new("A", "node", Vec::<String>::new())])
        .unwrap();

    backend.clear();
    assert!(store.read_graph().unwrap().is_empty());
}
