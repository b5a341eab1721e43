//! Unit tests for store mutations (create, add, delete) and their invariants.

use memgraph::{
    Entity, GraphError, GraphStore, ObservationDeletion, ObservationInput, Relation,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn seeded() -> GraphStore {
    let store = GraphStore::in_memory();
    store
        .create_entities(vec![
            Entity::new("A", "node", ["a1"]),
            Entity::new("B", "node", ["b1"]),
            Entity::new("C", "node", Vec::<String>::new()),
        ])
        .unwrap();
    store
        .create_relations(vec![
            Relation::new("A", "B", "links"),
            Relation::new("B", "A", "links"),
            Relation::new("B", "C", "links"),
        ])
        .unwrap();
    store
}

#[test]
fn test_create_entities_is_idempotent() {
    let store = GraphStore::in_memory();
    let batch = vec![
        Entity::new("Alice", "Person", ["Likes coffee"]),
        Entity::new("Bob", "Person", Vec::<String>::new()),
    ];

    let first = store.create_entities(batch.clone()).unwrap();
    assert_eq!(first, batch);

    let second = store.create_entities(batch.clone()).unwrap();
    assert!(second.is_empty());

    let graph = store.read_graph().unwrap();
    assert_eq!(graph.entities, batch);
}

#[test]
fn test_create_entities_skips_existing_names_only() {
    let store = seeded();
    let created = store
        .create_entities(vec![
            Entity::new("A", "different", ["other"]),
            Entity::new("D", "node", ["d1"]),
        ])
        .unwrap();

    assert_eq!(created, vec![Entity::new("D", "node", ["d1"])]);

    let graph = store.read_graph().unwrap();
    assert_eq!(graph.entity("A").unwrap().entity_type, "node");
    assert_eq!(graph.entities.last().unwrap().name, "D");
}

#[test]
fn test_create_entities_names_are_case_sensitive() {
    let store = seeded();
    let created = store
        .create_entities(vec![Entity::new("a", "node", Vec::<String>::new())])
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(store.read_graph().unwrap().entity_count(), 4);
}

#[test]
fn test_create_entities_dedups_within_batch() {
    let store = GraphStore::in_memory();
    let created = store
        .create_entities(vec![
            Entity::new("X", "first", Vec::<String>::new()),
            Entity::new("X", "second", Vec::<String>::new()),
        ])
        .unwrap();

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].entity_type, "first");
    assert_eq!(store.read_graph().unwrap().entity_count(), 1);
}

#[test]
fn test_create_relations_keeps_triples_unique() {
    let store = seeded();
    let created = store
        .create_relations(vec![
            Relation::new("A", "B", "links"),
            Relation::new("A", "B", "knows"),
            Relation::new("A", "B", "knows"),
        ])
        .unwrap();

    assert_eq!(created, vec![Relation::new("A", "B", "knows")]);

    let graph = store.read_graph().unwrap();
    assert_eq!(graph.relation_count(), 4);
    for (i, left) in graph.relations.iter().enumerate() {
        for right in &graph.relations[i + 1..] {
            assert_ne!(left.key(), right.key());
        }
    }
}

#[test]
fn test_create_relations_allows_dangling_endpoints() {
    let store = seeded();
    let created = store
        .create_relations(vec![Relation::new("A", "Nobody", "knows")])
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(store.stats().unwrap().dangling_relations, 1);
}

#[test]
fn test_add_observations_skips_duplicates() {
    let store = seeded();
    let results = store
        .add_observations(vec![ObservationInput::new("A", ["a1", "a2", "a2"])])
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entity_name, "A");
    assert_eq!(results[0].added_observations, vec!["a2"]);

    let graph = store.read_graph().unwrap();
    assert_eq!(graph.entity("A").unwrap().observations, vec!["a1", "a2"]);
}

#[test]
fn test_add_observations_reports_each_item_in_order() {
    let store = seeded();
    let results = store
        .add_observations(vec![
            ObservationInput::new("B", ["b2"]),
            ObservationInput::new("A", ["a1"]),
        ])
        .unwrap();

    assert_eq!(results[0].entity_name, "B");
    assert_eq!(results[0].added_observations, vec!["b2"]);
    assert_eq!(results[1].entity_name, "A");
    assert!(results[1].added_observations.is_empty());
}

#[test]
fn test_add_observations_partial_failure_persists_nothing() {
    let store = seeded();
    let before = store.read_graph().unwrap();

    let result = store.add_observations(vec![
        ObservationInput::new("A", ["x"]),
        ObservationInput::new("Missing", ["y"]),
    ]);

    match result {
        Err(GraphError::EntityNotFound { name }) => assert_eq!(name, "Missing"),
        other => panic!("expected EntityNotFound, got {other:?}"),
    }

    let after = store.read_graph().unwrap();
    assert_eq!(after, before);
    assert!(!after.entity("A").unwrap().has_observation("x"));
}

#[test]
fn test_delete_entities_cascades_to_relations() {
    let store = seeded();
    store.delete_entities(&names(&["A"])).unwrap();

    let graph = store.read_graph().unwrap();
    assert!(graph.entity("A").is_none());
    assert!(graph.relations.iter().all(|r| r.from != "A" && r.to != "A"));
    assert_eq!(graph.relations, vec![Relation::new("B", "C", "links")]);
}

#[test]
fn test_delete_entities_cascades_to_dangling_relations() {
    let store = seeded();
    store
        .create_relations(vec![Relation::new("Ghost", "C", "haunts")])
        .unwrap();

    store.delete_entities(&names(&["Ghost"])).unwrap();

    let graph = store.read_graph().unwrap();
    assert_eq!(graph.entity_count(), 3);
    assert!(graph.relations.iter().all(|r| !r.touches("Ghost")));
}

#[test]
fn test_delete_entities_ignores_unknown_names() {
    let store = seeded();
    store.delete_entities(&names(&["Nope"])).unwrap();
    let graph = store.read_graph().unwrap();
    assert_eq!(graph.entity_count(), 3);
    assert_eq!(graph.relation_count(), 3);
}

#[test]
fn test_delete_observations_skips_missing_entities() {
    let store = seeded();
    store
        .delete_observations(vec![
            ObservationDeletion::new("Missing", ["whatever"]),
            ObservationDeletion::new("A", ["a1", "not-there"]),
        ])
        .unwrap();

    let graph = store.read_graph().unwrap();
    assert!(graph.entity("A").unwrap().observations.is_empty());
    assert_eq!(graph.entity("B").unwrap().observations, vec!["b1"]);
}

#[test]
fn test_delete_relations_matches_full_triple() {
    let store = seeded();
    store
        .delete_relations(&[
            Relation::new("A", "B", "links"),
            Relation::new("B", "C", "other-type"),
        ])
        .unwrap();

    let graph = store.read_graph().unwrap();
    assert_eq!(
        graph.relations,
        vec![
            Relation::new("B", "A", "links"),
            Relation::new("B", "C", "links"),
        ]
    );
}

#[test]
fn test_read_graph_on_cold_store_is_empty() {
    let store = GraphStore::in_memory();
    let graph = store.read_graph().unwrap();
    assert!(graph.is_empty());
    assert!(store.search_nodes("anything").unwrap().is_empty());
    assert!(store.open_nodes(&names(&["A"])).unwrap().is_empty());
}
