//! Integration tests for the file-backed store: persistence across reopen,
//! cold start, the on-disk format, and failure handling.

use memgraph::{
    Entity, GraphError, GraphStore, KnowledgeGraph, ObservationInput, Relation, StoreConfig,
};
use tempfile::TempDir;

#[test]
fn test_graph_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.jsonl");

    {
        let store = GraphStore::open(&path);
        store
            .create_entities(vec![
                Entity::new("Alice", "Person", ["Likes coffee"]),
                Entity::new("Acme", "Company", Vec::<String>::new()),
            ])
            .unwrap();
        store
            .create_relations(vec![Relation::new("Alice", "Acme", "works_at")])
            .unwrap();
        store
            .add_observations(vec![ObservationInput::new("Acme", ["Founded 1999"])])
            .unwrap();
    }

    let store = GraphStore::open(&path);
    let graph = store.read_graph().unwrap();
    assert_eq!(graph.entity_count(), 2);
    assert_eq!(graph.relation_count(), 1);
    assert_eq!(
        graph.entity("Acme").unwrap().observations,
        vec!["Founded 1999"]
    );
}

#[test]
fn test_cold_start_reads_empty_and_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.jsonl");
    let store = GraphStore::open(&path);

    assert_eq!(store.read_graph().unwrap(), KnowledgeGraph::default());
    assert!(store.search_nodes("x").unwrap().is_empty());
    assert!(!path.exists());
}

#[test]
fn test_first_mutation_creates_file_and_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state").join("memory.jsonl");
    let store = GraphStore::from_config(&StoreConfig::new(&path));

    store
        .create_entities(vec![Entity::new("A", "node", Vec::<String>::new())])
        .unwrap();
    assert!(path.exists());
}

#[test]
fn test_on_disk_format_is_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.jsonl");
    let store = GraphStore::open(&path);

    store
        .create_relations(vec![Relation::new("Alice", "Acme", "works_at")])
        .unwrap();
    store
        .create_entities(vec![Entity::new("Alice", "Person", ["Likes coffee"])])
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"type":"entity","name":"Alice","entityType":"Person","observations":["Likes coffee"]}"#,
            r#"{"type":"relation","from":"Alice","to":"Acme","relationType":"works_at"}"#,
        ]
    );
}

#[test]
fn test_reads_hand_written_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"type":"relation","from":"Bob","to":"Alice","relationType":"knows"}"#,
            "\r\n\r\n",
            r#"{"type":"entity","name":"Alice","entityType":"Person","observations":[],"extra":1}"#,
            "\n",
            r#"{"type":"note","text":"ignored"}"#,
            "\n",
            r#"{"type":"entity","name":"Bob","entityType":"Person","observations":["Tall"]}"#,
            "\n",
        ),
    )
    .unwrap();

    let graph = GraphStore::open(&path).read_graph().unwrap();
    assert_eq!(graph.entity_count(), 2);
    assert_eq!(graph.relations, vec![Relation::new("Bob", "Alice", "knows")]);
}

#[test]
fn test_corrupt_file_fails_every_operation_and_is_kept() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.jsonl");
    let corrupt = concat!(
        r#"{"type":"entity","name":"A","entityType":"t","observations":[]}"#,
        "\n",
        r#"{"type":"entity","name":"B""#,
    );
    std::fs::write(&path, corrupt).unwrap();
    let store = GraphStore::open(&path);

    assert!(matches!(
        store.read_graph(),
        Err(GraphError::Parse { line: 2, .. })
    ));
    assert!(matches!(
        store.delete_entities(&["A".to_string()]),
        Err(GraphError::Parse { .. })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), corrupt);
}

#[test]
fn test_partial_failure_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memory.jsonl");
    let store = GraphStore::open(&path);
    store
        .create_entities(vec![Entity::new("A", "node", Vec::<String>::new())])
        .unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = store
        .add_observations(vec![
            ObservationInput::new("A", ["x"]),
            ObservationInput::new("B", ["y"]),
        ])
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    let graph = GraphStore::open(&path).read_graph().unwrap();
    assert!(graph.entity("A").unwrap().observations.is_empty());
}

#[test]
fn test_unreadable_store_is_storage_error() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the file should be.
    let store = GraphStore::open(temp_dir.path());

    assert!(matches!(
        store.read_graph(),
        Err(GraphError::Storage { .. })
    ));
}
