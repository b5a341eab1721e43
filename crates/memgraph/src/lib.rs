//! # memgraph
//!
//! A small persistent knowledge graph: named entities carrying free-text
//! observations, and typed directed relations between them, stored in a flat
//! JSON-lines file.
//!
//! ## Core Principles
//!
//! - **No hidden state**: every operation loads the graph, applies one batch, and
//!   (for mutations) writes the whole graph back
//! - **All or nothing**: a failed operation persists nothing
//! - **Linearized**: operations on one store never interleave, even across
//!   separately opened handles
//! - **Zero Magic**: the store never reads the environment; resolve a path with
//!   [`StoreConfig`] and pass it in
//!
//! ## Architecture
//!
//! ```text
//! Caller (tool dispatcher, CLI, ...)
//!     ↓
//! GraphStore (lock, load, apply, save)
//!     ↓
//! KnowledgeGraph + QueryBuilder (in-memory mutations, induced subgraphs)
//!     ↓
//! Codec (JSON lines)
//!     ↓
//! Storage Backend (file, memory)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use memgraph::{Entity, GraphStore, ObservationInput, Relation, StoreConfig};
//!
//! # fn main() -> memgraph::Result<()> {
//! let store = GraphStore::from_config(&StoreConfig::from_env()?);
//!
//! store.create_entities(vec![
//!     Entity::new("Alice", "Person", ["Likes coffee"]),
//!     Entity::new("Acme", "Company", Vec::<String>::new()),
//! ])?;
//! store.create_relations(vec![Relation::new("Alice", "Acme", "works_at")])?;
//! store.add_observations(vec![ObservationInput::new("Alice", ["Lives in Lyon"])])?;
//!
//! let found = store.search_nodes("coffee")?;
//! assert_eq!(found.entities[0].name, "Alice");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod graph;
pub mod query;
pub mod storage;
pub mod store;

// Re-export main types
pub use config::StoreConfig;
pub use error::{GraphError, Result};
pub use graph::{
    Entity, GraphStats, KnowledgeGraph, ObservationDeletion, ObservationInput,
    ObservationResult, Relation,
};
pub use query::QueryBuilder;
pub use storage::{FileBackend, MemoryBackend, StorageBackend};
pub use store::GraphStore;
