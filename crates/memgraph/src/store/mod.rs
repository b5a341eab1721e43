//! The persistent graph store.
//!
//! [`GraphStore`] exposes the store operations. Each call runs as one unit
//! under the store's lock:
//!
//! ```text
//! lock → load + decode → apply in memory → (mutations) encode + save → unlock
//! ```
//!
//! No graph is cached between calls. A failed call never reaches the save
//! step, so the persisted store is either fully updated or untouched.

mod lock;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::graph::{
    Entity, GraphStats, KnowledgeGraph, ObservationDeletion, ObservationInput,
    ObservationResult, Relation,
};
use crate::storage::{codec, FileBackend, MemoryBackend, StorageBackend};
use lock::StoreLock;
use log::{debug, info, trace};
use std::path::Path;

/// A knowledge graph persisted through a [`StorageBackend`].
///
/// `GraphStore` is `Send + Sync`; share it through an `Arc` or open several
/// stores on the same path. Either way, calls against one backing store are
/// linearized.
pub struct GraphStore {
    backend: Box<dyn StorageBackend>,
    lock: StoreLock,
}

impl GraphStore {
    /// Create a store on top of the given backend.
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        let identity = backend.identity();
        debug!("Attaching store {identity}");
        Self {
            lock: lock::lock_for(&identity),
            backend,
        }
    }

    /// Open a file-backed store at `path`.
    ///
    /// The file is not touched until the first operation. A missing file
    /// reads as an empty graph and is created by the first mutation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use memgraph::{Entity, GraphStore};
    ///
    /// let store = GraphStore::open("./memory.jsonl");
    /// store.create_entities(vec![Entity::new("Alice", "Person", ["Likes coffee"])])?;
    /// # Ok::<(), memgraph::GraphError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        info!("Opening graph store at path: {:?}", path.as_ref());
        Self::with_backend(Box::new(FileBackend::new(path)))
    }

    /// Open the file-backed store a [`StoreConfig`] points at.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::open(&config.path)
    }

    /// Create an in-memory store for testing.
    ///
    /// **Warning**: All data is lost when the store is dropped.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()))
    }

    /// Identity of the backing store.
    pub fn identity(&self) -> String {
        self.backend.identity()
    }

    /// Add entities whose names are not taken yet.
    ///
    /// Returns the entities actually added, possibly none. The store is
    /// written even when nothing was added.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`](crate::GraphError::Parse) or
    /// [`GraphError::Storage`](crate::GraphError::Storage) if the store cannot
    /// be read or written.
    pub fn create_entities(&self, entities: Vec<Entity>) -> Result<Vec<Entity>> {
        debug!("Creating batch of {} entities", entities.len());
        self.mutate(|graph| Ok(graph.create_entities(entities)))
    }

    /// Add relations whose `(from, to, relationType)` triple is not stored yet.
    ///
    /// Endpoints do not have to name existing entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn create_relations(&self, relations: Vec<Relation>) -> Result<Vec<Relation>> {
        debug!("Creating batch of {} relations", relations.len());
        self.mutate(|graph| Ok(graph.create_relations(relations)))
    }

    /// Append observations to existing entities, skipping strings already present.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EntityNotFound`](crate::GraphError::EntityNotFound)
    /// if any item names a missing entity. Nothing from the batch is persisted
    /// in that case, including items that came before the missing one.
    pub fn add_observations(
        &self,
        observations: Vec<ObservationInput>,
    ) -> Result<Vec<ObservationResult>> {
        debug!("Adding observations for {} entities", observations.len());
        self.mutate(|graph| graph.add_observations(observations))
    }

    /// Delete entities by name, together with every relation touching them.
    ///
    /// Unknown names are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn delete_entities(&self, names: &[String]) -> Result<()> {
        debug!("Deleting {} entities", names.len());
        self.mutate(|graph| {
            graph.delete_entities(names);
            Ok(())
        })
    }

    /// Remove specific observations from entities. Missing entities are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn delete_observations(&self, deletions: Vec<ObservationDeletion>) -> Result<()> {
        debug!("Deleting observations from {} entities", deletions.len());
        self.mutate(|graph| {
            graph.delete_observations(deletions);
            Ok(())
        })
    }

    /// Delete relations matching the given triples exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn delete_relations(&self, relations: &[Relation]) -> Result<()> {
        debug!("Deleting {} relations", relations.len());
        self.mutate(|graph| {
            graph.delete_relations(relations);
            Ok(())
        })
    }

    /// Return the whole stored graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn read_graph(&self) -> Result<KnowledgeGraph> {
        self.read(|graph| graph)
    }

    /// Entities mentioning `query` in their name, type or observations
    /// (case-insensitive), with the relations among them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn search_nodes(&self, query: &str) -> Result<KnowledgeGraph> {
        debug!("Searching nodes for {query:?}");
        self.read(|graph| graph.search_nodes(query))
    }

    /// Entities with the given names, with the relations among them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open_nodes(&self, names: &[String]) -> Result<KnowledgeGraph> {
        debug!("Opening {} nodes", names.len());
        self.read(|graph| graph.open_nodes(names.iter().cloned()))
    }

    /// Size summary of the stored graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn stats(&self) -> Result<GraphStats> {
        self.read(|graph| graph.stats())
    }

    // Private helper methods

    fn load(&self) -> Result<KnowledgeGraph> {
        match self.backend.load()? {
            Some(text) => codec::decode(&text),
            None => Ok(KnowledgeGraph::default()),
        }
    }

    fn save(&self, graph: &KnowledgeGraph) -> Result<()> {
        let text = codec::encode(graph)?;
        self.backend.save(&text)?;
        trace!(
            "Saved {} entities and {} relations",
            graph.entity_count(),
            graph.relation_count()
        );
        Ok(())
    }

    /// Run a read-only step against a freshly loaded graph.
    fn read<T>(&self, step: impl FnOnce(KnowledgeGraph) -> T) -> Result<T> {
        let _guard = lock::acquire(&self.lock);
        let graph = self.load()?;
        Ok(step(graph))
    }

    /// Run a mutation against a freshly loaded graph and persist the result.
    ///
    /// `step` failing returns before the save, dropping the mutated copy.
    fn mutate<T>(&self, step: impl FnOnce(&mut KnowledgeGraph) -> Result<T>) -> Result<T> {
        let _guard = lock::acquire(&self.lock);
        let mut graph = self.load()?;
        let outcome = step(&mut graph)?;
        self.save(&graph)?;
        Ok(outcome)
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("identity", &self.backend.identity())
            .finish()
    }
}
