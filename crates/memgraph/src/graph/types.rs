//! Core graph types: entities, relations, and the batch inputs and outputs
//! of the store operations.
//!
//! Field names serialize in camelCase (`entityType`, `relationType`, ...) so
//! the same types describe both the persisted records and the arguments a
//! caller passes in.

use serde::{Deserialize, Serialize};

/// A named node with a type label and an ordered list of observations.
///
/// `name` is the unique, case-sensitive key of the entity within a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique name of the entity
    pub name: String,
    /// Free-text type label (person, project, concept, ...)
    #[serde(rename = "entityType")]
    pub entity_type: String,
    /// Facts about the entity, in insertion order, without duplicates
    pub observations: Vec<String>,
}

impl Entity {
    /// Create a new entity.
    pub fn new(
        name: impl Into<String>,
        entity_type: impl Into<String>,
        observations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            observations: observations.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the entity already carries this exact observation.
    pub fn has_observation(&self, observation: &str) -> bool {
        self.observations.iter().any(|o| o == observation)
    }

    /// Case-insensitive substring match over name, type and observations.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.entity_type.to_lowercase().contains(needle)
            || self
                .observations
                .iter()
                .any(|o| o.to_lowercase().contains(needle))
    }
}

/// A directed, typed edge between two entity names.
///
/// The `(from, to, relation_type)` triple is the identity of a relation.
/// Endpoints are names and are not required to exist in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// Source entity name
    pub from: String,
    /// Target entity name
    pub to: String,
    /// Type of relationship, usually in active voice (works_at, knows, ...)
    #[serde(rename = "relationType")]
    pub relation_type: String,
}

impl Relation {
    /// Create a new relation.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation_type: relation_type.into(),
        }
    }

    /// The identity triple of this relation.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.from, &self.to, &self.relation_type)
    }

    /// Whether either endpoint is `name`.
    pub fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}

/// An entity set and a relation set, in stored order.
///
/// This is both the whole persisted graph and the shape of every query
/// result (an induced subgraph).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    /// Entities, unique by name
    pub entities: Vec<Entity>,
    /// Relations, unique by `(from, to, relationType)`
    pub relations: Vec<Relation>,
}

/// Observations to append to one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationInput {
    /// Entity to extend
    #[serde(rename = "entityName")]
    pub entity_name: String,
    /// Observation strings to add
    pub contents: Vec<String>,
}

impl ObservationInput {
    /// Create a new observation input.
    pub fn new(
        entity_name: impl Into<String>,
        contents: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            contents: contents.into_iter().map(Into::into).collect(),
        }
    }
}

/// Observations that were actually appended to one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationResult {
    /// Entity that was extended
    #[serde(rename = "entityName")]
    pub entity_name: String,
    /// Strings that were not present before
    #[serde(rename = "addedObservations")]
    pub added_observations: Vec<String>,
}

/// Observations to remove from one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationDeletion {
    /// Entity to shrink
    #[serde(rename = "entityName")]
    pub entity_name: String,
    /// Observation strings to remove
    pub observations: Vec<String>,
}

impl ObservationDeletion {
    /// Create a new observation deletion.
    pub fn new(
        entity_name: impl Into<String>,
        observations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            observations: observations.into_iter().map(Into::into).collect(),
        }
    }
}

/// Size summary of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of entities
    pub entities: usize,
    /// Number of relations
    pub relations: usize,
    /// Total observations across all entities
    pub observations: usize,
    /// Relations with at least one endpoint missing from the entity set
    #[serde(rename = "danglingRelations")]
    pub dangling_relations: usize,
}
