//! In-memory operations on a loaded [`KnowledgeGraph`].
//!
//! These methods apply one batch to the graph and report what changed. They
//! never touch storage; [`GraphStore`](crate::GraphStore) wraps each of them
//! in a load/save cycle.

use super::types::{
    Entity, GraphStats, KnowledgeGraph, ObservationDeletion, ObservationInput,
    ObservationResult, Relation,
};
use crate::error::{GraphError, Result};
use log::trace;
use std::collections::HashSet;

impl KnowledgeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of relations.
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Whether the graph holds no entities and no relations.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }

    /// Look up an entity by exact name.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name == name)
    }

    /// Whether a relation with the same triple is stored.
    pub fn has_relation(&self, relation: &Relation) -> bool {
        self.relations.iter().any(|r| r.key() == relation.key())
    }

    /// Append every candidate whose name is not taken yet.
    ///
    /// Later candidates repeating a name already taken (by the graph or by an
    /// earlier candidate) are skipped. Repeated observations inside a
    /// candidate are collapsed. Returns the entities actually appended.
    pub fn create_entities(&mut self, candidates: Vec<Entity>) -> Vec<Entity> {
        let mut taken: HashSet<String> = self.entities.iter().map(|e| e.name.clone()).collect();
        let mut created = Vec::new();

        for mut entity in candidates {
            if !taken.insert(entity.name.clone()) {
                trace!("Skipping existing entity {}", entity.name);
                continue;
            }
            dedup_in_order(&mut entity.observations);
            created.push(entity);
        }

        self.entities.extend(created.iter().cloned());
        created
    }

    /// Append every candidate whose triple is not stored yet.
    ///
    /// Endpoints are not checked against the entity set. Returns the
    /// relations actually appended.
    pub fn create_relations(&mut self, candidates: Vec<Relation>) -> Vec<Relation> {
        let mut taken: HashSet<Relation> = self.relations.iter().cloned().collect();
        let mut created = Vec::new();

        for relation in candidates {
            if taken.contains(&relation) {
                trace!(
                    "Skipping existing relation {} -{}-> {}",
                    relation.from,
                    relation.relation_type,
                    relation.to
                );
                continue;
            }
            taken.insert(relation.clone());
            created.push(relation);
        }

        self.relations.extend(created.iter().cloned());
        created
    }

    /// Append new observation strings to existing entities.
    ///
    /// Items are processed in order. The first item naming a missing entity
    /// aborts the batch with [`GraphError::EntityNotFound`]; items before it
    /// have already been applied to `self`, so callers that must not keep a
    /// partial batch discard the graph on error.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EntityNotFound`] if an item names an unknown entity.
    pub fn add_observations(
        &mut self,
        inputs: Vec<ObservationInput>,
    ) -> Result<Vec<ObservationResult>> {
        let mut results = Vec::with_capacity(inputs.len());

        for input in inputs {
            let entity =
                self.entity_mut(&input.entity_name)
                    .ok_or_else(|| GraphError::EntityNotFound {
                        name: input.entity_name.clone(),
                    })?;

            let mut added = Vec::new();
            for content in input.contents {
                if !entity.has_observation(&content) {
                    entity.observations.push(content.clone());
                    added.push(content);
                }
            }

            results.push(ObservationResult {
                entity_name: input.entity_name,
                added_observations: added,
            });
        }

        Ok(results)
    }

    /// Remove the named entities and every relation touching them.
    ///
    /// Unknown names are ignored.
    pub fn delete_entities(&mut self, names: &[String]) {
        let doomed: HashSet<&str> = names.iter().map(String::as_str).collect();
        let before = (self.entities.len(), self.relations.len());

        self.entities.retain(|e| !doomed.contains(e.name.as_str()));
        self.relations
            .retain(|r| !doomed.contains(r.from.as_str()) && !doomed.contains(r.to.as_str()));

        trace!(
            "Removed {} entities and {} relations",
            before.0 - self.entities.len(),
            before.1 - self.relations.len()
        );
    }

    /// Remove the listed observation strings from each named entity.
    ///
    /// Items naming a missing entity are skipped.
    pub fn delete_observations(&mut self, deletions: Vec<ObservationDeletion>) {
        for deletion in deletions {
            match self.entity_mut(&deletion.entity_name) {
                Some(entity) => {
                    let doomed: HashSet<&str> =
                        deletion.observations.iter().map(String::as_str).collect();
                    entity.observations.retain(|o| !doomed.contains(o.as_str()));
                }
                None => trace!("Skipping missing entity {}", deletion.entity_name),
            }
        }
    }

    /// Remove every stored relation whose triple matches one of `relations`.
    pub fn delete_relations(&mut self, relations: &[Relation]) {
        let doomed: HashSet<(&str, &str, &str)> = relations.iter().map(Relation::key).collect();
        self.relations.retain(|r| !doomed.contains(&r.key()));
    }

    /// Relations with an endpoint that does not name a stored entity.
    pub fn dangling_relations(&self) -> Vec<&Relation> {
        let names: HashSet<&str> = self.entities.iter().map(|e| e.name.as_str()).collect();
        self.relations
            .iter()
            .filter(|r| !names.contains(r.from.as_str()) || !names.contains(r.to.as_str()))
            .collect()
    }

    /// Size summary of the graph.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            entities: self.entities.len(),
            relations: self.relations.len(),
            observations: self.entities.iter().map(|e| e.observations.len()).sum(),
            dangling_relations: self.dangling_relations().len(),
        }
    }
}

/// Drop repeated strings, keeping the first occurrence of each.
fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
