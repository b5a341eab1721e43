//! Core graph types and in-memory operations.
//!
//! This module defines the fundamental building blocks:
//! - [`Entity`]: Named nodes carrying observations
//! - [`Relation`]: Directed, typed edges between entity names
//! - [`KnowledgeGraph`]: The loaded graph and its mutation methods

mod knowledge_graph;
mod types;

pub use types::{
    Entity, GraphStats, KnowledgeGraph, ObservationDeletion, ObservationInput,
    ObservationResult, Relation,
};
