//! Query builder for fluent graph queries.
//!
//! Every query selects a set of entities and returns the induced subgraph:
//! the selected entities plus exactly those relations whose `from` and `to`
//! are both selected. A relation with only one selected endpoint is never
//! returned.

use crate::graph::{Entity, KnowledgeGraph};
use std::collections::HashSet;

/// A filter predicate that can be applied to entities.
type FilterFn<'q> = Box<dyn Fn(&Entity) -> bool + 'q>;

/// Fluent query builder over a loaded graph.
///
/// All filters must hold for an entity to be selected.
///
/// # Examples
///
/// ```
/// use memgraph::{Entity, KnowledgeGraph, Relation};
///
/// let mut graph = KnowledgeGraph::new();
/// graph.create_entities(vec![
///     Entity::new("Alice", "Person", ["Likes coffee"]),
///     Entity::new("Acme", "Company", Vec::<String>::new()),
/// ]);
/// graph.create_relations(vec![Relation::new("Alice", "Acme", "works_at")]);
///
/// let people = graph.query().entity_type("Person").execute();
/// assert_eq!(people.entities.len(), 1);
/// assert!(people.relations.is_empty());
/// ```
pub struct QueryBuilder<'a> {
    graph: &'a KnowledgeGraph,
    filters: Vec<FilterFn<'a>>,
    limit_value: Option<usize>,
}

impl<'a> QueryBuilder<'a> {
    /// Create a new query builder for the given graph.
    pub fn new(graph: &'a KnowledgeGraph) -> Self {
        Self {
            graph,
            filters: Vec::new(),
            limit_value: None,
        }
    }

    /// Select entities whose name, type or any observation contains `text`,
    /// ignoring case.
    pub fn text_contains(mut self, text: &str) -> Self {
        let needle = text.to_lowercase();
        self.filters
            .push(Box::new(move |entity| entity.mentions(&needle)));
        self
    }

    /// Select entities whose name is one of `names` (exact match).
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let wanted: HashSet<String> = names.into_iter().map(Into::into).collect();
        self.filters
            .push(Box::new(move |entity| wanted.contains(&entity.name)));
        self
    }

    /// Select entities of exactly this type.
    pub fn entity_type(mut self, entity_type: &str) -> Self {
        let entity_type = entity_type.to_string();
        self.filters
            .push(Box::new(move |entity| entity.entity_type == entity_type));
        self
    }

    /// Select entities using a custom predicate.
    ///
    /// ```
    /// # use memgraph::{Entity, KnowledgeGraph};
    /// # let graph = KnowledgeGraph::new();
    /// let busy = graph
    ///     .query()
    ///     .custom(|entity: &Entity| entity.observations.len() > 10)
    ///     .execute();
    /// # assert!(busy.entities.is_empty());
    /// ```
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Entity) -> bool + 'a,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Limit the number of entities selected. Relations follow from the
    /// limited entity set.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_value = Some(n);
        self
    }

    /// Execute the query and return the induced subgraph.
    pub fn execute(&self) -> KnowledgeGraph {
        let limit = self.limit_value.unwrap_or(usize::MAX);
        let entities: Vec<Entity> = self
            .graph
            .entities
            .iter()
            .filter(|entity| self.matches_filters(entity))
            .take(limit)
            .cloned()
            .collect();

        induced_subgraph(self.graph, entities)
    }

    /// Count the matching entities without building a result graph.
    pub fn count(&self) -> usize {
        let matched = self
            .graph
            .entities
            .iter()
            .filter(|entity| self.matches_filters(entity))
            .count();
        matched.min(self.limit_value.unwrap_or(usize::MAX))
    }

    /// Check if any entity matches (short-circuits on first match).
    pub fn exists(&self) -> bool {
        self.limit_value != Some(0)
            && self
                .graph
                .entities
                .iter()
                .any(|entity| self.matches_filters(entity))
    }

    /// Check if an entity matches all filters.
    fn matches_filters(&self, entity: &Entity) -> bool {
        self.filters.iter().all(|filter| filter(entity))
    }
}

/// Pair a selected entity set with the relations between its members.
fn induced_subgraph(graph: &KnowledgeGraph, entities: Vec<Entity>) -> KnowledgeGraph {
    let selected: HashSet<&str> = entities.iter().map(|e| e.name.as_str()).collect();
    let relations = graph
        .relations
        .iter()
        .filter(|r| selected.contains(r.from.as_str()) && selected.contains(r.to.as_str()))
        .cloned()
        .collect();

    KnowledgeGraph {
        entities,
        relations,
    }
}

impl KnowledgeGraph {
    /// Create a new query builder for this graph.
    pub fn query(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self)
    }

    /// Entities mentioning `query` (case-insensitive) in their name, type or
    /// observations, with the relations between them.
    pub fn search_nodes(&self, query: &str) -> KnowledgeGraph {
        self.query().text_contains(query).execute()
    }

    /// Entities with the given names, with the relations between them.
    /// Names that are not stored are ignored.
    pub fn open_nodes<I, S>(&self, names: I) -> KnowledgeGraph
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query().names(names).execute()
    }
}
