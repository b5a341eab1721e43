//! Line-delimited JSON codec for the persisted graph.
//!
//! Each line holds one flat JSON object tagged by a `type` field:
//!
//! ```text
//! {"type":"entity","name":"Alice","entityType":"Person","observations":["Likes coffee"]}
//! {"type":"relation","from":"Alice","to":"Acme","relationType":"works_at"}
//! ```
//!
//! Entities are written before relations. On read the `type` field alone
//! decides where a record goes, so position does not matter.

use crate::error::{GraphError, Result};
use crate::graph::{Entity, KnowledgeGraph, Relation};
use log::warn;
use serde::Serialize;
use serde_json::Value;

const ENTITY_TAG: &str = "entity";
const RELATION_TAG: &str = "relation";

/// Borrowed view of one record, tagged for output.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record<'a> {
    Entity(&'a Entity),
    Relation(&'a Relation),
}

/// Encode the whole graph, one record per line, without a trailing newline.
///
/// # Errors
///
/// Returns [`GraphError::Serialization`] if a record cannot be serialized.
pub fn encode(graph: &KnowledgeGraph) -> Result<String> {
    let records = graph
        .entities
        .iter()
        .map(Record::Entity)
        .chain(graph.relations.iter().map(Record::Relation));

    let mut lines = Vec::with_capacity(graph.entities.len() + graph.relations.len());
    for record in records {
        let line = serde_json::to_string(&record)
            .map_err(|e| GraphError::serialization("Failed to serialize record", Some(e)))?;
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// Decode a persisted graph.
///
/// Blank lines are skipped. Records whose `type` is missing or unknown are
/// dropped. Any other malformed line fails the whole decode.
///
/// # Errors
///
/// Returns [`GraphError::Parse`] naming the first line that is not valid JSON,
/// not an object, or a recognized record missing a required field.
pub fn decode(text: &str) -> Result<KnowledgeGraph> {
    let mut graph = KnowledgeGraph::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;

        let value: Value = serde_json::from_str(line)
            .map_err(|e| GraphError::parse(line_no, "Invalid JSON record", Some(e)))?;
        if !value.is_object() {
            return Err(GraphError::parse(
                line_no,
                "Record is not a JSON object",
                None::<serde_json::Error>,
            ));
        }

        match value.get("type").and_then(Value::as_str) {
            Some(ENTITY_TAG) => {
                let entity: Entity = serde_json::from_value(value)
                    .map_err(|e| GraphError::parse(line_no, "Malformed entity record", Some(e)))?;
                graph.entities.push(entity);
            }
            Some(RELATION_TAG) => {
                let relation: Relation = serde_json::from_value(value).map_err(|e| {
                    GraphError::parse(line_no, "Malformed relation record", Some(e))
                })?;
                graph.relations.push(relation);
            }
            other => {
                warn!("Dropping record with unrecognized type {other:?} on line {line_no}");
            }
        }
    }

    Ok(graph)
}
