//! Error types for memgraph operations.
//!
//! All fallible operations return [`Result<T>`]. Every error is fatal to the
//! operation that raised it: the store never persists a partially applied batch.

use thiserror::Error;

/// Result type alias for memgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for all store, codec and configuration operations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// An operation referenced an entity that is not in the graph.
    #[error("Entity with name {name} not found")]
    EntityNotFound {
        /// Name of the missing entity
        name: String,
    },

    /// The persisted store could not be decoded.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending record
        line: usize,
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reading or writing the backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Detailed error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A record could not be serialized.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store location could not be resolved.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },
}

impl GraphError {
    /// Create a storage error from a message and optional source.
    pub fn storage<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a parse error for the given 1-based line.
    pub fn parse<E>(line: usize, message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            line,
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Whether this is an [`GraphError::EntityNotFound`] error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }
}
