//! Storage backend abstractions and implementations.
//!
//! This module defines the [`StorageBackend`] trait and provides implementations:
//! - [`FileBackend`]: The persisted JSON-lines file
//! - [`MemoryBackend`]: In-memory storage for testing
//!
//! A backend stores the encoded graph as one opaque text blob. It knows
//! nothing about entities or relations; [`codec`] does.
//!
//! ## Design Philosophy
//!
//! - **Whole-graph writes**: every save replaces the entire persisted content
//! - **Cold start**: a store that was never written loads as `None`, not an error
//! - **Fail Fast**: Operations return errors immediately, no silent failures

pub mod codec;
mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;

/// Trait defining the storage backend interface.
///
/// Implementations must be shareable across threads; the store serializes
/// access per [`identity`](StorageBackend::identity), so a backend does not
/// need its own read-modify-write locking.
pub trait StorageBackend: Send + Sync {
    /// Stable identity of the underlying store.
    ///
    /// Two backends with the same identity refer to the same data and share
    /// one lock.
    fn identity(&self) -> String;

    /// Read the whole persisted content.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`](crate::GraphError::Storage) if the read fails.
    /// Returns `Ok(None)` if nothing was ever persisted.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the whole persisted content.
    ///
    /// Either the new content is fully written or the old content is kept.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`](crate::GraphError::Storage) if the write fails.
    fn save(&self, contents: &str) -> Result<()>;
}
