//! In-memory storage backend for testing.
//!
//! **Note**: This backend is for testing only. All data is lost when the
//! last clone of the backend is dropped.

use super::StorageBackend;
use crate::error::Result;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory storage backend holding the encoded graph as a string.
///
/// Clones share the same data, which lets a test keep a handle and inspect
/// exactly what a store persisted.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    id: Uuid,
    data: Arc<RwLock<Option<String>>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a backend that already holds `contents`.
    ///
    /// Useful for testing decode behavior through the store.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.data.write().unwrap_or_else(|e| e.into_inner()) = Some(contents.into());
        backend
    }

    /// The last persisted content, if any.
    pub fn contents(&self) -> Option<String> {
        self.data.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Check if nothing was ever persisted.
    pub fn is_empty(&self) -> bool {
        self.data.read().unwrap_or_else(|e| e.into_inner()).is_none()
    }

    /// Forget the persisted content, returning to the cold-start state.
    pub fn clear(&self) {
        *self.data.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn identity(&self) -> String {
        format!("memory:{}", self.id)
    }

    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents())
    }

    fn save(&self, contents: &str) -> Result<()> {
        *self.data.write().unwrap_or_else(|e| e.into_inner()) = Some(contents.to_string());
        Ok(())
    }
}
