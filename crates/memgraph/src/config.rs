//! Store location configuration.
//!
//! The store path comes from the `MEMORY_FILE_PATH` environment variable.
//! An absolute value is used as-is, a relative one is resolved against the
//! directory of the running executable, and an unset or empty value selects
//! `memory.jsonl` in that directory. Resolution happens once, up front; the
//! store only ever sees the resulting path.

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the store path.
pub const MEMORY_FILE_ENV: &str = "MEMORY_FILE_PATH";

/// File name used when no path is configured.
pub const DEFAULT_MEMORY_FILE: &str = "memory.jsonl";

/// Resolved location of a file-backed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the backing file
    pub path: PathBuf,
}

impl StoreConfig {
    /// Use an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve a raw configured value against `base_dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use memgraph::StoreConfig;
    /// use std::path::Path;
    ///
    /// let base = Path::new("/opt/app");
    /// assert_eq!(
    ///     StoreConfig::resolve(Some("data/graph.jsonl"), base).path,
    ///     Path::new("/opt/app/data/graph.jsonl")
    /// );
    /// assert_eq!(
    ///     StoreConfig::resolve(None, base).path,
    ///     Path::new("/opt/app/memory.jsonl")
    /// );
    /// ```
    pub fn resolve(raw: Option<&str>, base_dir: &Path) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => {
                let path = Path::new(value);
                if path.is_absolute() {
                    Self::new(path)
                } else {
                    Self::new(base_dir.join(path))
                }
            }
            None => Self::new(base_dir.join(DEFAULT_MEMORY_FILE)),
        }
    }

    /// Resolve the store location from `MEMORY_FILE_PATH`, relative to the
    /// running executable's directory.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Config`] if the executable's location cannot be
    /// determined or the variable is not valid Unicode.
    pub fn from_env() -> Result<Self> {
        let raw = match std::env::var(MEMORY_FILE_ENV) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => {
                return Err(GraphError::Config {
                    message: format!("{MEMORY_FILE_ENV} is not valid: {e}"),
                })
            }
        };

        let exe = std::env::current_exe().map_err(|e| GraphError::Config {
            message: format!("Cannot locate the running executable: {e}"),
        })?;
        let base_dir = exe.parent().ok_or_else(|| GraphError::Config {
            message: format!("Executable path {exe:?} has no parent directory"),
        })?;

        Ok(Self::resolve(raw.as_deref(), base_dir))
    }
}
