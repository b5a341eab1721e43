//! Flat-file storage backend.
//!
//! The graph lives in a single text file. Saves go through a temporary file
//! in the same directory that is renamed over the target, so readers and
//! crashes only ever see a complete old or a complete new file.

use super::StorageBackend;
use crate::error::{GraphError, Result};
use log::trace;
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// File-backed persistent storage.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    resolved: PathBuf,
}

impl FileBackend {
    /// Use the file at `path`. Nothing is created until the first save.
    ///
    /// The path is resolved to an absolute, canonical form here, once; later
    /// changes of the working directory do not move the store.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            resolved: resolve_path(&path),
            path,
        }
    }

    /// Path of the backing file as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute, canonical path every read and write goes to.
    pub fn resolved_path(&self) -> &Path {
        &self.resolved
    }

    fn create_temp(&self, dir: &Path) -> std::io::Result<NamedTempFile> {
        match std::fs::metadata(&self.resolved) {
            Ok(meta) => {
                let tmp = NamedTempFile::new_in(dir)?;
                tmp.as_file().set_permissions(meta.permissions())?;
                Ok(tmp)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => new_file_temp(dir),
            Err(e) => Err(e),
        }
    }
}

/// Temp file for a store that does not exist yet, with the mode a plainly
/// created file would get.
#[cfg(unix)]
fn new_file_temp(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_file_temp(dir: &Path) -> std::io::Result<NamedTempFile> {
    Builder::new().tempfile_in(dir)
}

/// Make `path` absolute and canonicalize its deepest existing ancestor,
/// re-appending the components that do not exist yet.
///
/// Different spellings of one file (symlinked directories, `.` and `..`)
/// resolve to the same path even before its directories are created.
fn resolve_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    let base = loop {
        if let Ok(canonical) = existing.canonicalize() {
            break canonical;
        }
        match (existing.parent(), existing.components().next_back()) {
            (Some(parent), Some(Component::Normal(name))) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            (Some(parent), Some(Component::ParentDir)) => {
                missing.push(OsString::from(".."));
                existing = parent;
            }
            // a root that cannot be canonicalized
            _ => return absolute,
        }
    };

    let mut resolved = base;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    // The missing tail may still spell `.` or `..` lexically.
    if resolved.components().any(|c| matches!(c, Component::CurDir | Component::ParentDir)) {
        let mut normal = PathBuf::new();
        for component in resolved.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normal.pop();
                }
                other => normal.push(other.as_os_str()),
            }
        }
        resolved = normal;
    }
    resolved
}

impl StorageBackend for FileBackend {
    fn identity(&self) -> String {
        format!("file:{}", self.resolved.display())
    }

    fn load(&self) -> Result<Option<String>> {
        let bytes = match std::fs::read(&self.resolved) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("No store at {:?} yet", self.resolved);
                return Ok(None);
            }
            Err(e) => {
                return Err(GraphError::storage(
                    format!("Failed to read {:?}", self.resolved),
                    Some(e),
                ))
            }
        };

        trace!("Read {} bytes from {:?}", bytes.len(), self.resolved);
        String::from_utf8(bytes).map(Some).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            GraphError::parse(line, "Store is not valid UTF-8", Some(e))
        })
    }

    fn save(&self, contents: &str) -> Result<()> {
        let target = &self.resolved;
        let dir = match target.parent() {
            Some(dir) => dir.to_path_buf(),
            None => {
                return Err(GraphError::storage(
                    format!("Store path {:?} has no parent directory", self.path),
                    None::<std::io::Error>,
                ))
            }
        };

        std::fs::create_dir_all(&dir).map_err(|e| {
            GraphError::storage(format!("Failed to create directory {dir:?}"), Some(e))
        })?;

        let mut tmp = self.create_temp(&dir).map_err(|e| {
            GraphError::storage(format!("Failed to create temp file in {dir:?}"), Some(e))
        })?;
        tmp.write_all(contents.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| GraphError::storage("Failed to write temp file", Some(e)))?;
        tmp.persist(target).map_err(|e| {
            GraphError::storage(format!("Failed to replace {target:?}"), Some(e.error))
        })?;

        trace!("Wrote {} bytes to {:?}", contents.len(), target);
        Ok(())
    }
}
