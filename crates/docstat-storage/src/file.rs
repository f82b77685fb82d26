//! Durable file-backed storage scope.
//!
//! The whole scope is one JSON object on disk. Every mutation rewrites the
//! file through a uniquely named sibling temporary file and a rename, so
//! readers in other processes never observe a half-written object.

use crate::{KeyValueStore, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// JSON-file key/value scope shared by every process that opens the same path.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            StorageError::Encoding(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, data: &BTreeMap<String, String>) -> StorageResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| StorageError::Encoding(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        restrict_permissions(tmp.path())?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;

        debug!(path = %self.path.display(), keys = data.len(), "File store written");
        Ok(())
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> T,
    ) -> StorageResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Platform("file store lock poisoned".to_string()))?;

        let mut data = match self.read_all() {
            Ok(data) => data,
            Err(StorageError::Encoding(detail)) => {
                warn!(detail = %detail, "Discarding unreadable file store contents");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        let result = f(&mut data);
        self.write_all(&data)?;
        Ok(result)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> StorageResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> StorageResult<()> {
    Ok(())
}

impl KeyValueStore for FileStore {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.modify(|data| {
            data.insert(key.to_string(), value.to_string());
        })
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        self.modify(|data| data.remove(key).is_some())
    }
}
