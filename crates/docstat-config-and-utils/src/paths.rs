//! File system paths for docstat clients.

use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Name of the durable credential store inside the base directory.
const CREDENTIAL_STORE_NAME: &str = "credentials.json";

/// Manages file system paths for the client.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory (~/.docstat)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.docstat`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".docstat"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.docstat).
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the config file path (~/.docstat/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Durable credential store shared by every client process of this user
    /// (~/.docstat/credentials.json).
    pub fn credential_store_file(&self) -> PathBuf {
        self.base_dir.join(CREDENTIAL_STORE_NAME)
    }

    /// Get the logs directory (~/.docstat/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the JSONL log file path (~/.docstat/logs/docstat.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("docstat.jsonl")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_layout() {
        let paths = Paths::with_base_dir(PathBuf::from("/tmp/docstat-test"));
        assert_eq!(paths.base_dir(), Path::new("/tmp/docstat-test"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/docstat-test/config.json")
        );
        assert_eq!(
            paths.credential_store_file(),
            PathBuf::from("/tmp/docstat-test/credentials.json")
        );
        assert_eq!(
            paths.log_file(),
            PathBuf::from("/tmp/docstat-test/logs/docstat.jsonl")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_tree() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("nested"));

        paths.ensure_dirs().unwrap();
        assert!(paths.base_dir().is_dir());
        assert!(paths.logs_dir().is_dir());
    }
}
