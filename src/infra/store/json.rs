//! JSON file snapshot store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{SchedulerError, Task};

use super::SnapshotStore;

/// Persists snapshots as a JSON array in a single file.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store writing to `path`. The file is created on first
    /// persist; parent directories must already exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl<P> SnapshotStore<P> for JsonFileStore
where
    P: serde::Serialize + serde::de::DeserializeOwned,
{
    fn persist(&mut self, tasks: &[Task<P>]) -> Result<(), SchedulerError> {
        let bytes = serde_json::to_vec_pretty(tasks)
            .map_err(|e| SchedulerError::Store(format!("encode snapshot: {e}")))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes)
            .map_err(|e| SchedulerError::Store(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| SchedulerError::Store(format!("rename {}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "snapshot persisted");
        Ok(())
    }

    fn load(&self) -> Result<Vec<Task<P>>, SchedulerError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)
            .map_err(|e| SchedulerError::Store(format!("read {}: {e}", self.path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| SchedulerError::Store(format!("decode snapshot: {e}")))
    }
}
