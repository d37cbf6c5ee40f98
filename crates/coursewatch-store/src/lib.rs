//! Snapshot persistence.
//!
//! One JSON file holds the most recently accepted snapshot. The watcher
//! loads it at the start of a cycle and replaces it at the end of a cycle
//! when the catalog changed, so the persisted state is always a complete
//! snapshot, never a partial one.

use coursewatch_model::{Snapshot, SnapshotError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while loading or saving the snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("snapshot file error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents could not be decoded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Reads and writes the persisted snapshot at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store for the given snapshot file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a persisted snapshot exists yet.
    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Loads the persisted snapshot.
    pub async fn load(&self) -> StoreResult<Snapshot> {
        let text = fs::read_to_string(&self.path).await?;
        Ok(Snapshot::from_json(&text)?)
    }

    /// Persists `snapshot`, replacing any previous one.
    ///
    /// Writes to a sibling temp file and renames it over the target, so an
    /// interrupted save never leaves a truncated snapshot behind.
    pub async fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let json = snapshot.to_json()?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, json.as_bytes()).await?;
        fs::rename(&staging, &self.path).await?;
        debug!(path = %self.path.display(), count = snapshot.len(), "snapshot saved");
        Ok(())
    }
}
