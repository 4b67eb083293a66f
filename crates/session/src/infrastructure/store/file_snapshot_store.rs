//! File-backed snapshot store.
//!
//! One JSON file, one slot. A save overwrites the previous snapshot; a
//! missing or unreadable file is reported as "no snapshot" rather than
//! surfaced as an error, so a corrupt slot never blocks a fresh start.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;

use netrift_domain::SaveSnapshot;

use crate::ports::outbound::{SnapshotStorePort, StoreError};

const SAVE_FILE: &str = "save_slot.json";

pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted in the platform data directory.
    pub fn default_location() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("io", "netrift", "netrift")
            .ok_or_else(|| StoreError::write_failed("no home directory available"))?;
        Ok(Self::new(dirs.data_dir().join(SAVE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStorePort for FileSnapshotStore {
    async fn save(&self, snapshot: &SaveSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(snapshot).map_err(StoreError::serialization)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StoreError::write_failed)?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(StoreError::write_failed)?;

        tracing::info!(path = %self.path.display(), "snapshot written");
        Ok(())
    }

    async fn load(&self) -> Option<SaveSnapshot> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot unreadable");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot corrupt, ignoring");
                None
            }
        }
    }

    async fn has_snapshot(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}
