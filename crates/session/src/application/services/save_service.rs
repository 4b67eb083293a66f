//! Persistence manager - single-slot session snapshots.
//!
//! Thin orchestration over the snapshot store port: one durable slot,
//! overwritten on every save. Corruption is downgraded to "no snapshot"
//! before it ever reaches a caller.

use std::sync::Arc;

use netrift_domain::SaveSnapshot;

use crate::ports::outbound::{SnapshotStorePort, StoreError};

pub struct SaveService {
    store: Arc<dyn SnapshotStorePort>,
}

impl SaveService {
    pub fn new(store: Arc<dyn SnapshotStorePort>) -> Self {
        Self { store }
    }

    /// Persist a snapshot, overwriting the previous one.
    pub async fn save(&self, snapshot: &SaveSnapshot) -> Result<(), StoreError> {
        self.store.save(snapshot).await?;
        tracing::info!(
            transcript_len = snapshot.transcript.len(),
            theme = %snapshot.theme,
            "session snapshot saved"
        );
        Ok(())
    }

    /// Load the stored snapshot, if any usable one exists.
    pub async fn load(&self) -> Option<SaveSnapshot> {
        self.store.load().await
    }

    /// Whether a usable snapshot exists (for UI gating).
    pub async fn has_snapshot(&self) -> bool {
        self.store.has_snapshot().await
    }
}
