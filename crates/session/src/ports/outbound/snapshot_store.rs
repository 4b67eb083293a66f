//! Snapshot store port - single-slot durable persistence.

use async_trait::async_trait;

use netrift_domain::SaveSnapshot;

use super::error::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStorePort: Send + Sync {
    /// Write the snapshot to the single slot, overwriting any prior one.
    async fn save(&self, snapshot: &SaveSnapshot) -> Result<(), StoreError>;

    /// Read the slot. Missing or corrupt data is `None`, never an error.
    async fn load(&self) -> Option<SaveSnapshot>;

    /// Cheap existence check for UI gating. Must not fail on corrupt data.
    async fn has_snapshot(&self) -> bool;
}
