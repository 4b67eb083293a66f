//! Application-level errors surfaced by the session controller.
//!
//! Only start failures and persistence problems reach the caller; every
//! turn-producer failure after a session is running is converted into a
//! synthetic narrator record instead.

use crate::ports::outbound::{ProducerError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The opening turn failed; the session is not marked started.
    #[error("Failed to start session: {0}")]
    StartFailed(#[source] ProducerError),

    /// Save or load requested before any session was started.
    #[error("Session not started")]
    NotStarted,

    /// Load requested but no usable snapshot exists.
    #[error("No saved session available")]
    NoSnapshot,

    /// Snapshot write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
