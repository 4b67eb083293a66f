//! Error types for port operations.

/// Errors from the external turn producer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProducerError {
    /// Transport-level failure (network, HTTP status, empty reply).
    #[error("Turn request failed: {0}")]
    RequestFailed(String),

    /// The producer answered, but the payload did not match the contract.
    #[error("Invalid turn payload: {0}")]
    InvalidPayload(String),

    /// No reply within the bounded turn timeout.
    #[error("Turn request timed out after {0} seconds")]
    TimedOut(u64),

    /// `submit_turn` called before `begin_session`.
    #[error("Session not started")]
    NotStarted,
}

/// Errors from snapshot storage.
///
/// Corrupt data on load is not an error at this level of the system: the
/// store reports it as an absent snapshot. `StoreError` covers write
/// failures only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Snapshot write failed: {0}")]
    WriteFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn write_failed(message: impl ToString) -> Self {
        Self::WriteFailed(message.to_string())
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Errors from the audio backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioError {
    /// The host refused to start synthesis (no device, no permission).
    #[error("Audio activation failed: {0}")]
    ActivationFailed(String),

    #[error("Audio stream error: {0}")]
    StreamError(String),
}
