//! Turn producer port - the external generative service behind every turn.
//!
//! The contract guarantees at most one outstanding call at a time from this
//! engine; ordering of applied turns follows from that by construction.

use async_trait::async_trait;

use netrift_domain::{AudioCue, DomainError, ScreenEffect, SessionConfig, SessionState, TextStyle};

use super::error::ProducerError;

/// Structured success payload of one turn.
///
/// Everything the presentation layer needs fans out from here: narrative
/// text for the reveal engine, the wholesale state replacement, candidate
/// choices, and the effect/cue/style codes.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnPayload {
    pub narrative: String,
    pub combat_log: Vec<String>,
    pub state: SessionState,
    /// Candidate player choices; empty means free-text only
    pub choices: Vec<String>,
    pub screen_effect: ScreenEffect,
    pub audio_cue: AudioCue,
    pub text_style: TextStyle,
}

impl TurnPayload {
    /// Validate the payload against the state invariants.
    ///
    /// An unvalidated payload never travels past the controller's intake.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.narrative.is_empty() {
            return Err(DomainError::validation("empty narrative text"));
        }
        self.state.validate()
    }
}

/// Port to the external turn producer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TurnProducerPort: Send + Sync {
    /// Open a fresh narrative session and produce the opening turn.
    async fn begin_session(&self, config: &SessionConfig) -> Result<TurnPayload, ProducerError>;

    /// Submit one player action and produce the next turn.
    async fn submit_turn(&self, action: &str) -> Result<TurnPayload, ProducerError>;
}
