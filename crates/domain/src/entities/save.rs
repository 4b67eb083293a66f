//! Save snapshot - the unit of persistence
//!
//! A deserialized snapshot must reconstruct a session observably identical
//! to the one saved (transcript order, state fields, theme/language).
//! Transient presentation state (in-flight reveal, active screen effect,
//! audio mood) is deliberately absent: it resets to defaults on load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{SessionState, TurnRecord};
use crate::value_objects::Language;

/// Complete persistable copy of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub state: SessionState,
    pub transcript: Vec<TurnRecord>,
    pub theme: String,
    pub language: Language,
    pub saved_at: DateTime<Utc>,
}

impl SaveSnapshot {
    pub fn new(
        state: SessionState,
        transcript: Vec<TurnRecord>,
        theme: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            state,
            transcript,
            theme: theme.into(),
            language,
            saved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = SaveSnapshot::new(
            SessionState::default(),
            vec![
                TurnRecord::narrator("You wake up.", Vec::new(), None),
                TurnRecord::player("look around"),
            ],
            "cyberpunk",
            Language::En,
        );

        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: SaveSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, snapshot);
    }
}
