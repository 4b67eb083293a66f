//! Turn records - the append-only session transcript
//!
//! A record is immutable once appended; the transcript is never reordered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::TextStyle;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Player,
    Narrator,
}

/// One immutable transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub speaker: Speaker,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combat_log: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
    pub created_at: DateTime<Utc>,
}

impl TurnRecord {
    /// A record for text the player typed or picked.
    pub fn player(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
            combat_log: Vec::new(),
            style: None,
            created_at: Utc::now(),
        }
    }

    /// A narrator record carrying narrative text from a turn payload.
    pub fn narrator(
        text: impl Into<String>,
        combat_log: Vec<String>,
        style: Option<TextStyle>,
    ) -> Self {
        Self {
            speaker: Speaker::Narrator,
            text: text.into(),
            combat_log,
            style,
            created_at: Utc::now(),
        }
    }

    /// A synthetic narrator record the controller appends itself, e.g. the
    /// connection-error message after a failed turn.
    pub fn system_notice(text: impl Into<String>) -> Self {
        Self::narrator(text, Vec::new(), Some(TextStyle::SystemLog))
    }
}
