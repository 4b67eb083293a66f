//! NetRift domain model
//!
//! Pure types and invariants for the session engine: the gameplay state
//! replaced wholesale each turn, the append-only transcript, the save
//! snapshot, and the presentation value objects carried on turn payloads.
//! No I/O and no async live here.

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    Enemy, Quest, QuestStatus, SaveSnapshot, SessionState, Speaker, StoryProgress, StoryStatus,
    TurnRecord, Vitality,
};
pub use error::DomainError;
pub use value_objects::{
    AudioCue, Identity, Language, Mood, QuotaCounter, ScreenEffect, SessionConfig, TextStyle,
    MAX_FREE_ACTIONS,
};
