//! Value objects - immutable domain values without identity

mod config;
mod identity;
mod mood;
mod presentation;
mod quota;

pub use config::{Language, SessionConfig};
pub use identity::Identity;
pub use mood::Mood;
pub use presentation::{AudioCue, ScreenEffect, TextStyle};
pub use quota::{QuotaCounter, MAX_FREE_ACTIONS};
