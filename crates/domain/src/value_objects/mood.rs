//! Ambient audio mood value object
//!
//! The mood is a pure function of the combat flag: the session controller
//! derives it after every state replacement and hands it to the audio
//! director, which is responsible for no-op detection and crossfading.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ambient audio parametrization for the procedural sound layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Dark, brooding drone for out-of-combat play
    #[default]
    Exploration,
    /// Aggressive pulsing bed while enemies are present
    Combat,
}

impl Mood {
    /// Derive the mood from the combat flag.
    pub fn from_combat(in_combat: bool) -> Self {
        if in_combat {
            Mood::Combat
        } else {
            Mood::Exploration
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Exploration => write!(f, "exploration"),
            Mood::Combat => write!(f, "combat"),
        }
    }
}
