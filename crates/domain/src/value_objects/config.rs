//! Session configuration chosen on the setup screen

use serde::{Deserialize, Serialize};
use std::fmt;

/// Narrative language for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Zh,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Zh => write!(f, "zh"),
        }
    }
}

/// Options the player picks before the first turn.
///
/// Theme and protagonist are free-text labels fed to the turn producer's
/// system prompt; the theme id is also persisted so a loaded session keeps
/// its presentation skin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub language: Language,
    pub theme: String,
    pub protagonist: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            theme: "cyberpunk".to_string(),
            protagonist: "drifter".to_string(),
        }
    }
}
