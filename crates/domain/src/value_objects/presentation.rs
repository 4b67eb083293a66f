//! Presentation value objects carried on a turn payload
//!
//! Screen effects, audio cue codes, and text styles are produced by the turn
//! producer and consumed by the presentation layer. They are transient: none
//! of them is persisted in a save snapshot.

use serde::{Deserialize, Serialize};

/// Ephemeral full-screen effect requested by a turn.
///
/// All effects except `ScanLine` auto-clear after a fixed lifetime;
/// `ScanLine` is a continuous overlay that stays until replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScreenEffect {
    #[default]
    None,
    Glitch,
    ShakeSmall,
    ShakeHeavy,
    FlashRed,
    FlashWhite,
    ScanLine,
    TargetFlash,
}

impl ScreenEffect {
    /// Whether this effect stays active until explicitly replaced.
    pub fn is_persistent(self) -> bool {
        matches!(self, ScreenEffect::ScanLine)
    }
}

/// One-shot audio cue code on the wire.
///
/// `CombatStart`/`CombatEnd` carry no one-shot of their own; the mood change
/// derived from the combat flag covers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    #[default]
    None,
    CombatStart,
    CombatEnd,
    ItemPickup,
    Damage,
    QuestUpdate,
    GameOver,
    GameWon,
}

/// Rendering style of a narrator turn, also driving reveal cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    #[default]
    Normal,
    /// Glitchy text: slower reveal with random per-character jitter
    Corrupted,
    /// Machine output: always revealed at the fast floor
    SystemLog,
}
