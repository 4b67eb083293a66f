//! Wire format of the turn producer's JSON replies.
//!
//! The producer speaks camelCase JSON; nothing of that shape leaks past
//! this module. Translation into the port-level `TurnPayload` happens
//! here, and anything that does not deserialize is an invalid payload.

use serde::Deserialize;

use netrift_domain::{
    AudioCue, Enemy, Quest, QuestStatus, ScreenEffect, SessionState, StoryProgress, StoryStatus,
    TextStyle, Vitality,
};

use crate::ports::outbound::{ProducerError, TurnPayload};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTurn {
    narrative: String,
    #[serde(default)]
    combat_log: Vec<String>,
    state: WireState,
    #[serde(default)]
    choices: Vec<String>,
    #[serde(default)]
    visual_effect: ScreenEffect,
    #[serde(default)]
    audio_cue: AudioCue,
    #[serde(default)]
    text_style: TextStyle,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireState {
    hp: u32,
    max_hp: u32,
    money: u32,
    #[serde(default)]
    inventory: Vec<String>,
    location: String,
    #[serde(default)]
    quests: Vec<WireQuest>,
    in_combat: bool,
    #[serde(default)]
    enemies: Vec<WireEnemy>,
    #[serde(default)]
    abilities: Vec<String>,
    #[serde(default)]
    game_status: Option<StoryStatus>,
    #[serde(default)]
    narrative_progress: Option<u8>,
    #[serde(default)]
    narrative_label: Option<String>,
    #[serde(default)]
    ending_summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireQuest {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    status: QuestStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEnemy {
    id: String,
    name: String,
    hp: u32,
    max_hp: u32,
    #[serde(default)]
    description: Option<String>,
}

/// Parse one reply body into a turn payload.
pub fn parse_turn(raw: &str) -> Result<TurnPayload, ProducerError> {
    let wire: WireTurn =
        serde_json::from_str(raw).map_err(|e| ProducerError::InvalidPayload(e.to_string()))?;
    Ok(wire.into())
}

impl From<WireTurn> for TurnPayload {
    fn from(wire: WireTurn) -> Self {
        TurnPayload {
            narrative: wire.narrative,
            combat_log: wire.combat_log,
            state: wire.state.into(),
            choices: wire.choices,
            screen_effect: wire.visual_effect,
            audio_cue: wire.audio_cue,
            text_style: wire.text_style,
        }
    }
}

impl From<WireState> for SessionState {
    fn from(wire: WireState) -> Self {
        let progress = match (wire.narrative_progress, wire.narrative_label) {
            (Some(completion), Some(label)) => Some(StoryProgress {
                status: wire.game_status.unwrap_or_default(),
                completion,
                label,
                ending_summary: wire.ending_summary,
            }),
            _ => None,
        };

        SessionState {
            vitality: Vitality {
                current: wire.hp,
                maximum: wire.max_hp,
            },
            credits: wire.money,
            inventory: wire.inventory,
            location: wire.location,
            quests: wire.quests.into_iter().map(Quest::from).collect(),
            in_combat: wire.in_combat,
            enemies: wire.enemies.into_iter().map(Enemy::from).collect(),
            abilities: wire.abilities,
            progress,
        }
    }
}

impl From<WireQuest> for Quest {
    fn from(wire: WireQuest) -> Self {
        Quest {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            status: wire.status,
        }
    }
}

impl From<WireEnemy> for Enemy {
    fn from(wire: WireEnemy) -> Self {
        Enemy {
            id: wire.id,
            name: wire.name,
            hp: wire.hp,
            max_hp: wire.max_hp,
            description: wire.description,
        }
    }
}
