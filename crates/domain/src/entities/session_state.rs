//! Session state - the complete gameplay snapshot for one turn
//!
//! The state is owned exclusively by the session controller and replaced
//! wholesale on every successful turn; it is never mutated in place, so any
//! reader sees either the previous or the next complete snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DomainError;

/// Current and maximum vitality, with `current <= maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitality {
    pub current: u32,
    pub maximum: u32,
}

impl Vitality {
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Lifecycle of a quest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: QuestStatus,
}

/// An enemy in the current encounter. Ids are unique within the encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Terminal status of the narrative arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    #[default]
    Playing,
    Victory,
    Defeat,
}

/// Progress of the finite narrative toward its ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryProgress {
    pub status: StoryStatus,
    /// 0-100 completion counter managed by the turn producer
    pub completion: u8,
    /// Display name of the progress bar ("Cyberpsychosis", "Corruption", ...)
    pub label: String,
    /// 1-2 sentence wrap-up, present once a terminal status is reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending_summary: Option<String>,
}

/// The complete gameplay state for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub vitality: Vitality,
    pub credits: u32,
    /// Item labels; order is display-relevant
    pub inventory: Vec<String>,
    pub location: String,
    pub quests: Vec<Quest>,
    pub in_combat: bool,
    /// Non-empty exactly when `in_combat` is set
    pub enemies: Vec<Enemy>,
    pub abilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<StoryProgress>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            vitality: Vitality::full(100),
            credits: 0,
            inventory: Vec::new(),
            location: "Initializing...".to_string(),
            quests: Vec::new(),
            in_combat: false,
            enemies: Vec::new(),
            abilities: Vec::new(),
            progress: None,
        }
    }
}

impl SessionState {
    /// Check every documented invariant.
    ///
    /// The session controller runs this at the intake boundary; a payload
    /// that fails validation is treated as a producer failure and never
    /// replaces the current state.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.vitality.current > self.vitality.maximum {
            return Err(DomainError::validation(format!(
                "vitality {}/{} exceeds maximum",
                self.vitality.current, self.vitality.maximum
            )));
        }

        if self.in_combat && self.enemies.is_empty() {
            return Err(DomainError::validation(
                "combat flag set without any enemies",
            ));
        }
        if !self.in_combat && !self.enemies.is_empty() {
            return Err(DomainError::validation(
                "enemies present outside of combat",
            ));
        }

        let mut enemy_ids = HashSet::new();
        for enemy in &self.enemies {
            if enemy.hp > enemy.max_hp {
                return Err(DomainError::validation(format!(
                    "enemy '{}' has hp {}/{} above maximum",
                    enemy.name, enemy.hp, enemy.max_hp
                )));
            }
            if !enemy_ids.insert(enemy.id.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate enemy id '{}' in encounter",
                    enemy.id
                )));
            }
        }

        let mut quest_ids = HashSet::new();
        for quest in &self.quests {
            if !quest_ids.insert(quest.id.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate quest id '{}'",
                    quest.id
                )));
            }
        }

        if let Some(progress) = &self.progress {
            if progress.completion > 100 {
                return Err(DomainError::validation(format!(
                    "story completion {} out of 0-100 range",
                    progress.completion
                )));
            }
        }

        Ok(())
    }

    /// Whether the narrative has reached a terminal status.
    pub fn is_concluded(&self) -> bool {
        self.progress
            .as_ref()
            .is_some_and(|p| p.status != StoryStatus::Playing)
    }
}
