//! Game modes and their static configuration

use serde::{Deserialize, Serialize};

/// Selectable game mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// 60 second score attack
    #[default]
    Classic,
    /// No clock, play until hp runs out
    Survival,
    /// 30 second rush with fast spawns
    TimeAttack,
}

impl GameMode {
    /// All modes in button order
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Survival, GameMode::TimeAttack];

    /// Stable id used for storage keys and the JS boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Survival => "survival",
            GameMode::TimeAttack => "timeattack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "survival" => Some(GameMode::Survival),
            "timeattack" | "time_attack" | "time-attack" => Some(GameMode::TimeAttack),
            _ => None,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Survival => "Survival",
            GameMode::TimeAttack => "Time Attack",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::Classic => "Chase a high score in 60 seconds!",
            GameMode::Survival => "Limited HP. How many can you take down?",
            GameMode::TimeAttack => "A 30 second high-speed battle!",
        }
    }

    /// Nominal session length shown on the HUD
    pub fn duration_secs(&self) -> u32 {
        match self {
            GameMode::Classic => 60,
            GameMode::Survival => 999,
            GameMode::TimeAttack => 30,
        }
    }

    pub fn starting_hp(&self) -> u32 {
        match self {
            GameMode::Classic => 3,
            GameMode::Survival => 5,
            GameMode::TimeAttack => 3,
        }
    }

    /// Time between enemy spawns
    pub fn spawn_interval_ms(&self) -> f64 {
        match self {
            GameMode::Classic => 2000.0,
            GameMode::Survival => 1500.0,
            GameMode::TimeAttack => 1000.0,
        }
    }

    /// Whether the countdown can end the session (survival ends on hp only)
    pub fn is_timed(&self) -> bool {
        !matches!(self, GameMode::Survival)
    }
}
