//! Screen/mode state machine
//!
//! Exactly one screen is interactive at a time. UI buttons exist as hit
//! volumes in world space; a volume only counts while its screen is current.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::mode::GameMode;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    /// AR session not running yet
    #[default]
    Inactive,
    /// Floating title with the start button
    Title,
    /// Three mode buttons, chosen by shooting one
    ModeSelect,
    /// Active gameplay
    Playing,
    /// Final score and restart button
    GameOver,
}

/// Events that move the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenInput {
    /// AR session is up and rendering
    SessionReady,
    /// Start button hit
    Start,
    /// Mode button hit by a bullet
    ChooseMode(GameMode),
    /// hp or clock ran out
    Finish,
    /// Restart button hit
    Restart,
    /// AR session closed
    SessionEnded,
}

impl Screen {
    /// Transition table; `None` for inputs the screen does not accept
    pub fn next(self, input: ScreenInput) -> Option<Screen> {
        use Screen::*;
        use ScreenInput::*;
        match (self, input) {
            (_, SessionEnded) => Some(Inactive),
            (Inactive, SessionReady) => Some(Title),
            (Title, Start) => Some(ModeSelect),
            (ModeSelect, ChooseMode(_)) => Some(Playing),
            (Playing, Finish) => Some(GameOver),
            (GameOver, Restart) => Some(ModeSelect),
            _ => None,
        }
    }

    pub fn is_playing(self) -> bool {
        self == Screen::Playing
    }

    /// Whether a hit volume of this kind is live on this screen
    pub fn accepts(self, kind: HitTargetKind) -> bool {
        kind.screen() == self
    }

    /// Screens that show shootable buttons
    pub fn has_hit_targets(self) -> bool {
        matches!(self, Screen::Title | Screen::ModeSelect | Screen::GameOver)
    }
}

/// What a UI hit volume does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "mode", rename_all = "lowercase")]
pub enum HitTargetKind {
    Start,
    Mode(GameMode),
    Restart,
}

impl HitTargetKind {
    /// Screen the button lives on
    pub fn screen(self) -> Screen {
        match self {
            HitTargetKind::Start => Screen::Title,
            HitTargetKind::Mode(_) => Screen::ModeSelect,
            HitTargetKind::Restart => Screen::GameOver,
        }
    }

    pub fn input(self) -> ScreenInput {
        match self {
            HitTargetKind::Start => ScreenInput::Start,
            HitTargetKind::Mode(mode) => ScreenInput::ChooseMode(mode),
            HitTargetKind::Restart => ScreenInput::Restart,
        }
    }

    /// Mode buttons must be shot; start/restart also take a direct trigger press
    pub fn accepts_press(self) -> bool {
        !matches!(self, HitTargetKind::Mode(_))
    }

    /// Parse "start", "restart" or a mode id
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(HitTargetKind::Start),
            "restart" => Some(HitTargetKind::Restart),
            other => GameMode::from_str(other).map(HitTargetKind::Mode),
        }
    }
}

/// A positioned UI hit volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTarget {
    pub kind: HitTargetKind,
    pub position: Vec3,
}
