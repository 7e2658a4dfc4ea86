//! Per-frame view of the game for the presentation layer

use glam::{Quat, Vec3};
use serde::Serialize;

use super::mode::GameMode;
use super::screen::{HitTarget, Screen};
use super::state::{GameEvent, GameState};
use super::warning::{ThreatCue, threat_cues};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub position: Vec3,
    pub spin: f32,
    pub warning: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletView {
    pub id: u32,
    pub position: Vec3,
    pub orientation: Quat,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub screen: Screen,
    pub mode: GameMode,
    pub score: u64,
    pub hp: u32,
    pub time_left: u32,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub threats: Vec<ThreatCue>,
    /// Buttons live on the current screen
    pub hit_targets: Vec<HitTarget>,
    /// Events since the previous frame
    pub events: Vec<GameEvent>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, events: Vec<GameEvent>) -> Self {
        let threats = if state.is_playing() && state.settings.threat_cues {
            threat_cues(&state.player, state.store.enemies())
        } else {
            Vec::new()
        };

        Self {
            tick: state.time_ticks,
            screen: state.screen,
            mode: state.session.mode,
            score: state.session.score,
            hp: state.session.hp,
            time_left: state.session.time_left,
            enemies: state
                .store
                .enemies()
                .iter()
                .filter(|e| e.alive)
                .map(|e| EnemyView {
                    id: e.id,
                    position: e.pos,
                    spin: e.spin,
                    warning: e.warning,
                })
                .collect(),
            bullets: state
                .store
                .bullets()
                .iter()
                .filter(|b| b.alive)
                .map(|b| BulletView {
                    id: b.id,
                    position: b.pos,
                    orientation: b.orientation,
                })
                .collect(),
            threats,
            hit_targets: state.active_targets().copied().collect(),
            events,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::screen::{HitTargetKind, ScreenInput};

    #[test]
    fn test_threats_only_while_playing() {
        let mut state = GameState::new(1);
        state.store.spawn_enemy(Vec3::new(0.0, 0.0, 2.0), 0.01, Vec3::ZERO, 0.0);
        let snap = FrameSnapshot::capture(&state, Vec::new());
        assert!(snap.threats.is_empty());
        assert_eq!(snap.enemies.len(), 1);

        state.session_ready().unwrap();
        state.apply(ScreenInput::Start).unwrap();
        state.apply(ScreenInput::ChooseMode(GameMode::Classic)).unwrap();
        state.store.spawn_enemy(Vec3::new(0.0, 0.0, 2.0), 0.01, Vec3::ZERO, 0.0);
        let snap = FrameSnapshot::capture(&state, Vec::new());
        assert_eq!(snap.threats.len(), 1);

        state.settings.threat_cues = false;
        let snap = FrameSnapshot::capture(&state, Vec::new());
        assert!(snap.threats.is_empty());
    }

    #[test]
    fn test_only_current_screen_targets() {
        let mut state = GameState::new(1);
        state.set_hit_target(HitTargetKind::Start, Vec3::NEG_Z);
        state.set_hit_target(HitTargetKind::Restart, Vec3::NEG_Z);
        state.session_ready().unwrap();
        let snap = FrameSnapshot::capture(&state, Vec::new());
        assert_eq!(snap.hit_targets.len(), 1);
        assert_eq!(snap.hit_targets[0].kind, HitTargetKind::Start);
    }

    #[test]
    fn test_json_shape() {
        let mut state = GameState::new(1);
        state.session_ready().unwrap();
        let events = state.drain_events();
        let json = FrameSnapshot::capture(&state, events).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["screen"], "Title");
        assert_eq!(value["mode"], "classic");
        assert_eq!(value["events"][0]["type"], "ScreenChanged");
    }
}
