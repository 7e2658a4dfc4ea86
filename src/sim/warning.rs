//! Off-screen threat cues
//!
//! Enemies outside the player's view cone get an edge-of-screen indicator so
//! attacks from behind are not a surprise.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, Pose};
use crate::consts::{ENEMY_LEASH_RADIUS, OFFSCREEN_ANGLE};

/// How urgent an off-screen enemy is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Under 2 m
    Critical,
    /// Under 3 m
    Near,
    Far,
}

impl Severity {
    pub fn from_distance(distance: f32) -> Self {
        if distance < 2.0 {
            Severity::Critical
        } else if distance < 3.0 {
            Severity::Near
        } else {
            Severity::Far
        }
    }
}

/// Indicator for one enemy outside the view cone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatCue {
    pub enemy_id: u32,
    pub distance: f32,
    /// Indicator opacity, 0.4 - 1.0
    pub intensity: f32,
    pub severity: Severity,
    /// Direction to the enemy along the camera's right axis
    pub horizontal: f32,
    /// Direction to the enemy along the camera's up axis
    pub vertical: f32,
}

/// Cue for an enemy at `pos`, or None while it is in view
pub fn threat_cue(player: &Pose, enemy_id: u32, pos: Vec3) -> Option<ThreatCue> {
    let offset = pos - player.position;
    let distance = offset.length();
    let dir = offset.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }

    let angle = player.forward().angle_between(dir);
    if angle <= OFFSCREEN_ANGLE {
        return None;
    }

    Some(ThreatCue {
        enemy_id,
        distance,
        intensity: (1.0 - distance / ENEMY_LEASH_RADIUS).max(0.4),
        severity: Severity::from_distance(distance),
        horizontal: dir.dot(player.right()),
        vertical: dir.dot(player.up()),
    })
}

/// Cues for every live enemy outside the view cone, in creation order
pub fn threat_cues(player: &Pose, enemies: &[Enemy]) -> Vec<ThreatCue> {
    enemies
        .iter()
        .filter(|e| e.alive)
        .filter_map(|e| threat_cue(player, e.id, e.pos))
        .collect()
}
