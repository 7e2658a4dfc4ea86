//! AR Shooter - simulation core for a WebXR shooting gallery
//!
//! Core modules:
//! - `sim`: Gameplay simulation (entities, physics registry, collisions, screens)
//! - `highscores`: Per-mode top-10 score ledger
//! - `settings`: Player preferences and population caps
//! - `platform`: Browser bindings and logging setup
//! - `error`: Error types shared by the core

pub mod error;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{GameError, LedgerError};
pub use highscores::{HighScores, ScoreLedger};
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants (meters, milliseconds)
pub mod consts {
    /// Fixed physics timestep, one step per rendered frame
    pub const PHYSICS_DT: f32 = 1.0 / 60.0;
    /// Downward acceleration applied to bullets (m/s²)
    pub const GRAVITY: f32 = 9.8;

    /// Muzzle speed of a fired bullet (m/s)
    pub const BULLET_SPEED: f32 = 15.0;
    /// Bullets older than this are expired
    pub const BULLET_LIFETIME_MS: f64 = 3000.0;
    /// Bullets farther than this from the player are expired
    pub const BULLET_MAX_RANGE: f32 = 30.0;

    /// Hit radius of start/mode/restart buttons
    pub const UI_HIT_RADIUS: f32 = 0.5;
    /// Bullet-vs-enemy hit radius
    pub const ENEMY_HIT_RADIUS: f32 = 0.15;
    /// An enemy this close to the player deals damage
    pub const ENEMY_CONTACT_RADIUS: f32 = 0.3;
    /// Enemies wandering farther than this are despawned
    pub const ENEMY_LEASH_RADIUS: f32 = 5.0;
    /// Enemies older than this are despawned
    pub const ENEMY_LIFETIME_MS: f64 = 30_000.0;
    /// Enemies closer than this pulse as a warning
    pub const ENEMY_WARNING_RADIUS: f32 = 1.0;
    /// Cosmetic rotation per tick (radians)
    pub const ENEMY_SPIN_PER_TICK: f32 = 0.02;

    /// Enemy pursuit speed range (meters per tick)
    pub const ENEMY_SPEED_MIN: f32 = 0.005;
    pub const ENEMY_SPEED_MAX: f32 = 0.015;

    /// Spawn ring around the player's head
    pub const SPAWN_DISTANCE_MIN: f32 = 2.0;
    pub const SPAWN_DISTANCE_MAX: f32 = 4.0;
    pub const SPAWN_VERTICAL_SPREAD: f32 = 0.5;

    /// Points for any kill
    pub const HIT_BASE_POINTS: u64 = 10;
    /// Bonus points per meter of shot distance
    pub const DISTANCE_BONUS_PER_METER: f32 = 2.0;

    /// Countdown resolution
    pub const COUNTDOWN_INTERVAL_MS: f64 = 1000.0;

    /// Enemies farther than this angle from view center get a threat cue (radians)
    pub const OFFSCREEN_ANGLE: f32 = 0.7;

    /// Default population caps
    pub const DEFAULT_MAX_ENEMIES: usize = 64;
    pub const DEFAULT_MAX_BULLETS: usize = 128;
}

/// Offset on the horizontal ring around a point: (d·cosθ, v, d·sinθ)
#[inline]
pub fn ring_offset(distance: f32, theta: f32, vertical: f32) -> Vec3 {
    Vec3::new(distance * theta.cos(), vertical, distance * theta.sin())
}

/// Points awarded for a kill made `distance` meters from the player
#[inline]
pub fn hit_points(distance: f32) -> u64 {
    let bonus = (distance.max(0.0) * consts::DISTANCE_BONUS_PER_METER).floor() as u64;
    consts::HIT_BASE_POINTS + bonus
}
