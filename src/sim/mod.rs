//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - Clock comes from the presentation layer, one tick per frame
//! - Physics steps a fixed timestep per tick
//! - Seeded RNG only
//! - Stable iteration order (creation order)

pub mod collision;
pub mod input;
pub mod mode;
pub mod physics;
pub mod screen;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;
pub mod warning;

pub use collision::{RayHit, first_within, ray_sphere, within_radius};
pub use input::{ShotOutcome, fire, tap, trigger};
pub use mode::GameMode;
pub use physics::{BodyHandle, BodyRegistry, PhysicsWorld};
pub use screen::{HitTarget, HitTargetKind, Screen, ScreenInput};
pub use session::{Countdown, GameSession};
pub use snapshot::{BulletView, EnemyView, FrameSnapshot};
pub use spawner::{Placement, Spawner};
pub use state::{Bullet, Enemy, GameEvent, GameState, Pose};
pub use store::EntityStore;
pub use tick::{TickContext, tick};
pub use warning::{Severity, ThreatCue, threat_cues};
