//! Game state and core simulation types

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::mode::GameMode;
use super::physics::{BodyHandle, BodyRegistry, PhysicsWorld};
use super::screen::{HitTarget, HitTargetKind, Screen, ScreenInput};
use super::session::{Countdown, GameSession};
use super::spawner::Spawner;
use super::store::EntityStore;
use crate::error::GameError;
use crate::highscores::{HighScores, ScoreLedger};
use crate::settings::Settings;

/// Position plus orientation. Forward is -Z, as for a WebXR camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `position` facing along `direction`
    pub fn looking(position: Vec3, direction: Vec3) -> Self {
        let dir = direction.normalize_or(Vec3::NEG_Z);
        Self {
            position,
            orientation: Quat::from_rotation_arc(Vec3::NEG_Z, dir),
        }
    }

    /// Finite position and a non-degenerate rotation
    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.orientation.is_finite()
            && self.orientation.length_squared() > 1e-6
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation.normalize() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.normalize() * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.orientation.normalize() * Vec3::Y
    }
}

/// A target drifting toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec3,
    /// Pursuit velocity (meters per tick), recomputed every tick
    pub vel: Vec3,
    /// Fixed pursuit speed (meters per tick)
    pub speed: f32,
    pub birth_ms: f64,
    pub alive: bool,
    /// Accumulated cosmetic rotation (radians, applied on x and y)
    pub spin: f32,
    /// Pulse intensity while close to the player
    pub warning: Option<f32>,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec3, speed: f32, target: Vec3, birth_ms: f64) -> Self {
        Self {
            id,
            pos,
            vel: (target - pos).normalize_or_zero() * speed,
            speed,
            birth_ms,
            alive: true,
            spin: 0.0,
            warning: None,
        }
    }

    /// Re-aim at `target` and move one step. Returns the remaining distance.
    pub fn pursue(&mut self, target: Vec3) -> f32 {
        self.vel = (target - self.pos).normalize_or_zero() * self.speed;
        self.pos += self.vel;
        self.pos.distance(target)
    }

    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.birth_ms
    }
}

/// A projectile flown by the physics world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Body owned by the physics world
    pub body: BodyHandle,
    /// Last synced pose
    pub pos: Vec3,
    pub orientation: Quat,
    pub origin: Vec3,
    pub direction: Vec3,
    pub birth_ms: f64,
    pub alive: bool,
}

impl Bullet {
    pub fn new(id: u32, body: BodyHandle, origin: Vec3, direction: Vec3, birth_ms: f64) -> Self {
        Self {
            id,
            body,
            pos: origin,
            orientation: Quat::IDENTITY,
            origin,
            direction,
            birth_ms,
            alive: true,
        }
    }

    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.birth_ms
    }
}

/// Discrete feedback for the presentation layer (sound, haptics, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemySpawned {
        enemy_id: u32,
        position: Vec3,
    },
    EnemyHit {
        enemy_id: u32,
        position: Vec3,
        points: u64,
        distance: f32,
    },
    PlayerDamaged {
        hp: u32,
    },
    BulletFired {
        bullet_id: u32,
        position: Vec3,
        direction: Vec3,
    },
    ModeSelected {
        mode: GameMode,
    },
    GameOver {
        score: u64,
        mode: GameMode,
    },
    ScreenChanged {
        from: Screen,
        to: Screen,
    },
}

/// Complete game state owned by one controller
pub struct GameState {
    /// Seed for the spawner RNG
    pub seed: u64,
    pub screen: Screen,
    pub session: GameSession,
    pub store: EntityStore,
    /// UI hit volumes placed by the presentation layer
    pub targets: Vec<HitTarget>,
    /// Latest head pose
    pub player: Pose,
    /// Frame clock (ms, presentation timestamps)
    pub now_ms: f64,
    /// Ticks processed
    pub time_ticks: u64,
    pub settings: Settings,
    pub(crate) physics: Box<dyn PhysicsWorld>,
    pub(crate) spawner: Spawner,
    pub(crate) countdown: Countdown,
    ledger: Box<dyn ScoreLedger>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// New state with default settings, built-in physics and an in-memory ledger
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let settings = settings.validated();
        let seed = settings.seed.unwrap_or(seed);
        Self {
            seed,
            screen: Screen::default(),
            session: GameSession::default(),
            store: EntityStore::new(),
            targets: Vec::new(),
            player: Pose::IDENTITY,
            now_ms: 0.0,
            time_ticks: 0,
            physics: Box::new(BodyRegistry::new(Vec3::new(0.0, -settings.gravity, 0.0))),
            spawner: Spawner::new(seed),
            countdown: Countdown::default(),
            ledger: Box::new(HighScores::new()),
            events: Vec::new(),
            settings,
        }
    }

    /// Swap in another physics backend (before any bullet is fired)
    pub fn with_physics(mut self, physics: Box<dyn PhysicsWorld>) -> Self {
        self.physics = physics;
        self
    }

    /// Swap in another score ledger
    pub fn with_ledger(mut self, ledger: Box<dyn ScoreLedger>) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn physics(&self) -> &dyn PhysicsWorld {
        self.physics.as_ref()
    }

    pub fn ledger(&self) -> &dyn ScoreLedger {
        self.ledger.as_ref()
    }

    /// Best `n` scores recorded for `mode`
    pub fn top_scores(&self, mode: GameMode, n: usize) -> Vec<u64> {
        self.ledger.top_n(mode, n)
    }

    pub fn is_playing(&self) -> bool {
        self.screen.is_playing()
    }

    /// Place (or move) a UI hit volume
    pub fn set_hit_target(&mut self, kind: HitTargetKind, position: Vec3) {
        match self.targets.iter_mut().find(|t| t.kind == kind) {
            Some(target) => target.position = position,
            None => self.targets.push(HitTarget { kind, position }),
        }
    }

    pub fn remove_hit_target(&mut self, kind: HitTargetKind) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.kind != kind);
        self.targets.len() != before
    }

    /// Hit volumes live on the current screen
    pub fn active_targets(&self) -> impl Iterator<Item = &HitTarget> + '_ {
        let screen = self.screen;
        self.targets.iter().filter(move |t| screen.accepts(t.kind))
    }

    /// AR session is up: show the title
    pub fn session_ready(&mut self) -> Result<Screen, GameError> {
        self.apply(ScreenInput::SessionReady)
    }

    /// AR session closed: drop everything without recording a score
    pub fn session_ended(&mut self) -> Result<Screen, GameError> {
        self.apply(ScreenInput::SessionEnded)
    }

    /// Drive the screen machine, running the side effects of the transition
    pub fn apply(&mut self, input: ScreenInput) -> Result<Screen, GameError> {
        let from = self.screen;
        let to = from
            .next(input)
            .ok_or(GameError::InvalidTransition { from, input })?;

        match input {
            ScreenInput::ChooseMode(mode) => self.start_game(mode),
            ScreenInput::Finish => self.finish_game(),
            ScreenInput::SessionEnded => self.stop_game(),
            _ => {}
        }

        self.screen = to;
        log::info!("Screen {:?} -> {:?}", from, to);
        self.events.push(GameEvent::ScreenChanged { from, to });
        Ok(to)
    }

    /// Force game over once hp or the clock has run out
    pub(crate) fn end_if_over(&mut self) -> bool {
        if !self.is_playing() || !self.session.is_over() {
            return false;
        }
        if let Err(e) = self.apply(ScreenInput::Finish) {
            log::error!("Could not end session: {}", e);
        }
        true
    }

    fn start_game(&mut self, mode: GameMode) {
        self.session = GameSession::new(mode);
        self.store.clear_enemies();
        self.spawner.arm(self.now_ms);
        self.countdown.arm(self.now_ms);
        log::info!(
            "Starting {} (hp {}, {}s, spawn every {}ms)",
            mode.name(),
            self.session.hp,
            self.session.time_left,
            mode.spawn_interval_ms()
        );
        self.events.push(GameEvent::ModeSelected { mode });
    }

    fn finish_game(&mut self) {
        let score = self.session.score;
        let mode = self.session.mode;
        match self.ledger.save(score, mode) {
            Ok(Some(rank)) => log::info!("Score {} ranked #{} in {}", score, rank, mode.as_str()),
            Ok(None) => log::info!("Score {} did not make the {} top list", score, mode.as_str()),
            Err(e) => log::warn!("Score {} not recorded: {}", score, e),
        }
        self.stop_game();
        self.events.push(GameEvent::GameOver { score, mode });
    }

    fn stop_game(&mut self) {
        self.spawner.disarm();
        self.countdown.disarm();
        self.store.clear(self.physics.as_mut());
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
