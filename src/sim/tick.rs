//! Per-frame simulation tick
//!
//! One call per rendered frame. Fixed order:
//! physics step and sync, bullet expiry, UI button hits, enemy hits,
//! enemy advance, compaction, spawner, countdown.

use glam::Vec3;

use super::collision::{first_within, within_radius};
use super::snapshot::FrameSnapshot;
use super::state::{GameEvent, GameState, Pose};
use crate::consts::*;

/// Inputs for a single tick, supplied by the presentation layer
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Frame timestamp (ms)
    pub now_ms: f64,
    /// Current head (camera) pose
    pub player: Pose,
}

impl TickContext {
    pub fn new(now_ms: f64, player: Pose) -> Self {
        Self { now_ms, player }
    }
}

/// Advance the game by one frame and capture what the presentation needs
pub fn tick(state: &mut GameState, ctx: &TickContext) -> FrameSnapshot {
    if ctx.now_ms.is_finite() {
        state.now_ms = ctx.now_ms;
    } else {
        log::warn!("Ignoring non-finite frame time {}", ctx.now_ms);
    }
    if ctx.player.is_valid() {
        state.player = ctx.player;
    } else {
        log::warn!("Ignoring invalid player pose {:?}", ctx.player);
    }
    state.time_ticks += 1;

    sync_bullets(state);
    expire_bullets(state);

    if state.screen.has_hit_targets() {
        resolve_ui_hits(state);
    }

    if state.is_playing() {
        resolve_enemy_hits(state);
        advance_enemies(state);
    }

    state.store.compact();

    if state.is_playing() {
        run_spawner(state);
        run_countdown(state);
    }

    let events = state.drain_events();
    FrameSnapshot::capture(state, events)
}

impl GameState {
    /// Advance one frame (see [`tick`])
    pub fn tick(&mut self, ctx: &TickContext) -> FrameSnapshot {
        tick(self, ctx)
    }
}

/// Step the physics world and copy every bullet's pose from its body
fn sync_bullets(state: &mut GameState) {
    state.physics.step();

    for bullet in state.store.bullets.iter_mut().filter(|b| b.alive) {
        match state.physics.pose(bullet.body) {
            Some(pose) => {
                bullet.pos = pose.position;
                bullet.orientation = pose.orientation;
            }
            None => {
                log::debug!("Bullet {} lost its body, dropping", bullet.id);
                bullet.alive = false;
            }
        }
    }
}

/// Remove bullets that are too old or too far from the player
fn expire_bullets(state: &mut GameState) {
    let now = state.now_ms;
    let player = state.player.position;
    let expired: Vec<u32> = state
        .store
        .bullets
        .iter()
        .filter(|b| b.alive)
        .filter(|b| {
            b.age_ms(now) >= BULLET_LIFETIME_MS || b.pos.distance(player) > BULLET_MAX_RANGE
        })
        .map(|b| b.id)
        .collect();

    for id in expired {
        state.store.kill_bullet(id, state.physics.as_mut());
    }
}

fn live_bullet_positions(state: &GameState) -> Vec<(u32, Vec3)> {
    state
        .store
        .bullets
        .iter()
        .filter(|b| b.alive)
        .map(|b| (b.id, b.pos))
        .collect()
}

/// Bullets passing through a live button consume themselves and fire its transition
fn resolve_ui_hits(state: &mut GameState) {
    for (bullet_id, pos) in live_bullet_positions(state) {
        let hit = state
            .active_targets()
            .find(|t| within_radius(pos, t.position, UI_HIT_RADIUS))
            .map(|t| t.kind);
        let Some(kind) = hit else {
            continue;
        };

        state.store.kill_bullet(bullet_id, state.physics.as_mut());
        log::debug!("Bullet {} hit {:?} button", bullet_id, kind);
        if let Err(e) = state.apply(kind.input()) {
            log::warn!("Button {:?} ignored: {}", kind, e);
        }

        if !state.screen.has_hit_targets() {
            break;
        }
    }
}

/// Each bullet kills at most the oldest enemy it overlaps
fn resolve_enemy_hits(state: &mut GameState) {
    let player = state.player.position;

    for (bullet_id, pos) in live_bullet_positions(state) {
        let live_enemies = state
            .store
            .enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| (e.id, e.pos));
        let Some((enemy_id, enemy_pos)) = first_within(pos, ENEMY_HIT_RADIUS, live_enemies)
        else {
            continue;
        };

        let distance = pos.distance(player);
        state.store.kill_enemy(enemy_id);
        state.store.kill_bullet(bullet_id, state.physics.as_mut());
        let points = state.session.record_hit(distance);
        log::debug!(
            "Enemy {} hit at {:.2}m for {} (score {})",
            enemy_id,
            distance,
            points,
            state.session.score
        );
        state.push_event(GameEvent::EnemyHit {
            enemy_id,
            position: enemy_pos,
            points,
            distance,
        });
    }
}

/// Pursue the player, apply contact damage and despawn strays
fn advance_enemies(state: &mut GameState) {
    let player = state.player.position;
    let now = state.now_ms;
    let reduced_motion = state.settings.reduced_motion;

    let mut i = 0;
    while i < state.store.enemies.len() {
        let enemy = &mut state.store.enemies[i];
        i += 1;
        if !enemy.alive {
            continue;
        }

        let distance = enemy.pursue(player);

        if distance < ENEMY_CONTACT_RADIUS {
            enemy.alive = false;
            let dead = state.session.take_damage();
            let hp = state.session.hp;
            log::debug!("Player hit, hp {}", hp);
            state.push_event(GameEvent::PlayerDamaged { hp });
            if dead {
                state.end_if_over();
                return;
            }
            continue;
        }

        if distance > ENEMY_LEASH_RADIUS || enemy.age_ms(now) > ENEMY_LIFETIME_MS {
            enemy.alive = false;
            continue;
        }

        if !reduced_motion {
            enemy.spin += ENEMY_SPIN_PER_TICK;
        }
        enemy.warning = (distance < ENEMY_WARNING_RADIUS).then(|| {
            if reduced_motion {
                0.5
            } else {
                0.5 + ((now * 0.01).sin() as f32) * 0.3
            }
        });
    }
}

fn run_spawner(state: &mut GameState) {
    let spawned = state.spawner.on_tick(
        state.now_ms,
        state.session.mode,
        state.player.position,
        &mut state.store,
        state.settings.max_enemies,
    );
    if let Some(enemy_id) = spawned {
        if let Some(position) = state.store.enemy(enemy_id).map(|e| e.pos) {
            state.push_event(GameEvent::EnemySpawned { enemy_id, position });
        }
    }
}

fn run_countdown(state: &mut GameState) {
    let seconds = state.countdown.poll(state.now_ms);
    if seconds > 0 {
        state.session.count_down(seconds);
    }
    state.end_if_over();
}
