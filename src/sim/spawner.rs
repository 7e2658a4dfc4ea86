//! Timer-driven enemy spawning
//!
//! Enemies appear on a ring 2-4 m around the player's head, at a random
//! azimuth and a small vertical offset, and immediately start closing in.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::mode::GameMode;
use super::store::EntityStore;
use crate::consts::*;
use crate::ring_offset;

/// Rolled spawn parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    last_spawn_ms: Option<f64>,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_ms: None,
        }
    }

    /// Start the interval clock; the first enemy comes one interval later
    pub fn arm(&mut self, now_ms: f64) {
        self.last_spawn_ms = Some(now_ms);
    }

    pub fn disarm(&mut self) {
        self.last_spawn_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.last_spawn_ms.is_some()
    }

    pub fn is_due(&self, now_ms: f64, interval_ms: f64) -> bool {
        self.last_spawn_ms
            .is_some_and(|last| now_ms - last >= interval_ms)
    }

    /// Roll a spawn position around `player` and a pursuit speed
    pub fn roll_placement(&mut self, player: Vec3) -> Placement {
        let theta = self.rng.random_range(0.0..TAU);
        let distance = self.rng.random_range(SPAWN_DISTANCE_MIN..SPAWN_DISTANCE_MAX);
        let vertical = self
            .rng
            .random_range(-SPAWN_VERTICAL_SPREAD..SPAWN_VERTICAL_SPREAD);
        let speed = self.rng.random_range(ENEMY_SPEED_MIN..ENEMY_SPEED_MAX);
        Placement {
            position: player + ring_offset(distance, theta, vertical),
            speed,
        }
    }

    /// Spawn at most one enemy if the mode's interval has elapsed.
    ///
    /// When the store is at `cap` the spawn is skipped but the interval
    /// still resets, so a full arena does not cause a burst later.
    pub fn on_tick(
        &mut self,
        now_ms: f64,
        mode: GameMode,
        player: Vec3,
        store: &mut EntityStore,
        cap: usize,
    ) -> Option<u32> {
        if !self.is_due(now_ms, mode.spawn_interval_ms()) {
            return None;
        }
        self.last_spawn_ms = Some(now_ms);

        if store.live_enemies() >= cap {
            log::debug!("Enemy cap {} reached, skipping spawn", cap);
            return None;
        }

        let placement = self.roll_placement(player);
        let id = store.spawn_enemy(placement.position, placement.speed, player, now_ms);
        log::trace!(
            "Spawned enemy {} at {:?} (speed {:.4})",
            id,
            placement.position,
            placement.speed
        );
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_ranges() {
        let mut spawner = Spawner::new(7);
        let player = Vec3::new(0.5, 1.6, -0.2);
        for _ in 0..500 {
            let p = spawner.roll_placement(player);
            let offset = p.position - player;
            let horizontal = Vec3::new(offset.x, 0.0, offset.z).length();
            assert!(horizontal >= SPAWN_DISTANCE_MIN - 1e-4);
            assert!(horizontal < SPAWN_DISTANCE_MAX + 1e-4);
            assert!(offset.y >= -SPAWN_VERTICAL_SPREAD && offset.y < SPAWN_VERTICAL_SPREAD);
            assert!(p.speed >= ENEMY_SPEED_MIN && p.speed < ENEMY_SPEED_MAX);
        }
    }

    #[test]
    fn test_same_seed_same_enemies() {
        let mut a = Spawner::new(42);
        let mut b = Spawner::new(42);
        for _ in 0..10 {
            assert_eq!(a.roll_placement(Vec3::ZERO), b.roll_placement(Vec3::ZERO));
        }
    }

    #[test]
    fn test_spawns_once_per_interval() {
        let mut spawner = Spawner::new(1);
        let mut store = EntityStore::new();
        let mode = GameMode::Classic;

        // Not armed: never spawns
        assert!(spawner.on_tick(10_000.0, mode, Vec3::ZERO, &mut store, 64).is_none());

        spawner.arm(0.0);
        assert!(spawner.on_tick(1999.0, mode, Vec3::ZERO, &mut store, 64).is_none());
        assert!(spawner.on_tick(2000.0, mode, Vec3::ZERO, &mut store, 64).is_some());
        // Interval restarts from the spawn instant
        assert!(spawner.on_tick(2500.0, mode, Vec3::ZERO, &mut store, 64).is_none());
        // A long stall still yields exactly one enemy
        assert!(spawner.on_tick(9000.0, mode, Vec3::ZERO, &mut store, 64).is_some());
        assert_eq!(store.live_enemies(), 2);
    }

    #[test]
    fn test_cap_skips_spawn() {
        let mut spawner = Spawner::new(1);
        let mut store = EntityStore::new();
        spawner.arm(0.0);
        assert!(spawner.on_tick(1000.0, GameMode::TimeAttack, Vec3::ZERO, &mut store, 1).is_some());
        assert!(spawner.on_tick(2000.0, GameMode::TimeAttack, Vec3::ZERO, &mut store, 1).is_none());
        assert_eq!(store.live_enemies(), 1);
        // Interval restarted even though nothing spawned
        assert!(!spawner.is_due(2500.0, GameMode::TimeAttack.spawn_interval_ms()));
    }
}
