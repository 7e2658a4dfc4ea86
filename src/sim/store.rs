//! Entity store: the authoritative enemy and bullet collections
//!
//! Removal is mark-then-compact. `kill_*` flips the `alive` flag (and releases
//! the bullet's physics body exactly once); `compact` drops dead entries once
//! per tick with a single order-preserving pass, so enemies stay in creation
//! order for hit priority.

use glam::Vec3;

use super::physics::PhysicsWorld;
use super::state::{Bullet, Enemy};
use crate::consts::BULLET_SPEED;

#[derive(Debug, Clone)]
pub struct EntityStore {
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) bullets: Vec<Bullet>,
    next_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            bullets: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (shared by enemies and bullets)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn live_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn live_bullets(&self) -> usize {
        self.bullets.iter().filter(|b| b.alive).count()
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id && e.alive)
    }

    pub fn bullet(&self, id: u32) -> Option<&Bullet> {
        self.bullets.iter().find(|b| b.id == id && b.alive)
    }

    /// Add an enemy heading for `target`
    pub fn spawn_enemy(&mut self, pos: Vec3, speed: f32, target: Vec3, now_ms: f64) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, speed, target, now_ms));
        id
    }

    /// Fire a bullet: create its body at `origin` and launch it along `direction`
    pub fn spawn_bullet(
        &mut self,
        physics: &mut dyn PhysicsWorld,
        origin: Vec3,
        direction: Vec3,
        now_ms: f64,
    ) -> u32 {
        let id = self.next_entity_id();
        let direction = direction.normalize_or_zero();
        let body = physics.create_body(origin);
        physics.set_velocity(body, direction * BULLET_SPEED);
        self.bullets
            .push(Bullet::new(id, body, origin, direction, now_ms));
        id
    }

    /// Mark an enemy dead. Returns false if it was already gone.
    pub fn kill_enemy(&mut self, id: u32) -> bool {
        match self.enemies.iter_mut().find(|e| e.id == id && e.alive) {
            Some(enemy) => {
                enemy.alive = false;
                true
            }
            None => false,
        }
    }

    /// Mark a bullet dead and release its body. Returns false if it was already gone.
    pub fn kill_bullet(&mut self, id: u32, physics: &mut dyn PhysicsWorld) -> bool {
        match self.bullets.iter_mut().find(|b| b.id == id && b.alive) {
            Some(bullet) => {
                bullet.alive = false;
                if !physics.remove_body(bullet.body) {
                    log::debug!("Bullet {} body {:?} already released", id, bullet.body);
                }
                true
            }
            None => false,
        }
    }

    /// Remove an enemy immediately
    pub fn remove_enemy(&mut self, id: u32) -> bool {
        let killed = self.kill_enemy(id);
        self.compact();
        killed
    }

    /// Remove a bullet immediately, releasing its body
    pub fn remove_bullet(&mut self, id: u32, physics: &mut dyn PhysicsWorld) -> bool {
        let killed = self.kill_bullet(id, physics);
        self.compact();
        killed
    }

    /// Drop dead entries, preserving creation order
    pub fn compact(&mut self) {
        self.enemies.retain(|e| e.alive);
        self.bullets.retain(|b| b.alive);
    }

    pub fn clear_enemies(&mut self) {
        self.enemies.clear();
    }

    /// Remove everything, releasing every bullet body
    pub fn clear(&mut self, physics: &mut dyn PhysicsWorld) {
        for bullet in self.bullets.drain(..) {
            if bullet.alive {
                physics.remove_body(bullet.body);
            }
        }
        self.enemies.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty() && self.bullets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::BodyRegistry;

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut physics = BodyRegistry::default();
        let mut store = EntityStore::new();
        let e = store.spawn_enemy(Vec3::X, 0.01, Vec3::ZERO, 0.0);
        let b = store.spawn_bullet(&mut physics, Vec3::ZERO, Vec3::NEG_Z, 0.0);
        assert_ne!(e, b);
    }

    #[test]
    fn test_bullet_launch_velocity() {
        let mut physics = BodyRegistry::weightless();
        let mut store = EntityStore::new();
        let id = store.spawn_bullet(&mut physics, Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0), 0.0);
        let bullet = store.bullet(id).unwrap();
        assert!((bullet.direction - Vec3::NEG_Z).length() < 1e-6);

        physics.step();
        let pose = physics.pose(bullet.body).unwrap();
        assert!((pose.position.z + BULLET_SPEED * crate::consts::PHYSICS_DT).abs() < 1e-5);
    }

    #[test]
    fn test_remove_twice_is_same_as_once() {
        let mut physics = BodyRegistry::default();
        let mut store = EntityStore::new();
        let e = store.spawn_enemy(Vec3::X, 0.01, Vec3::ZERO, 0.0);
        let b = store.spawn_bullet(&mut physics, Vec3::ZERO, Vec3::NEG_Z, 0.0);
        let other = store.spawn_bullet(&mut physics, Vec3::ZERO, Vec3::X, 0.0);

        assert!(store.remove_enemy(e));
        assert!(!store.remove_enemy(e));
        assert_eq!(store.live_enemies(), 0);

        assert!(store.remove_bullet(b, &mut physics));
        assert!(!store.remove_bullet(b, &mut physics));
        assert_eq!(store.live_bullets(), 1);
        assert_eq!(physics.body_count(), 1);
        assert!(store.bullet(other).is_some());
    }

    #[test]
    fn test_compact_keeps_creation_order() {
        let mut store = EntityStore::new();
        let ids: Vec<u32> = (0..5)
            .map(|i| store.spawn_enemy(Vec3::splat(i as f32), 0.01, Vec3::ZERO, 0.0))
            .collect();
        store.kill_enemy(ids[1]);
        store.kill_enemy(ids[3]);
        store.compact();
        let left: Vec<u32> = store.enemies().iter().map(|e| e.id).collect();
        assert_eq!(left, vec![ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn test_clear_releases_all_bodies() {
        let mut physics = BodyRegistry::default();
        let mut store = EntityStore::new();
        for _ in 0..4 {
            store.spawn_bullet(&mut physics, Vec3::ZERO, Vec3::NEG_Z, 0.0);
        }
        store.spawn_enemy(Vec3::X, 0.01, Vec3::ZERO, 0.0);
        let first = store.bullets()[0].id;
        store.kill_bullet(first, &mut physics);

        store.clear(&mut physics);
        assert!(store.is_empty());
        assert_eq!(physics.body_count(), 0);
    }
}
