//! Physics body registry
//!
//! Bullets are flown by a rigid-body world the gameplay code never writes to
//! after creation. `PhysicsWorld` is the narrow seam the core talks to;
//! `BodyRegistry` is the built-in integrator (fixed timestep, constant gravity).

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::state::Pose;
use crate::consts::{GRAVITY, PHYSICS_DT};

/// Opaque handle to a body owned by a `PhysicsWorld`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Rigid-body world as seen by the simulation core.
///
/// Removal is idempotent: releasing a handle twice returns `false` the
/// second time and has no other effect.
pub trait PhysicsWorld {
    /// Create a dynamic body at `position`
    fn create_body(&mut self, position: Vec3) -> BodyHandle;
    /// Set linear velocity; returns false for unknown handles
    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> bool;
    /// Current pose, `None` once the body is gone
    fn pose(&self, handle: BodyHandle) -> Option<Pose>;
    /// Release a body; returns false if it was already released
    fn remove_body(&mut self, handle: BodyHandle) -> bool;
    /// Advance the world by one fixed timestep
    fn step(&mut self);
    /// Number of live bodies
    fn body_count(&self) -> usize;
}

#[derive(Debug, Clone)]
struct RigidBody {
    position: Vec3,
    velocity: Vec3,
    orientation: Quat,
}

/// Built-in point-body integrator (semi-implicit Euler)
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: BTreeMap<BodyHandle, RigidBody>,
    gravity: Vec3,
    timestep: f32,
    next_handle: u32,
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -GRAVITY, 0.0))
    }
}

impl BodyRegistry {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            bodies: BTreeMap::new(),
            gravity,
            timestep: PHYSICS_DT,
            next_handle: 1,
        }
    }

    /// Gravity-free world (handy for straight-line shots)
    pub fn weightless() -> Self {
        Self::new(Vec3::ZERO)
    }

    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }
}

impl PhysicsWorld for BodyRegistry {
    fn create_body(&mut self, position: Vec3) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.bodies.insert(
            handle,
            RigidBody {
                position,
                velocity: Vec3::ZERO,
                orientation: Quat::IDENTITY,
            },
        );
        handle
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> bool {
        match self.bodies.get_mut(&handle) {
            Some(body) => {
                body.velocity = velocity;
                true
            }
            None => false,
        }
    }

    fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.bodies.get(&handle).map(|b| Pose {
            position: b.position,
            orientation: b.orientation,
        })
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies.remove(&handle).is_some()
    }

    fn step(&mut self) {
        let dt = self.timestep;
        for body in self.bodies.values_mut() {
            body.velocity += self.gravity * dt;
            body.position += body.velocity * dt;
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_flies_straight_without_gravity() {
        let mut world = BodyRegistry::weightless();
        let h = world.create_body(Vec3::ZERO);
        assert!(world.set_velocity(h, Vec3::new(0.0, 0.0, -15.0)));

        for _ in 0..60 {
            world.step();
        }
        let pose = world.pose(h).unwrap();
        assert!((pose.position.z + 15.0).abs() < 1e-3);
        assert!(pose.position.y.abs() < 1e-6);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut world = BodyRegistry::default();
        let h = world.create_body(Vec3::new(0.0, 1.5, 0.0));
        world.set_velocity(h, Vec3::new(0.0, 0.0, -15.0));
        for _ in 0..30 {
            world.step();
        }
        let pose = world.pose(h).unwrap();
        assert!(pose.position.y < 1.5);
        assert!(pose.position.z < -7.0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut world = BodyRegistry::default();
        let a = world.create_body(Vec3::ZERO);
        let b = world.create_body(Vec3::ONE);
        assert_eq!(world.body_count(), 2);

        assert!(world.remove_body(a));
        assert!(!world.remove_body(a));
        assert_eq!(world.body_count(), 1);
        assert!(world.pose(a).is_none());
        assert!(!world.set_velocity(a, Vec3::X));
        assert!(world.pose(b).is_some());
    }

    #[test]
    fn test_handles_are_not_reused() {
        let mut world = BodyRegistry::default();
        let a = world.create_body(Vec3::ZERO);
        world.remove_body(a);
        let b = world.create_body(Vec3::ZERO);
        assert_ne!(a, b);
    }
}
