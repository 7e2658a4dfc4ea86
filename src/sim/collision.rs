//! Hit tests between points, spheres and rays
//!
//! Everything in the game collides as a sphere: enemies, bullets and UI
//! buttons. Bullet hits are point-in-sphere tests on the synced bullet
//! position; direct trigger presses on buttons are ray-vs-sphere tests.

use glam::Vec3;

/// Result of a ray test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray to the first contact
    pub distance: f32,
    /// Contact point
    pub point: Vec3,
}

/// Strict point-in-sphere test
#[inline]
pub fn within_radius(point: Vec3, center: Vec3, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// First of `candidates` whose sphere contains `point`, in iteration order
pub fn first_within<I>(point: Vec3, radius: f32, candidates: I) -> Option<(u32, Vec3)>
where
    I: IntoIterator<Item = (u32, Vec3)>,
{
    candidates
        .into_iter()
        .find(|&(_, center)| within_radius(point, center, radius))
}

/// Ray-vs-sphere test. `dir` need not be normalized.
///
/// A ray starting inside the sphere hits at distance 0. Spheres behind the
/// origin are misses.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<RayHit> {
    let dir = dir.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }

    let to_center = center - origin;
    let c = to_center.length_squared() - radius * radius;
    if c < 0.0 {
        return Some(RayHit {
            distance: 0.0,
            point: origin,
        });
    }

    let b = to_center.dot(dir);
    if b <= 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let distance = b - discriminant.sqrt();
    Some(RayHit {
        distance,
        point: origin + dir * distance,
    })
}
