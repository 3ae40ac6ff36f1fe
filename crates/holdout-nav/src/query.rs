//! Ray and sphere intersection queries against static geometry.

use glam::Vec3;

use holdout_core::types::Position;

use crate::world::StaticWorld;

/// Directions shorter than this are treated as "no movement" rather
/// than normalized (guards the divide in normalization).
const DIRECTION_EPSILON: f32 = 1e-6;

/// Result of a ray cast.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub point: Position,
    pub distance: f32,
    /// Index of the hit collider in the static world.
    pub collider: usize,
}

/// Sphere overlap test. Strict inequality: touching spheres
/// (distance exactly equal to the radius sum) do not collide.
pub fn check_sphere_collision(a: &Position, radius_a: f32, b: &Position, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.range_sq_to(b) < reach * reach
}

/// Cast a ray and return the nearest static-collider hit within
/// `max_distance`, or `None`. A zero-length direction yields no hit.
pub fn ray_cast(
    world: &StaticWorld,
    origin: &Position,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit> {
    if direction.length_squared() < DIRECTION_EPSILON * DIRECTION_EPSILON {
        return None;
    }
    let dir = direction.normalize();
    let o = origin.as_vec3();

    let mut nearest: Option<RayHit> = None;
    for (index, collider) in world.colliders().iter().enumerate() {
        if let Some(t) = ray_sphere(o, dir, collider.position.as_vec3(), collider.radius) {
            if t <= max_distance && nearest.map_or(true, |h| t < h.distance) {
                nearest = Some(RayHit {
                    point: Position::from_vec3(o + dir * t),
                    distance: t,
                    collider: index,
                });
            }
        }
    }
    nearest
}

/// Line-of-sight test between two points against opaque static
/// geometry. The segment endpoints are entity positions, so the
/// casting entity's own collider is never part of the tested set.
/// Symmetric for symmetric geometry.
pub fn has_line_of_sight(world: &StaticWorld, from: &Position, to: &Position) -> bool {
    let delta = to.as_vec3() - from.as_vec3();
    let length = delta.length();
    if length < DIRECTION_EPSILON {
        return true;
    }
    let dir = delta / length;
    let o = from.as_vec3();

    for collider in world.colliders() {
        if !collider.opaque {
            continue;
        }
        if let Some(t) = ray_sphere(o, dir, collider.position.as_vec3(), collider.radius) {
            if t < length {
                return false;
            }
        }
    }
    true
}

/// Ray-sphere intersection. Returns the entry distance along the ray,
/// or the exit distance when the origin is inside the sphere.
/// `dir` must be normalized.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let mut t = -b - sqrt_d;
    if t < 0.0 {
        t = -b + sqrt_d;
    }
    if t < 0.0 {
        return None;
    }
    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::StaticCollider;

    fn wall_world() -> StaticWorld {
        // A single opaque pillar between x=0 and x=10.
        StaticWorld::new(vec![StaticCollider::new(Position::new(5.0, 1.0, 0.0), 1.0)])
    }

    #[test]
    fn test_sphere_collision_strict_boundary() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(2.0, 0.0, 0.0);
        // distance == 2r exactly: no collision.
        assert!(!check_sphere_collision(&a, 1.0, &b, 1.0));
        // Just inside: collision.
        let c = Position::new(1.99, 0.0, 0.0);
        assert!(check_sphere_collision(&a, 1.0, &c, 1.0));
    }

    #[test]
    fn test_los_blocked_and_symmetric() {
        let world = wall_world();
        let a = Position::new(0.0, 1.0, 0.0);
        let b = Position::new(10.0, 1.0, 0.0);

        assert!(!has_line_of_sight(&world, &a, &b));
        assert_eq!(
            has_line_of_sight(&world, &a, &b),
            has_line_of_sight(&world, &b, &a),
        );

        // Off to the side, the pillar no longer blocks.
        let c = Position::new(10.0, 1.0, 5.0);
        assert!(has_line_of_sight(&world, &a, &c));
        assert_eq!(
            has_line_of_sight(&world, &a, &c),
            has_line_of_sight(&world, &c, &a),
        );
    }

    #[test]
    fn test_los_transparent_collider_ignored() {
        let world = StaticWorld::new(vec![StaticCollider::transparent(
            Position::new(5.0, 1.0, 0.0),
            1.0,
        )]);
        let a = Position::new(0.0, 1.0, 0.0);
        let b = Position::new(10.0, 1.0, 0.0);
        assert!(has_line_of_sight(&world, &a, &b));
    }

    #[test]
    fn test_los_coincident_points() {
        let world = wall_world();
        let p = Position::new(3.0, 1.0, 0.0);
        assert!(has_line_of_sight(&world, &p, &p));
    }

    #[test]
    fn test_ray_cast_nearest_hit() {
        use approx::assert_relative_eq;

        let world = StaticWorld::new(vec![
            StaticCollider::new(Position::new(8.0, 0.0, 0.0), 1.0),
            StaticCollider::new(Position::new(4.0, 0.0, 0.0), 1.0),
        ]);
        let origin = Position::new(0.0, 0.0, 0.0);
        let hit = ray_cast(&world, &origin, Vec3::X, 100.0).expect("should hit");
        // Nearest sphere (center x=4, radius 1) is entered at x=3.
        assert_eq!(hit.collider, 1);
        assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-4);
        assert_relative_eq!(hit.point.x, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ray_cast_respects_max_distance() {
        let world = wall_world();
        let origin = Position::new(0.0, 1.0, 0.0);
        assert!(ray_cast(&world, &origin, Vec3::X, 2.0).is_none());
        assert!(ray_cast(&world, &origin, Vec3::X, 10.0).is_some());
    }

    #[test]
    fn test_ray_cast_zero_direction() {
        let world = wall_world();
        let origin = Position::new(0.0, 1.0, 0.0);
        assert!(ray_cast(&world, &origin, Vec3::ZERO, 10.0).is_none());
    }
}
