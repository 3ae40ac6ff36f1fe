//! Static level geometry: sphere-approximated colliders.
//!
//! The collider set is immutable for the session and read-only during
//! simulation.

use holdout_core::types::Position;

/// One piece of static level geometry, approximated by its bounding
/// sphere.
#[derive(Debug, Clone, Copy)]
pub struct StaticCollider {
    pub position: Position,
    pub radius: f32,
    /// Opaque colliders block line of sight; non-opaque ones (railings,
    /// glass) only block movement.
    pub opaque: bool,
}

impl StaticCollider {
    pub fn new(position: Position, radius: f32) -> Self {
        Self {
            position,
            radius,
            opaque: true,
        }
    }

    pub fn transparent(position: Position, radius: f32) -> Self {
        Self {
            position,
            radius,
            opaque: false,
        }
    }
}

/// The level's static collider set.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    colliders: Vec<StaticCollider>,
}

impl StaticWorld {
    pub fn new(colliders: Vec<StaticCollider>) -> Self {
        Self { colliders }
    }

    /// An empty world with only the ground plane.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn colliders(&self) -> &[StaticCollider] {
        &self.colliders
    }

    /// Colliders whose surface lies within `range` of `position`.
    /// Coarse prefilter for the physics step; compares squared
    /// distances.
    pub fn near<'a>(
        &'a self,
        position: &'a Position,
        range: f32,
    ) -> impl Iterator<Item = (usize, &'a StaticCollider)> {
        self.colliders.iter().enumerate().filter(move |(_, c)| {
            let reach = range + c.radius;
            position.range_sq_to(&c.position) <= reach * reach
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_prefilter() {
        let world = StaticWorld::new(vec![
            StaticCollider::new(Position::new(0.0, 0.0, 0.0), 1.0),
            StaticCollider::new(Position::new(100.0, 0.0, 0.0), 1.0),
        ]);

        let origin = Position::new(2.0, 0.0, 0.0);
        let close: Vec<_> = world.near(&origin, 5.0).collect();
        assert_eq!(close.len(), 1);
        assert_eq!(close[0].0, 0);
    }
}
