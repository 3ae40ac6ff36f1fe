//! Dynamic entity collision notifications.
//!
//! Pairwise sphere-overlap check between all live simulated entities.
//! O(n²), acceptable at this game's entity counts. Overlaps produce
//! one notification per pair per tick; there is no physical response
//! between dynamic entities.

use std::collections::HashMap;

use hecs::{Entity, World};

use holdout_core::components::{Collider, Health};
use holdout_core::types::Position;
use holdout_nav::check_sphere_collision;

/// Compute this tick's overlapping pairs, in roster order.
pub fn run(world: &World, roster: &[u32], id_map: &HashMap<u32, Entity>) -> Vec<(u32, u32)> {
    let mut bodies: Vec<(u32, Position, f32)> = Vec::with_capacity(roster.len());
    for &id in roster {
        let Some(&entity) = id_map.get(&id) else {
            continue;
        };
        let (Ok(position), Ok(collider), Ok(health)) = (
            world.get::<&Position>(entity),
            world.get::<&Collider>(entity),
            world.get::<&Health>(entity),
        ) else {
            continue;
        };
        if !health.alive {
            continue;
        }
        bodies.push((id, *position, collider.radius));
    }

    let mut pairs = Vec::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (id_a, pos_a, radius_a) = bodies[i];
            let (id_b, pos_b, radius_b) = bodies[j];
            if check_sphere_collision(&pos_a, radius_a, &pos_b, radius_b) {
                pairs.push((id_a, id_b));
            }
        }
    }
    pairs
}
