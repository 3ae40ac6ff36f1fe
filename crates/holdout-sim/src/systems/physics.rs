//! Physics integration and static collision resolution.
//!
//! Entities are processed in fixed-size batches in roster order:
//! gravity and position integration through the kinematics backend,
//! knockback displacement, ground clamp, then sphere MTV push-out
//! against nearby static colliders.

use std::collections::HashMap;

use glam::Vec3;
use hecs::{Entity, World};

use holdout_core::components::{Collider, Health, Knockback};
use holdout_core::constants::{
    GROUND_Y, PHYSICS_BATCH_SIZE, RESTITUTION, STATIC_PREFILTER_RANGE,
};
use holdout_core::types::{Position, Velocity};
use holdout_nav::StaticWorld;

use crate::backend::Kinematics;

pub fn run(
    world: &mut World,
    roster: &[u32],
    id_map: &HashMap<u32, Entity>,
    statics: &StaticWorld,
    kinematics: &Kinematics,
    dt: f32,
) {
    for batch in roster.chunks(PHYSICS_BATCH_SIZE) {
        for &id in batch {
            let Some(&entity) = id_map.get(&id) else {
                continue;
            };
            let Ok((position, velocity, collider, health, knockback)) = world.query_one_mut::<(
                &mut Position,
                &mut Velocity,
                &mut Collider,
                &Health,
                Option<&Knockback>,
            )>(entity) else {
                continue;
            };
            // Dead entities are frozen in place until removal.
            if !health.alive {
                continue;
            }

            kinematics.integrate(position, velocity, dt);

            if let Some(kb) = knockback {
                position.x += kb.velocity.x * dt;
                position.y += kb.velocity.y * dt;
                position.z += kb.velocity.z * dt;
            }

            if position.y < GROUND_Y {
                position.y = GROUND_Y;
                velocity.y = 0.0;
                collider.grounded = true;
            } else if position.y > GROUND_Y {
                collider.grounded = false;
            }

            resolve_static_collisions(position, velocity, collider, statics);
        }
    }
}

/// Push the entity out of any overlapping static collider along the
/// minimum translation vector. Bouncy entities reflect off the contact
/// normal with restitution; everyone else loses the normal component.
fn resolve_static_collisions(
    position: &mut Position,
    velocity: &mut Velocity,
    collider: &Collider,
    statics: &StaticWorld,
) {
    let candidates: Vec<_> = statics
        .near(position, STATIC_PREFILTER_RANGE)
        .map(|(_, c)| *c)
        .collect();

    for obstacle in candidates {
        let delta = position.as_vec3() - obstacle.position.as_vec3();
        let reach = collider.radius + obstacle.radius;
        let distance_sq = delta.length_squared();
        if distance_sq >= reach * reach {
            continue;
        }

        let distance = distance_sq.sqrt();
        // Coincident centers have no meaningful normal; pick one.
        let normal = if distance > 1e-6 {
            delta / distance
        } else {
            Vec3::X
        };

        let push = reach - distance;
        let corrected = position.as_vec3() + normal * push;
        *position = Position::from_vec3(corrected);

        let v = velocity.as_vec3();
        let along_normal = v.dot(normal);
        if along_normal < 0.0 {
            let adjusted = if collider.bouncy {
                v - normal * ((1.0 + RESTITUTION) * along_normal)
            } else {
                v - normal * along_normal
            };
            *velocity = Velocity::from_vec3(adjusted);
        }
    }
}
