//! Entity spawn factories.
//!
//! Creates the player and enemy entities with appropriate component
//! bundles. Enemy stats come from the type's immutable behavior
//! profile, scaled by difficulty at spawn.

use hecs::World;

use holdout_ai::profiles::get_profile;
use holdout_core::components::{
    AiController, Collider, EnemyTag, EntityId, Health, Knockback, PlayerTag,
};
use holdout_core::constants::{PLAYER_MAX_HEALTH, PLAYER_RADIUS};
use holdout_core::enums::EnemyKind;
use holdout_core::types::{Position, Velocity};

/// Spawn the player entity.
pub fn spawn_player(world: &mut World, id: u32, position: Position) -> hecs::Entity {
    world.spawn((
        EntityId(id),
        PlayerTag,
        position,
        Velocity::default(),
        Health {
            current: PLAYER_MAX_HEALTH,
            max: PLAYER_MAX_HEALTH,
            alive: true,
        },
        Collider {
            radius: PLAYER_RADIUS,
            bouncy: false,
            grounded: false,
        },
    ))
}

/// Spawn a single enemy of the given kind. Health scales with
/// difficulty; the behavior flags are fixed by the profile.
pub fn spawn_enemy(
    world: &mut World,
    id: u32,
    kind: EnemyKind,
    position: Position,
    difficulty: f32,
) -> hecs::Entity {
    let profile = get_profile(kind);
    let max_health = profile.max_health * difficulty;

    world.spawn((
        EntityId(id),
        EnemyTag { kind },
        position,
        Velocity::default(),
        Health {
            current: max_health,
            max: max_health,
            alive: true,
        },
        Collider {
            radius: profile.collision_radius,
            bouncy: false,
            grounded: false,
        },
        AiController::default(),
        Knockback::default(),
    ))
}
