//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{AiState, EnemyKind};
use crate::types::{Position, Velocity};

/// Stable external identifier handed to collaborators (damage sources,
/// multiplayer sync). Survives in events after the entity despawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Hit points. `alive` guards the death transition so it fires
/// exactly once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub alive: bool,
}

/// Sphere collision volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
    /// Whether static collisions reflect velocity instead of zeroing
    /// the normal component.
    pub bouncy: bool,
    /// Set by the physics step when resting on the ground plane.
    pub grounded: bool,
}

/// Per-enemy controller state driven by the FSM each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AiController {
    pub state: AiState,
    /// Seconds spent in the current state.
    pub state_elapsed_secs: f32,
    /// Last position the target was seen or heard at. Stale-tolerant.
    pub last_known_target: Option<Position>,
    /// Current patrol destination, refreshed by the AI system.
    pub patrol_target: Option<Position>,
    /// Once true, never reverts except on a fresh spawn.
    pub aware: bool,
    /// Seconds until the next attack may fire. Clamps at zero.
    pub attack_cooldown_secs: f32,
    /// Seconds remaining in the current search sweep. Clamps at zero.
    pub search_remaining_secs: f32,
    /// Seconds of continuous lost visual contact while chasing.
    pub lost_sight_secs: f32,
}

/// Residual impulse from hits, decayed by friction each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Knockback {
    pub velocity: Velocity,
}

/// Marks a dead entity awaiting removal after its grace period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Corpse {
    /// Simulation time (elapsed seconds) at which to despawn.
    pub remove_at_secs: f32,
}

/// Marks an entity as an enemy of the given kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyTag {
    pub kind: EnemyKind,
}

/// Marks the player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerTag;
