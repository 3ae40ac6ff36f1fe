//! Events emitted by the simulation for audio, UI, and mission
//! collaborators. Fire-and-forget: the core guarantees the fields are
//! accurate at the moment of emission and knows nothing about
//! presentation.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, WeaponKind};
use crate::types::Position;

/// Outbound notifications drained into each tick's snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An enemy died. Point value is computed by the core and handed
    /// off verbatim to the scoring collaborator.
    EnemyKilled {
        entity_id: u32,
        killer: Option<u32>,
        weapon: WeaponKind,
        position: Position,
        kind: EnemyKind,
        points: u32,
    },
    /// A boss died. Mission-relevant, emitted alongside `EnemyKilled`.
    BossDefeated { entity_id: u32, points: u32 },
    /// The player took damage.
    PlayerDamaged {
        amount: f32,
        source_position: Position,
        health_remaining: f32,
    },
    /// An enemy called for reinforcements.
    EnemyAlerted { entity_id: u32, position: Position },
    /// An enemy attack connected with its target.
    AttackLanded {
        attacker: u32,
        target: u32,
        damage: f32,
    },
}
