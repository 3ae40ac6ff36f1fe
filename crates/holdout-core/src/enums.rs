//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy type tag. Each kind carries an immutable behavior profile
/// resolved once at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Basic chaser, attacks at melee range.
    #[default]
    Grunt,
    /// Keeps distance, fires slow high-damage shots.
    Sniper,
    /// Slow, heavily armored, charges when close.
    Tank,
    /// Fast hit-and-run skirmisher, circles the target.
    Scout,
    /// Multi-phase heavy with special attacks.
    Boss,
}

impl EnemyKind {
    /// Decode a wire/type code. Unrecognized codes fall back to the
    /// baseline `Grunt` rather than failing the spawn.
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Grunt,
            1 => Self::Sniper,
            2 => Self::Tank,
            3 => Self::Scout,
            4 => Self::Boss,
            _ => Self::Grunt,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Grunt => 0,
            Self::Sniper => 1,
            Self::Tank => 2,
            Self::Scout => 3,
            Self::Boss => 4,
        }
    }
}

/// Enemy controller state machine states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// No target, standing still.
    #[default]
    Idle,
    /// Wandering between patrol points.
    Patrol,
    /// Pursuing a target toward its last known position.
    Chase,
    /// In range, firing on cooldown.
    Attack,
    /// Lost the target, sweeping its last known position.
    Search,
    /// Retreating to cover while a weapon cycles.
    TakeCover,
    /// Circling the target for a side angle.
    Flank,
    /// Terminal. No outgoing transitions.
    Dead,
}

impl AiState {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(self) -> bool {
        self == Self::Dead
    }
}

/// Team tag for snapshot consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

/// Weapon responsible for a damage event, carried through to kill
/// notifications for the mission/scoring collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Unknown,
    Rifle,
    Shotgun,
    Rocket,
    Melee,
    /// Enemy contact attack (claw, slam, charge).
    Contact,
}
