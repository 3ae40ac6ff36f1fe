//! World snapshot — the visible simulation state published after each
//! tick for rendering, multiplayer sync, and mission tracking.

use serde::{Deserialize, Serialize};

use crate::enums::{AiState, EnemyKind, Team};
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete per-tick state broadcast to external collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub entities: Vec<EntityView>,
    pub events: Vec<GameEvent>,
    pub score: ScoreView,
}

/// One visible entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub team: Team,
    /// Enemy kind; `None` for the player.
    pub kind: Option<EnemyKind>,
    pub position: Position,
    pub velocity: Velocity,
    pub health: f32,
    pub max_health: f32,
    /// Controller state; `None` for the player.
    pub state: Option<AiState>,
    pub aware: bool,
}

/// Running score for display.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub kills: u32,
    pub points: u64,
}
