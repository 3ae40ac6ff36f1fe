//! Snapshot builder — the per-tick state published to external
//! collaborators (renderer, multiplayer sync, mission tracking).

use std::collections::HashMap;

use hecs::{Entity, World};

use holdout_core::components::{AiController, EnemyTag, Health, PlayerTag};
use holdout_core::enums::Team;
use holdout_core::events::GameEvent;
use holdout_core::state::{EntityView, ScoreView, WorldSnapshot};
use holdout_core::types::{Position, SimTime, Velocity};

/// Build the snapshot for the current tick. Entities appear in roster
/// (registration) order.
pub fn build_snapshot(
    world: &World,
    roster: &[u32],
    id_map: &HashMap<u32, Entity>,
    time: SimTime,
    events: Vec<GameEvent>,
    score: ScoreView,
) -> WorldSnapshot {
    let mut entities = Vec::with_capacity(roster.len());

    for &id in roster {
        let Some(&entity) = id_map.get(&id) else {
            continue;
        };
        let (Ok(position), Ok(velocity), Ok(health)) = (
            world.get::<&Position>(entity),
            world.get::<&Velocity>(entity),
            world.get::<&Health>(entity),
        ) else {
            continue;
        };

        let is_player = world.get::<&PlayerTag>(entity).is_ok();
        let kind = world.get::<&EnemyTag>(entity).ok().map(|tag| tag.kind);
        let controller = world.get::<&AiController>(entity).ok().map(|c| *c);

        entities.push(EntityView {
            id,
            team: if is_player { Team::Player } else { Team::Enemy },
            kind,
            position: *position,
            velocity: *velocity,
            health: health.current,
            max_health: health.max,
            state: controller.map(|c| c.state),
            aware: controller.map(|c| c.aware).unwrap_or(false),
        });
    }

    WorldSnapshot {
        time,
        entities,
        events,
        score,
    }
}
