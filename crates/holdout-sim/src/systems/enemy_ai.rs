//! Enemy sense/decide system.
//!
//! For each live enemy in roster (registration) order: run detection
//! queries, consult the behavior evaluator, evaluate the FSM, and
//! write back the controller and desired velocity. Attack and alert
//! decisions are returned for the engine to apply, keeping damage and
//! event emission at one site.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_ai::fsm::{self, FsmContext};
use holdout_ai::profiles::get_profile;
use holdout_bt::{build_tree, BehaviorTree, BtContext, Evaluator};
use holdout_core::components::{AiController, EnemyTag, Health, Knockback, PlayerTag};
use holdout_core::config::AiTuning;
use holdout_core::constants::{KNOCKBACK_FRICTION, VELOCITY_SNAP_EPSILON};
use holdout_core::enums::{AiState, EnemyKind};
use holdout_core::types::{Position, Velocity};
use holdout_nav::path::find_path;
use holdout_nav::{has_line_of_sight, NavGrid, StaticWorld};

/// Patrol waypoints are picked within this offset of the current spot.
const PATROL_WANDER_RANGE: f32 = 10.0;

/// Distance at which a route waypoint or patrol point counts reached.
const WAYPOINT_REACHED_RANGE: f32 = 0.5;

/// Decisions the engine applies after the decide phase.
#[derive(Debug, Default)]
pub struct AiOutput {
    /// (attacker id, unscaled damage) for attacks that fired.
    pub attacks: Vec<(u32, f32)>,
    /// (enemy id, position) for reinforcement calls.
    pub alerts: Vec<(u32, Position)>,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    roster: &[u32],
    id_map: &HashMap<u32, Entity>,
    statics: &StaticWorld,
    nav: Option<&NavGrid>,
    evaluator: &mut Evaluator,
    trees: &mut HashMap<EnemyKind, BehaviorTree>,
    contexts: &mut HashMap<u32, BtContext>,
    rng: &mut ChaCha8Rng,
    tuning: &AiTuning,
    dt: f32,
) -> AiOutput {
    let mut output = AiOutput::default();

    // Target snapshot: the player, if present and alive.
    let player = {
        let mut query = world.query::<(&PlayerTag, &Position, &Velocity, &Health)>();
        query
            .iter()
            .next()
            .map(|(_, (_, pos, vel, health))| (*pos, vel.speed(), health.alive))
    };

    for &id in roster {
        let Some(&entity) = id_map.get(&id) else {
            continue;
        };
        let Ok((tag, position, velocity, health, controller, knockback)) =
            world.query_one_mut::<(
                &EnemyTag,
                &Position,
                &mut Velocity,
                &Health,
                &mut AiController,
                &mut Knockback,
            )>(entity)
        else {
            continue; // the player, or a partially torn-down entity
        };

        // A death earlier this tick stops all processing immediately.
        if !health.alive || controller.state.is_terminal() {
            *velocity = Velocity::default();
            continue;
        }

        let kind = tag.kind;
        let profile = get_profile(kind);

        let (target, target_speed) = match player {
            Some((pos, speed, true)) => (Some(pos), speed),
            _ => (None, 0.0),
        };
        let range_to_target = target.map_or(f32::INFINITY, |t| position.range_to(&t));
        let target_visible =
            target.is_some_and(|t| has_line_of_sight(statics, position, &t));
        let target_audible = target.is_some() && target_speed > tuning.hearing_speed_threshold;

        // Behavior evaluator: refresh the context, decay cooldowns,
        // evaluate. The outcome is an independent signal for the FSM.
        let ctx = contexts
            .entry(id)
            .or_insert_with(|| BtContext::new(kind));
        ctx.tick_cooldowns(dt);
        ctx.refresh(
            *position,
            target.unwrap_or(*position),
            health.current,
            health.max,
            target_visible,
        );
        let tree = trees.entry(kind).or_insert_with(|| build_tree(kind));
        let outcome = evaluator.evaluate(tree, ctx);

        let fsm_ctx = FsmContext {
            kind,
            controller: *controller,
            position: *position,
            target,
            target_visible,
            target_audible,
            range_to_target,
            bt_action: outcome.action,
            bt_parameter: outcome.parameter,
            dt,
        };
        let update = fsm::evaluate(&fsm_ctx, &profile, tuning);
        let mut next = update.controller;
        let mut desired = update.desired_velocity;

        // Fresh patrol waypoint when the current one was consumed.
        if next.state == AiState::Patrol && next.patrol_target.is_none() {
            next.patrol_target = Some(Position::new(
                position.x + rng.gen_range(-PATROL_WANDER_RANGE..PATROL_WANDER_RANGE),
                0.0,
                position.z + rng.gen_range(-PATROL_WANDER_RANGE..PATROL_WANDER_RANGE),
            ));
        }

        // Route planning: when heading for a remembered position
        // without eye contact, steer along the planner's route instead
        // of straight at the destination.
        let needs_route = matches!(next.state, AiState::Search)
            || (next.state == AiState::Chase && !target_visible);
        if needs_route {
            if let Some(destination) = next.last_known_target {
                if position.horizontal_range_to(&destination) > WAYPOINT_REACHED_RANGE {
                    let speed = desired.horizontal_speed();
                    if speed > 0.0 {
                        desired = steer_along_route(statics, nav, position, &destination, speed);
                    }
                }
            }
        }

        // Write back: the controller owns horizontal velocity, the
        // physics step owns vertical. Knockback settles under friction
        // and snaps to zero to prevent jitter.
        velocity.x = snap(desired.x);
        velocity.z = snap(desired.z);
        knockback.velocity.x = snap(knockback.velocity.x * KNOCKBACK_FRICTION);
        knockback.velocity.y = snap(knockback.velocity.y * KNOCKBACK_FRICTION);
        knockback.velocity.z = snap(knockback.velocity.z * KNOCKBACK_FRICTION);
        *controller = next;

        if let Some(damage) = update.attack_damage {
            output.attacks.push((id, damage));
        }
        if update.call_reinforcements {
            output.alerts.push((id, *position));
        }
    }

    output
}

/// First-waypoint steering toward a destination via the path planner.
/// An empty route (unreachable on the grid) halts the entity.
fn steer_along_route(
    statics: &StaticWorld,
    nav: Option<&NavGrid>,
    position: &Position,
    destination: &Position,
    speed: f32,
) -> Velocity {
    let route = find_path(statics, nav, position, destination);
    let Some(waypoint) = route.first() else {
        return Velocity::default();
    };
    let dx = waypoint.x - position.x;
    let dz = waypoint.z - position.z;
    let length = (dx * dx + dz * dz).sqrt();
    if length < WAYPOINT_REACHED_RANGE {
        return Velocity::default();
    }
    Velocity::new(dx / length * speed, 0.0, dz / length * speed)
}

fn snap(component: f32) -> f32 {
    if component.abs() < VELOCITY_SNAP_EPSILON {
        0.0
    } else {
        component
    }
}
