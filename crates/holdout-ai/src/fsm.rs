//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions, desired velocity,
//! and attack decisions for one enemy per tick. The behavior-tree
//! evaluator's suggested action arrives as an independent signal that
//! the state logic incorporates where it makes sense.

use glam::Vec3;

use holdout_bt::library::SPECIAL_CHARGE;
use holdout_bt::tree::BtAction;
use holdout_core::components::AiController;
use holdout_core::config::AiTuning;
use holdout_core::enums::{AiState, EnemyKind};
use holdout_core::types::{Position, Velocity};

use crate::profiles::EnemyProfile;

/// Flank arcs keep a small closing component toward the target.
const FLANK_CLOSING_FACTOR: f32 = 0.25;

/// Hysteresis on leaving Attack so targets dancing on the range
/// boundary don't thrash the state machine.
const ATTACK_RANGE_SLACK: f32 = 1.25;

/// Upper bound on a cover retreat before re-engaging.
const TAKE_COVER_MAX_SECS: f32 = 5.0;

/// Speed multiplier for a charging tank.
const CHARGE_SPEED_FACTOR: f32 = 2.5;

/// Patrol and search move slower than a committed chase.
const PATROL_SPEED_FACTOR: f32 = 0.5;
const SEARCH_SPEED_FACTOR: f32 = 0.75;

/// Input to the FSM for a single enemy and tick.
pub struct FsmContext {
    pub kind: EnemyKind,
    pub controller: AiController,
    pub position: Position,
    /// Live target position, if a target exists and is alive.
    pub target: Option<Position>,
    pub target_visible: bool,
    pub target_audible: bool,
    /// 3D range to the target; infinity when there is none.
    pub range_to_target: f32,
    /// Suggested action from the behavior evaluator this tick.
    pub bt_action: Option<BtAction>,
    pub bt_parameter: f32,
    pub dt: f32,
}

/// Output from the FSM.
pub struct FsmUpdate {
    pub controller: AiController,
    /// Horizontal movement the controller wants; the physics step owns
    /// vertical velocity.
    pub desired_velocity: Velocity,
    /// Damage to deal to the target this tick, if the attack fired.
    pub attack_damage: Option<f32>,
    /// Whether nearby allies should be alerted.
    pub call_reinforcements: bool,
    pub state_changed: bool,
}

/// Evaluate the FSM for one enemy. Death pre-empts everything; the
/// `Dead` state produces a frozen update.
pub fn evaluate(ctx: &FsmContext, profile: &EnemyProfile, tuning: &AiTuning) -> FsmUpdate {
    let mut c = ctx.controller;

    if c.state.is_terminal() {
        return FsmUpdate {
            controller: c,
            desired_velocity: Velocity::default(),
            attack_damage: None,
            call_reinforcements: false,
            state_changed: false,
        };
    }

    let previous_state = c.state;
    c.state_elapsed_secs += ctx.dt;
    c.attack_cooldown_secs = (c.attack_cooldown_secs - ctx.dt).max(0.0);

    // Detection: sight first, hearing as the short-range backstop.
    let seen = ctx.target.is_some()
        && ctx.target_visible
        && ctx.range_to_target <= profile.sight_range;
    let heard = ctx.target.is_some()
        && ctx.target_audible
        && ctx.range_to_target <= profile.hearing_range;
    let detected = seen || heard;

    let mut call_reinforcements = false;
    if detected {
        if !c.aware {
            c.aware = true;
            call_reinforcements = profile.calls_reinforcements;
        }
        c.last_known_target = ctx.target;
    }

    let mut desired_velocity = Velocity::default();
    let mut attack_damage = None;

    match c.state {
        AiState::Idle => {
            if detected {
                enter(&mut c, AiState::Chase);
            } else if profile.patrols && c.state_elapsed_secs >= tuning.idle_dwell_secs {
                enter(&mut c, AiState::Patrol);
            }
        }
        AiState::Patrol => {
            if detected {
                enter(&mut c, AiState::Chase);
            } else if let Some(waypoint) = c.patrol_target {
                if ctx.position.horizontal_range_to(&waypoint) < 0.5 {
                    c.patrol_target = None;
                } else {
                    desired_velocity = toward(
                        &ctx.position,
                        &waypoint,
                        profile.move_speed * PATROL_SPEED_FACTOR,
                    );
                }
            }
        }
        AiState::Chase => {
            update_chase(
                ctx,
                profile,
                tuning,
                &mut c,
                detected,
                &mut desired_velocity,
            );
        }
        AiState::Attack => {
            match ctx.target {
                None => enter(&mut c, AiState::Idle),
                Some(_) => {
                    let out_of_reach = ctx.range_to_target
                        > profile.attack_range * ATTACK_RANGE_SLACK
                        || !ctx.target_visible;
                    if out_of_reach {
                        c.lost_sight_secs = 0.0;
                        enter(&mut c, AiState::Chase);
                    } else if c.attack_cooldown_secs <= 0.0 {
                        attack_damage = Some(profile.attack_damage);
                        c.attack_cooldown_secs = profile.attack_rate_secs;
                        if profile.takes_cover {
                            enter(&mut c, AiState::TakeCover);
                        }
                    }
                }
            }
        }
        AiState::Search => {
            c.search_remaining_secs = (c.search_remaining_secs - ctx.dt).max(0.0);
            if seen {
                c.lost_sight_secs = 0.0;
                enter(&mut c, AiState::Chase);
            } else if c.search_remaining_secs <= 0.0 {
                let next = if profile.patrols {
                    AiState::Patrol
                } else {
                    AiState::Idle
                };
                enter(&mut c, next);
            } else if let Some(last_known) = c.last_known_target {
                desired_velocity = toward(
                    &ctx.position,
                    &last_known,
                    profile.move_speed * SEARCH_SPEED_FACTOR,
                );
            }
        }
        AiState::TakeCover => match ctx.target {
            None => enter(&mut c, AiState::Idle),
            Some(target) => {
                if c.attack_cooldown_secs <= 0.0 || c.state_elapsed_secs >= TAKE_COVER_MAX_SECS {
                    enter(&mut c, AiState::Chase);
                } else {
                    desired_velocity = away_from(&ctx.position, &target, profile.move_speed);
                }
            }
        },
        AiState::Flank => match ctx.target {
            None => enter(&mut c, AiState::Idle),
            Some(target) => {
                if !ctx.target_visible || c.state_elapsed_secs >= tuning.flank_duration_secs {
                    enter(&mut c, AiState::Chase);
                } else if ctx.range_to_target <= profile.attack_range {
                    enter(&mut c, AiState::Attack);
                } else {
                    desired_velocity = orbit(&ctx.position, &target, profile.move_speed);
                }
            }
        },
        AiState::Dead => {}
    }

    FsmUpdate {
        state_changed: c.state != previous_state,
        controller: c,
        desired_velocity,
        attack_damage,
        call_reinforcements,
    }
}

fn update_chase(
    ctx: &FsmContext,
    profile: &EnemyProfile,
    tuning: &AiTuning,
    c: &mut AiController,
    detected: bool,
    desired_velocity: &mut Velocity,
) {
    if ctx.target.is_none() {
        enter(c, AiState::Idle);
        return;
    }

    if ctx.target_visible {
        c.lost_sight_secs = 0.0;

        if ctx.range_to_target <= profile.attack_range {
            enter(c, AiState::Attack);
            return;
        }
        if profile.flanks
            && ctx.range_to_target <= 2.0 * profile.attack_range
            && c.state_elapsed_secs > 0.5
        {
            enter(c, AiState::Flank);
            return;
        }
    } else {
        c.lost_sight_secs += ctx.dt;
        if !detected && c.lost_sight_secs >= tuning.lost_sight_grace_secs {
            c.search_remaining_secs = tuning.search_duration_secs;
            enter(c, AiState::Search);
            return;
        }
    }

    // Movement: toward the live target when visible, otherwise toward
    // the last known position.
    let destination = if ctx.target_visible {
        ctx.target
    } else {
        c.last_known_target.or(ctx.target)
    };
    if let Some(destination) = destination {
        *desired_velocity = toward(&ctx.position, &destination, profile.move_speed);
    }

    // Behavior-tree overrides.
    match ctx.bt_action {
        Some(BtAction::Flee) => {
            if let Some(target) = ctx.target {
                *desired_velocity = away_from(&ctx.position, &target, ctx.bt_parameter);
            }
        }
        Some(BtAction::Special) if ctx.bt_parameter == SPECIAL_CHARGE => {
            if let Some(target) = ctx.target {
                *desired_velocity = toward(
                    &ctx.position,
                    &target,
                    profile.move_speed * CHARGE_SPEED_FACTOR,
                );
            }
        }
        _ => {}
    }
}

/// Damage reaction: become aware, remember the source, and close in.
/// Pre-empted only by death. Returns the updated controller and
/// whether awareness was newly gained.
pub fn on_damage(controller: &AiController, source: Position) -> (AiController, bool) {
    let mut c = *controller;
    if c.state.is_terminal() {
        return (c, false);
    }

    let became_aware = !c.aware;
    c.aware = true;
    c.last_known_target = Some(source);
    if c.state != AiState::Attack {
        c.lost_sight_secs = 0.0;
        enter(&mut c, AiState::Chase);
    }
    (c, became_aware)
}

/// Death transition. Terminal; fires exactly once (the caller guards
/// with the alive flag).
pub fn kill(controller: &AiController) -> AiController {
    let mut c = *controller;
    enter(&mut c, AiState::Dead);
    c
}

fn enter(c: &mut AiController, state: AiState) {
    if c.state != state {
        c.state = state;
        c.state_elapsed_secs = 0.0;
    }
}

/// Horizontal velocity toward a destination at the given speed.
fn toward(from: &Position, to: &Position, speed: f32) -> Velocity {
    heading(from, to).map_or_else(Velocity::default, |dir| {
        Velocity::from_vec3(dir * speed)
    })
}

/// Horizontal velocity directly away from a threat.
fn away_from(from: &Position, threat: &Position, speed: f32) -> Velocity {
    heading(from, threat).map_or_else(Velocity::default, |dir| {
        Velocity::from_vec3(-dir * speed)
    })
}

/// Tangential orbit around the target with a small closing component.
fn orbit(from: &Position, target: &Position, speed: f32) -> Velocity {
    heading(from, target).map_or_else(Velocity::default, |dir| {
        let tangent = Vec3::new(dir.z, 0.0, -dir.x);
        Velocity::from_vec3((tangent + dir * FLANK_CLOSING_FACTOR).normalize() * speed)
    })
}

/// Normalized horizontal direction, or `None` for coincident points.
fn heading(from: &Position, to: &Position) -> Option<Vec3> {
    let delta = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if delta.length_squared() < 1e-8 {
        return None;
    }
    Some(delta.normalize())
}
