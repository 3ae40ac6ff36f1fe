//! Tests for the simulation engine: determinism, physics, damage and
//! death handling, attack cadence, collision notifications, scoring,
//! and lifecycle.

use holdout_core::config::SimConfig;
use holdout_core::constants::DT;
use holdout_core::enums::{AiState, EnemyKind, Team};
use holdout_core::events::GameEvent;
use holdout_core::types::{Position, Velocity};
use holdout_nav::{StaticCollider, StaticWorld};

use crate::backend::{Kinematics, KinematicsBackend, ScalarKinematics, VectorizedKinematics};
use crate::engine::SimulationEngine;
use crate::systems::spawner::WaveSchedule;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn empty_engine(seed: u64) -> SimulationEngine {
    SimulationEngine::new(
        SimConfig {
            seed,
            ..Default::default()
        },
        StaticWorld::empty(),
        None,
    )
}

/// One second of simulation at the default tick rate.
fn run_secs(engine: &mut SimulationEngine, secs: f32) -> Vec<GameEvent> {
    let ticks = (secs / DT).round() as usize;
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(engine.tick(DT).events);
    }
    events
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let make = || {
        let mut engine = empty_engine(12345);
        engine.spawn_player(Position::new(0.0, 0.0, 0.0));
        engine.set_wave_schedule(WaveSchedule::default_mission());
        engine
    };
    let mut engine_a = make();
    let mut engine_b = make();

    for _ in 0..300 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let make = |seed| {
        let mut engine = empty_engine(seed);
        engine.set_wave_schedule(WaveSchedule::default_mission());
        engine
    };
    let mut engine_a = make(111);
    let mut engine_b = make(222);

    // Spawn bearings and patrol wandering differ by seed.
    let mut diverged = false;
    for _ in 0..300 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);
        if serde_json::to_string(&snap_a).unwrap() != serde_json::to_string(&snap_b).unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Physics ----

#[test]
fn test_gravity_converges_to_ground() {
    let mut engine = empty_engine(1);
    let id = engine.spawn_enemy(EnemyKind::Grunt, Position::new(0.0, 5.0, 0.0));

    // dt = 1s: one step of -9.8 already overshoots the ground.
    for _ in 0..3 {
        engine.tick(1.0);
    }

    let position = engine.position_of(id).unwrap();
    let velocity = engine.velocity_of(id).unwrap();
    assert_eq!(position.y, 0.0, "Ground clamp should pin y to 0");
    assert_eq!(velocity.y, 0.0, "Ground clamp should zero vertical velocity");
    assert!(engine.collider_of(id).unwrap().grounded);
}

#[test]
fn test_kinematics_backends_agree() {
    let vectorized = VectorizedKinematics;
    let scalar = ScalarKinematics;

    let mut pos_a = Position::new(1.0, 10.0, -2.0);
    let mut vel_a = Velocity::new(3.0, 0.0, 1.0);
    let mut pos_b = pos_a;
    let mut vel_b = vel_a;

    for _ in 0..60 {
        vectorized.integrate(&mut pos_a, &mut vel_a, DT).unwrap();
        scalar.integrate(&mut pos_b, &mut vel_b, DT).unwrap();
    }

    approx::assert_relative_eq!(pos_a.x, pos_b.x, epsilon = 1e-5);
    approx::assert_relative_eq!(pos_a.y, pos_b.y, epsilon = 1e-5);
    approx::assert_relative_eq!(pos_a.z, pos_b.z, epsilon = 1e-5);
}

#[test]
fn test_kinematics_per_call_fallback() {
    init_logs();

    /// Stands in for a broken accelerated path.
    struct FailingKinematics;
    impl KinematicsBackend for FailingKinematics {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn integrate(
            &self,
            _position: &mut Position,
            _velocity: &mut Velocity,
            _dt: f32,
        ) -> Result<(), holdout_bt::BackendError> {
            Err(holdout_bt::BackendError::Evaluation("induced".into()))
        }
    }

    let kinematics = Kinematics::with_primary(Some(Box::new(FailingKinematics)));
    let mut position = Position::new(0.0, 5.0, 0.0);
    let mut velocity = Velocity::default();
    // The call must not error out and must integrate via the fallback.
    kinematics.integrate(&mut position, &mut velocity, 1.0);
    assert!((velocity.y + 9.8).abs() < 1e-5);
    assert!(position.y < 5.0);
}

#[test]
fn test_static_collision_pushes_out() {
    let statics = StaticWorld::new(vec![StaticCollider::new(Position::new(0.0, 0.0, 0.0), 2.0)]);
    let mut engine = SimulationEngine::new(SimConfig::default(), statics, None);
    // Spawned overlapping the pillar (reach = 2.0 + 0.8).
    let id = engine.spawn_enemy(EnemyKind::Grunt, Position::new(1.0, 0.0, 0.0));

    engine.tick(DT);

    let position = engine.position_of(id).unwrap();
    let range = position.horizontal_range_to(&Position::new(0.0, 0.0, 0.0));
    assert!(
        range >= 2.8 - 1e-3,
        "Entity should be pushed out of the pillar, at range {range}"
    );
}

#[test]
fn test_scene_ray_cast_prefers_nearest_and_excludes_caster() {
    use crate::engine::RayTarget;

    let statics = StaticWorld::new(vec![StaticCollider::new(
        Position::new(20.0, 1.0, 0.0),
        1.0,
    )]);
    let mut engine = SimulationEngine::new(SimConfig::default(), statics, None);
    let shooter = engine.spawn_enemy(EnemyKind::Sniper, Position::new(0.0, 1.0, 0.0));
    let blocker = engine.spawn_enemy(EnemyKind::Grunt, Position::new(10.0, 1.0, 0.0));

    // The grunt stands in front of the wall.
    let hit = engine
        .ray_cast(
            Position::new(0.0, 1.0, 0.0),
            glam::Vec3::X,
            100.0,
            Some(shooter),
        )
        .expect("should hit the grunt");
    assert_eq!(hit.target, RayTarget::Entity(blocker));
    assert!(hit.distance < 10.0);

    // Excluding the grunt too leaves only the wall.
    let hit = engine
        .ray_cast(Position::new(10.5, 1.0, 0.0), glam::Vec3::X, 100.0, Some(blocker))
        .expect("should hit the wall");
    assert!(matches!(hit.target, RayTarget::Static(0)));

    // Degenerate direction: no hit, no panic.
    assert!(engine
        .ray_cast(Position::new(0.0, 1.0, 0.0), glam::Vec3::ZERO, 100.0, None)
        .is_none());
}

// ---- Damage and state ----

#[test]
fn test_damage_triggers_chase_and_awareness() {
    let mut engine = empty_engine(1);
    let id = engine.spawn_enemy(EnemyKind::Grunt, Position::new(0.0, 0.0, 0.0));

    // Unsuspecting grunt takes 30 damage from behind a crate.
    engine.apply_damage(id, 30.0, Position::new(10.0, 0.0, 10.0));

    let health = engine.health_of(id).unwrap();
    assert_eq!(health.current, 30.0); // grunt max is 60
    let controller = engine.controller_of(id).unwrap();
    assert_eq!(controller.state, AiState::Chase);
    assert!(controller.aware);
    assert_eq!(
        controller.last_known_target,
        Some(Position::new(10.0, 0.0, 10.0))
    );
}

#[test]
fn test_health_never_negative_and_clamped() {
    let mut engine = empty_engine(1);
    let id = engine.spawn_enemy(EnemyKind::Grunt, Position::new(0.0, 0.0, 0.0));

    engine.apply_damage(id, 1e6, Position::new(1.0, 0.0, 0.0));
    let health = engine.health_of(id).unwrap();
    assert_eq!(health.current, 0.0);
    assert!(!health.alive);

    // Negative damage must not heal.
    let id2 = engine.spawn_enemy(EnemyKind::Grunt, Position::new(5.0, 0.0, 0.0));
    engine.apply_damage(id2, -50.0, Position::new(1.0, 0.0, 0.0));
    let health2 = engine.health_of(id2).unwrap();
    assert_eq!(health2.current, health2.max);
}

#[test]
fn test_death_is_terminal_and_fires_once() {
    let mut engine = empty_engine(1);
    let id = engine.spawn_enemy(EnemyKind::Grunt, Position::new(0.0, 0.0, 0.0));

    engine.apply_damage(id, 100.0, Position::new(1.0, 0.0, 0.0));
    let killed: Vec<_> = engine
        .tick(DT)
        .events
        .into_iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        .collect();
    assert_eq!(killed.len(), 1);

    // Further damage on the corpse is a no-op and emits nothing.
    engine.apply_damage(id, 100.0, Position::new(1.0, 0.0, 0.0));
    let events = engine.tick(DT).events;
    assert!(events
        .iter()
        .all(|e| !matches!(e, GameEvent::EnemyKilled { .. })));

    // Dead stays dead across ticks.
    for _ in 0..30 {
        engine.tick(DT);
        if let Some(controller) = engine.controller_of(id) {
            assert_eq!(controller.state, AiState::Dead);
        }
    }
}

#[test]
fn test_stale_entity_id_is_noop() {
    let mut engine = empty_engine(1);
    engine.spawn_enemy(EnemyKind::Grunt, Position::new(0.0, 0.0, 0.0));

    // Never-registered id.
    engine.apply_damage(9999, 50.0, Position::new(0.0, 0.0, 0.0));
    engine.tick(DT);
}

#[test]
fn test_corpse_removed_after_grace_period() {
    let mut engine = empty_engine(1);
    let id = engine.spawn_enemy(EnemyKind::Grunt, Position::new(0.0, 0.0, 0.0));
    engine.apply_damage(id, 1000.0, Position::new(1.0, 0.0, 0.0));

    // Just before the 10s grace period: still present.
    run_secs(&mut engine, 9.5);
    assert!(engine.is_registered(id));

    // Past it: removed at a tick boundary.
    run_secs(&mut engine, 1.0);
    assert!(!engine.is_registered(id));

    // Damage against the recycled id is a silent no-op.
    engine.apply_damage(id, 10.0, Position::new(0.0, 0.0, 0.0));
}

// ---- Attack cadence ----

#[test]
fn test_attack_cadence_exactly_three_in_three_seconds() {
    let mut engine = empty_engine(1);
    let player = engine.spawn_player(Position::new(0.0, 0.0, 0.0));
    // Parked exactly at the grunt's attack range (2.0, rate 1.0s).
    engine.spawn_enemy(EnemyKind::Grunt, Position::new(2.0, 0.0, 0.0));

    // Two warmup ticks carry Idle → Chase → Attack.
    engine.tick(DT);
    engine.tick(DT);

    let events = run_secs(&mut engine, 3.0);
    let attacks = events
        .iter()
        .filter(|e| matches!(e, GameEvent::AttackLanded { .. }))
        .count();
    assert_eq!(attacks, 3, "1.0s attack rate over 3.0s: exactly 3 attacks");

    let player_health = engine.health_of(player).unwrap();
    assert_eq!(player_health.current, 100.0 - 3.0 * 10.0);
}

#[test]
fn test_player_damage_emits_event() {
    let mut engine = empty_engine(1);
    engine.spawn_player(Position::new(0.0, 0.0, 0.0));
    engine.spawn_enemy(EnemyKind::Grunt, Position::new(1.5, 0.0, 0.0));

    let events = run_secs(&mut engine, 1.0);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::PlayerDamaged { .. })));
}

// ---- Dynamic collisions ----

#[test]
fn test_collision_pair_notified_once_per_tick() {
    let mut engine = empty_engine(1);
    // Radii 0.8 each, 1.5 apart: overlapping (1.5 < 1.6).
    let a = engine.spawn_enemy(EnemyKind::Grunt, Position::new(0.0, 0.0, 0.0));
    let b = engine.spawn_enemy(EnemyKind::Grunt, Position::new(1.5, 0.0, 0.0));

    engine.tick(DT);

    let contacts = engine.contacts();
    let pair_count = contacts
        .iter()
        .filter(|&&(x, y)| (x == a && y == b) || (x == b && y == a))
        .count();
    assert_eq!(pair_count, 1, "One notification per pair, not per entity");
}

#[test]
fn test_no_collision_at_exact_boundary() {
    let mut engine = empty_engine(1);
    // Tank radii 1.4 each, exactly 2.8 apart: strict inequality, no
    // contact.
    engine.spawn_enemy(EnemyKind::Tank, Position::new(0.0, 0.0, 0.0));
    engine.spawn_enemy(EnemyKind::Tank, Position::new(2.8, 0.0, 0.0));

    engine.tick(DT);
    assert!(engine.contacts().is_empty());
}

// ---- Scoring ----

#[test]
fn test_boss_quick_kill_scoring() {
    let mut engine = empty_engine(1);
    let boss = engine.spawn_enemy(EnemyKind::Boss, Position::new(10.0, 0.0, 0.0));

    // Engaged (aware) but still at full health when the kill lands.
    engine.alert_group(Position::new(10.0, 0.0, 0.0), 5.0);
    assert!(engine.controller_of(boss).unwrap().aware);

    engine.apply_damage(boss, 10_000.0, Position::new(0.0, 0.0, 0.0));

    // base 1000 * (1 + 0.2 + 0.3) = 1500, floored.
    assert_eq!(engine.score().points, 1500);
    let events = engine.tick(DT).events;
    let kill_points = events.iter().find_map(|e| match e {
        GameEvent::EnemyKilled { points, .. } => Some(*points),
        _ => None,
    });
    assert_eq!(kill_points, Some(1500));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::BossDefeated { .. })));
}

#[test]
fn test_slow_kill_earns_no_quick_bonus() {
    let mut engine = empty_engine(1);
    let boss = engine.spawn_enemy(EnemyKind::Boss, Position::new(10.0, 0.0, 0.0));

    // First hit wounds (and makes the boss aware of its attacker);
    // the killing blow lands well below the quick-kill threshold.
    engine.apply_damage(boss, 300.0, Position::new(0.0, 0.0, 0.0));
    engine.apply_damage(boss, 10_000.0, Position::new(0.0, 0.0, 0.0));

    // base 1000 * (1 + 0.2) = 1200: aware bonus only.
    assert_eq!(engine.score().points, 1200);
}

#[test]
fn test_unaware_quick_kill_skips_aware_bonus() {
    let mut engine = empty_engine(1);
    let id = engine.spawn_enemy(EnemyKind::Grunt, Position::new(0.0, 0.0, 0.0));

    // A one-shot kill never gives the controller a chance to react:
    // unaware, but near full health. 100 * (1 + 0.3) = 130.
    engine.apply_damage(id, 1000.0, Position::new(5.0, 0.0, 0.0));
    assert_eq!(engine.score().points, 130);
}

// ---- Alerts ----

#[test]
fn test_reinforcement_alert_radius() {
    let mut engine = empty_engine(1);
    engine.spawn_player(Position::new(0.0, 0.0, 0.0));
    // Spotter inside sight range; ally beyond sight but within the
    // 15-unit alert radius of the spotter; straggler out of reach.
    let spotter = engine.spawn_enemy(EnemyKind::Grunt, Position::new(20.0, 0.0, 0.0));
    let ally = engine.spawn_enemy(EnemyKind::Grunt, Position::new(30.0, 0.0, 0.0));
    let straggler = engine.spawn_enemy(EnemyKind::Grunt, Position::new(60.0, 0.0, 0.0));

    let mut events = Vec::new();
    for _ in 0..3 {
        events.extend(engine.tick(DT).events);
    }

    assert!(engine.controller_of(spotter).unwrap().aware);
    assert!(engine.controller_of(ally).unwrap().aware);
    assert!(!engine.controller_of(straggler).unwrap().aware);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyAlerted { entity_id, .. } if *entity_id == spotter)));
}

// ---- Spawning ----

#[test]
fn test_wave_schedule_spawns_over_time() {
    let mut engine = empty_engine(1);
    engine.spawn_player(Position::new(0.0, 0.0, 0.0));
    engine.set_wave_schedule(WaveSchedule::default_mission());

    let snap = engine.tick(DT);
    // Player + first wave of 3 grunts.
    assert_eq!(snap.entities.len(), 4);

    run_secs(&mut engine, 21.0);
    let snap = engine.tick(DT);
    // Second wave added 3 more (assuming none died).
    assert_eq!(snap.entities.len(), 7);
}

#[test]
fn test_unknown_kind_code_spawns_grunt() {
    let mut engine = empty_engine(1);
    let id = engine.spawn_enemy_coded(99, Position::new(0.0, 0.0, 0.0));
    let snap = engine.tick(DT);
    let view = snap.entities.iter().find(|e| e.id == id).unwrap();
    assert_eq!(view.kind, Some(EnemyKind::Grunt));
}

#[test]
fn test_difficulty_scales_health_and_damage() {
    let mut engine = SimulationEngine::new(
        SimConfig {
            seed: 1,
            difficulty: 2.0,
            ..Default::default()
        },
        StaticWorld::empty(),
        None,
    );
    let player = engine.spawn_player(Position::new(0.0, 0.0, 0.0));
    let id = engine.spawn_enemy(EnemyKind::Grunt, Position::new(2.0, 0.0, 0.0));

    assert_eq!(engine.health_of(id).unwrap().max, 120.0);

    // First landed attack deals scaled damage.
    let mut events = Vec::new();
    for _ in 0..90 {
        events.extend(engine.tick(DT).events);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::AttackLanded { .. }))
        {
            break;
        }
    }
    let damage = events.iter().find_map(|e| match e {
        GameEvent::AttackLanded { damage, .. } => Some(*damage),
        _ => None,
    });
    assert_eq!(damage, Some(20.0));
    assert!(engine.health_of(player).unwrap().current <= 80.0);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_contents_and_serialization() {
    let mut engine = empty_engine(1);
    let player = engine.spawn_player(Position::new(0.0, 1.0, 0.0));
    let enemy = engine.spawn_enemy(EnemyKind::Sniper, Position::new(5.0, 0.0, 5.0));

    let snap = engine.tick(DT);
    assert_eq!(snap.entities.len(), 2);

    let player_view = snap.entities.iter().find(|e| e.id == player).unwrap();
    assert_eq!(player_view.team, Team::Player);
    assert_eq!(player_view.kind, None);
    assert_eq!(player_view.state, None);

    let enemy_view = snap.entities.iter().find(|e| e.id == enemy).unwrap();
    assert_eq!(enemy_view.team, Team::Enemy);
    assert_eq!(enemy_view.kind, Some(EnemyKind::Sniper));
    assert!(enemy_view.state.is_some());

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("Sniper"));
}

// ---- Invariants over a busy session ----

#[test]
fn test_health_bounds_and_dead_monotonicity_over_session() {
    let mut engine = empty_engine(7);
    engine.spawn_player(Position::new(0.0, 0.0, 0.0));
    engine.set_wave_schedule(WaveSchedule::default_mission());

    let mut ever_dead: Vec<u32> = Vec::new();
    for tick in 0..600 {
        // Periodic pot shots at whatever is around.
        if tick % 37 == 0 {
            let snap_ids: Vec<u32> = {
                let snap = engine.tick(DT);
                snap.entities.iter().map(|e| e.id).collect()
            };
            for id in snap_ids {
                engine.apply_damage(id % 3 + id, 25.0, Position::new(0.0, 0.0, 0.0));
            }
        }
        let snap = engine.tick(DT);
        for view in &snap.entities {
            assert!(
                view.health >= 0.0 && view.health <= view.max_health,
                "Health out of bounds for entity {}",
                view.id
            );
            if let Some(state) = view.state {
                if ever_dead.contains(&view.id) {
                    assert_eq!(state, AiState::Dead, "Dead entity {} revived", view.id);
                }
                if state == AiState::Dead {
                    if !ever_dead.contains(&view.id) {
                        ever_dead.push(view.id);
                    }
                    assert_eq!(view.health, 0.0);
                }
            }
        }
    }
}
