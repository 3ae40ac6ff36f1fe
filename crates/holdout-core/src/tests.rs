//! Tests for core types, enums, and configuration defaults.

use crate::config::{AiTuning, SimConfig};
use crate::enums::{AiState, EnemyKind};
use crate::types::{Position, SimTime, Velocity};

#[test]
fn test_enemy_kind_round_trip() {
    for kind in [
        EnemyKind::Grunt,
        EnemyKind::Sniper,
        EnemyKind::Tank,
        EnemyKind::Scout,
        EnemyKind::Boss,
    ] {
        assert_eq!(EnemyKind::from_code(kind.code()), kind);
    }
}

#[test]
fn test_unknown_kind_code_defaults_to_grunt() {
    assert_eq!(EnemyKind::from_code(5), EnemyKind::Grunt);
    assert_eq!(EnemyKind::from_code(u32::MAX), EnemyKind::Grunt);
}

#[test]
fn test_default_state_is_idle() {
    assert_eq!(AiState::default(), AiState::Idle);
    assert!(!AiState::default().is_terminal());
    assert!(AiState::Dead.is_terminal());
}

#[test]
fn test_position_ranges() {
    let a = Position::new(0.0, 0.0, 0.0);
    let b = Position::new(3.0, 4.0, 0.0);
    assert!((a.range_to(&b) - 5.0).abs() < 1e-6);
    assert!((a.range_sq_to(&b) - 25.0).abs() < 1e-6);

    // Horizontal range ignores height.
    let c = Position::new(3.0, 100.0, 4.0);
    assert!((a.horizontal_range_to(&c) - 5.0).abs() < 1e-6);
}

#[test]
fn test_velocity_speed() {
    let v = Velocity::new(1.0, 2.0, 2.0);
    assert!((v.speed() - 3.0).abs() < 1e-6);
    let flat = Velocity::new(3.0, 9.9, 4.0);
    assert!((flat.horizontal_speed() - 5.0).abs() < 1e-6);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(0.5);
    time.advance(0.5);
    assert_eq!(time.tick, 2);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-6);
}

#[test]
fn test_tuning_defaults_bounded() {
    let tuning = AiTuning::default();
    // Search/chase thresholds sit in the 3-5s band.
    assert!(tuning.search_duration_secs >= 3.0 && tuning.search_duration_secs <= 5.0);
    assert!(tuning.lost_sight_grace_secs > 0.0);
    assert!(tuning.quick_kill_health_fraction > 0.0 && tuning.quick_kill_health_fraction <= 1.0);

    let config = SimConfig::default();
    assert!(config.difficulty > 0.0);
}

#[test]
fn test_snapshot_serializes() {
    let snapshot = crate::state::WorldSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("entities"));
}
