//! Type-specific behavior profiles.
//!
//! Consolidates per-type parameters for the enemy FSM. Resolved once
//! at spawn and immutable thereafter.

use holdout_core::enums::EnemyKind;

/// Behavioral profile for an enemy kind.
#[derive(Debug, Clone)]
pub struct EnemyProfile {
    /// Base movement speed (units/s).
    pub move_speed: f32,
    /// Range at which the basic attack connects (units).
    pub attack_range: f32,
    /// Seconds between basic attacks.
    pub attack_rate_secs: f32,
    /// Damage per basic attack.
    pub attack_damage: f32,
    /// Visual detection range (units).
    pub sight_range: f32,
    /// Hearing detection range (units).
    pub hearing_range: f32,
    /// Starting and maximum health.
    pub max_health: f32,
    /// Collision sphere radius.
    pub collision_radius: f32,
    /// Base point value on kill.
    pub base_points: u32,
    /// Ranged types retreat to cover while their weapon cycles.
    pub takes_cover: bool,
    /// Fast types circle the target for a side angle.
    pub flanks: bool,
    /// Whether detection alerts nearby allies.
    pub calls_reinforcements: bool,
    /// Whether the type wanders when it has no target.
    pub patrols: bool,
}

/// Get the behavioral profile for a given enemy kind.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Grunt => EnemyProfile {
            move_speed: 5.0,
            attack_range: 2.0,
            attack_rate_secs: 1.0,
            attack_damage: 10.0,
            sight_range: 25.0,
            hearing_range: 10.0,
            max_health: 60.0,
            collision_radius: 0.8,
            base_points: 100,
            takes_cover: false,
            flanks: false,
            calls_reinforcements: true,
            patrols: true,
        },
        EnemyKind::Sniper => EnemyProfile {
            move_speed: 3.0,
            attack_range: 30.0,
            attack_rate_secs: 3.0,
            attack_damage: 25.0,
            sight_range: 45.0,
            hearing_range: 8.0,
            max_health: 50.0,
            collision_radius: 0.8,
            base_points: 150,
            takes_cover: true,
            flanks: false,
            calls_reinforcements: true,
            patrols: false,
        },
        EnemyKind::Tank => EnemyProfile {
            move_speed: 3.0,
            attack_range: 3.0,
            attack_rate_secs: 1.5,
            attack_damage: 20.0,
            sight_range: 20.0,
            hearing_range: 12.0,
            max_health: 200.0,
            collision_radius: 1.4,
            base_points: 200,
            takes_cover: false,
            flanks: false,
            calls_reinforcements: false,
            patrols: true,
        },
        EnemyKind::Scout => EnemyProfile {
            move_speed: 8.0,
            attack_range: 5.0,
            attack_rate_secs: 2.0,
            attack_damage: 8.0,
            sight_range: 30.0,
            hearing_range: 15.0,
            max_health: 40.0,
            collision_radius: 0.7,
            base_points: 120,
            takes_cover: false,
            flanks: true,
            calls_reinforcements: false,
            patrols: true,
        },
        EnemyKind::Boss => EnemyProfile {
            move_speed: 5.0,
            attack_range: 4.0,
            attack_rate_secs: 1.2,
            attack_damage: 30.0,
            sight_range: 50.0,
            hearing_range: 20.0,
            max_health: 500.0,
            collision_radius: 2.0,
            base_points: 1000,
            takes_cover: false,
            flanks: false,
            calls_reinforcements: false,
            patrols: false,
        },
    }
}
