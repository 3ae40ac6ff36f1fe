//! Simulation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Difficulty multiplier applied to enemy health and damage at
    /// spawn (1.0 = normal).
    pub difficulty: f32,
    /// Behavior timing knobs.
    pub tuning: AiTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: 1.0,
            tuning: AiTuning::default(),
        }
    }
}

/// Behavior timing parameters. The search/chase thresholds are
/// deliberately configuration rather than hard-coded constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTuning {
    /// How long an enemy sweeps a last known position before giving up.
    pub search_duration_secs: f32,
    /// Continuous lost-sight time in Chase before falling to Search.
    pub lost_sight_grace_secs: f32,
    /// Radius within which a reinforcement call alerts allies.
    pub alert_radius: f32,
    /// Delay between death and entity removal.
    pub corpse_linger_secs: f32,
    /// Health fraction at or above which a fatal blow counts as a
    /// quick kill for scoring.
    pub quick_kill_health_fraction: f32,
    /// Minimum target speed for hearing-based detection.
    pub hearing_speed_threshold: f32,
    /// How long a scout holds a flanking arc before re-chasing.
    pub flank_duration_secs: f32,
    /// Idle dwell before a patrolling type starts wandering.
    pub idle_dwell_secs: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            search_duration_secs: 4.0,
            lost_sight_grace_secs: 2.5,
            alert_radius: 15.0,
            corpse_linger_secs: 10.0,
            quick_kill_health_fraction: 0.9,
            hearing_speed_threshold: 0.5,
            flank_duration_secs: 3.0,
            idle_dwell_secs: 2.0,
        }
    }
}
