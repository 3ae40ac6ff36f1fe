//! Wave spawning system — schedules enemy waves over mission time.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_core::enums::EnemyKind;
use holdout_core::types::Position;

/// Spawn ring distances from the arena center.
const SPAWN_RING_MIN: f32 = 25.0;
const SPAWN_RING_MAX: f32 = 35.0;

/// A single wave definition.
#[derive(Debug, Clone)]
pub struct WaveEntry {
    /// Mission time at which this wave spawns.
    pub spawn_at_secs: f32,
    /// Enemies to spawn: (kind, count).
    pub spawns: Vec<(EnemyKind, u32)>,
    /// Whether this wave has already been spawned.
    pub spawned: bool,
}

/// The complete wave schedule for a mission.
#[derive(Debug, Clone, Default)]
pub struct WaveSchedule {
    pub waves: Vec<WaveEntry>,
}

impl WaveSchedule {
    /// Default 3-wave mission with escalating pressure.
    pub fn default_mission() -> Self {
        Self {
            waves: vec![
                WaveEntry {
                    spawn_at_secs: 0.0,
                    spawns: vec![(EnemyKind::Grunt, 3)],
                    spawned: false,
                },
                WaveEntry {
                    spawn_at_secs: 20.0,
                    spawns: vec![(EnemyKind::Grunt, 2), (EnemyKind::Sniper, 1)],
                    spawned: false,
                },
                WaveEntry {
                    spawn_at_secs: 45.0,
                    spawns: vec![
                        (EnemyKind::Grunt, 2),
                        (EnemyKind::Scout, 2),
                        (EnemyKind::Tank, 1),
                    ],
                    spawned: false,
                },
            ],
        }
    }

    /// Total number of enemies across all waves.
    pub fn total_enemies(&self) -> u32 {
        self.waves
            .iter()
            .flat_map(|w| w.spawns.iter())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Check the schedule and emit spawn requests for any due waves.
/// Spawn positions sit on a ring around the arena center at random
/// bearings.
pub fn run(
    schedule: &mut WaveSchedule,
    now_secs: f32,
    rng: &mut ChaCha8Rng,
) -> Vec<(EnemyKind, Position)> {
    let mut requests = Vec::new();
    for wave in &mut schedule.waves {
        if !wave.spawned && now_secs >= wave.spawn_at_secs {
            for &(kind, count) in &wave.spawns {
                for _ in 0..count {
                    let bearing: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
                    let range: f32 = rng.gen_range(SPAWN_RING_MIN..SPAWN_RING_MAX);
                    let position =
                        Position::new(range * bearing.sin(), 0.0, range * bearing.cos());
                    requests.push((kind, position));
                }
            }
            wave.spawned = true;
        }
    }
    requests
}
