//! Kill scoring.

use holdout_core::constants::{AWARE_KILL_BONUS, QUICK_KILL_BONUS};
use holdout_core::state::ScoreView;

/// Running mission score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    pub kills: u32,
    pub points: u64,
}

impl ScoreState {
    pub fn record_kill(&mut self, points: u32) {
        self.kills += 1;
        self.points += u64::from(points);
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            kills: self.kills,
            points: self.points,
        }
    }
}

/// Point value for a kill. Bonuses stack additively on the base value
/// and the result is floored: `base * (1 + 0.2·aware + 0.3·quick)`.
pub fn point_value(base_points: u32, aware: bool, quick_kill: bool) -> u32 {
    let mut multiplier = 1.0;
    if aware {
        multiplier += AWARE_KILL_BONUS;
    }
    if quick_kill {
        multiplier += QUICK_KILL_BONUS;
    }
    (base_points as f32 * multiplier).floor() as u32
}
