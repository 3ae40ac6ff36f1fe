//! Decision backend strategy.
//!
//! Two implementors share one contract: `TreeBackend` walks the
//! behavior tree, `HeuristicBackend` is the software fallback with
//! coarse distance/health rules and randomized tie-breaking. Decision
//! parity between the two is not required, only interface parity.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::context::BtContext;
use crate::tree::{BehaviorTree, BtAction, BtStatus};

/// Failure at the accelerated boundary. Never propagates past the
/// evaluator.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("decision backend unavailable: {0}")]
    Unavailable(String),
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

/// The result every backend must produce: a status code, the selected
/// action, and its parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BtOutcome {
    pub status: BtStatus,
    pub action: Option<BtAction>,
    pub parameter: f32,
}

/// One evaluation strategy. Both implementors take the same inputs and
/// produce the same result shape.
pub trait DecisionBackend {
    fn name(&self) -> &'static str;

    fn evaluate(
        &mut self,
        tree: &BehaviorTree,
        ctx: &mut BtContext,
    ) -> Result<BtOutcome, BackendError>;
}

/// Primary path: full behavior-tree walk.
#[derive(Debug, Default)]
pub struct TreeBackend;

impl TreeBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DecisionBackend for TreeBackend {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn evaluate(
        &mut self,
        tree: &BehaviorTree,
        ctx: &mut BtContext,
    ) -> Result<BtOutcome, BackendError> {
        let status = tree.evaluate(ctx);
        Ok(BtOutcome {
            status,
            action: ctx.action,
            parameter: ctx.action_parameter,
        })
    }
}

/// Fallback path: ignores the tree and picks from coarse rules.
/// Intentionally simpler than the tree walk; only the outcome shape
/// matches.
#[derive(Debug)]
pub struct HeuristicBackend {
    rng: ChaCha8Rng,
}

/// Below this health fraction the fallback always retreats.
const FALLBACK_FLEE_FRACTION: f32 = 0.25;

/// Within this range the fallback always attacks.
const FALLBACK_ATTACK_RANGE: f32 = 3.0;

impl HeuristicBackend {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionBackend for HeuristicBackend {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn evaluate(
        &mut self,
        _tree: &BehaviorTree,
        ctx: &mut BtContext,
    ) -> Result<BtOutcome, BackendError> {
        let distance = ctx.distance_to_target();

        let (action, parameter) = if ctx.health_fraction() <= FALLBACK_FLEE_FRACTION {
            (BtAction::Flee, 8.0)
        } else if distance <= FALLBACK_ATTACK_RANGE {
            (BtAction::Attack, 10.0)
        } else if ctx.target_visible || self.rng.gen_bool(0.7) {
            (BtAction::MoveToTarget, 5.0)
        } else {
            (BtAction::Wait, 1.0)
        };

        ctx.action = Some(action);
        ctx.action_parameter = parameter;
        Ok(BtOutcome {
            status: BtStatus::Success,
            action: Some(action),
            parameter,
        })
    }
}
