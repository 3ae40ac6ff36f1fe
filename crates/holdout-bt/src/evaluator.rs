//! The evaluator front door: backend selection and silent fallback.

use log::warn;

use crate::backend::{BtOutcome, DecisionBackend, HeuristicBackend, TreeBackend};
use crate::context::BtContext;
use crate::tree::{BehaviorTree, BtAction, BtStatus};

/// Evaluates behavior trees through a primary backend, serving any
/// failed call from the fallback without surfacing the error. The
/// primary is selected once at construction; a per-call failure does
/// not disable it for subsequent calls.
pub struct Evaluator {
    primary: Option<Box<dyn DecisionBackend>>,
    fallback: Box<dyn DecisionBackend>,
}

impl Evaluator {
    /// Standard configuration: tree walk primary, heuristic fallback.
    pub fn new(seed: u64) -> Self {
        Self {
            primary: Some(Box::new(TreeBackend::new())),
            fallback: Box::new(HeuristicBackend::new(seed)),
        }
    }

    /// Inject explicit backends. Passing `None` as primary models a
    /// failed startup initialization: every call runs on the fallback
    /// for the session.
    pub fn with_backends(
        primary: Option<Box<dyn DecisionBackend>>,
        fallback: Box<dyn DecisionBackend>,
    ) -> Self {
        if primary.is_none() {
            warn!("primary decision backend unavailable, using fallback for the session");
        }
        Self { primary, fallback }
    }

    /// Name of the backend serving calls when nothing fails.
    pub fn active_backend(&self) -> &'static str {
        match &self.primary {
            Some(backend) => backend.name(),
            None => self.fallback.name(),
        }
    }

    /// Evaluate one entity's tree. Never fails: backend errors are
    /// logged and the call is served by the fallback.
    pub fn evaluate(&mut self, tree: &BehaviorTree, ctx: &mut BtContext) -> BtOutcome {
        if let Some(primary) = &mut self.primary {
            match primary.evaluate(tree, ctx) {
                Ok(outcome) => return outcome,
                Err(err) => {
                    warn!("{} backend evaluation failed, falling back: {err}", primary.name());
                }
            }
        }
        match self.fallback.evaluate(tree, ctx) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("fallback backend failed, holding position: {err}");
                safe_outcome(ctx)
            }
        }
    }
}

/// Last-resort outcome when every backend fails: hold position.
fn safe_outcome(ctx: &mut BtContext) -> BtOutcome {
    ctx.action = Some(BtAction::Wait);
    ctx.action_parameter = 0.0;
    BtOutcome {
        status: BtStatus::Failure,
        action: Some(BtAction::Wait),
        parameter: 0.0,
    }
}
