//! Behavior-tree decision making for HOLDOUT enemies.
//!
//! Each enemy type gets a behavior tree built once at spawn. Trees are
//! evaluated every tick against a per-entity context and produce a
//! discrete action plus a float parameter. Evaluation runs through a
//! two-implementor backend strategy: the tree walk itself, and a
//! heuristic software fallback that serves calls the primary cannot.

pub mod backend;
pub mod context;
pub mod evaluator;
pub mod library;
pub mod tree;

pub use backend::{BackendError, BtOutcome, DecisionBackend, HeuristicBackend, TreeBackend};
pub use context::BtContext;
pub use evaluator::Evaluator;
pub use library::build_tree;
pub use tree::{BehaviorTree, BtAction, BtCondition, BtStatus};
