//! Behavior tree structure and evaluation.
//!
//! Nodes live in a flat arena indexed by `NodeId`; trees are built
//! leaf-first and immutable after `set_root`. Evaluation is a
//! synchronous walk writing the chosen action into the context.

use holdout_core::enums::EnemyKind;

use crate::context::BtContext;

pub type NodeId = usize;

/// Node evaluation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtStatus {
    Failure,
    Success,
    Running,
}

impl BtStatus {
    /// Numeric result code: FAILURE(0) / SUCCESS(1) / RUNNING(2).
    pub fn code(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
            Self::Running => 2,
        }
    }
}

/// Leaf condition checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BtCondition {
    /// Target within the given range.
    TargetWithin(f32),
    /// Health fraction at or below the given threshold.
    HealthBelow(f32),
    /// Entity is of the given kind.
    KindIs(EnemyKind),
    /// Target currently visible (line of sight).
    TargetVisible,
    /// Numbered cooldown slot has expired.
    CooldownReady(usize),
}

/// Leaf actions. All but `SetCooldown` write themselves into the
/// context's output channel; `SetCooldown` arms a slot in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BtAction {
    /// Move toward the target. Parameter: speed.
    MoveToTarget,
    /// Attack the target. Parameter: damage.
    Attack,
    /// Move away from the target. Parameter: speed.
    Flee,
    /// Hold position. Parameter: duration.
    Wait,
    /// Trigger a type-specific special ability. Parameter: ability id.
    Special,
    /// Arm a cooldown slot. Parameter: duration in seconds.
    SetCooldown { slot: usize },
}

#[derive(Debug, Clone)]
enum BtNodeKind {
    Sequence,
    Selector,
    Inverter,
    Succeeder,
    Repeater { times: u32 },
    Parallel { success_threshold: usize },
    Condition(BtCondition),
    Action { action: BtAction, parameter: f32 },
}

#[derive(Debug, Clone)]
struct BtNode {
    kind: BtNodeKind,
    children: Vec<NodeId>,
}

/// An immutable behavior tree specialized per enemy type at creation.
#[derive(Debug, Clone, Default)]
pub struct BehaviorTree {
    nodes: Vec<BtNode>,
    root: NodeId,
}

impl BehaviorTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: BtNodeKind, children: Vec<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(BtNode { kind, children });
        id
    }

    /// Succeeds only if all children succeed, in order.
    /// Short-circuits on the first failure.
    pub fn sequence(&mut self, children: &[NodeId]) -> NodeId {
        self.push(BtNodeKind::Sequence, children.to_vec())
    }

    /// Succeeds on the first child that succeeds.
    /// Short-circuits on the first success.
    pub fn selector(&mut self, children: &[NodeId]) -> NodeId {
        self.push(BtNodeKind::Selector, children.to_vec())
    }

    /// Inverts its single child's Success/Failure.
    pub fn inverter(&mut self, child: NodeId) -> NodeId {
        self.push(BtNodeKind::Inverter, vec![child])
    }

    /// Forces its single child's result to Success.
    pub fn succeeder(&mut self, child: NodeId) -> NodeId {
        self.push(BtNodeKind::Succeeder, vec![child])
    }

    /// Succeeds after its child has succeeded `times` times.
    pub fn repeater(&mut self, times: u32, child: NodeId) -> NodeId {
        self.push(BtNodeKind::Repeater { times }, vec![child])
    }

    /// Succeeds once `success_threshold` children have succeeded.
    pub fn parallel(&mut self, success_threshold: usize, children: &[NodeId]) -> NodeId {
        self.push(BtNodeKind::Parallel { success_threshold }, children.to_vec())
    }

    pub fn condition(&mut self, condition: BtCondition) -> NodeId {
        self.push(BtNodeKind::Condition(condition), Vec::new())
    }

    pub fn action(&mut self, action: BtAction, parameter: f32) -> NodeId {
        self.push(BtNodeKind::Action { action, parameter }, Vec::new())
    }

    pub fn set_root(&mut self, node: NodeId) {
        self.root = node;
    }

    /// Evaluate the tree from the root. The selected action and its
    /// parameter are left in the context's output channel.
    pub fn evaluate(&self, ctx: &mut BtContext) -> BtStatus {
        if self.nodes.is_empty() {
            return BtStatus::Failure;
        }
        self.evaluate_node(self.root, ctx)
    }

    fn evaluate_node(&self, id: NodeId, ctx: &mut BtContext) -> BtStatus {
        let Some(node) = self.nodes.get(id) else {
            return BtStatus::Failure;
        };

        match &node.kind {
            BtNodeKind::Sequence => {
                for &child in &node.children {
                    match self.evaluate_node(child, ctx) {
                        BtStatus::Failure => return BtStatus::Failure,
                        BtStatus::Running => return BtStatus::Running,
                        BtStatus::Success => {}
                    }
                }
                BtStatus::Success
            }
            BtNodeKind::Selector => {
                for &child in &node.children {
                    match self.evaluate_node(child, ctx) {
                        BtStatus::Success => return BtStatus::Success,
                        BtStatus::Running => return BtStatus::Running,
                        BtStatus::Failure => {}
                    }
                }
                BtStatus::Failure
            }
            BtNodeKind::Inverter => match node.children.first() {
                None => BtStatus::Failure,
                Some(&child) => match self.evaluate_node(child, ctx) {
                    BtStatus::Success => BtStatus::Failure,
                    BtStatus::Failure => BtStatus::Success,
                    BtStatus::Running => BtStatus::Running,
                },
            },
            BtNodeKind::Succeeder => match node.children.first() {
                None => BtStatus::Success,
                Some(&child) => match self.evaluate_node(child, ctx) {
                    BtStatus::Running => BtStatus::Running,
                    _ => BtStatus::Success,
                },
            },
            BtNodeKind::Repeater { times } => {
                let Some(&child) = node.children.first() else {
                    return BtStatus::Failure;
                };
                let count = ctx.repeat_count(id);
                if count >= *times {
                    ctx.set_repeat_count(id, 0);
                    return BtStatus::Success;
                }
                match self.evaluate_node(child, ctx) {
                    BtStatus::Failure => {
                        ctx.set_repeat_count(id, 0);
                        BtStatus::Failure
                    }
                    BtStatus::Success => {
                        let count = count + 1;
                        if count >= *times {
                            ctx.set_repeat_count(id, 0);
                            BtStatus::Success
                        } else {
                            ctx.set_repeat_count(id, count);
                            BtStatus::Running
                        }
                    }
                    BtStatus::Running => BtStatus::Running,
                }
            }
            BtNodeKind::Parallel { success_threshold } => {
                let mut successes = 0;
                let mut failures = 0;
                for &child in &node.children {
                    match self.evaluate_node(child, ctx) {
                        BtStatus::Success => successes += 1,
                        BtStatus::Failure => failures += 1,
                        BtStatus::Running => {}
                    }
                }
                if successes >= *success_threshold {
                    BtStatus::Success
                } else if failures > node.children.len().saturating_sub(*success_threshold) {
                    BtStatus::Failure
                } else {
                    BtStatus::Running
                }
            }
            BtNodeKind::Condition(condition) => self.evaluate_condition(*condition, ctx),
            BtNodeKind::Action { action, parameter } => {
                self.evaluate_action(*action, *parameter, ctx)
            }
        }
    }

    fn evaluate_condition(&self, condition: BtCondition, ctx: &BtContext) -> BtStatus {
        let holds = match condition {
            BtCondition::TargetWithin(range) => ctx.distance_to_target() <= range,
            BtCondition::HealthBelow(fraction) => ctx.health_fraction() <= fraction,
            BtCondition::KindIs(kind) => ctx.kind == kind,
            BtCondition::TargetVisible => ctx.target_visible,
            BtCondition::CooldownReady(slot) => ctx.cooldown_ready(slot),
        };
        if holds {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }

    fn evaluate_action(&self, action: BtAction, parameter: f32, ctx: &mut BtContext) -> BtStatus {
        match action {
            BtAction::SetCooldown { slot } => {
                ctx.set_cooldown(slot, parameter);
            }
            _ => {
                ctx.action = Some(action);
                ctx.action_parameter = parameter;
            }
        }
        BtStatus::Success
    }
}
