//! Per-entity evaluation context.

use std::collections::HashMap;

use holdout_core::constants::COOLDOWN_SLOTS;
use holdout_core::enums::EnemyKind;
use holdout_core::types::Position;

use crate::tree::BtAction;

/// Mutable state a behavior tree reads and writes during evaluation.
/// One per live entity. Refreshed with current world data before each
/// evaluation; only the cooldown slots and repeater counters persist
/// across ticks.
#[derive(Debug, Clone)]
pub struct BtContext {
    pub kind: EnemyKind,
    pub entity_position: Position,
    pub target_position: Position,
    pub health: f32,
    pub max_health: f32,
    /// Computed from a line-of-sight query before evaluation.
    pub target_visible: bool,
    /// Numbered cooldown slots, decremented by dt each tick.
    pub cooldowns: [f32; COOLDOWN_SLOTS],
    /// Per-node success counters for repeater decorators.
    repeat_counts: HashMap<usize, u32>,
    /// Output side-channel: the action selected by the last evaluation.
    pub action: Option<BtAction>,
    pub action_parameter: f32,
}

impl BtContext {
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            entity_position: Position::default(),
            target_position: Position::default(),
            health: 0.0,
            max_health: 1.0,
            target_visible: false,
            cooldowns: [0.0; COOLDOWN_SLOTS],
            repeat_counts: HashMap::new(),
            action: None,
            action_parameter: 0.0,
        }
    }

    /// Load current world data and clear the previous output.
    pub fn refresh(
        &mut self,
        entity_position: Position,
        target_position: Position,
        health: f32,
        max_health: f32,
        target_visible: bool,
    ) {
        self.entity_position = entity_position;
        self.target_position = target_position;
        self.health = health;
        self.max_health = max_health;
        self.target_visible = target_visible;
        self.action = None;
        self.action_parameter = 0.0;
    }

    /// Decay all cooldown slots by `dt`, clamping at zero.
    pub fn tick_cooldowns(&mut self, dt: f32) {
        for slot in &mut self.cooldowns {
            if *slot > 0.0 {
                *slot = (*slot - dt).max(0.0);
            }
        }
    }

    pub fn cooldown_ready(&self, slot: usize) -> bool {
        self.cooldowns.get(slot).is_some_and(|&c| c <= 0.0)
    }

    pub fn set_cooldown(&mut self, slot: usize, secs: f32) {
        if let Some(c) = self.cooldowns.get_mut(slot) {
            *c = secs;
        }
    }

    pub fn distance_to_target(&self) -> f32 {
        self.entity_position.range_to(&self.target_position)
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.health / self.max_health
    }

    pub(crate) fn repeat_count(&self, node: usize) -> u32 {
        self.repeat_counts.get(&node).copied().unwrap_or(0)
    }

    pub(crate) fn set_repeat_count(&mut self, node: usize, count: u32) {
        if count == 0 {
            self.repeat_counts.remove(&node);
        } else {
            self.repeat_counts.insert(node, count);
        }
    }
}
