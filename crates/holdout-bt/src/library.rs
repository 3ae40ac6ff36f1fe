//! Per-type behavior tree construction.
//!
//! One tree per enemy kind, built once when the controller spawns.
//! Numbers here are the type's personality: speeds, ranges, damage,
//! and which cooldown slot gates each ability.

use holdout_core::enums::EnemyKind;

use crate::tree::{BehaviorTree, BtAction, BtCondition};

/// Cooldown slot assignments. Slot 0 is reserved for the controller's
/// basic attack cycle.
const SNIPER_SHOT_SLOT: usize = 1;
const TANK_CHARGE_SLOT: usize = 2;
const SCOUT_STRIKE_SLOT: usize = 3;
const BOSS_NOVA_SLOT: usize = 4;
const BOSS_BARRAGE_SLOT: usize = 5;
const BOSS_SLAM_SLOT: usize = 6;

/// Special ability ids carried in the `Special` action parameter.
pub const SPECIAL_CHARGE: f32 = 1.0;
pub const SPECIAL_CIRCLE: f32 = 2.0;
pub const SPECIAL_NOVA: f32 = 3.0;
pub const SPECIAL_BARRAGE: f32 = 4.0;
pub const SPECIAL_SLAM: f32 = 5.0;

/// Build the behavior tree for an enemy kind.
pub fn build_tree(kind: EnemyKind) -> BehaviorTree {
    match kind {
        EnemyKind::Grunt => grunt_tree(),
        EnemyKind::Sniper => sniper_tree(),
        EnemyKind::Tank => tank_tree(),
        EnemyKind::Scout => scout_tree(),
        EnemyKind::Boss => boss_tree(),
    }
}

/// Grunts chase and swing at melee range, breaking off when badly hurt.
fn grunt_tree() -> BehaviorTree {
    let mut tree = BehaviorTree::new();

    let low_health = tree.condition(BtCondition::HealthBelow(0.3));
    let flee = tree.action(BtAction::Flee, 10.0);
    let flee_seq = tree.sequence(&[low_health, flee]);

    let in_range = tree.condition(BtCondition::TargetWithin(2.0));
    let attack = tree.action(BtAction::Attack, 10.0);
    let attack_seq = tree.sequence(&[in_range, attack]);

    let chase = tree.action(BtAction::MoveToTarget, 5.0);

    let root = tree.selector(&[flee_seq, attack_seq, chase]);
    tree.set_root(root);
    tree
}

/// Snipers hold distance: back off when crowded, fire a slow heavy
/// shot when the lane is open, reposition otherwise.
fn sniper_tree() -> BehaviorTree {
    let mut tree = BehaviorTree::new();

    let low_health = tree.condition(BtCondition::HealthBelow(0.4));
    let flee = tree.action(BtAction::Flee, 8.0);
    let flee_seq = tree.sequence(&[low_health, flee]);

    let too_close = tree.condition(BtCondition::TargetWithin(10.0));
    let back_away = tree.action(BtAction::Flee, 6.0);
    let back_off_seq = tree.sequence(&[too_close, back_away]);

    let in_range = tree.condition(BtCondition::TargetWithin(30.0));
    let visible = tree.condition(BtCondition::TargetVisible);
    let shot_ready = tree.condition(BtCondition::CooldownReady(SNIPER_SHOT_SLOT));
    let shoot = tree.action(BtAction::Attack, 25.0);
    let rearm = tree.action(BtAction::SetCooldown { slot: SNIPER_SHOT_SLOT }, 3.0);
    let shoot_seq = tree.sequence(&[in_range, visible, shot_ready, shoot, rearm]);

    let reposition = tree.action(BtAction::MoveToTarget, 3.0);

    let root = tree.selector(&[flee_seq, back_off_seq, shoot_seq, reposition]);
    tree.set_root(root);
    tree
}

/// Tanks grind forward, opening with a charge when it comes off
/// cooldown at mid range.
fn tank_tree() -> BehaviorTree {
    let mut tree = BehaviorTree::new();

    let charge_ready = tree.condition(BtCondition::CooldownReady(TANK_CHARGE_SLOT));
    let in_charge_range = tree.condition(BtCondition::TargetWithin(15.0));
    let charge = tree.action(BtAction::Special, SPECIAL_CHARGE);
    let rearm = tree.action(BtAction::SetCooldown { slot: TANK_CHARGE_SLOT }, 10.0);
    let charge_seq = tree.sequence(&[charge_ready, in_charge_range, charge, rearm]);

    let in_range = tree.condition(BtCondition::TargetWithin(3.0));
    let attack = tree.action(BtAction::Attack, 20.0);
    let attack_seq = tree.sequence(&[in_range, attack]);

    let advance = tree.action(BtAction::MoveToTarget, 3.0);

    let root = tree.selector(&[charge_seq, attack_seq, advance]);
    tree.set_root(root);
    tree
}

/// Scouts strike and disengage, circling at mid range between passes.
fn scout_tree() -> BehaviorTree {
    let mut tree = BehaviorTree::new();

    let in_strike_range = tree.condition(BtCondition::TargetWithin(5.0));
    let strike_ready = tree.condition(BtCondition::CooldownReady(SCOUT_STRIKE_SLOT));
    let strike = tree.action(BtAction::Attack, 8.0);
    let rearm = tree.action(BtAction::SetCooldown { slot: SCOUT_STRIKE_SLOT }, 2.0);
    let disengage = tree.action(BtAction::Flee, 12.0);
    let hit_and_run = tree.sequence(&[in_strike_range, strike_ready, strike, rearm, disengage]);

    let in_circle_range = tree.condition(BtCondition::TargetWithin(10.0));
    let circle = tree.action(BtAction::Special, SPECIAL_CIRCLE);
    let circle_seq = tree.sequence(&[in_circle_range, circle]);

    let approach = tree.action(BtAction::MoveToTarget, 8.0);

    let root = tree.selector(&[hit_and_run, circle_seq, approach]);
    tree.set_root(root);
    tree
}

/// Bosses run two phases keyed on half health, each a selector of
/// cooldown-gated specials over a melee-and-chase baseline.
fn boss_tree() -> BehaviorTree {
    let mut tree = BehaviorTree::new();

    // Phase 2 (below 50%): nova and barrage specials, harder melee.
    let nova_ready = tree.condition(BtCondition::CooldownReady(BOSS_NOVA_SLOT));
    let nova = tree.action(BtAction::Special, SPECIAL_NOVA);
    let nova_rearm = tree.action(BtAction::SetCooldown { slot: BOSS_NOVA_SLOT }, 8.0);
    let nova_seq = tree.sequence(&[nova_ready, nova, nova_rearm]);

    let barrage_ready = tree.condition(BtCondition::CooldownReady(BOSS_BARRAGE_SLOT));
    let barrage = tree.action(BtAction::Special, SPECIAL_BARRAGE);
    let barrage_rearm = tree.action(BtAction::SetCooldown { slot: BOSS_BARRAGE_SLOT }, 12.0);
    let barrage_seq = tree.sequence(&[barrage_ready, barrage, barrage_rearm]);

    let p2_in_range = tree.condition(BtCondition::TargetWithin(4.0));
    let p2_attack = tree.action(BtAction::Attack, 30.0);
    let p2_attack_seq = tree.sequence(&[p2_in_range, p2_attack]);

    let p2_chase = tree.action(BtAction::MoveToTarget, 6.0);
    let phase2_options = tree.selector(&[nova_seq, barrage_seq, p2_attack_seq, p2_chase]);

    let below_half = tree.condition(BtCondition::HealthBelow(0.5));
    let phase2 = tree.sequence(&[below_half, phase2_options]);

    // Phase 1: slam special over the baseline.
    let slam_ready = tree.condition(BtCondition::CooldownReady(BOSS_SLAM_SLOT));
    let slam = tree.action(BtAction::Special, SPECIAL_SLAM);
    let slam_rearm = tree.action(BtAction::SetCooldown { slot: BOSS_SLAM_SLOT }, 15.0);
    let slam_seq = tree.sequence(&[slam_ready, slam, slam_rearm]);

    let p1_in_range = tree.condition(BtCondition::TargetWithin(5.0));
    let p1_attack = tree.action(BtAction::Attack, 20.0);
    let p1_attack_seq = tree.sequence(&[p1_in_range, p1_attack]);

    let p1_chase = tree.action(BtAction::MoveToTarget, 4.0);
    let phase1 = tree.selector(&[slam_seq, p1_attack_seq, p1_chase]);

    let root = tree.selector(&[phase2, phase1]);
    tree.set_root(root);
    tree
}
