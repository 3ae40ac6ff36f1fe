//! Simulation engine — the core of the enemy behavior system.
//!
//! `SimulationEngine` owns the hecs ECS world, the static level
//! geometry, the decision and kinematics backends, and the per-enemy
//! behavior contexts. Each `tick` runs the full pipeline and returns
//! a snapshot for external collaborators. Entity additions and
//! removals happen only at tick boundaries.

use std::collections::HashMap;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use holdout_ai::fsm;
use holdout_ai::profiles::get_profile;
use holdout_bt::{BehaviorTree, BtContext, Evaluator};
use holdout_core::components::{AiController, Collider, Corpse, EnemyTag, Health, Knockback};
use holdout_core::config::SimConfig;
use holdout_core::constants::KNOCKBACK_IMPULSE;
use holdout_core::enums::{EnemyKind, WeaponKind};
use holdout_core::events::GameEvent;
use holdout_core::state::WorldSnapshot;
use holdout_core::types::{Position, SimTime, Velocity};
use holdout_nav::{NavGrid, StaticWorld};

use crate::backend::Kinematics;
use crate::score::{point_value, ScoreState};
use crate::systems;
use crate::systems::spawner::WaveSchedule;
use crate::world_setup;

/// What a scene ray cast hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayTarget {
    /// Index into the static collider set.
    Static(usize),
    /// A live entity's external id.
    Entity(u32),
}

/// Nearest intersection from a scene ray cast.
#[derive(Debug, Clone, Copy)]
pub struct SceneHit {
    pub point: Position,
    pub distance: f32,
    pub target: RayTarget,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    rng: ChaCha8Rng,
    statics: StaticWorld,
    nav: Option<NavGrid>,
    evaluator: Evaluator,
    kinematics: Kinematics,
    trees: HashMap<EnemyKind, BehaviorTree>,
    contexts: HashMap<u32, BtContext>,
    /// External ids in registration order; drives stable iteration.
    roster: Vec<u32>,
    id_map: HashMap<u32, hecs::Entity>,
    next_id: u32,
    player: Option<u32>,
    wave_schedule: WaveSchedule,
    despawn_buffer: Vec<u32>,
    events: Vec<GameEvent>,
    contacts: Vec<(u32, u32)>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new engine over the given level geometry. Pass a nav
    /// grid when one was baked for the level; without it the path
    /// planner uses its line-of-sight fallback.
    pub fn new(config: SimConfig, statics: StaticWorld, nav: Option<NavGrid>) -> Self {
        let seed = config.seed;
        Self {
            world: World::new(),
            time: SimTime::default(),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            statics,
            nav,
            evaluator: Evaluator::new(seed),
            kinematics: Kinematics::new(),
            trees: HashMap::new(),
            contexts: HashMap::new(),
            roster: Vec::new(),
            id_map: HashMap::new(),
            next_id: 0,
            player: None,
            wave_schedule: WaveSchedule::default(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            contacts: Vec::new(),
            score: ScoreState::default(),
        }
    }

    /// Replace the decision and kinematics backends. Init-once: meant
    /// to be called before the first tick, e.g. when startup probing
    /// found an accelerated path unavailable.
    pub fn with_backends(mut self, evaluator: Evaluator, kinematics: Kinematics) -> Self {
        self.evaluator = evaluator;
        self.kinematics = kinematics;
        self
    }

    // ---- Spawning ----

    /// Spawn the player entity.
    pub fn spawn_player(&mut self, position: Position) -> u32 {
        let id = self.allocate_id();
        let entity = world_setup::spawn_player(&mut self.world, id, position);
        self.register(id, entity);
        self.player = Some(id);
        id
    }

    /// Spawn a single enemy.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Position) -> u32 {
        let id = self.allocate_id();
        let entity = world_setup::spawn_enemy(
            &mut self.world,
            id,
            kind,
            position,
            self.config.difficulty,
        );
        self.register(id, entity);
        self.contexts.insert(id, BtContext::new(kind));
        id
    }

    /// Spawn an enemy from a raw type code. Unrecognized codes default
    /// to the baseline kind rather than failing the spawn.
    pub fn spawn_enemy_coded(&mut self, code: u32, position: Position) -> u32 {
        self.spawn_enemy(EnemyKind::from_code(code), position)
    }

    /// Install a wave schedule; due waves spawn at tick boundaries.
    pub fn set_wave_schedule(&mut self, schedule: WaveSchedule) {
        self.wave_schedule = schedule;
    }

    // ---- Inbound interface ----

    /// Apply damage to an entity from an anonymous source. Stale or
    /// unknown ids are silent no-ops.
    pub fn apply_damage(&mut self, target: u32, amount: f32, source_position: Position) {
        self.apply_damage_with(target, amount, source_position, None, WeaponKind::Unknown);
    }

    /// Apply damage with attacker attribution for kill events.
    pub fn apply_damage_with(
        &mut self,
        target: u32,
        amount: f32,
        source_position: Position,
        attacker: Option<u32>,
        weapon: WeaponKind,
    ) {
        let Some(&entity) = self.id_map.get(&target) else {
            return;
        };
        let amount = amount.max(0.0);

        let Ok(mut health) = self.world.get::<&mut Health>(entity) else {
            return;
        };
        if !health.alive {
            return;
        }
        let health_before = health.current;
        health.current = (health.current - amount).clamp(0.0, health.max);
        let died = health.current <= 0.0;
        if died {
            health.alive = false;
        }
        let health_remaining = health.current;
        let max_health = health.max;
        drop(health);

        if self.player == Some(target) {
            self.events.push(GameEvent::PlayerDamaged {
                amount,
                source_position,
                health_remaining,
            });
            return;
        }

        // Enemy reaction: knockback impulse plus the FSM damage
        // transition. Death pre-empts the reaction entirely.
        if let Ok(mut knockback) = self.world.get::<&mut Knockback>(entity) {
            let position = self
                .world
                .get::<&Position>(entity)
                .map(|p| *p)
                .unwrap_or_default();
            let dx = position.x - source_position.x;
            let dz = position.z - source_position.z;
            let length = (dx * dx + dz * dz).sqrt();
            if length > 1e-6 {
                knockback.velocity.x += dx / length * KNOCKBACK_IMPULSE;
                knockback.velocity.z += dz / length * KNOCKBACK_IMPULSE;
            }
        }

        if died {
            self.handle_enemy_death(target, entity, health_before, max_health, attacker, weapon);
        } else if let Ok(mut controller) = self.world.get::<&mut AiController>(entity) {
            let (reacted, _became_aware) = fsm::on_damage(&controller, source_position);
            *controller = reacted;
        }
    }

    /// Cast a ray against static geometry and all live entities,
    /// returning the nearest hit within `max_distance`. `exclude`
    /// skips the casting entity's own collider. A zero-length
    /// direction yields no hit.
    pub fn ray_cast(
        &self,
        origin: Position,
        direction: glam::Vec3,
        max_distance: f32,
        exclude: Option<u32>,
    ) -> Option<SceneHit> {
        if direction.length_squared() < 1e-12 {
            return None;
        }
        let dir = direction.normalize();

        let mut nearest = holdout_nav::ray_cast(&self.statics, &origin, dir, max_distance)
            .map(|hit| SceneHit {
                point: hit.point,
                distance: hit.distance,
                target: RayTarget::Static(hit.collider),
            });

        let o = origin.as_vec3();
        for &id in &self.roster {
            if exclude == Some(id) {
                continue;
            }
            let Some(&entity) = self.id_map.get(&id) else {
                continue;
            };
            let (Ok(position), Ok(collider), Ok(health)) = (
                self.world.get::<&Position>(entity),
                self.world.get::<&Collider>(entity),
                self.world.get::<&Health>(entity),
            ) else {
                continue;
            };
            if !health.alive {
                continue;
            }
            if let Some(t) = holdout_nav::ray_sphere(o, dir, position.as_vec3(), collider.radius)
            {
                if t <= max_distance && nearest.map_or(true, |h| t < h.distance) {
                    nearest = Some(SceneHit {
                        point: Position::from_vec3(o + dir * t),
                        distance: t,
                        target: RayTarget::Entity(id),
                    });
                }
            }
        }
        nearest
    }

    /// Make every living enemy within `radius` of `center` aware and
    /// send it toward the position. Reinforcement propagation.
    pub fn alert_group(&mut self, center: Position, radius: f32) {
        let radius_sq = radius * radius;
        for (_entity, (_tag, position, health, controller)) in self
            .world
            .query_mut::<(&EnemyTag, &Position, &Health, &mut AiController)>()
        {
            if !health.alive || controller.state.is_terminal() {
                continue;
            }
            if position.range_sq_to(&center) > radius_sq {
                continue;
            }
            let (alerted, _) = fsm::on_damage(controller, center);
            *controller = alerted;
        }
    }

    // ---- Tick ----

    /// Advance the simulation by `dt` seconds and return the snapshot.
    pub fn tick(&mut self, dt: f32) -> WorldSnapshot {
        if dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.roster,
            &self.id_map,
            self.time,
            events,
            self.score.view(),
        )
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Wave spawning (tick-boundary additions).
        let requests = systems::spawner::run(
            &mut self.wave_schedule,
            self.time.elapsed_secs,
            &mut self.rng,
        );
        for (kind, position) in requests {
            self.spawn_enemy(kind, position);
        }

        // 2. Sense/decide: FSM plus behavior evaluator per enemy.
        let output = systems::enemy_ai::run(
            &mut self.world,
            &self.roster,
            &self.id_map,
            &self.statics,
            self.nav.as_ref(),
            &mut self.evaluator,
            &mut self.trees,
            &mut self.contexts,
            &mut self.rng,
            &self.config.tuning,
            dt,
        );
        self.apply_attacks(&output.attacks);
        self.apply_alerts(&output.alerts);

        // 3. Physics integration and static collision resolution.
        systems::physics::run(
            &mut self.world,
            &self.roster,
            &self.id_map,
            &self.statics,
            &self.kinematics,
            dt,
        );

        // 4. Dynamic collision notifications.
        self.contacts =
            systems::collision::run(&self.world, &self.roster, &self.id_map);

        // 5. Corpse cleanup (tick-boundary removals).
        systems::cleanup::run(&self.world, self.time.elapsed_secs, &mut self.despawn_buffer);
        let due: Vec<u32> = self.despawn_buffer.drain(..).collect();
        for id in due {
            self.remove_entity(id);
        }
    }

    /// Enemy attacks resolve against the player, scaled by difficulty.
    fn apply_attacks(&mut self, attacks: &[(u32, f32)]) {
        let Some(player) = self.player else {
            return;
        };
        for &(attacker, damage) in attacks {
            let Some(position) = self.position_of(attacker) else {
                continue;
            };
            let scaled = damage * self.config.difficulty;
            self.events.push(GameEvent::AttackLanded {
                attacker,
                target: player,
                damage: scaled,
            });
            self.apply_damage_with(
                player,
                scaled,
                position,
                Some(attacker),
                WeaponKind::Contact,
            );
        }
    }

    fn apply_alerts(&mut self, alerts: &[(u32, Position)]) {
        let radius = self.config.tuning.alert_radius;
        for &(id, position) in alerts {
            self.events.push(GameEvent::EnemyAlerted {
                entity_id: id,
                position,
            });
            self.alert_group(position, radius);
        }
    }

    fn handle_enemy_death(
        &mut self,
        id: u32,
        entity: hecs::Entity,
        health_before: f32,
        max_health: f32,
        killer: Option<u32>,
        weapon: WeaponKind,
    ) {
        let (kind, position, aware) = {
            let kind = self
                .world
                .get::<&EnemyTag>(entity)
                .map(|tag| tag.kind)
                .unwrap_or_default();
            let position = self
                .world
                .get::<&Position>(entity)
                .map(|p| *p)
                .unwrap_or_default();
            let aware = self
                .world
                .get::<&AiController>(entity)
                .map(|c| c.aware)
                .unwrap_or(false);
            (kind, position, aware)
        };

        // Freeze the controller permanently.
        if let Ok(mut controller) = self.world.get::<&mut AiController>(entity) {
            *controller = fsm::kill(&controller);
        }
        if let Ok(mut velocity) = self.world.get::<&mut Velocity>(entity) {
            *velocity = Velocity::default();
        }

        let quick_kill = health_before
            >= max_health * self.config.tuning.quick_kill_health_fraction;
        let profile = get_profile(kind);
        let points = point_value(profile.base_points, aware, quick_kill);
        self.score.record_kill(points);

        self.events.push(GameEvent::EnemyKilled {
            entity_id: id,
            killer,
            weapon,
            position,
            kind,
            points,
        });
        if kind == EnemyKind::Boss {
            self.events.push(GameEvent::BossDefeated {
                entity_id: id,
                points,
            });
        }

        // Schedule removal after the grace period.
        let remove_at_secs = self.time.elapsed_secs + self.config.tuning.corpse_linger_secs;
        let _ = self.world.insert_one(entity, Corpse { remove_at_secs });
    }

    // ---- Bookkeeping ----

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn register(&mut self, id: u32, entity: hecs::Entity) {
        self.id_map.insert(id, entity);
        self.roster.push(id);
    }

    fn remove_entity(&mut self, id: u32) {
        if let Some(entity) = self.id_map.remove(&id) {
            let _ = self.world.despawn(entity);
        }
        self.roster.retain(|&r| r != id);
        self.contexts.remove(&id);
        if self.player == Some(id) {
            self.player = None;
        }
    }

    // ---- Read accessors for collaborators and tests ----

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player_id(&self) -> Option<u32> {
        self.player
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Dynamic collision pairs from the most recent tick.
    pub fn contacts(&self) -> &[(u32, u32)] {
        &self.contacts
    }

    pub fn is_registered(&self, id: u32) -> bool {
        self.id_map.contains_key(&id)
    }

    pub fn health_of(&self, id: u32) -> Option<Health> {
        self.component_of::<Health>(id)
    }

    pub fn position_of(&self, id: u32) -> Option<Position> {
        self.component_of::<Position>(id)
    }

    pub fn velocity_of(&self, id: u32) -> Option<Velocity> {
        self.component_of::<Velocity>(id)
    }

    pub fn controller_of(&self, id: u32) -> Option<AiController> {
        self.component_of::<AiController>(id)
    }

    pub fn collider_of(&self, id: u32) -> Option<Collider> {
        self.component_of::<Collider>(id)
    }

    /// Set the player's velocity (movement is owned by the out-of-scope
    /// input layer; this is its write interface).
    pub fn set_player_velocity(&mut self, velocity: Velocity) {
        let Some(player) = self.player else {
            return;
        };
        let Some(&entity) = self.id_map.get(&player) else {
            return;
        };
        if let Ok(mut v) = self.world.get::<&mut Velocity>(entity) {
            *v = velocity;
        }
    }

    fn component_of<T: hecs::Component + Copy>(&self, id: u32) -> Option<T> {
        let entity = *self.id_map.get(&id)?;
        self.world.get::<&T>(entity).ok().map(|c| *c)
    }
}
