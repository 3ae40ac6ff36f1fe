//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick at the default tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Physics ---

/// Gravitational acceleration (units/s²).
pub const GRAVITY: f32 = 9.8;

/// Ground plane height. Entities are clamped to this on landing.
pub const GROUND_Y: f32 = 0.0;

/// Restitution coefficient for bouncy entities on static collisions.
pub const RESTITUTION: f32 = 0.3;

/// Coarse distance threshold for static-collider candidate filtering.
pub const STATIC_PREFILTER_RANGE: f32 = 5.0;

/// Entities are integrated in fixed-size batches for locality.
/// Not a correctness-relevant value.
pub const PHYSICS_BATCH_SIZE: usize = 10;

/// Per-tick decay factor applied to knockback velocity.
pub const KNOCKBACK_FRICTION: f32 = 0.9;

/// Velocity components below this magnitude snap to exactly zero.
pub const VELOCITY_SNAP_EPSILON: f32 = 0.01;

/// Impulse magnitude applied away from a damage source (units/s).
pub const KNOCKBACK_IMPULSE: f32 = 2.0;

// --- Navigation ---

/// Default nav grid cell size (units).
pub const NAV_CELL_SIZE: f32 = 1.0;

/// Height assigned to synthesized waypoints (ground level for a
/// standing character).
pub const WAYPOINT_HEIGHT: f32 = 1.0;

// --- Behavior ---

/// Number of cooldown slots carried by each behavior context.
pub const COOLDOWN_SLOTS: usize = 8;

// --- Scoring ---

/// Point multiplier bonus for killing an enemy that had engaged.
pub const AWARE_KILL_BONUS: f32 = 0.2;

/// Point multiplier bonus for a quick kill (near full health).
pub const QUICK_KILL_BONUS: f32 = 0.3;

// --- Player defaults ---

/// Player starting health.
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Player collision radius.
pub const PLAYER_RADIUS: f32 = 0.8;
