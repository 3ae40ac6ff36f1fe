//! Kinematic integration backend.
//!
//! Two implementors share one numeric contract: velocity update before
//! position update, same gravity constant. The vectorized path is the
//! primary; the scalar path serves any call the primary cannot, and
//! the whole session when the primary is unavailable at startup.

use log::warn;

use holdout_bt::backend::BackendError;
use holdout_core::constants::GRAVITY;
use holdout_core::types::{Position, Velocity};

/// One integration strategy. Euler: gravity into velocity first, then
/// velocity into position.
pub trait KinematicsBackend {
    fn name(&self) -> &'static str;

    fn integrate(
        &self,
        position: &mut Position,
        velocity: &mut Velocity,
        dt: f32,
    ) -> Result<(), BackendError>;
}

/// Primary path: glam vector math.
#[derive(Debug, Default)]
pub struct VectorizedKinematics;

impl KinematicsBackend for VectorizedKinematics {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn integrate(
        &self,
        position: &mut Position,
        velocity: &mut Velocity,
        dt: f32,
    ) -> Result<(), BackendError> {
        velocity.y -= GRAVITY * dt;
        let p = position.as_vec3() + velocity.as_vec3() * dt;
        *position = Position::from_vec3(p);
        Ok(())
    }
}

/// Fallback path: plain per-component arithmetic. Numerically
/// identical to the vectorized path.
#[derive(Debug, Default)]
pub struct ScalarKinematics;

impl KinematicsBackend for ScalarKinematics {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn integrate(
        &self,
        position: &mut Position,
        velocity: &mut Velocity,
        dt: f32,
    ) -> Result<(), BackendError> {
        velocity.y -= GRAVITY * dt;
        position.x += velocity.x * dt;
        position.y += velocity.y * dt;
        position.z += velocity.z * dt;
        Ok(())
    }
}

/// Front door for the physics step: integrates through the primary
/// backend, silently serving failed calls from the scalar fallback.
pub struct Kinematics {
    primary: Option<Box<dyn KinematicsBackend>>,
    fallback: ScalarKinematics,
}

impl Kinematics {
    pub fn new() -> Self {
        Self {
            primary: Some(Box::new(VectorizedKinematics)),
            fallback: ScalarKinematics,
        }
    }

    /// Inject an explicit primary; `None` models a failed startup
    /// initialization (scalar path for the session).
    pub fn with_primary(primary: Option<Box<dyn KinematicsBackend>>) -> Self {
        if primary.is_none() {
            warn!("kinematics backend unavailable, using scalar path for the session");
        }
        Self {
            primary,
            fallback: ScalarKinematics,
        }
    }

    pub fn active_backend(&self) -> &'static str {
        match &self.primary {
            Some(backend) => backend.name(),
            None => self.fallback.name(),
        }
    }

    /// Integrate one entity. Never fails.
    pub fn integrate(&self, position: &mut Position, velocity: &mut Velocity, dt: f32) {
        if let Some(primary) = &self.primary {
            match primary.integrate(position, velocity, dt) {
                Ok(()) => return,
                Err(err) => {
                    warn!("{} kinematics failed, falling back: {err}", primary.name());
                }
            }
        }
        // The scalar path is pure arithmetic and cannot fail.
        let _ = self.fallback.integrate(position, velocity, dt);
    }
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::new()
    }
}
