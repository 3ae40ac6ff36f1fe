//! Spatial queries and path planning for HOLDOUT.
//!
//! Implements ray and sphere intersection tests against the static
//! level geometry, line-of-sight checks, and a coarse walkable-grid
//! path planner with a line-of-sight fallback for worlds without a
//! grid.

pub mod grid;
pub mod path;
pub mod query;
pub mod world;

pub use grid::NavGrid;
pub use query::{check_sphere_collision, has_line_of_sight, ray_cast, ray_sphere, RayHit};
pub use world::{StaticCollider, StaticWorld};
