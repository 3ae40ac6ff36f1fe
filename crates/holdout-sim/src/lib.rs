//! Simulation engine for HOLDOUT.
//!
//! Owns the hecs ECS world, spawns and despawns enemies, and runs the
//! per-tick pipeline: sense/decide → physics → collision notify →
//! cleanup → snapshot. Completely headless (no renderer dependency),
//! enabling deterministic testing.

pub mod backend;
pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
