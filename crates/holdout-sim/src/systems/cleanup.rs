//! Cleanup system: collects corpses whose grace period has elapsed.
//!
//! Removal itself happens at the tick boundary via the engine's
//! despawn buffer, never mid-iteration.

use hecs::World;

use holdout_core::components::{Corpse, EntityId};

/// Collect entity ids due for removal into the despawn buffer.
pub fn run(world: &World, now_secs: f32, despawn_buffer: &mut Vec<u32>) {
    despawn_buffer.clear();
    let mut query = world.query::<(&EntityId, &Corpse)>();
    for (_entity, (id, corpse)) in query.iter() {
        if now_secs >= corpse.remove_at_secs {
            despawn_buffer.push(id.0);
        }
    }
}
