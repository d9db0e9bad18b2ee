//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()`
//! after running so queued commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::message::{Message, MessageReader, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Ensure the backing storage for a message type exists.
pub fn init_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Collect every message of type `M` currently buffered in the world.
pub fn drain_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    init_messages::<M>(world);
    run_system_once(world, collect_messages::<M>)
}

fn collect_messages<M: Message + Clone>(mut reader: MessageReader<M>) -> Vec<M> {
    reader.read().cloned().collect()
}

/// A fixed clock whose last step was `dt` long.
pub fn fixed_time_with_delta(dt: f32) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

/// Advance an already-inserted fixed clock by `dt`.
pub fn advance_fixed(world: &mut World, dt: Duration) {
    world.resource_mut::<Time<Fixed>>().advance_by(dt);
}

/// Drop every buffered message of type `M`, so the next fresh reader starts empty.
pub fn clear_messages<M: Message>(world: &mut World) {
    init_messages::<M>(world);
    world.resource_mut::<Messages<M>>().clear();
}
