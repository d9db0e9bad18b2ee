//! Physics plugin: Avian 3D plus the ordering of everything that reacts to it.

use avian3d::collision::narrow_phase::CollisionEventSystems;
use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::schedule::SimulationSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::player_alive;

pub fn plugin(app: &mut App) {
    let g = app.world().resource::<Tunables>().gravity;
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::NEG_Y * g));

    app.configure_sets(
        FixedPostUpdate,
        (
            SimulationSet::Collisions,
            SimulationSet::Player,
            SimulationSet::Projectiles,
            SimulationSet::Steering,
            SimulationSet::Combat,
            SimulationSet::Lifecycle,
        )
            .chain()
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame))
            .run_if(player_alive),
    );
}
