//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `eyeball_arena::game::configure_headless` to install gameplay plugins.
//!
//! Time is driven manually: every `app.update()` advances virtual time by exactly
//! one fixed timestep, so each frame runs exactly one simulation tick.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use eyeball_arena::common::state::GameState;
use eyeball_arena::plugins::enemies::Enemy;
use eyeball_arena::plugins::player::Player;

/// Bevy's default fixed timestep (64 Hz).
pub const TICK: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists; Avian wants mesh assets.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.init_asset::<Mesh>();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    eyeball_arena::game::configure_headless(&mut app);
    // `App::run` normally does this; tests drive `update()` directly, and Avian
    // initializes some resources (e.g. `CollisionDiagnostics`) in `Plugin::finish`.
    app.finish();
    app.cleanup();
    app
}

pub fn run_ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

pub fn request_state(app: &mut App, to: GameState) {
    app.world_mut().resource_mut::<NextState<GameState>>().set(to);
}

pub fn enemies(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<Entity, With<Enemy>>()
        .iter(app.world())
        .collect()
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player")
}

/// Tick until at least one enemy exists.
pub fn run_until_enemy(app: &mut App) -> Entity {
    for _ in 0..1_000 {
        app.update();
        if let Some(&e) = enemies(app).first() {
            return e;
        }
    }
    panic!("no enemy spawned");
}
