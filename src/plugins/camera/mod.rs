//! Camera plugin (render-only): a first-person eye riding the player body.
//!
//! ```text
//! Startup:    spawn MainCamera
//! PostUpdate: follow_player copies the body position and the look angles
//! ```
//!
//! The player and camera queries are disjoint through `Without<...>` filters,
//! so one system may read the player `Transform` and write the camera's.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::player::{Player, PlayerInput};

#[derive(Component, Debug, Clone, Copy)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        PostUpdate,
        follow_player.before(TransformSystems::Propagate),
    );
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("MainCamera"),
        MainCamera,
        Camera3d::default(),
        Transform::from_translation(tunables.player.spawn_position),
    ));
}

fn follow_player(
    input: Res<PlayerInput>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_cam) = q_cam.single_mut() else {
        return;
    };

    tf_cam.translation = tf_player.translation;
    tf_cam.rotation = input.look_rotation();
}
