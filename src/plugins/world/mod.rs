//! World plugin: the arena floor.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{BodyTag, Layer};

/// Half extent of the visible floor on X and Z. The collider itself is unbounded.
pub const FLOOR_HALF_EXTENT: f32 = 50.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct Floor;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_floor);
}

/// A static half-space whose surface is the plane y = 0.
///
/// The mesh is attached by the render-only visuals plugin.
fn spawn_floor(mut commands: Commands) {
    let floor_layers = CollisionLayers::new(
        Layer::World,
        [Layer::Player, Layer::Enemy, Layer::PlayerProjectile],
    );

    commands.spawn((
        Name::new("Floor"),
        Floor,
        BodyTag::World,
        Transform::IDENTITY,
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
        floor_layers,
    ));
}
