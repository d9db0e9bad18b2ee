use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::Projectile;
use super::messages::FireRequest;
use crate::common::layers::{BodyTag, Layer};
use crate::common::tunables::{ProjectileTunables, Tunables};

#[inline]
fn projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerProjectile, [Layer::World, Layer::Enemy])
}

/// Where a shot fired from `eye` along `direction` appears.
#[inline]
pub fn muzzle_position(eye: Vec3, direction: Vec3, tuning: &ProjectileTunables) -> Vec3 {
    eye + direction * tuning.muzzle_distance + tuning.muzzle_offset
}

/// Consumer: one projectile per request.
///
/// Meshes and lights are attached by the render-only visuals plugin.
pub fn fire_projectiles(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut requests: MessageReader<FireRequest>,
) {
    let tuning = &tunables.projectile;
    let now = time.elapsed();

    for req in requests.read() {
        let Some(direction) = req.direction.try_normalize() else {
            debug!("fire request with degenerate direction {}", req.direction);
            continue;
        };

        let position = muzzle_position(req.origin, direction, tuning);

        let e = commands
            .spawn((
                Name::new("Projectile"),
                Projectile::fired_at(now),
                BodyTag::PlayerProjectile,
                Transform::from_translation(position).looking_to(direction, Vec3::Y),
                RigidBody::Dynamic,
                Collider::sphere(tuning.radius),
                Mass(tuning.mass),
                LinearDamping(0.0),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity(direction * tuning.speed),
                projectile_layers(),
                CollisionEventsEnabled,
            ))
            .id();

        debug!("projectile {e:?} fired from {position}");
    }
}
