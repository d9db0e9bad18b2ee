//! Timed expiry.
//!
//! Invariant: a projectile fired at `t0` is present at every fixed step before
//! `t0 + lifetime` and gone from the step that reaches it. Collisions never
//! shorten or extend that.

use std::time::Duration;

use bevy::prelude::*;

use super::components::Projectile;
use crate::common::tunables::Tunables;

pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    q: Query<(Entity, &Projectile)>,
) {
    let now = time.elapsed();
    let lifetime = Duration::from_secs_f32(tunables.projectile.lifetime_secs);

    for (e, projectile) in &q {
        if projectile.is_expired(now, lifetime) {
            commands.entity(e).despawn();
        }
    }
}
