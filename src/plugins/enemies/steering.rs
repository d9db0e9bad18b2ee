//! Enemy steering: weightless float, hover bob, chase, soft height clamp.
//!
//! Everything except the height clamp goes through Avian's force interface.
//! `ConstantForce` persists across physics steps, so it is rewritten (not added
//! to) every tick: the value written here is this tick's total force.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::{Enemy, EnemyLife};
use crate::common::tunables::{EnemyTunables, Tunables};
use crate::plugins::player::Player;

/// Force that keeps the body afloat: gravity cancelled plus a sinusoidal bob.
#[inline]
pub fn float_force(mass: f32, gravity: Vec3, elapsed_secs: f32, tuning: &EnemyTunables) -> Vec3 {
    let bob = tuning.hover_amplitude * (tuning.hover_frequency * elapsed_secs).sin();
    -gravity * mass + Vec3::Y * bob
}

/// Force towards `target`, or zero once inside the hold range.
#[inline]
pub fn chase_force(position: Vec3, target: Vec3, tuning: &EnemyTunables) -> Vec3 {
    let offset = target - position;
    if offset.length() > tuning.hold_range {
        offset.normalize_or_zero() * tuning.chase_force
    } else {
        Vec3::ZERO
    }
}

/// Soft ceiling and floor on the vertical velocity.
#[inline]
pub fn clamp_height(height: f32, mut velocity: Vec3, tuning: &EnemyTunables) -> Vec3 {
    if height > tuning.ceiling {
        velocity.y *= tuning.ceiling_damping;
    }
    if height < tuning.floor {
        velocity.y += tuning.floor_push;
    }
    velocity
}

pub fn steer_enemies(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    gravity: Res<Gravity>,
    q_target: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut q: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut ConstantForce,
            &Mass,
            &EnemyLife,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let tuning = &tunables.enemy;
    let target = q_target.single().ok().map(|tf| tf.translation);
    let elapsed = time.elapsed_secs();

    for (mut tf, mut vel, mut force, mass, life) in &mut q {
        if !life.is_alive() {
            continue;
        }

        let mut total = float_force(mass.0, gravity.0, elapsed, tuning);

        if let Some(target) = target {
            tf.look_at(target, Vec3::Y);
            total += chase_force(tf.translation, target, tuning);
            vel.0 = clamp_height(tf.translation.y, vel.0, tuning);
        }

        force.0 = total;
    }
}
