//! Player plugin.
//!
//! Pipeline:
//! - Update (render-only input plugin): sample devices, write the `PlayerInput` resource
//! - FixedPostUpdate / Player set: turn `PlayerInput` into a force in the look-yaw frame
//! - FixedPostUpdate / Collisions set: enemy bodies touching the player report damage
//! - FixedPostUpdate / Lifecycle set: apply every `PlayerDamage` of the tick, raise `GameOver`
//!
//! The player is spawned once at `Startup` and reset in place on restart, so
//! leaving and re-entering `InGame` (pause) never duplicates it.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{BodyTag, Layer};
use crate::common::schedule::SimulationSet;
use crate::common::tunables::{PlayerTunables, Tunables};
use crate::plugins::collision::{TaggedCollision, classify_collisions};

#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// Player hit points, clamped to `[0, max]`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHealth {
    hp: u32,
    max: u32,
}

impl PlayerHealth {
    pub fn new(max: u32) -> Self {
        Self { hp: max, max }
    }

    #[inline]
    pub fn hp(self) -> u32 {
        self.hp
    }

    #[inline]
    pub fn max(self) -> u32 {
        self.max
    }

    #[inline]
    pub fn is_dead(self) -> bool {
        self.hp == 0
    }

    /// Subtract `amount`. Returns true when this call took the player to zero.
    pub fn take(&mut self, amount: u32) -> bool {
        let was_alive = !self.is_dead();
        self.hp = self.hp.saturating_sub(amount);
        was_alive && self.is_dead()
    }

    pub fn reset(&mut self) {
        self.hp = self.max;
    }
}

/// Latest sampled intent. Written by whatever drives the player (devices, tests).
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct PlayerInput {
    /// x = strafe right, y = forward. Expected length <= 1.
    pub move_axis: Vec2,
    /// Radians around +Y; 0 looks down -Z.
    pub look_yaw: f32,
    pub look_pitch: f32,
    pub jump: bool,
}

impl PlayerInput {
    /// Orientation of the eye.
    pub fn look_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.look_yaw, self.look_pitch, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    /// A completed enemy charge.
    EnemyAttack,
    /// An enemy body touching the player.
    EnemyTouch,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerDamage {
    pub amount: u32,
    pub source: DamageSource,
}

impl PlayerDamage {
    pub fn enemy_attack(amount: u32) -> Self {
        Self {
            amount,
            source: DamageSource::EnemyAttack,
        }
    }

    pub fn enemy_touch(amount: u32) -> Self {
        Self {
            amount,
            source: DamageSource::EnemyTouch,
        }
    }
}

/// The player's health reached zero.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameOver;

/// Run condition: false once the player is down.
///
/// The state switch to `GameOver` lands on the next frame, so this keeps any
/// further fixed ticks of the current frame from simulating a finished round.
pub fn player_alive(q_player: Query<&PlayerHealth, With<Player>>) -> bool {
    q_player.iter().all(|health| !health.is_dead())
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_message::<PlayerDamage>()
        .add_message::<GameOver>()
        .add_systems(Startup, spawn_player)
        .add_systems(
            FixedPostUpdate,
            (
                apply_enemy_touch
                    .after(classify_collisions)
                    .in_set(SimulationSet::Collisions),
                apply_movement.in_set(SimulationSet::Player),
                apply_player_damage.in_set(SimulationSet::Lifecycle),
            ),
        );
}

pub fn spawn_player(mut commands: Commands, tunables: Res<Tunables>) {
    let p = &tunables.player;
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy]);

    let e = commands
        .spawn((
            Name::new("Player"),
            Player,
            BodyTag::Player,
            PlayerHealth::new(p.max_health),
            Transform::from_translation(p.spawn_position),
            RigidBody::Dynamic,
            Collider::sphere(p.radius),
            Mass(p.mass),
            LinearDamping(p.linear_damping),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::ZERO,
            ConstantForce::default(),
            layers,
            CollisionEventsEnabled,
        ))
        .id();

    info!("player {e:?} spawned");
}

/// Horizontal push for `input`, in the frame of the look yaw.
#[inline]
pub fn movement_force(input: &PlayerInput, tuning: &PlayerTunables) -> Vec3 {
    let yaw = Quat::from_rotation_y(input.look_yaw);
    let forward = yaw * Vec3::NEG_Z;
    let right = yaw * Vec3::X;
    let axis = input.move_axis.clamp_length_max(1.0);
    (right * axis.x + forward * axis.y) * tuning.move_force
}

pub fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&Transform, &mut LinearVelocity, &mut ConstantForce), With<Player>>,
) {
    let Ok((tf, mut vel, mut force)) = q_player.single_mut() else {
        return;
    };
    let tuning = &tunables.player;

    force.0 = movement_force(&input, tuning);

    if input.jump && tf.translation.y <= tuning.ground_height {
        vel.0.y = tuning.jump_speed;
    }
}

/// Any contact with an enemy body hurts.
pub fn apply_enemy_touch(
    tunables: Res<Tunables>,
    mut collisions: MessageReader<TaggedCollision>,
    mut damage: MessageWriter<PlayerDamage>,
) {
    for hit in collisions.read() {
        if hit.subject_tag == BodyTag::Player && hit.other_tag == Some(BodyTag::Enemy) {
            damage.write(PlayerDamage::enemy_touch(tunables.player.touch_damage));
        }
    }
}

pub fn apply_player_damage(
    mut incoming: MessageReader<PlayerDamage>,
    mut game_over: MessageWriter<GameOver>,
    mut q_player: Query<&mut PlayerHealth, With<Player>>,
) {
    let Ok(mut health) = q_player.single_mut() else {
        incoming.clear();
        return;
    };

    // Read the whole tick even after a lethal hit so nothing carries into the next round.
    for dmg in incoming.read() {
        if health.is_dead() {
            continue;
        }
        debug!("player takes {} ({:?})", dmg.amount, dmg.source);
        if health.take(dmg.amount) {
            info!("player died");
            game_over.write(GameOver);
        }
    }
}
