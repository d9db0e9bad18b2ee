//! Enemies plugin: floating eyeballs that chase the player and discharge bolts.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! 1) FACTS live in components:
//!    - `Health`, `EnemyLife` describe gameplay reality.
//!    - `AttackCycle` is the attack state machine (see `combat`).
//!    - `Telegraph`, `HitFlash`, `Bolt` are presentation state derived from the facts.
//!
//! 2) RULES mutate facts in one place each:
//!    - `apply_projectile_hits` is the only writer of `Health` and the only place an
//!      enemy dies. Death flips `EnemyLife` in place, so every later system in the
//!      same tick already sees it.
//!    - `steering` writes forces, `combat` advances the attack cycle.
//!
//! 3) STRUCTURAL changes are deferred:
//!    - dead enemies stop interacting immediately (empty collision filters, zero
//!      force, bolt released) but are despawned by a sweep in PostUpdate.
//!
//! The Lifecycle Manager (`session`) hears about deaths through `EnemyDied` and
//! owns score and respawning.

use avian3d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::common::layers::{BodyTag, Layer};
use crate::common::rng::GameRng;
use crate::common::schedule::SimulationSet;
use crate::common::tunables::Tunables;
use crate::plugins::bolt::Bolt;
use crate::plugins::collision::{TaggedCollision, classify_collisions};

pub mod combat;
pub mod steering;

pub use combat::{AttackCycle, AttackEvent, AttackState};

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

/// Hit points. Only ever goes down.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    hp: u32,
}

impl Health {
    pub fn new(hp: u32) -> Self {
        Self { hp }
    }

    #[inline]
    pub fn hp(self) -> u32 {
        self.hp
    }

    /// Remove one hit point. Returns true on the hit that reaches zero.
    #[inline]
    pub fn wear_one(&mut self) -> bool {
        let was_alive = self.hp > 0;
        self.hp = self.hp.saturating_sub(1);
        was_alive && self.hp == 0
    }
}

/// Enemy lifecycle.
///
/// Kept as a component that is always present so a death is visible to the
/// rest of the tick without waiting for deferred commands.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnemyLife {
    #[default]
    Alive,
    /// Terminal. Swept in PostUpdate.
    Dead,
}

impl EnemyLife {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Charge telegraph pulse in `[0, 1]`; 0 when not charging.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Telegraph(pub f32);

/// Remaining seconds of the white hit flash.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct HitFlash(pub f32);

impl HitFlash {
    #[inline]
    pub fn is_active(self) -> bool {
        self.0 > 0.0
    }

    #[inline]
    pub fn tick_down(&mut self, dt: f32) {
        self.0 = (self.0 - dt).max(0.0);
    }
}

// -----------------------------------------------------------------------------
// Messages
// -----------------------------------------------------------------------------

/// Written exactly once per enemy, on the hit that kills it.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyDied {
    pub enemy: Entity,
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_message::<EnemyDied>();

    app.add_systems(
        FixedPostUpdate,
        apply_projectile_hits
            .after(classify_collisions)
            .in_set(SimulationSet::Collisions),
    );
    app.add_systems(
        FixedPostUpdate,
        steering::steer_enemies.in_set(SimulationSet::Steering),
    );
    app.add_systems(
        FixedPostUpdate,
        (combat::advance_attack_cycles, fade_hit_flashes).in_set(SimulationSet::Combat),
    );

    app.add_systems(PostUpdate, despawn_dead_enemies);
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

#[inline]
fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Player, Layer::Enemy, Layer::PlayerProjectile],
    )
}

/// Membership stays `Enemy` but nothing is filtered in, so no new contacts start.
#[inline]
fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

/// Spawn one enemy at a random point of the spawn area.
///
/// Only gameplay and physics components are added here; meshes and lights are
/// attached by the render-only visuals plugin.
pub fn spawn_enemy(commands: &mut Commands, tunables: &Tunables, rng: &mut GameRng) -> Entity {
    let spawn = &tunables.spawn;
    let enemy = &tunables.enemy;

    let x = rng.gen_range(spawn.area_min.x..spawn.area_max.x);
    let z = rng.gen_range(spawn.area_min.y..spawn.area_max.y);
    let position = Vec3::new(x, spawn.height, z);

    let e = commands
        .spawn((
            (
                Name::new("Eyeball"),
                Enemy,
                BodyTag::Enemy,
                Health::new(enemy.max_health),
                EnemyLife::Alive,
                AttackCycle::spawned(&tunables.attack, rng),
                Telegraph::default(),
                HitFlash::default(),
                Bolt::default(),
            ),
            (
                Transform::from_translation(position),
                RigidBody::Dynamic,
                Collider::sphere(enemy.radius),
                Mass(enemy.mass),
                LinearDamping(enemy.linear_damping),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::ZERO,
                ConstantForce::default(),
                enemy_layers(),
                CollisionEventsEnabled,
            ),
        ))
        .id();

    info!("enemy {e:?} spawned at {position}");
    e
}

// -----------------------------------------------------------------------------
// Rules: damage and death
// -----------------------------------------------------------------------------

/// Player-fired projectiles take one hit point per contact.
///
/// Anything else touching an enemy is ignored here. A hit on an enemy that is
/// already dead (including one killed earlier in the same tick) does nothing,
/// so each enemy reports exactly one death. Projectiles are not consumed.
pub fn apply_projectile_hits(
    tunables: Res<Tunables>,
    mut collisions: MessageReader<TaggedCollision>,
    mut died: MessageWriter<EnemyDied>,
    mut q: Query<
        (
            &mut Health,
            &mut EnemyLife,
            &mut HitFlash,
            &mut CollisionLayers,
            &mut ConstantForce,
            &mut Telegraph,
            &mut Bolt,
        ),
        With<Enemy>,
    >,
) {
    for hit in collisions.read() {
        if hit.subject_tag != BodyTag::Enemy || hit.other_tag != Some(BodyTag::PlayerProjectile) {
            continue;
        }

        let Ok((mut health, mut life, mut flash, mut layers, mut force, mut telegraph, mut bolt)) =
            q.get_mut(hit.subject)
        else {
            debug!("projectile hit on {:?}, which is not an enemy body", hit.subject);
            continue;
        };

        if !life.is_alive() {
            continue;
        }

        flash.0 = tunables.enemy.hit_flash_secs;

        if !health.wear_one() {
            continue;
        }

        *life = EnemyLife::Dead;
        *layers = non_interacting_enemy_layers();
        force.0 = Vec3::ZERO;
        telegraph.0 = 0.0;
        bolt.clear();

        info!("enemy {:?} destroyed", hit.subject);
        died.write(EnemyDied { enemy: hit.subject });
    }
}

pub fn fade_hit_flashes(time: Res<Time<Fixed>>, mut q: Query<&mut HitFlash>) {
    let dt = time.delta_secs();
    for mut flash in &mut q {
        if flash.is_active() {
            flash.tick_down(dt);
        }
    }
}

// -----------------------------------------------------------------------------
// Cleanup (PostUpdate)
// -----------------------------------------------------------------------------

/// Despawn enemies whose life ended. Children (lights, meshes) go with them.
pub fn despawn_dead_enemies(mut commands: Commands, q: Query<(Entity, &EnemyLife), With<Enemy>>) {
    for (e, life) in &q {
        if !life.is_alive() {
            commands.entity(e).despawn();
        }
    }
}
