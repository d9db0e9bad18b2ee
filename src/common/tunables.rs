//! Tunable gameplay constants.
//!
//! Everything that shapes how a round plays lives here, grouped by the
//! subsystem that reads it. `Default` is the shipped balance.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Downward gravity magnitude (m/s^2).
    pub gravity: f32,
    pub player: PlayerTunables,
    pub enemy: EnemyTunables,
    pub attack: AttackTunables,
    pub bolt: BoltTunables,
    pub projectile: ProjectileTunables,
    pub spawn: SpawnTunables,
}

#[derive(Debug, Clone)]
pub struct PlayerTunables {
    pub max_health: u32,
    pub radius: f32,
    pub mass: f32,
    pub linear_damping: f32,
    pub move_force: f32,
    pub jump_speed: f32,
    /// Height at or below which the player counts as grounded.
    pub ground_height: f32,
    pub spawn_position: Vec3,
    /// Damage taken when an enemy body touches the player.
    pub touch_damage: u32,
}

#[derive(Debug, Clone)]
pub struct EnemyTunables {
    pub max_health: u32,
    pub radius: f32,
    pub mass: f32,
    pub linear_damping: f32,
    pub chase_force: f32,
    /// Enemies stop closing distance once they are this close.
    pub hold_range: f32,
    pub hover_amplitude: f32,
    /// Angular frequency of the hover bob (rad/s).
    pub hover_frequency: f32,
    /// Above this height vertical velocity is damped.
    pub ceiling: f32,
    pub ceiling_damping: f32,
    /// Below this height the enemy is nudged upwards.
    pub floor: f32,
    pub floor_push: f32,
    /// How long the white flash lasts after a hit.
    pub hit_flash_secs: f32,
}

#[derive(Debug, Clone)]
pub struct AttackTunables {
    /// Enemies begin charging only when the target is closer than this.
    pub charge_range: f32,
    pub charge_secs: f32,
    pub shoot_secs: f32,
    /// First idle interval, drawn once at spawn.
    pub first_interval_secs: (f32, f32),
    /// Idle interval drawn after every completed shot.
    pub interval_secs: (f32, f32),
    pub damage: u32,
    /// Telegraph flash frequency at the start and end of a charge.
    pub flash_frequency: (f32, f32),
}

#[derive(Debug, Clone)]
pub struct BoltTunables {
    /// Polyline vertices per unit of distance.
    pub vertices_per_unit: f32,
    /// Full width of the per-axis jitter applied to interior vertices.
    pub jaggedness: f32,
    pub branch_chance: f32,
    /// Branching stops once recursion reaches this depth.
    pub max_depth: u8,
    /// Full width of the per-axis offset used to place a branch tip.
    pub branch_spread: f32,
    pub thickness: f32,
}

#[derive(Debug, Clone)]
pub struct ProjectileTunables {
    pub speed: f32,
    pub lifetime_secs: f32,
    pub radius: f32,
    pub mass: f32,
    /// Distance ahead of the eye where projectiles appear.
    pub muzzle_distance: f32,
    /// World-space nudge so shots leave from "the gun" rather than the eye.
    pub muzzle_offset: Vec3,
}

#[derive(Debug, Clone)]
pub struct SpawnTunables {
    pub max_enemies: usize,
    pub interval_secs: f32,
    pub score_per_kill: u32,
    pub height: f32,
    /// Horizontal spawn rectangle as (min, max) corners on the XZ plane.
    pub area_min: Vec2,
    pub area_max: Vec2,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            gravity: 9.82,
            player: PlayerTunables {
                max_health: 100,
                radius: 0.5,
                mass: 1.0,
                linear_damping: 0.9,
                move_force: 15.0,
                jump_speed: 5.0,
                ground_height: 0.6,
                spawn_position: Vec3::new(0.0, 2.0, 0.0),
                touch_damage: 10,
            },
            enemy: EnemyTunables {
                max_health: 3,
                radius: 1.0,
                mass: 5.0,
                linear_damping: 0.1,
                chase_force: 30.0,
                hold_range: 10.0,
                hover_amplitude: 2.0,
                hover_frequency: 2.0,
                ceiling: 5.0,
                ceiling_damping: 0.9,
                floor: 1.0,
                floor_push: 1.0,
                hit_flash_secs: 0.1,
            },
            attack: AttackTunables {
                charge_range: 20.0,
                charge_secs: 1.0,
                shoot_secs: 0.2,
                first_interval_secs: (2.0, 4.0),
                interval_secs: (3.0, 6.0),
                damage: 5,
                flash_frequency: (10.0, 30.0),
            },
            bolt: BoltTunables {
                vertices_per_unit: 5.0,
                jaggedness: 0.2,
                branch_chance: 0.05,
                max_depth: 2,
                branch_spread: 5.0,
                thickness: 1.0,
            },
            projectile: ProjectileTunables {
                speed: 100.0,
                lifetime_secs: 5.0,
                radius: 0.1,
                mass: 0.1,
                muzzle_distance: 1.0,
                muzzle_offset: Vec3::new(0.2, -0.2, 0.0),
            },
            spawn: SpawnTunables {
                max_enemies: 10,
                interval_secs: 3.0,
                score_per_kill: 100,
                height: 5.0,
                area_min: Vec2::new(-10.0, -20.0),
                area_max: Vec2::new(10.0, 0.0),
            },
        }
    }
}
