//! Simulation ordering.
//!
//! One fixed tick runs, in order:
//!
//! ```text
//!   physics step (Avian) -> CollisionStart messages
//!   Collisions   tag collisions, apply projectile hits and body contact
//!   Player       movement forces
//!   Projectiles  fire requests, expiry
//!   Steering     enemy forces
//!   Combat       enemy attack cycles
//!   Lifecycle    player damage, deaths, respawns, periodic spawns
//! ```
//!
//! Collision-driven deaths land before `Steering`/`Combat`, so an enemy killed
//! this tick never attacks this tick.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Collisions,
    Player,
    Projectiles,
    Steering,
    Combat,
    Lifecycle,
}
