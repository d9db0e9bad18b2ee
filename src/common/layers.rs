//! Collision layers and body tags.
//!
//! Layers decide *whether* two bodies touch. Tags decide *what it means* when
//! they do: collision dispatch only ever looks at `BodyTag`.

use avian3d::prelude::*;
use bevy::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    PlayerProjectile,
}

/// Classification attached to every gameplay body.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyTag {
    World,
    Player,
    Enemy,
    PlayerProjectile,
}
