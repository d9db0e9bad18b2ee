//! Projectiles plugin: **message-based producer → consumer** firing + timed expiry.
//!
//! # Data flow
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: request_player_fire                                         │
//!│      - reads: MouseButton input, PlayerInput look, Player Transform        │
//!│      - writes: FireRequest message                                         │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate / SimulationSet::Projectiles (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (B) Consumer: fire_projectiles                                            │
//!│      - reads: FireRequest messages, Time<Fixed>                            │
//!│      - spawns: one tagged body per request, stamped with its fire time     │
//!│                                                                            │
//!│  (C) expire_projectiles                                                    │
//!│      - despawns every projectile aged >= lifetime                          │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never spawn bodies themselves; anything that can write a
//! `FireRequest` (input, tests, replays) fires the same way.
//!
//! Hits are not resolved here: a projectile is just a `BodyTag::PlayerProjectile`
//! body, and the enemies plugin reacts to `TaggedCollision`s that name it.
//! Projectiles are not consumed by a hit; they live out their lifetime.

pub mod components;
pub mod expire;
pub mod messages;
pub mod request;
pub mod spawn;

use bevy::prelude::*;

use crate::common::schedule::SimulationSet;
use crate::common::state::GameState;

pub use components::Projectile;
pub use messages::FireRequest;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FireRequest>();

        app.add_systems(
            Update,
            request::request_player_fire.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (spawn::fire_projectiles, expire::expire_projectiles)
                .chain()
                .in_set(SimulationSet::Projectiles),
        );
    }
}
