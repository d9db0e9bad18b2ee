//! Buffered fire requests.
//!
//! Producers create *intent*; the consumer in the fixed schedule turns each
//! request into exactly one projectile body.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct FireRequest {
    /// Eye position of the shooter.
    pub origin: Vec3,
    /// Look direction. Normalized by the consumer.
    pub direction: Vec3,
}
