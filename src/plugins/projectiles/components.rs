use std::time::Duration;

use bevy::prelude::*;

/// A player-fired projectile, stamped with the fixed-clock time it was fired.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    pub created_at: Duration,
}

impl Projectile {
    #[inline]
    pub fn fired_at(created_at: Duration) -> Self {
        Self { created_at }
    }

    #[inline]
    pub fn age(self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }

    /// Present strictly before `created_at + lifetime`, gone from then on.
    #[inline]
    pub fn is_expired(self, now: Duration, lifetime: Duration) -> bool {
        self.age(now) >= lifetime
    }
}
