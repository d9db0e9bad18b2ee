//! Enemy attack cycle: Idle -> Charging -> Shooting -> Idle.
//!
//! `AttackCycle` is plain data with a pure `advance` step so the timing rules
//! can be tested without a world. Elapsed time is kept as `Duration` (integer
//! nanoseconds): a charge fed ticks that sum to exactly one second completes
//! on exactly that tick, whatever the frame rate.
//!
//! ```text
//!            timer > interval && distance < charge_range
//!   Idle ───────────────────────────────────────────────▶ Charging
//!    ▲                                                       │ charge_elapsed >= charge
//!    │ shoot_elapsed > shoot                                 ▼  (player takes damage,
//!    └──────────────────────────────────────────────────  Shooting  next interval drawn)
//! ```

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::{Enemy, EnemyLife, Telegraph};
use crate::common::rng::GameRng;
use crate::common::tunables::{AttackTunables, Tunables};
use crate::plugins::bolt::{Bolt, generate_bolt};
use crate::plugins::player::{Player, PlayerDamage};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttackState {
    #[default]
    Idle,
    Charging,
    Shooting,
}

/// A transition taken during one `advance` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackEvent {
    ChargeStarted,
    /// Charge completed: the attack lands on the target.
    Fired,
    Recovered,
}

#[derive(Component, Debug, Clone)]
pub struct AttackCycle {
    state: AttackState,
    shoot_timer: Duration,
    shoot_interval: Duration,
    charge_elapsed: Duration,
    shoot_elapsed: Duration,
}

impl AttackCycle {
    pub fn new(first_interval: Duration) -> Self {
        Self {
            state: AttackState::Idle,
            shoot_timer: Duration::ZERO,
            shoot_interval: first_interval,
            charge_elapsed: Duration::ZERO,
            shoot_elapsed: Duration::ZERO,
        }
    }

    /// A fresh cycle with its first idle interval drawn from `tuning`.
    pub fn spawned<R: Rng + ?Sized>(tuning: &AttackTunables, rng: &mut R) -> Self {
        Self::new(draw_interval(tuning.first_interval_secs, rng))
    }

    #[inline]
    pub fn state(&self) -> AttackState {
        self.state
    }

    #[inline]
    pub fn shoot_timer(&self) -> Duration {
        self.shoot_timer
    }

    #[inline]
    pub fn shoot_interval(&self) -> Duration {
        self.shoot_interval
    }

    #[inline]
    pub fn charge_elapsed(&self) -> Duration {
        self.charge_elapsed
    }

    #[inline]
    pub fn shoot_elapsed(&self) -> Duration {
        self.shoot_elapsed
    }

    /// Charge progress in `[0, 1]`; 0 outside of charging.
    pub fn charge_progress(&self, tuning: &AttackTunables) -> f32 {
        if self.state != AttackState::Charging {
            return 0.0;
        }
        let total = tuning.charge_secs.max(f32::EPSILON);
        (self.charge_elapsed.as_secs_f32() / total).clamp(0.0, 1.0)
    }

    /// Step the cycle by `dt` with the target `distance` away.
    ///
    /// At most one transition happens per call; the tick that enters a state
    /// does not also accumulate time in it.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: Duration,
        distance: f32,
        tuning: &AttackTunables,
        rng: &mut R,
    ) -> Option<AttackEvent> {
        match self.state {
            AttackState::Idle => {
                self.shoot_timer += dt;
                if self.shoot_timer > self.shoot_interval && distance < tuning.charge_range {
                    self.state = AttackState::Charging;
                    self.charge_elapsed = Duration::ZERO;
                    self.shoot_timer = Duration::ZERO;
                    return Some(AttackEvent::ChargeStarted);
                }
            }
            AttackState::Charging => {
                self.charge_elapsed += dt;
                if self.charge_elapsed >= Duration::from_secs_f32(tuning.charge_secs) {
                    self.state = AttackState::Shooting;
                    self.shoot_elapsed = Duration::ZERO;
                    self.shoot_interval = draw_interval(tuning.interval_secs, rng);
                    return Some(AttackEvent::Fired);
                }
            }
            AttackState::Shooting => {
                self.shoot_elapsed += dt;
                if self.shoot_elapsed > Duration::from_secs_f32(tuning.shoot_secs) {
                    self.state = AttackState::Idle;
                    return Some(AttackEvent::Recovered);
                }
            }
        }
        None
    }
}

fn draw_interval<R: Rng + ?Sized>((lo, hi): (f32, f32), rng: &mut R) -> Duration {
    let secs = if hi > lo { rng.gen_range(lo..hi) } else { lo };
    Duration::from_secs_f32(secs.max(0.0))
}

/// Telegraph pulse: `0.5 + 0.5 * sin(t * f)` with `f` ramping over the charge.
#[inline]
pub fn telegraph_intensity(elapsed_secs: f32, progress: f32, tuning: &AttackTunables) -> f32 {
    let (slow, fast) = tuning.flash_frequency;
    let frequency = slow + (fast - slow) * progress.clamp(0.0, 1.0);
    0.5 + 0.5 * (elapsed_secs * frequency).sin()
}

/// Drive every living enemy's attack cycle against the player.
///
/// With no player in the world the cycles freeze: no timer advances.
pub fn advance_attack_cycles(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    mut damage: MessageWriter<PlayerDamage>,
    q_target: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut q: Query<
        (
            Entity,
            &Transform,
            &EnemyLife,
            &mut AttackCycle,
            &mut Telegraph,
            &mut Bolt,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let Ok(target) = q_target.single() else {
        return;
    };
    let target = target.translation;
    let dt = time.delta();
    let tuning = &tunables.attack;

    for (e, tf, life, mut cycle, mut telegraph, mut bolt) in &mut q {
        if !life.is_alive() {
            continue;
        }

        let origin = tf.translation;
        let event = cycle.advance(dt, origin.distance(target), tuning, &mut *rng);

        match event {
            Some(AttackEvent::ChargeStarted) => debug!("{e:?} charging"),
            Some(AttackEvent::Fired) => {
                debug!("{e:?} fired");
                damage.write(PlayerDamage::enemy_attack(tuning.damage));
            }
            Some(AttackEvent::Recovered) => bolt.clear(),
            None => {}
        }

        match cycle.state() {
            AttackState::Charging => {
                telegraph.0 = telegraph_intensity(
                    time.elapsed_secs(),
                    cycle.charge_progress(tuning),
                    tuning,
                );
            }
            AttackState::Shooting => {
                telegraph.0 = 0.0;
                bolt.replace(generate_bolt(origin, target, &tunables.bolt, &mut *rng));
            }
            AttackState::Idle => telegraph.0 = 0.0,
        }
    }
}
