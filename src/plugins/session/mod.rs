//! Session plugin: the round around the fight.
//!
//! Owns everything that outlives a single enemy:
//! - `EnemyRoster`: how many enemies are alive, capped by `SpawnTunables::max_enemies`
//! - `Scoreboard`: points per kill, best score across rounds
//! - `SpawnClock`: one spawn attempt per interval of simulated time
//! - pause / game over / restart transitions
//!
//! Pausing works through `Time<Virtual>`: while it is paused the fixed clock does
//! not accumulate, so physics and every `SimulationSet` stop together.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::schedule::SimulationSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::{Enemy, EnemyDied, spawn_enemy};
use crate::plugins::player::{GameOver, Player, PlayerHealth, PlayerInput, apply_player_damage};
use crate::plugins::projectiles::Projectile;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
}

impl Scoreboard {
    pub fn add_kill(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Fold the finished round into the high score.
    pub fn finish_round(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }

    pub fn reset_round(&mut self) {
        self.score = 0;
    }
}

/// Live enemy count. Only `spawn_if_below_cap` and `handle_enemy_deaths` change it.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct EnemyRoster {
    live: usize,
}

impl EnemyRoster {
    #[inline]
    pub fn live(&self) -> usize {
        self.live
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SpawnClock(pub Timer);

impl FromWorld for SpawnClock {
    fn from_world(world: &mut World) -> Self {
        let secs = world
            .get_resource::<Tunables>()
            .map(|t| t.spawn.interval_secs)
            .unwrap_or_else(|| Tunables::default().spawn.interval_secs);
        Self(Timer::from_seconds(secs, TimerMode::Repeating))
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Scoreboard>()
        .init_resource::<EnemyRoster>()
        .init_resource::<SpawnClock>();

    app.add_systems(
        FixedPostUpdate,
        (handle_enemy_deaths, tick_spawn_clock, enter_game_over)
            .chain()
            .after(apply_player_damage)
            .in_set(SimulationSet::Lifecycle),
    );

    app.add_systems(OnEnter(GameState::Paused), pause_clock)
        .add_systems(OnEnter(GameState::GameOver), pause_clock)
        .add_systems(OnEnter(GameState::InGame), resume_clock)
        .add_systems(
            OnTransition {
                exited: GameState::GameOver,
                entered: GameState::InGame,
            },
            restart_round,
        );
}

/// Spawn one enemy unless the roster is full.
pub fn spawn_if_below_cap(
    commands: &mut Commands,
    roster: &mut EnemyRoster,
    tunables: &Tunables,
    rng: &mut GameRng,
) -> Option<Entity> {
    if roster.live >= tunables.spawn.max_enemies {
        return None;
    }
    roster.live += 1;
    Some(spawn_enemy(commands, tunables, rng))
}

/// Score the kill and immediately replace the dead enemy.
pub fn handle_enemy_deaths(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    mut died: MessageReader<EnemyDied>,
    mut roster: ResMut<EnemyRoster>,
    mut scoreboard: ResMut<Scoreboard>,
) {
    for ev in died.read() {
        roster.live = roster.live.saturating_sub(1);
        scoreboard.add_kill(tunables.spawn.score_per_kill);
        info!("enemy {:?} killed, score {}", ev.enemy, scoreboard.score);

        spawn_if_below_cap(&mut commands, &mut roster, &tunables, &mut rng);
    }
}

pub fn tick_spawn_clock(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    mut clock: ResMut<SpawnClock>,
    mut roster: ResMut<EnemyRoster>,
) {
    clock.0.tick(time.delta());
    for _ in 0..clock.0.times_finished_this_tick() {
        if spawn_if_below_cap(&mut commands, &mut roster, &tunables, &mut rng).is_none() {
            debug!("spawn skipped, roster full at {}", roster.live);
        }
    }
}

pub fn enter_game_over(
    mut game_over: MessageReader<GameOver>,
    mut scoreboard: ResMut<Scoreboard>,
    mut next: ResMut<NextState<GameState>>,
) {
    if game_over.read().count() == 0 {
        return;
    }
    scoreboard.finish_round();
    info!(
        "game over: score {}, high score {}",
        scoreboard.score, scoreboard.high_score
    );
    next.set(GameState::GameOver);
}

pub fn pause_clock(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

pub fn resume_clock(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

/// Clear the arena and put the player back at the start.
pub fn restart_round(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut scoreboard: ResMut<Scoreboard>,
    mut roster: ResMut<EnemyRoster>,
    mut clock: ResMut<SpawnClock>,
    mut input: ResMut<PlayerInput>,
    q_enemies: Query<Entity, With<Enemy>>,
    q_projectiles: Query<Entity, With<Projectile>>,
    mut q_player: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut ConstantForce,
            &mut PlayerHealth,
        ),
        With<Player>,
    >,
) {
    for e in q_enemies.iter().chain(q_projectiles.iter()) {
        commands.entity(e).despawn();
    }

    scoreboard.reset_round();
    *roster = EnemyRoster::default();
    clock.0.reset();
    *input = PlayerInput::default();

    if let Ok((mut tf, mut vel, mut force, mut health)) = q_player.single_mut() {
        tf.translation = tunables.player.spawn_position;
        vel.0 = Vec3::ZERO;
        force.0 = Vec3::ZERO;
        health.reset();
    } else {
        warn!("restart without a single player");
    }

    info!("round restarted, high score {}", scoreboard.high_score);
}

#[cfg(test)]
mod tests;
