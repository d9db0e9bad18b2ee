use std::time::Duration;

use avian3d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{fixed_time_with_delta, init_messages, run_system_once};
use crate::plugins::enemies::EnemyLife;

fn session_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(GameRng::from_seed(9));
    world.insert_resource(fixed_time_with_delta(1.0));
    world.init_resource::<Scoreboard>();
    world.init_resource::<EnemyRoster>();
    world.init_resource::<SpawnClock>();
    world.init_resource::<PlayerInput>();
    world.init_resource::<NextState<GameState>>();
    init_messages::<EnemyDied>(&mut world);
    init_messages::<GameOver>(&mut world);
    world
}

fn enemy_count(world: &mut World) -> usize {
    world.query_filtered::<(), With<Enemy>>().iter(world).count()
}

fn try_spawn(mut commands: Commands, tunables: Res<Tunables>, mut rng: ResMut<GameRng>, mut roster: ResMut<EnemyRoster>) -> Option<Entity> {
    spawn_if_below_cap(&mut commands, &mut roster, &tunables, &mut rng)
}

#[test]
fn scoreboard_keeps_best_round() {
    let mut board = Scoreboard::default();
    board.add_kill(100);
    board.add_kill(100);
    board.finish_round();
    assert_eq!(board, Scoreboard { score: 200, high_score: 200 });

    board.reset_round();
    board.add_kill(100);
    board.finish_round();
    assert_eq!(board, Scoreboard { score: 100, high_score: 200 });
}

#[test]
fn roster_never_exceeds_cap() {
    let mut world = session_world();

    let spawned = (0..12)
        .filter_map(|_| run_system_once(&mut world, try_spawn))
        .count();

    assert_eq!(spawned, 10);
    assert_eq!(world.resource::<EnemyRoster>().live(), 10);
    assert_eq!(enemy_count(&mut world), 10);
}

#[test]
fn kill_scores_and_replaces_the_enemy() {
    let mut world = session_world();
    world.resource_mut::<EnemyRoster>().live = 10;
    let dead = world.spawn((Enemy, EnemyLife::Dead)).id();

    world.write_message(EnemyDied { enemy: dead });
    run_system_once(&mut world, handle_enemy_deaths);

    assert_eq!(world.resource::<Scoreboard>().score, 100);
    assert_eq!(world.resource::<EnemyRoster>().live(), 10);
    // The dead one (swept later) plus its replacement.
    assert_eq!(enemy_count(&mut world), 2);
}

#[test]
fn spawn_clock_spawns_every_interval() {
    let mut world = session_world();

    run_system_once(&mut world, tick_spawn_clock);
    run_system_once(&mut world, tick_spawn_clock);
    assert_eq!(enemy_count(&mut world), 0);

    run_system_once(&mut world, tick_spawn_clock);
    assert_eq!(enemy_count(&mut world), 1);
    assert_eq!(world.resource::<EnemyRoster>().live(), 1);

    for _ in 0..3 {
        run_system_once(&mut world, tick_spawn_clock);
    }
    assert_eq!(enemy_count(&mut world), 2);
}

#[test]
fn spawn_clock_respects_the_cap() {
    let mut world = session_world();
    world.resource_mut::<EnemyRoster>().live = 10;
    world.insert_resource(fixed_time_with_delta(3.0));

    run_system_once(&mut world, tick_spawn_clock);

    assert_eq!(enemy_count(&mut world), 0);
    assert_eq!(world.resource::<EnemyRoster>().live(), 10);
}

#[test]
fn game_over_records_high_score_and_requests_state() {
    let mut world = session_world();
    world.resource_mut::<Scoreboard>().score = 700;

    world.write_message(GameOver);
    run_system_once(&mut world, enter_game_over);

    assert_eq!(world.resource::<Scoreboard>().high_score, 700);
    assert!(matches!(
        *world.resource::<NextState<GameState>>(),
        NextState::Pending(GameState::GameOver)
    ));
}

#[test]
fn no_game_over_message_leaves_state_alone() {
    let mut world = session_world();
    run_system_once(&mut world, enter_game_over);
    assert!(matches!(
        *world.resource::<NextState<GameState>>(),
        NextState::Unchanged
    ));
}

#[test]
fn pause_and_resume_toggle_virtual_time() {
    let mut world = World::new();
    world.init_resource::<Time<Virtual>>();

    run_system_once(&mut world, pause_clock);
    assert!(world.resource::<Time<Virtual>>().is_paused());

    run_system_once(&mut world, resume_clock);
    assert!(!world.resource::<Time<Virtual>>().is_paused());
}

#[test]
fn restart_clears_arena_and_resets_player() {
    let mut world = session_world();
    {
        let mut board = world.resource_mut::<Scoreboard>();
        board.score = 300;
        board.high_score = 900;
    }
    world.resource_mut::<EnemyRoster>().live = 4;
    world.resource_mut::<SpawnClock>().0.tick(Duration::from_secs(2));
    world.resource_mut::<PlayerInput>().jump = true;

    for _ in 0..4 {
        world.spawn((Enemy, EnemyLife::Alive));
    }
    let shot = world.spawn(Projectile::fired_at(Duration::ZERO)).id();

    let mut health = PlayerHealth::new(100);
    health.take(100);
    let player = world
        .spawn((
            Player,
            health,
            Transform::from_xyz(7.0, 0.5, -3.0),
            LinearVelocity(Vec3::new(1.0, 2.0, 3.0)),
            ConstantForce(Vec3::X),
        ))
        .id();

    run_system_once(&mut world, restart_round);

    assert_eq!(enemy_count(&mut world), 0);
    assert!(world.get_entity(shot).is_err());
    assert_eq!(world.resource::<EnemyRoster>().live(), 0);
    assert_eq!(*world.resource::<Scoreboard>(), Scoreboard { score: 0, high_score: 900 });
    assert_eq!(world.resource::<SpawnClock>().0.elapsed(), Duration::ZERO);
    assert_eq!(*world.resource::<PlayerInput>(), PlayerInput::default());

    assert_eq!(world.get::<PlayerHealth>(player).unwrap().hp(), 100);
    assert_eq!(world.get::<Transform>(player).unwrap().translation, Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec3::ZERO);
    assert_eq!(world.get::<ConstantForce>(player).unwrap().0, Vec3::ZERO);
}
