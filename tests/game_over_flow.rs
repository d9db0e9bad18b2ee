//! Player death → game over freeze → restart, and pause/resume.

mod common;

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use eyeball_arena::common::state::GameState;
use eyeball_arena::plugins::player::{PlayerDamage, PlayerHealth};
use eyeball_arena::plugins::session::{EnemyRoster, Scoreboard, SpawnClock};

fn is_paused(app: &App) -> bool {
    app.world().resource::<Time<Virtual>>().is_paused()
}

#[test]
fn lethal_damage_ends_the_round_and_freezes_time() {
    let mut app = common::app_headless();
    common::run_until_enemy(&mut app);

    app.world_mut().write_message(PlayerDamage::enemy_attack(1_000));
    app.update();
    app.update();

    assert_eq!(common::state(&app), GameState::GameOver);
    assert!(is_paused(&app));

    let p = common::player(&mut app);
    assert_eq!(app.world().get::<PlayerHealth>(p).unwrap().hp(), 0);

    let board = app.world().resource::<Scoreboard>().clone();
    assert_eq!(board.high_score, board.score);

    // Nothing moves or spawns while the round is over.
    let frozen_at = app.world().get::<Transform>(p).unwrap().translation;
    let enemy_count = common::enemies(&mut app).len();
    common::run_ticks(&mut app, 400);
    assert_eq!(app.world().get::<Transform>(p).unwrap().translation, frozen_at);
    assert_eq!(common::enemies(&mut app).len(), enemy_count);

    // Pause is not available after game over.
    assert_eq!(GameState::GameOver.toggled_pause(), None);
}

#[test]
fn second_tick_of_the_dying_frame_does_not_simulate() {
    let mut app = common::app_headless();
    common::run_until_enemy(&mut app);
    let clock_before = app.world().resource::<SpawnClock>().0.elapsed();

    // One frame long enough for two fixed ticks; the player dies in the first.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(common::TICK * 2));
    app.world_mut().write_message(PlayerDamage::enemy_attack(1_000));
    app.update();

    assert_eq!(common::state(&app), GameState::InGame);
    assert_eq!(
        app.world().resource::<SpawnClock>().0.elapsed(),
        clock_before + common::TICK
    );
    let board = app.world().resource::<Scoreboard>().clone();
    assert_eq!(board.high_score, board.score);

    app.insert_resource(TimeUpdateStrategy::ManualDuration(common::TICK));
    app.update();
    assert_eq!(common::state(&app), GameState::GameOver);
}

#[test]
fn restart_resets_the_round() {
    let mut app = common::app_headless();
    common::run_until_enemy(&mut app);

    app.world_mut().write_message(PlayerDamage::enemy_attack(1_000));
    common::run_ticks(&mut app, 2);
    assert_eq!(common::state(&app), GameState::GameOver);

    common::request_state(&mut app, GameState::InGame);
    app.update();

    assert_eq!(common::state(&app), GameState::InGame);
    assert!(!is_paused(&app));
    assert!(common::enemies(&mut app).is_empty());
    assert_eq!(app.world().resource::<EnemyRoster>().live(), 0);
    assert_eq!(app.world().resource::<Scoreboard>().score, 0);

    let p = common::player(&mut app);
    assert_eq!(app.world().get::<PlayerHealth>(p).unwrap().hp(), 100);
    let pos = app.world().get::<Transform>(p).unwrap().translation;
    assert!((pos - Vec3::new(0.0, 2.0, 0.0)).length() < 0.1, "player at {pos}");
    assert_eq!(app.world().get::<LinearVelocity>(p).unwrap().0, Vec3::ZERO);

    // The spawn clock starts over too.
    common::run_until_enemy(&mut app);
}

#[test]
fn pause_freezes_and_resume_continues_without_reset() {
    let mut app = common::app_headless();
    let enemy = common::run_until_enemy(&mut app);

    common::request_state(&mut app, GameState::Paused);
    app.update();
    assert_eq!(common::state(&app), GameState::Paused);
    assert!(is_paused(&app));

    let frozen_at = app.world().get::<Transform>(enemy).unwrap().translation;
    common::run_ticks(&mut app, 200);
    assert_eq!(app.world().get::<Transform>(enemy).unwrap().translation, frozen_at);

    common::request_state(&mut app, GameState::InGame);
    app.update();
    assert!(!is_paused(&app));

    // Same enemy, same player: resuming is not a restart.
    assert!(app.world().get_entity(enemy).is_ok());
    let _ = common::player(&mut app);
}
