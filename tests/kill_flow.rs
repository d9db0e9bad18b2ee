//! Projectile hits → enemy death → score and replacement, through the full app.
//!
//! Contacts are injected as `CollisionStart` messages so the test does not
//! depend on aiming a real projectile at a moving target.

mod common;

use avian3d::prelude::*;
use bevy::prelude::*;
use eyeball_arena::common::layers::BodyTag;
use eyeball_arena::plugins::enemies::{EnemyLife, Health};
use eyeball_arena::plugins::projectiles::{FireRequest, Projectile};
use eyeball_arena::plugins::session::{EnemyRoster, Scoreboard};

fn inject_hit(app: &mut App, projectile: Entity, enemy: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: projectile,
        collider2: enemy,
        body1: Some(projectile),
        body2: Some(enemy),
    });
}

#[test]
fn three_hits_kill_score_and_respawn() {
    let mut app = common::app_headless();
    let enemy = common::run_until_enemy(&mut app);
    let before = common::enemies(&mut app).len();

    let shot = app.world_mut().spawn(BodyTag::PlayerProjectile).id();

    inject_hit(&mut app, shot, enemy);
    app.update();
    assert_eq!(app.world().get::<Health>(enemy).unwrap().hp(), 2);

    inject_hit(&mut app, shot, enemy);
    app.update();
    assert_eq!(app.world().get::<Health>(enemy).unwrap().hp(), 1);
    assert_eq!(*app.world().get::<EnemyLife>(enemy).unwrap(), EnemyLife::Alive);

    inject_hit(&mut app, shot, enemy);
    app.update();

    // Swept in PostUpdate of the same frame, already replaced.
    assert!(app.world().get_entity(enemy).is_err());
    assert_eq!(app.world().resource::<Scoreboard>().score, 100);

    let after = common::enemies(&mut app);
    assert_eq!(after.len(), before);
    assert_eq!(app.world().resource::<EnemyRoster>().live(), after.len());
}

#[test]
fn untagged_contacts_do_not_hurt_enemies() {
    let mut app = common::app_headless();
    let enemy = common::run_until_enemy(&mut app);

    let debris = app.world_mut().spawn_empty().id();
    for _ in 0..5 {
        inject_hit(&mut app, debris, enemy);
        app.update();
    }

    assert_eq!(app.world().get::<Health>(enemy).unwrap().hp(), 3);
    assert_eq!(app.world().resource::<Scoreboard>().score, 0);
}

#[test]
fn fired_projectile_expires_after_five_seconds() {
    let mut app = common::app_headless();
    app.update();

    app.world_mut().write_message(FireRequest {
        origin: Vec3::new(0.0, 2.0, 0.0),
        direction: Vec3::Y,
    });
    app.update();

    let shots: Vec<Entity> = app
        .world_mut()
        .query_filtered::<Entity, With<Projectile>>()
        .iter(app.world())
        .collect();
    assert_eq!(shots.len(), 1);
    assert!(app.world().get::<LinearVelocity>(shots[0]).unwrap().0.y > 0.0);

    // 5 s = 320 ticks; it was fired on the last one.
    common::run_ticks(&mut app, 318);
    assert!(app.world().get_entity(shots[0]).is_ok());

    common::run_ticks(&mut app, 4);
    assert!(app.world().get_entity(shots[0]).is_err());
}
