//! Visuals plugin (render-only).
//!
//! Gameplay entities are spawned without meshes or lights; this plugin dresses
//! them when they appear and mirrors presentation state every frame:
//! - `Telegraph` pulses the enemy's emissive and light while it charges
//! - `HitFlash` turns the enemy white for a moment after a hit
//! - `Bolt` segments are drawn as gizmo line strips, trunk brightest

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::bolt::Bolt;
use crate::plugins::enemies::{Enemy, HitFlash, Telegraph};
use crate::plugins::projectiles::Projectile;
use crate::plugins::world::{FLOOR_HALF_EXTENT, Floor};

const ENEMY_LIGHT_INTENSITY: f32 = 20_000.0;
const TELEGRAPH_LIGHT_BOOST: f32 = 200_000.0;
const PROJECTILE_LIGHT_INTENSITY: f32 = 10_000.0;

/// Electric blue, well above 1.0 so it blooms on HDR targets.
const BOLT_COLOR: LinearRgba = LinearRgba::rgb(2.0, 8.0, 20.0);

#[derive(Resource, Debug, Clone)]
struct VisualAssets {
    enemy_mesh: Handle<Mesh>,
    projectile_mesh: Handle<Mesh>,
    projectile_material: Handle<StandardMaterial>,
    floor_mesh: Handle<Mesh>,
    floor_material: Handle<StandardMaterial>,
}

/// The red light every enemy carries as a child.
#[derive(Component, Debug, Clone, Copy)]
struct EnemyGlow;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, (load_visual_assets, spawn_scene_lights))
        .add_systems(
            Update,
            (dress_floor, dress_enemies, dress_projectiles, pulse_enemies, draw_bolts),
        );
}

fn load_visual_assets(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let enemy_mesh = meshes.add(Sphere::new(tunables.enemy.radius));
    let projectile_mesh = meshes.add(
        Mesh::from(Capsule3d::new(0.02, 2.0)).rotated_by(Quat::from_rotation_x(FRAC_PI_2)),
    );
    let projectile_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 0.0, 0.0, 0.8),
        emissive: LinearRgba::rgb(5.0, 0.0, 0.0),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let floor_mesh = meshes.add(Plane3d::default().mesh().size(FLOOR_HALF_EXTENT * 2.0, FLOOR_HALF_EXTENT * 2.0));
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.06, 0.07, 0.1),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands.insert_resource(VisualAssets {
        enemy_mesh,
        projectile_mesh,
        projectile_material,
        floor_mesh,
        floor_material,
    });
}

fn spawn_scene_lights(mut commands: Commands) {
    commands.spawn((
        Name::new("Moon"),
        DirectionalLight {
            illuminance: 800.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn dress_floor(mut commands: Commands, assets: Res<VisualAssets>, q: Query<Entity, Added<Floor>>) {
    for e in &q {
        commands.entity(e).insert(Visibility::default()).with_child((
            Mesh3d(assets.floor_mesh.clone()),
            MeshMaterial3d(assets.floor_material.clone()),
        ));
    }
}

fn dress_enemies(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<Entity, Added<Enemy>>,
) {
    for e in &q {
        // Own material per enemy: emissive is driven per instance.
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.9, 0.85),
            emissive: LinearRgba::BLACK,
            ..default()
        });

        commands
            .entity(e)
            .insert((
                Mesh3d(assets.enemy_mesh.clone()),
                MeshMaterial3d(material),
                Visibility::default(),
            ))
            .with_child((
                EnemyGlow,
                PointLight {
                    color: Color::srgb(1.0, 0.0, 0.0),
                    intensity: ENEMY_LIGHT_INTENSITY,
                    range: 10.0,
                    ..default()
                },
            ));
    }
}

fn dress_projectiles(mut commands: Commands, assets: Res<VisualAssets>, q: Query<Entity, Added<Projectile>>) {
    for e in &q {
        commands
            .entity(e)
            .insert((
                Mesh3d(assets.projectile_mesh.clone()),
                MeshMaterial3d(assets.projectile_material.clone()),
                Visibility::default(),
            ))
            .with_child(PointLight {
                color: Color::srgb(1.0, 0.0, 0.0),
                intensity: PROJECTILE_LIGHT_INTENSITY,
                range: 5.0,
                ..default()
            });
    }
}

fn pulse_enemies(
    mut materials: ResMut<Assets<StandardMaterial>>,
    q_enemies: Query<(&Telegraph, &HitFlash, &MeshMaterial3d<StandardMaterial>, &Children), With<Enemy>>,
    mut q_glow: Query<&mut PointLight, With<EnemyGlow>>,
) {
    for (telegraph, flash, material, children) in &q_enemies {
        let emissive = if flash.is_active() {
            LinearRgba::rgb(4.0, 4.0, 4.0)
        } else {
            LinearRgba::rgb(telegraph.0 * 6.0, 0.0, 0.0)
        };

        if let Some(mut mat) = materials.get_mut(material.id()) {
            mat.emissive = emissive;
        }

        for child in children.iter() {
            if let Ok(mut light) = q_glow.get_mut(child) {
                light.intensity = ENEMY_LIGHT_INTENSITY + TELEGRAPH_LIGHT_BOOST * telegraph.0;
            }
        }
    }
}

fn draw_bolts(mut gizmos: Gizmos, q: Query<&Bolt>) {
    for bolt in &q {
        for segment in bolt.segments() {
            // Branches fade with depth, matching their halved thickness.
            let color = BOLT_COLOR * segment.thickness.clamp(0.1, 1.0);
            gizmos.linestrip(segment.points.iter().copied(), color);
        }
    }
}
