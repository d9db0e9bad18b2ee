//! Input plugin (render-only): devices → `PlayerInput` and state requests.
//!
//! - WASD / space: movement axis and jump
//! - mouse motion: look yaw and pitch
//! - P: pause toggle, R: restart after game over
//!
//! Left click is read by the projectiles producer directly. Cursor capture is
//! left to the host window.

use std::f32::consts::FRAC_PI_2;

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::PlayerInput;

/// Radians of look per pixel of mouse motion.
const LOOK_SENSITIVITY: f32 = 0.002;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (gather_movement, gather_look).run_if(in_state(GameState::InGame)),
    )
    .add_systems(Update, (toggle_pause, request_restart));
}

fn gather_movement(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    input.jump = keys.pressed(KeyCode::Space);
}

fn gather_look(motion: Res<AccumulatedMouseMotion>, mut input: ResMut<PlayerInput>) {
    if motion.delta == Vec2::ZERO {
        return;
    }

    input.look_yaw -= motion.delta.x * LOOK_SENSITIVITY;
    input.look_pitch = (input.look_pitch - motion.delta.y * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
}

fn toggle_pause(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if !keys.just_pressed(KeyCode::KeyP) {
        return;
    }
    if let Some(to) = state.get().toggled_pause() {
        info!("{:?} -> {to:?}", state.get());
        next.set(to);
    }
}

fn request_restart(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if *state.get() == GameState::GameOver && keys.just_pressed(KeyCode::KeyR) {
        next.set(GameState::InGame);
    }
}
