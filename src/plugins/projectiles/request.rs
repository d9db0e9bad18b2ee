use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::messages::FireRequest;
use crate::plugins::player::{Player, PlayerInput};

/// Producer: a left click fires along the current look direction.
///
/// This system intentionally does **not** spawn anything.
pub fn request_player_fire(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    input: Res<PlayerInput>,
    q_player: Query<&Transform, With<Player>>,
    mut writer: MessageWriter<FireRequest>,
) {
    let Some(buttons) = buttons else {
        return;
    };
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let eye = match q_player.single() {
        Ok(tf) => tf.translation,
        Err(e) => {
            debug!("No single Player Transform: {e:?}");
            return;
        }
    };

    writer.write(FireRequest {
        origin: eye,
        direction: input.look_rotation() * Vec3::NEG_Z,
    });
}
