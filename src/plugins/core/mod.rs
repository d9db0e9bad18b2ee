//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(GameRng::default());
    app.insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.03)));
}
