//! Global state machine.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    Paused,
    GameOver,
}

impl GameState {
    /// Where a pause toggle leads from here. Game over cannot be paused.
    pub fn toggled_pause(self) -> Option<Self> {
        match self {
            Self::InGame => Some(Self::Paused),
            Self::Paused => Some(Self::InGame),
            Self::GameOver => None,
        }
    }
}
