//! Game phase and per-tick input.

use glam::Vec2;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    OutOfFuel,
    Destroyed,
}

impl GameOverReason {
    pub fn describe(self) -> &'static str {
        match self {
            GameOverReason::OutOfFuel => "Out of fuel",
            GameOverReason::Destroyed => "Hull destroyed",
        }
    }
}

/// Top-level game phase. Only `Playing` advances the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    LevelComplete,
    GameOver(GameOverReason),
}

impl GamePhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GamePhase::GameOver(_))
    }

    /// Banner text shown over the scene, if any.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            GamePhase::Menu => Some("INFINITE GALAXY"),
            GamePhase::Playing => None,
            GamePhase::Paused => Some("PAUSED"),
            GamePhase::LevelComplete => Some("LEVEL COMPLETE"),
            GamePhase::GameOver(_) => Some("GAME OVER"),
        }
    }
}

/// Player intent for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Desired direction; lengths above 1 are clamped.
    pub movement: Vec2,
    /// Bomb button. Fires on the press; holding it down does nothing more.
    pub bomb: bool,
}
