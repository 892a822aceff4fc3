//! Gameplay events emitted by the session and drained by the frontend.
//!
//! The session never touches audio or output directly. Each event can name
//! the sound cue it wants and where in the arena it happened, so the
//! frontend can pan it.

use audio::SoundEffect;
use glam::Vec2;

use crate::achievements::AchievementId;
use crate::coin::CoinKind;
use crate::enemy::Behavior;
use crate::missions::Objective;
use crate::state::GameOverReason;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32, sector: String },
    CoinHit { position: Vec2, hits: u32, required: u32 },
    CoinCollected { position: Vec2, kind: CoinKind, value: u32 },
    LevelComplete { level: u32, score: u64, bonus: u64 },
    GameOver { reason: GameOverReason, score: u64 },
    EnemySpawned { position: Vec2, behavior: Behavior },
    BombUsed { cleared: usize },
    BombNotReady { remaining: f32 },
    PlayerHit { position: Vec2, health: f32 },
    FuelLow { fuel: f32 },
    AchievementUnlocked(AchievementId),
    ObjectiveComplete { objective: Objective, bonus: u64 },
}

impl GameEvent {
    /// Sound cue for this event, if any.
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::CoinHit { .. } | GameEvent::CoinCollected { .. } => Some(SoundEffect::CoinPickup),
            GameEvent::LevelComplete { .. } => Some(SoundEffect::Success),
            GameEvent::GameOver { .. } => Some(SoundEffect::Explosion),
            GameEvent::BombUsed { .. } => Some(SoundEffect::Bomb),
            GameEvent::BombNotReady { .. } | GameEvent::FuelLow { .. } => Some(SoundEffect::Warning),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::Hit),
            GameEvent::AchievementUnlocked(_) => Some(SoundEffect::LevelUp),
            GameEvent::LevelStarted { .. }
            | GameEvent::EnemySpawned { .. }
            | GameEvent::ObjectiveComplete { .. } => None,
        }
    }

    /// Arena position the event happened at, for stereo panning.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            GameEvent::CoinHit { position, .. }
            | GameEvent::CoinCollected { position, .. }
            | GameEvent::EnemySpawned { position, .. }
            | GameEvent::PlayerHit { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_events_ring_and_carry_position() {
        let e = GameEvent::CoinCollected {
            position: Vec2::new(3.0, 4.0),
            kind: CoinKind::Gold,
            value: 50,
        };
        assert_eq!(e.sound(), Some(SoundEffect::CoinPickup));
        assert_eq!(e.position(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn spawns_are_silent() {
        let e = GameEvent::EnemySpawned {
            position: Vec2::ZERO,
            behavior: Behavior::Orbit,
        };
        assert_eq!(e.sound(), None);
        assert_eq!(GameEvent::BombUsed { cleared: 2 }.position(), None);
    }
}
