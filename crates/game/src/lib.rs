//! Infinite Galaxy - a 2D arcade coin run: sweep up coins before the tank
//! runs dry while enemies close in, level after level.
//!
//! The crate is headless. [`Session`] runs the simulation and emits
//! [`GameEvent`]s; [`Scene`] snapshots a frame for whatever draws it.

pub mod achievements;
pub mod autopilot;
pub mod bomb;
pub mod camera;
pub mod coin;
pub mod config;
pub mod effects;
pub mod enemy;
pub mod events;
pub mod hud;
pub mod level;
pub mod messages;
pub mod missions;
pub mod player;
pub mod save;
pub mod scene;
pub mod session;
pub mod spawner;
pub mod state;

pub use autopilot::Autopilot;
pub use config::GameConfig;
pub use events::GameEvent;
pub use save::{SaveError, SaveRecord, SaveStore};
pub use scene::Scene;
pub use session::Session;
pub use state::{GameOverReason, GamePhase, PlayerInput};
