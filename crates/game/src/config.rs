//! Game configuration (arena, tuning, audio, saves). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Install-level settings. Loaded from `config.ron` in the current directory.
/// Player-facing preferences (volume) live in the save record instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Arena width in world units.
    #[serde(default = "default_arena_width")]
    pub arena_width: f32,
    /// Arena height in world units.
    #[serde(default = "default_arena_height")]
    pub arena_height: f32,
    /// Visible viewport size (world units) the camera frames.
    #[serde(default = "default_viewport")]
    pub viewport: [f32; 2],
    /// Player cruise speed (units per second).
    #[serde(default = "default_player_speed")]
    pub player_speed: f32,
    /// Player hull.
    #[serde(default = "default_player_health")]
    pub player_health: f32,
    /// Fuel burned per second of play.
    #[serde(default = "default_fuel_drain")]
    pub fuel_drain_per_second: f32,
    /// Fuel restored by each collected coin.
    #[serde(default = "default_fuel_per_coin")]
    pub fuel_per_coin: f32,
    /// Health lost per enemy contact.
    #[serde(default = "default_contact_damage")]
    pub enemy_contact_damage: f32,
    /// Invulnerability after taking a hit (seconds).
    #[serde(default = "default_hit_grace")]
    pub hit_grace: f32,
    /// Seconds between bomb uses.
    #[serde(default = "default_bomb_cooldown")]
    pub bomb_cooldown: f32,
    /// Safe time granted by a bomb (seconds).
    #[serde(default = "default_safe_time")]
    pub safe_time: f32,
    /// Background stars per million square units.
    #[serde(default = "default_star_density")]
    pub star_density: f32,
    /// Particle pool capacity.
    #[serde(default = "default_particle_capacity")]
    pub particle_capacity: usize,
    /// Master switch for sound output.
    #[serde(default = "default_true")]
    pub audio_enabled: bool,
    /// Directory holding save slots.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
    /// Slot used when none is given on the command line.
    #[serde(default)]
    pub save_slot: u32,
    /// Fixed RNG seed; random per run when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_arena_width() -> f32 {
    3000.0
}
fn default_arena_height() -> f32 {
    2000.0
}
fn default_viewport() -> [f32; 2] {
    [1280.0, 720.0]
}
fn default_player_speed() -> f32 {
    420.0
}
fn default_player_health() -> f32 {
    100.0
}
fn default_fuel_drain() -> f32 {
    1.5
}
fn default_fuel_per_coin() -> f32 {
    4.0
}
fn default_contact_damage() -> f32 {
    20.0
}
fn default_hit_grace() -> f32 {
    1.0
}
fn default_bomb_cooldown() -> f32 {
    12.0
}
fn default_safe_time() -> f32 {
    3.0
}
fn default_star_density() -> f32 {
    150.0
}
fn default_particle_capacity() -> usize {
    512
}
fn default_true() -> bool {
    true
}
fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: default_arena_width(),
            arena_height: default_arena_height(),
            viewport: default_viewport(),
            player_speed: default_player_speed(),
            player_health: default_player_health(),
            fuel_drain_per_second: default_fuel_drain(),
            fuel_per_coin: default_fuel_per_coin(),
            enemy_contact_damage: default_contact_damage(),
            hit_grace: default_hit_grace(),
            bomb_cooldown: default_bomb_cooldown(),
            safe_time: default_safe_time(),
            star_density: default_star_density(),
            particle_capacity: default_particle_capacity(),
            audio_enabled: default_true(),
            save_dir: default_save_dir(),
            save_slot: 0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// `config.ron` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("config.ron")
    }

    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, s)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let c: GameConfig = ron::from_str("(arena_width: 800.0, seed: Some(9))").unwrap();
        assert_eq!(c.arena_width, 800.0);
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.arena_height, default_arena_height());
        assert!(c.audio_enabled);
    }

    #[test]
    fn invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "not ron at all (").unwrap();
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
    }

    #[test]
    fn default_path_is_config_ron() {
        assert!(GameConfig::default_path().ends_with("config.ron"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        let mut c = GameConfig::default();
        c.bomb_cooldown = 5.0;
        c.save_to(&path).unwrap();
        assert_eq!(GameConfig::load_from(&path), c);
    }
}
