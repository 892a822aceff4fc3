//! Save slots: a versioned JSON record per slot.
//!
//! Records without a `version` field are the legacy flat blob
//! (`highScore`, `highLevel`, ...) and are migrated on load. Writes go to a
//! temporary file that is renamed over the slot.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::achievements::AchievementId;

/// Current schema version written by [`SaveStore::save`].
pub const SAVE_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save I/O failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("save data is not valid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },
    #[error("save version {0} is not a version number")]
    InvalidVersion(String),
}

/// Player-facing preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub master_volume: f32,
    pub sfx_enabled: bool,
    pub screen_shake: bool,
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_enabled: true,
            screen_shake: true,
            show_fps: false,
        }
    }
}

/// Lifetime counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub games_played: u32,
    pub levels_completed: u32,
    pub enemies_cleared: u64,
    pub bombs_used: u32,
    pub comets_caught: u32,
    pub deaths: u32,
    pub play_time_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRecord {
    pub version: u32,
    pub high_score: u64,
    pub high_level: u32,
    pub total_coins: u64,
    /// Achievement ids in unlock order. Unknown ids are kept as-is.
    pub achievements: Vec<String>,
    pub settings: Settings,
    pub game_stats: GameStats,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            high_score: 0,
            high_level: 0,
            total_coins: 0,
            achievements: Vec::new(),
            settings: Settings::default(),
            game_stats: GameStats::default(),
        }
    }
}

impl SaveRecord {
    /// Unlock an achievement. Returns false if it was already unlocked.
    pub fn unlock_achievement(&mut self, id: AchievementId) -> bool {
        if self.has_achievement(id) {
            return false;
        }
        self.achievements.push(id.as_str().to_string());
        true
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.iter().any(|a| a == id.as_str())
    }

    /// Keep the best score. Returns true on a new high score.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    pub fn record_level(&mut self, level: u32) {
        self.high_level = self.high_level.max(level);
    }

    /// Parse a record of any supported version.
    pub fn from_json(data: &str) -> Result<Self, SaveError> {
        let value: serde_json::Value = serde_json::from_str(data)?;
        let version = match value.get("version") {
            None => None,
            Some(v) => match v.as_u64() {
                Some(found) => Some(found),
                None => return Err(SaveError::InvalidVersion(v.to_string())),
            },
        };
        match version {
            Some(found) if found > SAVE_VERSION as u64 => Err(SaveError::UnsupportedVersion {
                found,
                supported: SAVE_VERSION,
            }),
            Some(_) => {
                let mut record: SaveRecord = serde_json::from_value(value)?;
                record.version = SAVE_VERSION;
                Ok(record)
            }
            None => {
                let legacy: LegacySaveRecord = serde_json::from_value(value)?;
                log::info!("Migrating unversioned save to version {SAVE_VERSION}");
                Ok(legacy.migrate())
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The original flat blob: camelCase keys, no version.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacySaveRecord {
    high_score: u64,
    high_level: u32,
    total_coins: u64,
    achievements: Vec<String>,
    settings: LegacySettings,
    game_stats: LegacyStats,
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacySettings {
    sound_enabled: bool,
    volume: f32,
}

impl Default for LegacySettings {
    fn default() -> Self {
        let current = Settings::default();
        Self {
            sound_enabled: current.sfx_enabled,
            volume: current.master_volume,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacyStats {
    games_played: u32,
    total_play_time: f64,
}

impl LegacySaveRecord {
    fn migrate(self) -> SaveRecord {
        let mut achievements: Vec<String> = Vec::with_capacity(self.achievements.len());
        for id in self.achievements {
            if !achievements.contains(&id) {
                achievements.push(id);
            }
        }
        SaveRecord {
            version: SAVE_VERSION,
            high_score: self.high_score,
            high_level: self.high_level,
            total_coins: self.total_coins,
            achievements,
            settings: Settings {
                master_volume: self.settings.volume.clamp(0.0, 1.0),
                sfx_enabled: self.settings.sound_enabled,
                ..Settings::default()
            },
            game_stats: GameStats {
                games_played: self.game_stats.games_played,
                play_time_seconds: self.game_stats.total_play_time,
                ..GameStats::default()
            },
        }
    }
}

/// Directory of `slot_<n>.json` files.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: u32) -> PathBuf {
        self.dir.join(format!("slot_{slot}.json"))
    }

    /// Read a slot. `Ok(None)` when the slot has never been written.
    pub fn try_load(&self, slot: u32) -> Result<Option<SaveRecord>, SaveError> {
        let path = self.slot_path(slot);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SaveError::Io { path, source }),
        };
        SaveRecord::from_json(&data).map(Some)
    }

    /// Read a slot, falling back to a fresh record on any failure.
    pub fn load(&self, slot: u32) -> SaveRecord {
        match self.try_load(slot) {
            Ok(Some(record)) => {
                log::info!("Loaded save slot {} (high score {})", slot, record.high_score);
                record
            }
            Ok(None) => {
                log::info!("Save slot {slot} is empty, starting fresh");
                SaveRecord::default()
            }
            Err(e) => {
                log::warn!("Could not load save slot {slot}: {e}; starting fresh");
                SaveRecord::default()
            }
        }
    }

    /// Write a slot. Last write wins.
    pub fn save(&self, slot: u32, record: &SaveRecord) -> Result<(), SaveError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| SaveError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, record.to_json()?).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;
        log::debug!("Wrote save slot {slot} to {path:?}");
        Ok(())
    }

    /// Remove a slot. Returns whether anything was deleted.
    pub fn delete(&self, slot: u32) -> Result<bool, SaveError> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SaveError::Io { path, source }),
        }
    }

    /// Slots present on disk, ascending.
    pub fn slots(&self) -> Vec<u32> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut slots: Vec<u32> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().into_string().ok()?;
                name.strip_prefix("slot_")?
                    .strip_suffix(".json")?
                    .parse()
                    .ok()
            })
            .collect();
        slots.sort_unstable();
        slots
    }
}
