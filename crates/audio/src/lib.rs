//! Audio system using Kira, fed by procedurally synthesized effects.
//!
//! Effects are rendered once per kind, wrapped as WAV and cached as
//! `StaticSoundData`. Each `play_effect` call is fire-and-forget.

pub mod effects;
pub mod synth;
pub mod wav;

pub use effects::SoundEffect;

use anyhow::{Context, Result};
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
};
use std::collections::HashMap;

/// Sample rate effects are rendered at.
pub const SAMPLE_RATE: u32 = 44_100;

/// Main audio system: one master gain, a cache of rendered effects, and the
/// handles of sounds still playing.
pub struct AudioSystem {
    manager: AudioManager,
    sounds: HashMap<SoundEffect, StaticSoundData>,
    active_sounds: Vec<StaticSoundHandle>,
    master_volume: f64,
}

impl AudioSystem {
    /// Create a new audio system on the default output device.
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .context("opening audio output device")?;

        Ok(Self {
            manager,
            sounds: HashMap::new(),
            active_sounds: Vec::new(),
            master_volume: 1.0,
        })
    }

    /// Like [`AudioSystem::new`], but logs and returns `None` when no device
    /// is available so the game can carry on silently.
    pub fn try_new() -> Option<Self> {
        match Self::new() {
            Ok(system) => {
                log::info!("Audio initialized");
                Some(system)
            }
            Err(e) => {
                log::warn!("Audio unavailable, continuing without sound: {e:#}");
                None
            }
        }
    }

    fn sound_data(&mut self, effect: SoundEffect) -> Result<StaticSoundData> {
        if let Some(data) = self.sounds.get(&effect) {
            return Ok(data.clone());
        }
        let samples = effect.build().render(SAMPLE_RATE);
        let bytes = wav::encode_wav(&samples, SAMPLE_RATE);
        let data = StaticSoundData::from_cursor(std::io::Cursor::new(bytes))
            .with_context(|| format!("decoding synthesized {effect:?}"))?;
        log::debug!("Synthesized {:?} ({} samples)", effect, samples.len());
        self.sounds.insert(effect, data.clone());
        Ok(data)
    }

    /// Render every effect up front so the first trigger doesn't stall a frame.
    pub fn preload(&mut self) -> Result<()> {
        for effect in SoundEffect::ALL {
            self.sound_data(effect)?;
        }
        Ok(())
    }

    /// Play an effect. `pan` is 0.0 (left) to 1.0 (right).
    pub fn play_effect(&mut self, effect: SoundEffect, pan: f32) -> Result<()> {
        let sound_data = self.sound_data(effect)?;
        let settings = StaticSoundSettings::new().panning(pan.clamp(0.0, 1.0) as f64);
        let handle = self.manager.play(sound_data.with_settings(settings))?;
        self.active_sounds.push(handle);
        Ok(())
    }

    /// Clean up finished sounds.
    pub fn cleanup(&mut self) {
        self.active_sounds
            .retain(|handle| handle.state() != kira::sound::PlaybackState::Stopped);
    }

    /// Number of sounds still playing.
    pub fn active_count(&self) -> usize {
        self.active_sounds.len()
    }

    /// Stop all sounds.
    pub fn stop_all(&mut self) {
        for handle in &mut self.active_sounds {
            let _ = handle.stop(Tween::default());
        }
        self.active_sounds.clear();
    }

    /// Set master volume (0.0 to 1.0).
    pub fn set_master_volume(&mut self, volume: f64) {
        self.master_volume = volume.clamp(0.0, 1.0);
        let _ = self
            .manager
            .main_track()
            .set_volume(self.master_volume, Tween::default());
    }

    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }
}

// Re-export for convenience
pub use kira;
