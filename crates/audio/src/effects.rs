//! Preset sound effects built from the synth voice graph.

use crate::synth::{Effect, GainEnvelope, Oscillator, Voice, Waveform};

/// Every sound the game can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Coin hit or pickup: two quick rising blips.
    CoinPickup,
    /// Enemy destroyed.
    Explosion,
    /// Level complete jingle.
    Success,
    /// Bomb detonation.
    Bomb,
    /// Player took damage.
    Hit,
    /// Low fuel / bomb not ready.
    Warning,
    /// Achievement unlocked.
    LevelUp,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::CoinPickup,
        SoundEffect::Explosion,
        SoundEffect::Success,
        SoundEffect::Bomb,
        SoundEffect::Hit,
        SoundEffect::Warning,
        SoundEffect::LevelUp,
    ];

    /// Build the voice graph for this effect.
    pub fn build(self) -> Effect {
        match self {
            SoundEffect::CoinPickup => Effect::new(vec![
                tone(Waveform::Square, 987.77, 0.2, 0.08),
                tone(Waveform::Square, 1318.51, 0.2, 0.25).at(0.07),
            ])
            .with_master_gain(0.8),

            SoundEffect::Explosion => Effect::new(vec![
                Voice::new(Oscillator::new(Waveform::Noise, 0.0), GainEnvelope::new(0.6, 0.005, 0.6)),
                Voice::new(
                    Oscillator::new(Waveform::Sine, 120.0).sweep_to(40.0),
                    GainEnvelope::new(0.5, 0.01, 0.5),
                ),
            ])
            .with_seed(0xB00),

            // C major chord, staggered, then the octave on top
            SoundEffect::Success => Effect::new(vec![
                tone(Waveform::Triangle, 523.25, 0.25, 0.6),
                tone(Waveform::Triangle, 659.25, 0.25, 0.6).at(0.08),
                tone(Waveform::Triangle, 783.99, 0.25, 0.6).at(0.16),
                tone(Waveform::Sine, 1046.50, 0.3, 0.5).at(0.3),
            ])
            .with_master_gain(0.9),

            SoundEffect::Bomb => Effect::new(vec![
                Voice::new(Oscillator::new(Waveform::Noise, 0.0), GainEnvelope::new(0.8, 0.01, 1.0)),
                Voice::new(
                    Oscillator::new(Waveform::Sawtooth, 200.0).sweep_to(30.0),
                    GainEnvelope::new(0.5, 0.02, 0.8),
                ),
            ])
            .with_seed(0xB0B),

            SoundEffect::Hit => Effect::new(vec![Voice::new(
                Oscillator::new(Waveform::Square, 220.0).sweep_to(110.0),
                GainEnvelope::new(0.35, 0.005, 0.15),
            )]),

            SoundEffect::Warning => Effect::new(vec![
                tone(Waveform::Sine, 440.0, 0.3, 0.15),
                tone(Waveform::Sine, 440.0, 0.3, 0.15).at(0.25),
            ]),

            SoundEffect::LevelUp => Effect::new(vec![
                tone(Waveform::Triangle, 523.25, 0.25, 0.15),
                tone(Waveform::Triangle, 659.25, 0.25, 0.15).at(0.1),
                tone(Waveform::Triangle, 783.99, 0.25, 0.15).at(0.2),
                tone(Waveform::Triangle, 1046.50, 0.3, 0.35).at(0.3),
            ]),
        }
    }
}

fn tone(waveform: Waveform, frequency: f32, peak: f32, duration: f32) -> Voice {
    Voice::new(
        Oscillator::new(waveform, frequency),
        GainEnvelope::new(peak, 0.01, duration),
    )
}
