//! Procedural voice graph: oscillators shaped by gain envelopes, mixed
//! through a master gain.
//!
//! Every effect is rendered into a fresh buffer. Voices stop themselves at
//! the end of their envelope, so nothing needs to be torn down afterwards.

use rand::prelude::*;

/// Gain treated as silence at the end of an exponential release.
pub const SILENCE: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
    /// White noise; frequency is ignored.
    Noise,
}

impl Waveform {
    /// Evaluate at `phase` in cycles (only the fractional part matters).
    fn eval(self, phase: f32, rng: &mut StdRng) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (p * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * p - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Noise => rng.gen_range(-1.0..=1.0),
        }
    }
}

/// Tone source with an optional exponential frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub waveform: Waveform,
    pub frequency: f32,
    /// Frequency reached at the end of the voice, if sweeping.
    pub end_frequency: Option<f32>,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            waveform,
            frequency,
            end_frequency: None,
        }
    }

    pub fn sweep_to(mut self, end_frequency: f32) -> Self {
        self.end_frequency = Some(end_frequency);
        self
    }

    /// Frequency at `progress` in `[0, 1]` of the voice.
    pub fn frequency_at(&self, progress: f32) -> f32 {
        match self.end_frequency {
            Some(end) if self.frequency > 0.0 && end > 0.0 => {
                self.frequency * (end / self.frequency).powf(progress.clamp(0.0, 1.0))
            }
            _ => self.frequency,
        }
    }
}

/// Linear attack to `peak`, then an exponential ramp down to [`SILENCE`]
/// at `duration`, where the voice stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainEnvelope {
    pub peak: f32,
    pub attack: f32,
    pub duration: f32,
}

impl GainEnvelope {
    pub fn new(peak: f32, attack: f32, duration: f32) -> Self {
        Self {
            peak: peak.max(0.0),
            attack: attack.max(0.0),
            duration: duration.max(0.0),
        }
    }

    /// Gain at local time `t` seconds. Zero outside `[0, duration)`.
    pub fn gain_at(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration || self.peak <= 0.0 {
            return 0.0;
        }
        if t < self.attack {
            return self.peak * t / self.attack;
        }
        let release = (self.duration - self.attack).max(f32::EPSILON);
        let progress = ((t - self.attack) / release).clamp(0.0, 1.0);
        let floor = SILENCE.min(self.peak);
        self.peak * (floor / self.peak).powf(progress)
    }
}

/// One oscillator through one envelope, starting `start` seconds into the effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub oscillator: Oscillator,
    pub envelope: GainEnvelope,
    pub start: f32,
}

impl Voice {
    pub fn new(oscillator: Oscillator, envelope: GainEnvelope) -> Self {
        Self {
            oscillator,
            envelope,
            start: 0.0,
        }
    }

    pub fn at(mut self, start: f32) -> Self {
        self.start = start.max(0.0);
        self
    }

    /// Scheduled stop time relative to the effect start.
    pub fn end(&self) -> f32 {
        self.start + self.envelope.duration
    }
}

/// A complete sound effect: voices summed, scaled by the master gain and
/// soft-clipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub voices: Vec<Voice>,
    pub master_gain: f32,
    /// Seed for noise voices, so renders are reproducible.
    pub seed: u64,
}

impl Effect {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            master_gain: 1.0,
            seed: 0,
        }
    }

    pub fn with_master_gain(mut self, gain: f32) -> Self {
        self.master_gain = gain.max(0.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Length in seconds until the last voice stops.
    pub fn duration(&self) -> f32 {
        self.voices.iter().map(Voice::end).fold(0.0, f32::max)
    }

    /// Render mono samples at `sample_rate`.
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        if sample_rate == 0 {
            return Vec::new();
        }
        let sr = sample_rate as f32;
        let len = (self.duration() * sr).ceil() as usize;
        let mut buffer = vec![0.0f32; len];

        for (index, voice) in self.voices.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(index as u64));
            let first = (voice.start * sr) as usize;
            let last = ((voice.end() * sr).ceil() as usize).min(len);
            let mut phase = 0.0f32;
            let duration = voice.envelope.duration.max(f32::EPSILON);

            for (i, out) in buffer.iter_mut().enumerate().take(last).skip(first) {
                let t = i as f32 / sr - voice.start;
                let gain = voice.envelope.gain_at(t);
                if gain <= 0.0 {
                    continue;
                }
                *out += voice.oscillator.waveform.eval(phase, &mut rng) * gain;
                phase += voice.oscillator.frequency_at(t / duration) / sr;
                phase = phase.fract();
            }
        }

        for s in &mut buffer {
            *s = (*s * self.master_gain).tanh();
        }
        buffer
    }
}
