//! Render state for the procedural synthesizer.
//!
//! Pure sample math, shared between the realtime callback and the control
//! side behind a mutex. The ambient bed is a handful of phase-tracked
//! oscillators through a one-pole lowpass; cues are short enveloped voices
//! mixed on top. Everything here is driven by the patches from the port
//! layer; no timing decisions are made in this module.

use std::time::Duration;

use crate::ports::outbound::{AmbiencePatch, CuePatch, DecayShape, FrequencyRamp, Waveform};

const TWO_PI: f32 = std::f32::consts::TAU;

/// Ambient gain ramp floor; a bed below this after a fade is dropped.
const FADE_FLOOR: f32 = 0.001;

fn oscillator_sample(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (TWO_PI * phase).sin(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Sawtooth => 2.0 * phase - 1.0,
        Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
    }
}

fn detuned(frequency: f32, cents: f32) -> f32 {
    frequency * (cents / 1200.0).exp2()
}

struct AmbientLayer {
    waveform: Waveform,
    frequency: f32,
    gain: f32,
    phase: f32,
}

struct AmbientBed {
    layers: Vec<AmbientLayer>,
    cutoff: f32,
    lfo: Option<(f32, f32)>, // (frequency, depth)
    lfo_phase: f32,
    filter_memory: f32,
    gain: f32,
    gain_target: f32,
    gain_step: f32,
}

impl AmbientBed {
    fn from_patch(patch: &AmbiencePatch) -> Self {
        Self {
            layers: patch
                .layers
                .iter()
                .map(|spec| AmbientLayer {
                    waveform: spec.waveform,
                    frequency: detuned(spec.frequency, spec.detune_cents),
                    gain: spec.gain,
                    phase: 0.0,
                })
                .collect(),
            cutoff: patch.filter_cutoff,
            lfo: patch.lfo.map(|l| (l.frequency, l.depth)),
            lfo_phase: 0.0,
            filter_memory: 0.0,
            gain: patch.master_gain,
            gain_target: patch.master_gain,
            gain_step: 0.0,
        }
    }

    fn begin_fade(&mut self, duration: Duration, sample_rate: f32) {
        self.gain_target = 0.0;
        let samples = (duration.as_secs_f32() * sample_rate).max(1.0);
        self.gain_step = self.gain / samples;
    }

    fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let mut mixed = 0.0;
        for layer in &mut self.layers {
            mixed += layer.gain * oscillator_sample(layer.waveform, layer.phase);
            layer.phase = (layer.phase + layer.frequency / sample_rate).fract();
        }

        let cutoff = match self.lfo {
            Some((freq, depth)) => {
                let swing = depth * (TWO_PI * self.lfo_phase).sin();
                self.lfo_phase = (self.lfo_phase + freq / sample_rate).fract();
                (self.cutoff + swing).clamp(20.0, 0.45 * sample_rate)
            }
            None => self.cutoff,
        };

        // One-pole lowpass
        let alpha = 1.0 - (-TWO_PI * cutoff / sample_rate).exp();
        self.filter_memory += alpha * (mixed - self.filter_memory);

        if self.gain_step > 0.0 && self.gain > self.gain_target {
            self.gain = (self.gain - self.gain_step).max(self.gain_target);
        }

        self.filter_memory * self.gain
    }

    fn is_silent(&self) -> bool {
        self.gain_target == 0.0 && self.gain <= FADE_FLOOR
    }
}

struct CueVoice {
    waveform: Waveform,
    start_frequency: f32,
    ramp: FrequencyRamp,
    gain: f32,
    decay: DecayShape,
    duration_samples: f32,
    elapsed: f32,
    phase: f32,
}

impl CueVoice {
    fn from_patch(patch: &CuePatch, sample_rate: f32) -> Self {
        Self {
            waveform: patch.waveform,
            start_frequency: patch.start_frequency,
            ramp: patch.ramp.clone(),
            gain: patch.gain,
            decay: patch.decay,
            duration_samples: (patch.duration.as_secs_f32() * sample_rate).max(1.0),
            elapsed: 0.0,
            phase: 0.0,
        }
    }

    fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let progress = self.elapsed / self.duration_samples;

        let frequency = match &self.ramp {
            FrequencyRamp::Hold => self.start_frequency,
            FrequencyRamp::GlideTo(target) => {
                self.start_frequency * (target / self.start_frequency).powf(progress)
            }
            FrequencyRamp::Steps(steps) => {
                let seconds = self.elapsed / sample_rate;
                steps
                    .iter()
                    .rev()
                    .find(|(offset, _)| seconds >= *offset)
                    .map(|(_, f)| *f)
                    .unwrap_or(self.start_frequency)
            }
        };

        let envelope = match self.decay {
            // Drops to roughly a thousandth of the start gain by the end
            DecayShape::Exponential => (-6.9 * progress).exp(),
            DecayShape::Linear => 1.0 - progress,
        };

        let sample = self.gain * envelope * oscillator_sample(self.waveform, self.phase);
        self.phase = (self.phase + frequency / sample_rate).fract();
        self.elapsed += 1.0;
        sample
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration_samples
    }
}

/// Mutable render state behind the callback mutex.
pub struct SynthState {
    sample_rate: f32,
    bed: Option<AmbientBed>,
    voices: Vec<CueVoice>,
    suspended: bool,
}

impl SynthState {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            bed: None,
            voices: Vec::new(),
            suspended: false,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    pub fn set_ambience(&mut self, patch: &AmbiencePatch) {
        self.bed = Some(AmbientBed::from_patch(patch));
    }

    pub fn begin_fade(&mut self, duration: Duration) {
        if let Some(bed) = self.bed.as_mut() {
            bed.begin_fade(duration, self.sample_rate);
        }
    }

    pub fn play_cue(&mut self, patch: &CuePatch) {
        self.voices.push(CueVoice::from_patch(patch, self.sample_rate));
    }

    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    /// Fill an interleaved output buffer.
    pub fn render(&mut self, output: &mut [f32], channels: usize) {
        if self.suspended || channels == 0 {
            output.fill(0.0);
            return;
        }

        for frame in output.chunks_mut(channels) {
            let mut sample = 0.0;
            if let Some(bed) = self.bed.as_mut() {
                sample += bed.next_sample(self.sample_rate);
            }
            for voice in &mut self.voices {
                sample += voice.next_sample(self.sample_rate);
            }
            let sample = sample.clamp(-1.0, 1.0);
            for slot in frame {
                *slot = sample;
            }
        }

        self.voices.retain(|voice| !voice.is_finished());
        if self.bed.as_ref().is_some_and(|bed| bed.is_silent()) {
            self.bed = None;
        }
    }
}
