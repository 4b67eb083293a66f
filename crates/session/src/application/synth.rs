//! Synth patch derivation - mood beds and one-shot cues.
//!
//! Pure data. The audio director looks up patches here and hands them to
//! the backend port; nothing in this module touches audio primitives.

use std::time::Duration;

use netrift_domain::Mood;

use crate::ports::outbound::{
    AmbiencePatch, CuePatch, DecayShape, FrequencyRamp, LfoSpec, OscillatorSpec, Waveform,
};

/// One-shot cue kinds the director can fire.
///
/// Distinct from the wire-level `AudioCue` codes: `Click` is UI-driven and
/// never appears on the wire, while `combat_start`/`combat_end` codes map to
/// no cue at all (the mood change covers them).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    Pickup,
    Damage,
    Click,
    Success,
}

/// Ambient bed parametrization for a mood.
pub fn ambience_for(mood: Mood) -> AmbiencePatch {
    match mood {
        // Dark, brooding drone: filtered low saw plus a sine an octave up
        Mood::Exploration => AmbiencePatch {
            layers: vec![
                OscillatorSpec {
                    waveform: Waveform::Sawtooth,
                    frequency: 55.0,
                    detune_cents: 5.0,
                    gain: 0.1,
                },
                OscillatorSpec {
                    waveform: Waveform::Sine,
                    frequency: 110.0,
                    detune_cents: -5.0,
                    gain: 0.05,
                },
            ],
            filter_cutoff: 200.0,
            lfo: None,
            master_gain: 0.15,
        },
        // Aggressive: deep bass saw and an edgier square, filter pulsed at 4 Hz
        Mood::Combat => AmbiencePatch {
            layers: vec![
                OscillatorSpec {
                    waveform: Waveform::Sawtooth,
                    frequency: 40.0,
                    detune_cents: 0.0,
                    gain: 0.2,
                },
                OscillatorSpec {
                    waveform: Waveform::Square,
                    frequency: 80.0,
                    detune_cents: 10.0,
                    gain: 0.1,
                },
            ],
            filter_cutoff: 400.0,
            lfo: Some(LfoSpec {
                frequency: 4.0,
                depth: 500.0,
            }),
            master_gain: 0.15,
        },
    }
}

/// One-shot tone parametrization for a cue kind.
pub fn cue_for(kind: CueKind) -> CuePatch {
    match kind {
        // High-tech ping gliding upward
        CueKind::Pickup => CuePatch {
            waveform: Waveform::Sine,
            start_frequency: 800.0,
            ramp: FrequencyRamp::GlideTo(1200.0),
            gain: 0.1,
            decay: DecayShape::Exponential,
            duration: Duration::from_millis(300),
        },
        // Low thump falling off a cliff
        CueKind::Damage => CuePatch {
            waveform: Waveform::Sawtooth,
            start_frequency: 100.0,
            ramp: FrequencyRamp::GlideTo(30.0),
            gain: 0.3,
            decay: DecayShape::Exponential,
            duration: Duration::from_millis(400),
        },
        // Short UI tick
        CueKind::Click => CuePatch {
            waveform: Waveform::Triangle,
            start_frequency: 2000.0,
            ramp: FrequencyRamp::Hold,
            gain: 0.05,
            decay: DecayShape::Exponential,
            duration: Duration::from_millis(50),
        },
        // Rising A major arpeggio for quest updates
        CueKind::Success => CuePatch {
            waveform: Waveform::Sine,
            start_frequency: 440.0,
            ramp: FrequencyRamp::Steps(vec![(0.1, 554.0), (0.2, 659.0)]),
            gain: 0.1,
            decay: DecayShape::Linear,
            duration: Duration::from_millis(600),
        },
    }
}
