//! Audio backend port - the synthesis primitives the director drives.
//!
//! The director owns all timing and mood logic; the backend only renders
//! the patches it is handed. Keeping the port this narrow lets tests swap
//! in a recording backend and assert on the exact command sequence.

use std::time::Duration;

use super::error::AudioError;

/// Basic oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One continuous layer of an ambient bed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorSpec {
    pub waveform: Waveform,
    pub frequency: f32,
    pub detune_cents: f32,
    pub gain: f32,
}

/// Low-frequency modulation of the ambient filter cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LfoSpec {
    pub frequency: f32,
    /// Cutoff swing in Hz around the base cutoff
    pub depth: f32,
}

/// Full parametrization of an ambient bed for one mood.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiencePatch {
    pub layers: Vec<OscillatorSpec>,
    /// Lowpass cutoff applied to the summed layers
    pub filter_cutoff: f32,
    pub lfo: Option<LfoSpec>,
    pub master_gain: f32,
}

/// Frequency trajectory of a one-shot cue.
#[derive(Debug, Clone, PartialEq)]
pub enum FrequencyRamp {
    /// Hold the starting frequency
    Hold,
    /// Exponential glide to a target over the cue's duration
    GlideTo(f32),
    /// Stepped melody: (seconds offset, frequency) pairs
    Steps(Vec<(f32, f32)>),
}

/// Gain envelope tail of a one-shot cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayShape {
    Exponential,
    Linear,
}

/// Short parametric tone for pickup/damage/click/success cues.
#[derive(Debug, Clone, PartialEq)]
pub struct CuePatch {
    pub waveform: Waveform,
    pub start_frequency: f32,
    pub ramp: FrequencyRamp,
    pub gain: f32,
    pub decay: DecayShape,
    pub duration: Duration,
}

/// Port to the synthesis backend.
///
/// All methods except `activate` are fire-and-forget: the backend applies
/// them to its render state and returns immediately.
#[cfg_attr(test, mockall::automock)]
pub trait AudioBackendPort: Send + Sync {
    /// Start the output stream. Host audio subsystems commonly forbid
    /// autonomous start, so this is only called from a user-driven path.
    /// Calling it when already active is a no-op.
    fn activate(&self) -> Result<(), AudioError>;

    /// Replace the ambient bed with a new patch at full gain.
    fn set_ambience(&self, patch: &AmbiencePatch);

    /// Ramp the current ambient bed to silence over `duration`.
    fn begin_fade(&self, duration: Duration);

    /// Fire a one-shot cue. Overlapping cues overlap in output.
    fn play_cue(&self, patch: &CuePatch);

    /// Suspend or resume all output without discarding render state.
    fn set_suspended(&self, suspended: bool);
}
