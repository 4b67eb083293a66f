//! Audio backend adapters.

mod cpal_backend;
mod null_backend;
mod synth_state;

pub use cpal_backend::CpalAudioBackend;
pub use null_backend::NullAudioBackend;
pub use synth_state::SynthState;
