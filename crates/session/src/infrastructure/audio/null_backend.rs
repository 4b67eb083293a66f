//! No-op audio backend for headless runs and tests.

use std::time::Duration;

use crate::ports::outbound::{AmbiencePatch, AudioBackendPort, AudioError, CuePatch};

/// Accepts every command and renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioBackend;

impl AudioBackendPort for NullAudioBackend {
    fn activate(&self) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_ambience(&self, _patch: &AmbiencePatch) {}

    fn begin_fade(&self, _duration: Duration) {}

    fn play_cue(&self, _patch: &CuePatch) {}

    fn set_suspended(&self, _suspended: bool) {}
}
