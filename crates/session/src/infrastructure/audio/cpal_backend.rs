//! cpal audio backend - renders the synth state to the default output.
//!
//! `cpal::Stream` is not `Send`, so the stream lives on a dedicated thread
//! that is spawned on activation and parked until shutdown. The control
//! side and the realtime callback share the render state behind a
//! `parking_lot` mutex; control writes are tiny and infrequent.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use parking_lot::Mutex;

use crate::ports::outbound::{AmbiencePatch, AudioBackendPort, AudioError, CuePatch};

use super::synth_state::SynthState;

const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;

struct StreamHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<std::thread::JoinHandle<()>>,
}

pub struct CpalAudioBackend {
    shared: Arc<Mutex<SynthState>>,
    stream: Mutex<Option<StreamHandle>>,
}

impl Default for CpalAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpalAudioBackend {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(SynthState::new(DEFAULT_SAMPLE_RATE))),
            stream: Mutex::new(None),
        }
    }
}

impl AudioBackendPort for CpalAudioBackend {
    fn activate(&self) -> Result<(), AudioError> {
        let mut slot = self.stream.lock();
        if slot.is_some() {
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), AudioError>>();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let join = std::thread::Builder::new()
            .name("netrift-audio".to_string())
            .spawn(move || {
                let stream = match build_stream(shared) {
                    Ok(stream) => {
                        let _ = ready_tx.send(Ok(()));
                        stream
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                if let Err(e) = stream.play() {
                    tracing::warn!(error = %e, "audio stream failed to start");
                    return;
                }
                // Hold the stream alive until shutdown.
                let _ = shutdown_rx.recv();
                drop(stream);
            })
            .map_err(|e| AudioError::ActivationFailed(e.to_string()))?;

        match ready_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(Ok(())) => {
                *slot = Some(StreamHandle {
                    shutdown: shutdown_tx,
                    join: Some(join),
                });
                tracing::info!("audio output activated");
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(AudioError::ActivationFailed(
                "audio thread did not report readiness".to_string(),
            )),
        }
    }

    fn set_ambience(&self, patch: &AmbiencePatch) {
        self.shared.lock().set_ambience(patch);
    }

    fn begin_fade(&self, duration: Duration) {
        self.shared.lock().begin_fade(duration);
    }

    fn play_cue(&self, patch: &CuePatch) {
        self.shared.lock().play_cue(patch);
    }

    fn set_suspended(&self, suspended: bool) {
        self.shared.lock().set_suspended(suspended);
    }
}

impl Drop for CpalAudioBackend {
    fn drop(&mut self) {
        if let Some(mut handle) = self.stream.lock().take() {
            let _ = handle.shutdown.send(());
            if let Some(join) = handle.join.take() {
                let _ = join.join();
            }
        }
    }
}

fn build_stream(shared: Arc<Mutex<SynthState>>) -> Result<cpal::Stream, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| AudioError::ActivationFailed("no output device".to_string()))?;

    let config = device
        .default_output_config()
        .map_err(|e| AudioError::ActivationFailed(e.to_string()))?;
    if config.sample_format() != cpal::SampleFormat::F32 {
        return Err(AudioError::ActivationFailed(format!(
            "unsupported sample format {:?}",
            config.sample_format()
        )));
    }

    let channels = config.channels() as usize;
    shared.lock().set_sample_rate(config.sample_rate().0 as f32);

    let callback_state = Arc::clone(&shared);
    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                callback_state.lock().render(data, channels);
            },
            |err| tracing::warn!(error = %err, "audio stream error"),
            None,
        )
        .map_err(|e| AudioError::StreamError(e.to_string()))?;

    Ok(stream)
}
