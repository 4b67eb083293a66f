//! Audio director - mood crossfades and one-shot cues.
//!
//! Owns the ambient mood state and drives the synthesis backend. Mood
//! changes crossfade: the current bed fades to silence over a fixed
//! duration, then the new bed is swapped in - unless a newer request
//! arrived in the meantime. Fade completions carry an epoch token; a stale
//! completion can never resurrect an old mood.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use netrift_domain::Mood;

use crate::application::synth::{ambience_for, cue_for, CueKind};
use crate::ports::outbound::{AudioBackendPort, AudioError};

/// Time for the outgoing bed to reach silence before the swap.
const FADE_DURATION: Duration = Duration::from_secs(1);

struct DirectorState {
    /// Most recently requested mood; the one that wins after settling
    requested: Mood,
    activated: bool,
    muted: bool,
}

/// Coordinates the ambient bed and one-shot cues over the backend port.
pub struct AudioDirector {
    backend: Arc<dyn AudioBackendPort>,
    state: parking_lot::Mutex<DirectorState>,
    /// Bumped on every mood request; fade tasks check it before swapping
    epoch: Arc<AtomicU64>,
}

impl AudioDirector {
    pub fn new(backend: Arc<dyn AudioBackendPort>) -> Self {
        Self {
            backend,
            state: parking_lot::Mutex::new(DirectorState {
                requested: Mood::default(),
                activated: false,
                muted: false,
            }),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The mood that is (or will be, once fades settle) active.
    pub fn mood(&self) -> Mood {
        self.state.lock().requested
    }

    pub fn is_muted(&self) -> bool {
        self.state.lock().muted
    }

    /// Start audio output. Must be reached from a user-driven path only.
    ///
    /// Idempotent when already active; resumes output when suspended.
    /// Failure leaves the director inert: gameplay continues without sound.
    pub fn activate(&self) -> Result<(), AudioError> {
        let mut state = self.state.lock();
        if state.activated {
            if state.muted {
                state.muted = false;
                self.backend.set_suspended(false);
            }
            return Ok(());
        }

        self.backend.activate()?;
        self.backend.set_ambience(&ambience_for(state.requested));
        state.activated = true;
        Ok(())
    }

    /// Suspend or resume all output without discarding the mood.
    pub fn set_muted(&self, muted: bool) {
        let mut state = self.state.lock();
        if state.muted == muted {
            return;
        }
        state.muted = muted;
        if state.activated {
            self.backend.set_suspended(muted);
        }
    }

    /// Request a mood; equal requests are no-ops, the latest request wins.
    pub fn set_mood(&self, mood: Mood) {
        let mut state = self.state.lock();
        if state.requested == mood {
            return;
        }
        state.requested = mood;
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        if !state.activated {
            // Not yet audible; the bed starts with this mood on activation.
            return;
        }
        drop(state);

        self.backend.begin_fade(FADE_DURATION);

        let backend = Arc::clone(&self.backend);
        let counter = Arc::clone(&self.epoch);
        tokio::spawn(async move {
            tokio::time::sleep(FADE_DURATION).await;
            if counter.load(Ordering::SeqCst) == epoch {
                backend.set_ambience(&ambience_for(mood));
            } else {
                tracing::debug!(?mood, "stale fade completion discarded");
            }
        });
    }

    /// Fire a one-shot cue immediately. Overlapping cues are allowed.
    pub fn play_cue(&self, kind: CueKind) {
        let state = self.state.lock();
        if !state.activated || state.muted {
            return;
        }
        self.backend.play_cue(&cue_for(kind));
    }

    /// Fire a cue after a settle delay, letting the visual update land first.
    pub fn play_cue_after(self: &Arc<Self>, kind: CueKind, delay: Duration) {
        let director = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            director.play_cue(kind);
        });
    }
}
