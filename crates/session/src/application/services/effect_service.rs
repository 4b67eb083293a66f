//! Effect timer registry - bounded-life full-screen effects.
//!
//! At most one effect is active at a time; a new registration replaces the
//! current one and restarts the clock. Expiry runs as a generation-guarded
//! task, so a replaced effect's timer can never clear its successor, and
//! dropping the registry tears the timer down with it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use netrift_domain::ScreenEffect;

/// How long a non-persistent effect stays active.
const EFFECT_LIFETIME: Duration = Duration::from_millis(800);

/// Tracks the single active ephemeral effect.
pub struct EffectService {
    tx: watch::Sender<ScreenEffect>,
    /// Shared with expiry tasks so a stale timer can see it was superseded
    generation: Arc<AtomicU64>,
    task: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl Default for EffectService {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectService {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ScreenEffect::None);
        Self {
            tx,
            generation: Arc::new(AtomicU64::new(0)),
            task: parking_lot::Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenEffect> {
        self.tx.subscribe()
    }

    pub fn active(&self) -> ScreenEffect {
        *self.tx.borrow()
    }

    /// Register an effect, replacing the current one.
    ///
    /// Non-persistent effects auto-clear to `None` after the fixed lifetime;
    /// the persistent overlay stays until replaced.
    pub fn trigger(&self, effect: ScreenEffect) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_timer();
        self.tx.send_replace(effect);

        if effect == ScreenEffect::None || effect.is_persistent() {
            return;
        }

        let tx = self.tx.clone();
        let counter = Arc::clone(&self.generation);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(EFFECT_LIFETIME).await;
            if counter.load(Ordering::SeqCst) == generation {
                tx.send_replace(ScreenEffect::None);
            }
        });
        *self.task.lock() = Some(handle);
    }

    /// Clear immediately, cancelling any pending expiry.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_timer();
        self.tx.send_replace(ScreenEffect::None);
    }

    fn abort_timer(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for EffectService {
    fn drop(&mut self) {
        self.abort_timer();
    }
}
