//! Text reveal engine - progressive display of narrator text.
//!
//! Produces a monotonically growing prefix of a target string, one
//! character per tick, at a style-dependent cadence. Every reveal runs
//! under a generation token: a superseding target or an explicit stop
//! invalidates all pending ticks of the old one, so two targets can never
//! interleave and a stale tick can never touch a newer frame.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use netrift_domain::TextStyle;

/// Reveal interval floor forced for long strings and `SystemLog` text.
const FAST_FLOOR: Duration = Duration::from_millis(5);

/// Strings longer than this always reveal at the fast floor.
const LONG_TEXT_THRESHOLD: usize = 300;

/// Base interval forced for `Corrupted` text.
const CORRUPTED_BASE: Duration = Duration::from_millis(30);

/// Upper bound of the per-character jitter added to `Corrupted` ticks.
const CORRUPTED_JITTER_MS: u64 = 50;

/// Observable state of the reveal surface.
///
/// `done` on an empty target is the idle state; completion of a reveal is
/// the frame where `done` is set and `target` equals the revealed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    pub target: String,
    pub prefix: String,
    pub done: bool,
    generation: u64,
}

impl RevealFrame {
    fn idle() -> Self {
        Self {
            target: String::new(),
            prefix: String::new(),
            done: true,
            generation: 0,
        }
    }
}

/// Cancellable, restartable typewriter over a watch channel.
pub struct RevealService {
    /// Configured per-character interval; zero means reveal instantly
    base_interval: Duration,
    tx: watch::Sender<RevealFrame>,
    generation: AtomicU64,
    task: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl RevealService {
    pub fn new(base_interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(RevealFrame::idle());
        Self {
            base_interval,
            tx,
            generation: AtomicU64::new(0),
            task: parking_lot::Mutex::new(None),
        }
    }

    /// Subscribe to reveal frames.
    pub fn subscribe(&self) -> watch::Receiver<RevealFrame> {
        self.tx.subscribe()
    }

    /// Whether a reveal is still in progress.
    pub fn is_revealing(&self) -> bool {
        !self.tx.borrow().done
    }

    /// Begin revealing `text`, cancelling any incomplete reveal first.
    ///
    /// Re-presenting a string that has already fully revealed is a no-op:
    /// the reveal does not restart and completion does not re-fire.
    pub fn start(&self, text: &str, style: TextStyle) {
        {
            let current = self.tx.borrow();
            if current.done && current.target == text && !text.is_empty() {
                return;
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_task();

        if self.base_interval.is_zero() {
            // Instant mode: no intermediate states, completion is synchronous.
            self.tx.send_replace(RevealFrame {
                target: text.to_string(),
                prefix: text.to_string(),
                done: true,
                generation,
            });
            return;
        }

        self.tx.send_replace(RevealFrame {
            target: text.to_string(),
            prefix: String::new(),
            done: false,
            generation,
        });

        let interval = self.cadence(text.chars().count(), style);
        let chars: Vec<char> = text.chars().collect();
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            for ch in chars {
                tokio::time::sleep(interval + jitter(style)).await;
                let mut stale = false;
                tx.send_modify(|frame| {
                    if frame.generation == generation {
                        frame.prefix.push(ch);
                    } else {
                        stale = true;
                    }
                });
                if stale {
                    return;
                }
            }
            tx.send_modify(|frame| {
                if frame.generation == generation {
                    frame.done = true;
                }
            });
        });
        *self.task.lock() = Some(handle);
    }

    /// Cancel pending ticks without firing completion and return to idle.
    ///
    /// Used when the owning turn is superseded or the surface is torn down.
    pub fn stop(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_task();
        self.tx.send_replace(RevealFrame {
            generation,
            ..RevealFrame::idle()
        });
    }

    fn abort_task(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }

    fn cadence(&self, char_count: usize, style: TextStyle) -> Duration {
        match style {
            TextStyle::SystemLog => FAST_FLOOR,
            TextStyle::Corrupted => CORRUPTED_BASE,
            TextStyle::Normal => {
                if char_count > LONG_TEXT_THRESHOLD {
                    FAST_FLOOR
                } else {
                    self.base_interval
                }
            }
        }
    }
}

impl Drop for RevealService {
    fn drop(&mut self) {
        self.abort_task();
    }
}

/// Per-character jitter, drawn independently each tick. Never persisted.
fn jitter(style: TextStyle) -> Duration {
    match style {
        TextStyle::Corrupted => {
            Duration::from_millis(rand::thread_rng().gen_range(0..=CORRUPTED_JITTER_MS))
        }
        _ => Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn frames_until_done(rx: &mut watch::Receiver<RevealFrame>) -> Vec<RevealFrame> {
        let mut frames = vec![rx.borrow().clone()];
        while !frames.last().map(|f| f.done).unwrap_or(true) {
            rx.changed().await.expect("reveal channel closed");
            frames.push(rx.borrow().clone());
        }
        frames
    }

    #[tokio::test(start_paused = true)]
    async fn prefix_grows_monotonically_to_the_full_string() {
        let reveal = RevealService::new(Duration::from_millis(10));
        let mut rx = reveal.subscribe();

        reveal.start("hello", TextStyle::Normal);
        let frames = frames_until_done(&mut rx).await;

        let mut last_len = 0;
        for frame in &frames {
            assert!(frame.prefix.chars().count() >= last_len);
            assert!("hello".starts_with(frame.prefix.as_str()));
            last_len = frame.prefix.chars().count();
        }
        let last = frames.last().expect("at least one frame");
        assert_eq!(last.prefix, "hello");
        assert!(last.done);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_zero_reveals_instantly_and_synchronously() {
        let reveal = RevealService::new(Duration::ZERO);
        let rx = reveal.subscribe();

        reveal.start("all at once", TextStyle::Normal);

        // No awaiting: completion already happened.
        let frame = rx.borrow().clone();
        assert_eq!(frame.prefix, "all at once");
        assert!(frame.done);
        assert!(!reveal.is_revealing());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_never_interleaves_characters() {
        let reveal = RevealService::new(Duration::from_millis(10));
        let mut rx = reveal.subscribe();

        reveal.start("aaaaaaaaaa", TextStyle::Normal);

        // Let a few ticks land, then supersede with a different target.
        for _ in 0..3 {
            rx.changed().await.expect("reveal channel closed");
        }
        reveal.start("bbbb", TextStyle::Normal);

        let frames = frames_until_done(&mut rx).await;
        for frame in frames.iter().filter(|f| f.target == "bbbb") {
            assert!(
                !frame.prefix.contains('a'),
                "stale characters leaked into the new reveal: {:?}",
                frame.prefix
            );
        }
        let last = rx.borrow().clone();
        assert_eq!(last.prefix, "bbbb");
    }

    #[tokio::test(start_paused = true)]
    async fn completed_target_is_idempotent() {
        let reveal = RevealService::new(Duration::from_millis(5));
        let mut rx = reveal.subscribe();

        reveal.start("done", TextStyle::Normal);
        frames_until_done(&mut rx).await;

        // Same string again: no restart, no new frames.
        reveal.start("done", TextStyle::Normal);
        assert!(!reveal.is_revealing());
        assert!(!rx.has_changed().expect("reveal channel closed"));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_without_completing() {
        let reveal = RevealService::new(Duration::from_millis(10));
        let mut rx = reveal.subscribe();

        reveal.start("never finished", TextStyle::Normal);
        rx.changed().await.expect("reveal channel closed");

        reveal.stop();
        rx.changed().await.expect("reveal channel closed");
        let frame = rx.borrow().clone();
        // Back to idle, not a completion of the old target.
        assert!(frame.target.is_empty());
        assert!(frame.prefix.is_empty());

        // Nothing else arrives after the stop.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!rx.has_changed().expect("reveal channel closed"));
    }

    #[tokio::test(start_paused = true)]
    async fn corrupted_text_runs_slow_with_bounded_jitter() {
        let reveal = RevealService::new(Duration::from_millis(10));
        let mut rx = reveal.subscribe();

        let started = tokio::time::Instant::now();
        reveal.start("glitch", TextStyle::Corrupted);
        frames_until_done(&mut rx).await;

        // Six characters at the 30ms corrupted base, each tick stretched by
        // 0..=50ms of jitter: never faster than the base alone, never slower
        // than base plus maximum jitter.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(180), "too fast: {elapsed:?}");
        assert!(elapsed <= Duration::from_millis(480), "too slow: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn long_normal_text_forces_the_fast_floor() {
        let reveal = RevealService::new(Duration::from_millis(100));
        let mut rx = reveal.subscribe();

        let text = "x".repeat(LONG_TEXT_THRESHOLD + 1);
        let started = tokio::time::Instant::now();
        reveal.start(&text, TextStyle::Normal);
        let frames = frames_until_done(&mut rx).await;

        // 301 characters at the 5ms floor, not at the 100ms base (which
        // would take over 30 seconds).
        assert!(started.elapsed() <= Duration::from_secs(2));
        let last = frames.last().expect("at least one frame");
        assert_eq!(last.prefix, text);
    }

    #[tokio::test(start_paused = true)]
    async fn system_log_runs_at_the_fast_floor() {
        let reveal = RevealService::new(Duration::from_millis(100));
        let mut rx = reveal.subscribe();

        let started = tokio::time::Instant::now();
        reveal.start("log", TextStyle::SystemLog);
        frames_until_done(&mut rx).await;

        // Three characters at the 5ms floor, not at the 100ms base.
        assert!(started.elapsed() <= Duration::from_millis(30));
    }
}
