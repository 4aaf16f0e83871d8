//! Cooperative cancellation
//!
//! A single shared flag passed into the loop and checked at every
//! suspension point. Termination signals cancel the token; nothing ever
//! resets it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Granularity used by [`CancelToken::sleep`].
const DEFAULT_SLICE: Duration = Duration::from_millis(50);

/// Clonable handle over a one-shot cancellation flag.
///
/// Starts not-cancelled, flips at most once, never resets. Single writer
/// (the signal handler), many readers, so a plain atomic is enough.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, not-yet-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request shutdown. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Sleep for `total`, waking every 50ms to check the flag.
    ///
    /// Returns `true` if the full duration elapsed, `false` if the sleep
    /// was cut short by cancellation.
    pub fn sleep(&self, total: Duration) -> bool {
        self.sleep_sliced(total, DEFAULT_SLICE)
    }

    /// Sleep for `total` in increments of at most `slice`, re-checking the
    /// flag between increments so a cancellation request interrupts the
    /// wait within one slice rather than running it out.
    pub fn sleep_sliced(&self, total: Duration, slice: Duration) -> bool {
        let slice = slice.max(Duration::from_millis(1));
        let mut remaining = total;
        while !remaining.is_zero() {
            if self.is_cancelled() {
                return false;
            }
            let step = remaining.min(slice);
            thread::sleep(step);
            remaining -= step;
        }
        !self.is_cancelled()
    }
}

/// Route SIGINT and SIGTERM to `token`.
///
/// The handler only flips the flag; the loop winds down on its own at the
/// next suspension point.
#[cfg(unix)]
pub fn register_termination_signals(token: &CancelToken) -> std::io::Result<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};

    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&token.cancelled))?;
    }
    Ok(())
}
