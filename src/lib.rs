//! restless - unattended human-like pointer and key activity
//!
//! This library provides the scheduling and motion-generation core: a
//! cooperative cycle loop that moves the pointer through randomized
//! curved paths to randomized on-screen targets, triggers a key-press
//! signal, and waits a jittered interval before repeating.
//!
//! The OS injection primitives sit behind the [`input::InputBackend`]
//! trait and every randomized decision draws from an injected
//! [`rand::Rng`], so the whole engine runs deterministically under a
//! seeded rng and a test double.

pub mod cancel;
pub mod config;
pub mod cycle;
pub mod input;
pub mod motion;

use std::time::Duration;

use chrono::Local;
use log::{info, warn};
use rand::Rng;

use crate::cancel::CancelToken;
use crate::config::{Config, PressMode};
use crate::cycle::{executor, planner};
use crate::input::InputBackend;

/// Polling granularity of the inter-cycle wait.
const WAIT_SLICE: Duration = Duration::from_millis(200);

/// Integer pixel position on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Screen dimensions. Queried fresh from the backend before every
/// target sample rather than cached; the query is cheap and the screen
/// can change under us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    pub width: i32,
    pub height: i32,
}

/// The cycle loop: plan, move, press, wait, repeat until cancelled.
pub struct Restless<B, R> {
    backend: B,
    rng: R,
    config: Config,
    cancel: CancelToken,
}

impl<B, R> Restless<B, R>
where
    B: InputBackend,
    R: Rng,
{
    /// Assemble the loop from its collaborators.
    pub fn new(backend: B, rng: R, config: Config, cancel: CancelToken) -> Self {
        Self {
            backend,
            rng,
            config,
            cancel,
        }
    }

    /// Run cycles until the token is cancelled.
    ///
    /// The token is checked at the top of every iteration and inside
    /// every wait, so an in-flight sleep slice is the longest unit of
    /// shutdown latency.
    pub fn run(&mut self) {
        let cfg = &self.config;
        info!(
            "STARTING: base_interval={:.2} min, jitter={:.2}, moves={}-{}, per_move_delay={:.2}s, \
             press_mode={:?}, key={}, move_duration={}-{}ms, margin={}px, dry_run={}",
            cfg.interval_minutes,
            cfg.jitter,
            cfg.min_moves,
            cfg.max_moves,
            cfg.per_move_delay_secs,
            cfg.press_mode,
            cfg.key,
            cfg.min_move_ms,
            cfg.max_move_ms,
            cfg.margin,
            cfg.dry_run
        );

        while !self.cancel.is_cancelled() {
            self.run_cycle();
            if self.cancel.is_cancelled() {
                break;
            }

            let wait_secs = planner::compute_wait_seconds(
                &mut self.rng,
                self.config.interval_minutes,
                self.config.jitter,
            );
            let eta = Local::now() + chrono::Duration::milliseconds((wait_secs * 1000.0) as i64);
            info!(
                "Next cycle at ~{} (in {:.2} minutes).",
                eta.format("%Y-%m-%d %H:%M:%S"),
                wait_secs / 60.0
            );
            self.cancel
                .sleep_sliced(Duration::from_secs_f64(wait_secs), WAIT_SLICE);
        }

        info!("Exited run loop. Bye.");
    }

    /// One cycle: plan a move count, execute the moves, and fire the
    /// per-cycle key press when configured.
    ///
    /// A failed move abandons the remaining moves of this cycle only;
    /// the next cycle starts on schedule.
    pub fn run_cycle(&mut self) {
        let count = planner::choose_move_count(
            &mut self.rng,
            self.config.min_moves,
            self.config.max_moves,
        );
        info!("Performing {count} move(s) this cycle.");

        let mut aborted = false;
        for index in 0..count {
            if self.cancel.is_cancelled() {
                return;
            }
            if let Err(e) = executor::perform_move(
                &mut self.backend,
                &mut self.rng,
                &self.cancel,
                &self.config,
                index,
                count,
            ) {
                warn!(
                    "  move #{} failed: {e}; skipping the rest of this cycle",
                    index + 1
                );
                aborted = true;
                break;
            }
        }

        if self.config.press_mode == PressMode::OncePerCycle
            && !aborted
            && !self.cancel.is_cancelled()
        {
            executor::press_key(&mut self.backend, &self.config, None);
        }
    }
}
