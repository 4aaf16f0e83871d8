//! Move execution
//!
//! Carries out one planned move end to end: sample a target, animate the
//! curve against the input boundary (or log the intent in dry-run), fire
//! the per-move key press when configured, then hold the inter-move pause.

use std::thread;
use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use crate::cancel::CancelToken;
use crate::config::{Config, PressMode};
use crate::input::{InputBackend, InputError};
use crate::motion::{sample_target, Curve};

/// Polling granularity of the inter-move pause.
const PAUSE_SLICE: Duration = Duration::from_millis(50);

/// Perform move `index` of `total` for the current cycle.
///
/// Move and geometry errors propagate so the caller can abandon the rest
/// of the cycle; a cancellation request makes this return early with `Ok`.
pub fn perform_move<B, R>(
    backend: &mut B,
    rng: &mut R,
    cancel: &CancelToken,
    config: &Config,
    index: u32,
    total: u32,
) -> Result<(), InputError>
where
    B: InputBackend,
    R: Rng + ?Sized,
{
    let bounds = backend.screen_size()?;
    let target =
        sample_target(rng, bounds, config.margin).ok_or_else(|| InputError::UnusableArea {
            margin: config.margin,
            width: bounds.width,
            height: bounds.height,
        })?;
    let duration_ms = rng.random_range(config.min_move_ms..config.max_move_ms);

    if config.dry_run {
        info!(
            "  DRY RUN -> move #{}/{} to ({}, {}) over {}ms",
            index + 1,
            total,
            target.x,
            target.y,
            duration_ms
        );
    } else {
        let start = backend.pointer_position()?;
        let curve = Curve::plan(rng, start, target, Duration::from_millis(duration_ms));
        for (point, delay) in curve.samples(rng) {
            if cancel.is_cancelled() {
                return Ok(());
            }
            backend.move_pointer(point)?;
            thread::sleep(delay);
        }
        info!(
            "  Moved #{}/{} -> ({}, {}) over {}ms",
            index + 1,
            total,
            target.x,
            target.y,
            duration_ms
        );
    }

    if config.press_mode == PressMode::AfterEachMove {
        press_key(backend, config, Some(index));
    }

    if index + 1 < total {
        cancel.sleep_sliced(
            Duration::from_secs_f64(config.per_move_delay_secs),
            PAUSE_SLICE,
        );
    }
    Ok(())
}

/// Best-effort key press. A failure is logged as a warning and never
/// propagates; `after_move` selects the per-move or per-cycle wording.
pub fn press_key<B: InputBackend>(backend: &mut B, config: &Config, after_move: Option<u32>) {
    if config.dry_run {
        match after_move {
            Some(index) => info!(
                "    DRY RUN -> would press '{}' after move #{}",
                config.key,
                index + 1
            ),
            None => info!("  DRY RUN -> would press '{}' after sequence", config.key),
        }
        return;
    }
    match backend.press_key(&config.key) {
        Ok(()) => match after_move {
            Some(index) => info!("    Pressed '{}' after move #{}", config.key, index + 1),
            None => info!("  Pressed '{}' after sequence", config.key),
        },
        Err(e) => warn!("failed to press '{}': {e}", config.key),
    }
}
