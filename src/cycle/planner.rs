//! Cycle planning
//!
//! Pure functions of their inputs and the injected random source, so a
//! seeded rng makes every decision reproducible.

use rand::Rng;

/// Hard floor on the inter-cycle wait.
pub const MIN_WAIT_SECS: f64 = 0.1;

/// Uniform move count in `[min, max]` inclusive.
///
/// Returns `min` unchanged when the bounds coincide.
pub fn choose_move_count<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Seconds to wait before the next cycle: the base interval scaled by
/// `(1 + u)` with u uniform in `[-jitter, +jitter]`, floored at
/// [`MIN_WAIT_SECS`].
pub fn compute_wait_seconds<R: Rng + ?Sized>(rng: &mut R, base_minutes: f64, jitter: f64) -> f64 {
    let base = base_minutes * 60.0;
    let factor = if jitter > 0.0 {
        1.0 + rng.random_range(-jitter..=jitter)
    } else {
        1.0
    };
    (base * factor).max(MIN_WAIT_SECS)
}
