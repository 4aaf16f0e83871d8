//! Target position sampling

use rand::Rng;

use crate::{Point, ScreenBounds};

/// Pick a uniform random target inside `bounds`, keeping `margin` pixels
/// clear of every edge: x in `[margin, width - margin)`, y in
/// `[margin, height - margin)`, independently.
///
/// Returns `None` when the margin leaves no usable area (the margin is
/// validated against the screen before the loop starts, but the screen is
/// re-queried per sample and may have shrunk since).
pub fn sample_target<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: ScreenBounds,
    margin: i32,
) -> Option<Point> {
    if margin < 0 {
        return None;
    }
    let (hi_x, hi_y) = (bounds.width - margin, bounds.height - margin);
    if margin >= hi_x || margin >= hi_y {
        return None;
    }
    Some(Point {
        x: rng.random_range(margin..hi_x),
        y: rng.random_range(margin..hi_y),
    })
}
