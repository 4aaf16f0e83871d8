//! Curved trajectory generation
//!
//! Each move follows a quadratic Bezier whose control point is the
//! straight-line midpoint nudged by a random offset, with a pixel of
//! jitter re-rolled at every sample. The jitter can step a sample
//! slightly backwards along the path; that unevenness is the point.

use std::time::Duration;

use rand::Rng;

use crate::Point;

/// Maximum control-point offset from the straight-line midpoint, per axis.
const CONTROL_SPREAD: f64 = 30.0;
/// Maximum per-sample jitter, per axis.
const SAMPLE_JITTER: f64 = 1.0;
/// Target spacing between samples.
const STEP_MS: u64 = 10;
/// Floor on the sample count so short moves still curve.
const MIN_STEPS: u32 = 10;

/// A planned trajectory from `start` to `end` over a fixed duration.
///
/// Samples are produced lazily through [`Curve::samples`]; nothing is
/// materialized up front, the executor consumes one sample, sleeps, then
/// asks for the next.
#[derive(Debug, Clone)]
pub struct Curve {
    start: Point,
    control: (f64, f64),
    end: Point,
    steps: u32,
    step_delay: Duration,
}

impl Curve {
    /// Plan a curve: fix the step count from the duration and roll the
    /// control point once.
    pub fn plan<R: Rng + ?Sized>(
        rng: &mut R,
        start: Point,
        end: Point,
        duration: Duration,
    ) -> Self {
        let steps = ((duration.as_millis() as u64 / STEP_MS) as u32).max(MIN_STEPS);
        let mid_x = f64::from(start.x + end.x) / 2.0;
        let mid_y = f64::from(start.y + end.y) / 2.0;
        let control = (
            mid_x + rng.random_range(-CONTROL_SPREAD..=CONTROL_SPREAD),
            mid_y + rng.random_range(-CONTROL_SPREAD..=CONTROL_SPREAD),
        );
        Self {
            start,
            control,
            end,
            steps,
            step_delay: duration / steps,
        }
    }

    /// Number of steps; the sample sequence has `steps + 1` entries.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Delay to sleep after emitting each sample.
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Bezier position at step `i` with fresh jitter on each axis.
    fn sample_at<R: Rng + ?Sized>(&self, rng: &mut R, i: u32) -> Point {
        let t = f64::from(i) / f64::from(self.steps);
        let inv = 1.0 - t;
        let x = inv * inv * f64::from(self.start.x)
            + 2.0 * inv * t * self.control.0
            + t * t * f64::from(self.end.x)
            + rng.random_range(-SAMPLE_JITTER..=SAMPLE_JITTER);
        let y = inv * inv * f64::from(self.start.y)
            + 2.0 * inv * t * self.control.1
            + t * t * f64::from(self.end.y)
            + rng.random_range(-SAMPLE_JITTER..=SAMPLE_JITTER);
        Point {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }

    /// Lazily yield `(position, delay)` pairs for t = 0/steps ..= steps/steps.
    pub fn samples<'c, 'r, R: Rng + ?Sized>(&'c self, rng: &'r mut R) -> Samples<'c, 'r, R> {
        Samples {
            curve: self,
            rng,
            next: 0,
        }
    }
}

/// Iterator over the samples of one [`Curve`].
pub struct Samples<'c, 'r, R: Rng + ?Sized> {
    curve: &'c Curve,
    rng: &'r mut R,
    next: u32,
}

impl<R: Rng + ?Sized> Iterator for Samples<'_, '_, R> {
    type Item = (Point, Duration);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.curve.steps {
            return None;
        }
        let point = self.curve.sample_at(self.rng, self.next);
        self.next += 1;
        Some((point, self.curve.step_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn distance(a: Point, b: Point) -> f64 {
        let (dx, dy) = (f64::from(a.x - b.x), f64::from(a.y - b.y));
        (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn test_short_move_has_eleven_samples() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = Point { x: 0, y: 0 };
        let end = Point { x: 100, y: 0 };
        let curve = Curve::plan(&mut rng, start, end, Duration::from_millis(100));

        assert_eq!(curve.steps(), 10);
        assert_eq!(curve.step_delay(), Duration::from_millis(10));
        assert_eq!(curve.samples(&mut rng).count(), 11);
    }

    #[test]
    fn test_endpoints_land_near_start_and_end() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let start = Point { x: 0, y: 0 };
            let end = Point { x: 100, y: 0 };
            let curve = Curve::plan(&mut rng, start, end, Duration::from_millis(100));
            let samples: Vec<Point> =
                curve.samples(&mut rng).map(|(point, _)| point).collect();

            assert!(distance(samples[0], start) <= 2.0);
            assert!(distance(*samples.last().unwrap(), end) <= 2.0);
        }
    }

    #[test]
    fn test_samples_stay_within_perturbed_bounding_range() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let start = Point { x: 0, y: 0 };
            let end = Point { x: 100, y: 0 };
            let curve = Curve::plan(&mut rng, start, end, Duration::from_millis(100));

            // Control point within ±30 of the midpoint, jitter within ±1,
            // so every x stays in the straight-line range widened by 32.
            for (point, _) in curve.samples(&mut rng) {
                assert!((-32..=132).contains(&point.x), "x = {}", point.x);
                assert!((-32..=32).contains(&point.y), "y = {}", point.y);
            }
        }
    }

    #[test]
    fn test_long_moves_scale_step_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = Point { x: 0, y: 0 };
        let end = Point { x: 500, y: 300 };
        let curve = Curve::plan(&mut rng, start, end, Duration::from_millis(450));

        assert_eq!(curve.steps(), 45);
        assert_eq!(curve.step_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_very_short_durations_keep_minimum_steps() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = Point { x: 0, y: 0 };
        let end = Point { x: 10, y: 10 };
        let curve = Curve::plan(&mut rng, start, end, Duration::from_millis(30));

        assert_eq!(curve.steps(), 10);
        assert_eq!(curve.step_delay(), Duration::from_millis(3));
    }

    #[test]
    fn test_zero_length_move_stays_put() {
        let mut rng = StdRng::seed_from_u64(9);
        let here = Point { x: 640, y: 360 };
        let curve = Curve::plan(&mut rng, here, here, Duration::from_millis(100));

        for (point, _) in curve.samples(&mut rng) {
            // Control offset pulls a sample at most 15px off per axis
            // (2 * inv * t * 30 peaks at t = 0.5), jitter adds 1.
            assert!((point.x - here.x).abs() <= 16, "x = {}", point.x);
            assert!((point.y - here.y).abs() <= 16, "y = {}", point.y);
        }
    }
}
