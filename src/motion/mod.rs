//! Motion synthesis module
//!
//! Produces the randomized targets and curved trajectories that make the
//! injected pointer activity look hand-driven:
//! - Uniform target sampling inside a margined screen rectangle
//! - Quadratic Bezier paths with a perturbed control point and
//!   per-sample pixel jitter

pub mod curve;
pub mod sampler;

pub use curve::Curve;
pub use sampler::sample_target;
