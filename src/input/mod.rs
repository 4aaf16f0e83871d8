//! OS input boundary
//!
//! Everything that touches the pointer, keyboard, or screen geometry goes
//! through the [`InputBackend`] trait, so the scheduling core never talks
//! to the OS directly and tests can substitute a recording double.

pub mod system;

pub use system::SystemInput;

use crate::{Point, ScreenBounds};

/// The injection and geometry primitives the core consumes.
pub trait InputBackend {
    /// Current screen dimensions. Queried fresh before every sample.
    fn screen_size(&mut self) -> Result<ScreenBounds, InputError>;

    /// Current pointer position.
    fn pointer_position(&mut self) -> Result<Point, InputError>;

    /// Move the pointer to an absolute position.
    fn move_pointer(&mut self, target: Point) -> Result<(), InputError>;

    /// Press and release the named key.
    fn press_key(&mut self, key: &str) -> Result<(), InputError>;
}

/// Failures at the input boundary.
///
/// Move and geometry errors abort the remaining moves of the current
/// cycle; key errors are caught at the emission guard and only warn.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to initialize input backend: {0}")]
    Init(String),
    #[error("screen geometry query failed: {0}")]
    Screen(String),
    #[error("pointer position query failed: {0}")]
    Pointer(String),
    #[error("pointer move to ({x}, {y}) rejected: {reason}")]
    Move { x: i32, y: i32, reason: String },
    #[error("key press '{key}' failed: {reason}")]
    Key { key: String, reason: String },
    #[error("margin of {margin}px leaves no usable area on a {width}x{height} screen")]
    UnusableArea {
        margin: i32,
        width: i32,
        height: i32,
    },
}
