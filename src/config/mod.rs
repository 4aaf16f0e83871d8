//! Configuration module
//!
//! Handles the immutable run configuration and its validation.

pub mod settings;

pub use settings::{Config, ConfigError, PressMode};
