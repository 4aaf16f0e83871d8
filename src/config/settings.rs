//! Run configuration
//!
//! Defines every knob the scheduler and executor read, plus the
//! validation that runs before the loop is entered.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ScreenBounds;

/// When the key-press signal is emitted within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressMode {
    /// Press the key after every individual move.
    AfterEachMove,
    /// Press the key once after the whole move sequence.
    OncePerCycle,
}

/// Immutable run configuration.
///
/// Built once from defaults, an optional JSON file, and CLI overrides;
/// never mutated after [`Config::validate`] passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base minutes between cycles.
    pub interval_minutes: f64,
    /// Fractional jitter (0.0 - 1.0) applied around the base interval.
    pub jitter: f64,
    /// Minimum moves per cycle.
    pub min_moves: u32,
    /// Maximum moves per cycle.
    pub max_moves: u32,
    /// Seconds between individual moves within a cycle.
    pub per_move_delay_secs: f64,
    /// When the key-press signal fires.
    pub press_mode: PressMode,
    /// Key identifier to press.
    pub key: String,
    /// Lower bound on a single move's animation, in milliseconds.
    pub min_move_ms: u64,
    /// Upper bound (exclusive) on a single move's animation, in milliseconds.
    pub max_move_ms: u64,
    /// Pixel margin kept clear of the screen edges when sampling targets.
    pub margin: i32,
    /// Log intended actions without touching the pointer or keyboard.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_minutes: 3.0,
            jitter: 0.15,
            min_moves: 1,
            max_moves: 2,
            per_move_delay_secs: 1.0,
            press_mode: PressMode::OncePerCycle,
            key: "shift".to_string(),
            min_move_ms: 80,
            max_move_ms: 500,
            margin: 5,
            dry_run: false,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Check every bound that can be checked without the screen.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_minutes <= 0.0 {
            return Err(ConfigError::NonPositiveInterval(self.interval_minutes));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(ConfigError::JitterOutOfRange(self.jitter));
        }
        if self.min_moves < 1 || self.max_moves < self.min_moves {
            return Err(ConfigError::InvalidMoveBounds {
                min: self.min_moves,
                max: self.max_moves,
            });
        }
        if self.per_move_delay_secs < 0.0 {
            return Err(ConfigError::NegativeDelay(self.per_move_delay_secs));
        }
        if self.min_move_ms == 0 || self.max_move_ms <= self.min_move_ms {
            return Err(ConfigError::InvalidMoveDuration {
                min: self.min_move_ms,
                max: self.max_move_ms,
            });
        }
        if self.margin < 0 {
            return Err(ConfigError::NegativeMargin(self.margin));
        }
        Ok(())
    }

    /// Check that the margin leaves a usable target area on the screen the
    /// process actually sees. Run once before the loop starts; the screen
    /// is re-queried per sample afterwards.
    pub fn validate_against_screen(&self, bounds: ScreenBounds) -> Result<(), ConfigError> {
        if bounds.width - 2 * self.margin <= 0 || bounds.height - 2 * self.margin <= 0 {
            return Err(ConfigError::MarginTooLarge {
                margin: self.margin,
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(())
    }
}

/// Configuration problems. All fatal before the loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base interval must be greater than zero, got {0} minutes")]
    NonPositiveInterval(f64),
    #[error("jitter fraction must be within 0.0..=1.0, got {0}")]
    JitterOutOfRange(f64),
    #[error("move bounds must satisfy 1 <= min <= max, got {min}..={max}")]
    InvalidMoveBounds { min: u32, max: u32 },
    #[error("per-move delay must be non-negative, got {0} seconds")]
    NegativeDelay(f64),
    #[error("move duration bounds must satisfy 0 < min < max, got {min}ms..{max}ms")]
    InvalidMoveDuration { min: u64, max: u64 },
    #[error("margin must be non-negative, got {0}")]
    NegativeMargin(i32),
    #[error("margin of {margin}px leaves no usable area on a {width}x{height} screen")]
    MarginTooLarge {
        margin: i32,
        width: i32,
        height: i32,
    },
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        let config = Config {
            interval_minutes: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveInterval(_))
        ));
    }

    #[test]
    fn test_rejects_jitter_outside_unit_range() {
        for jitter in [-0.1, 1.1] {
            let config = Config {
                jitter,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::JitterOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_rejects_inverted_move_bounds() {
        let config = Config {
            min_moves: 3,
            max_moves: 2,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMoveBounds { min: 3, max: 2 })
        ));
    }

    #[test]
    fn test_rejects_zero_min_moves() {
        let config = Config {
            min_moves: 0,
            max_moves: 2,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMoveBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_delay() {
        let config = Config {
            per_move_delay_secs: -1.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeDelay(_))
        ));
    }

    #[test]
    fn test_rejects_bad_move_duration() {
        let config = Config {
            min_move_ms: 500,
            max_move_ms: 500,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMoveDuration { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_margin() {
        let config = Config {
            margin: -1,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeMargin(-1))
        ));
    }

    #[test]
    fn test_margin_checked_against_screen() {
        let config = Config {
            margin: 400,
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        let small = ScreenBounds {
            width: 800,
            height: 600,
        };
        assert!(matches!(
            config.validate_against_screen(small),
            Err(ConfigError::MarginTooLarge { .. })
        ));

        let large = ScreenBounds {
            width: 1920,
            height: 1080,
        };
        assert!(config.validate_against_screen(large).is_ok());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config {
            press_mode: PressMode::AfterEachMove,
            key: "f15".to_string(),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.press_mode, PressMode::AfterEachMove);
        assert_eq!(back.key, "f15");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"interval_minutes": 1.5}"#).unwrap();
        assert_eq!(config.interval_minutes, 1.5);
        assert_eq!(config.key, "shift");
        assert_eq!(config.press_mode, PressMode::OncePerCycle);
    }
}
