//! restless CLI
//!
//! Parses flags (optionally seeded from a JSON config file), validates
//! the configuration, wires the termination signals to a cancellation
//! token, and hands everything to the cycle loop.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use restless::cancel::CancelToken;
use restless::config::{Config, ConfigError, PressMode};
use restless::input::{InputBackend, SystemInput};
use restless::Restless;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Moves the pointer along randomized curves and presses a key on a jittered schedule"
)]
struct Args {
    /// Base interval between cycles in minutes
    #[arg(short = 'm', long)]
    minutes: Option<f64>,

    /// Jitter fraction 0.0-1.0 applied around the interval
    #[arg(short = 'j', long)]
    jitter: Option<f64>,

    /// Minimum moves per cycle
    #[arg(long)]
    min_moves: Option<u32>,

    /// Maximum moves per cycle
    #[arg(long)]
    max_moves: Option<u32>,

    /// Seconds between individual moves in a cycle
    #[arg(short = 'b', long = "between")]
    between: Option<f64>,

    /// Press the key after every move
    #[arg(long)]
    press_each: bool,

    /// Press the key once after the sequence (overrides --press-each)
    #[arg(long)]
    press_once: bool,

    /// Key identifier to press (e.g. shift, f15, a)
    #[arg(short = 'k', long)]
    key: Option<String>,

    /// Lower bound on a single move's animation in milliseconds
    #[arg(long)]
    min_move_ms: Option<u64>,

    /// Upper bound on a single move's animation in milliseconds
    #[arg(long)]
    max_move_ms: Option<u64>,

    /// Pixel margin kept clear of the screen edges
    #[arg(long)]
    margin: Option<i32>,

    /// Log intended actions without moving or pressing
    #[arg(long)]
    dry_run: bool,

    /// JSON configuration file; flags override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Resolve the final configuration: defaults, then the config file,
    /// then explicit flags.
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(minutes) = self.minutes {
            config.interval_minutes = minutes;
        }
        if let Some(jitter) = self.jitter {
            config.jitter = jitter;
        }
        if let Some(min_moves) = self.min_moves {
            config.min_moves = min_moves;
        }
        if let Some(max_moves) = self.max_moves {
            config.max_moves = max_moves;
        }
        if let Some(between) = self.between {
            config.per_move_delay_secs = between;
        }
        if self.press_once {
            config.press_mode = PressMode::OncePerCycle;
        } else if self.press_each {
            config.press_mode = PressMode::AfterEachMove;
        }
        if let Some(key) = self.key {
            config.key = key;
        }
        if let Some(min_move_ms) = self.min_move_ms {
            config.min_move_ms = min_move_ms;
        }
        if let Some(max_move_ms) = self.max_move_ms {
            config.max_move_ms = max_move_ms;
        }
        if let Some(margin) = self.margin {
            config.margin = margin;
        }
        if self.dry_run {
            config.dry_run = true;
        }

        Ok(config)
    }
}

fn fatal(err: &dyn std::fmt::Display) -> ! {
    error!("{err}");
    process::exit(1);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => fatal(&e),
    };
    if let Err(e) = config.validate() {
        fatal(&e);
    }

    let mut backend = match SystemInput::new() {
        Ok(backend) => backend,
        Err(e) => fatal(&e),
    };
    match backend.screen_size() {
        Ok(bounds) => {
            if let Err(e) = config.validate_against_screen(bounds) {
                fatal(&e);
            }
        }
        Err(e) => fatal(&e),
    }

    let cancel = CancelToken::new();
    #[cfg(unix)]
    if let Err(e) = restless::cancel::register_termination_signals(&cancel) {
        log::warn!("failed to install signal handlers: {e}");
    }

    Restless::new(backend, rand::rng(), config, cancel).run();
}
