//! Logging bootstrap.
//!
//! Diagnostics go to stderr through the `log` facade with an `env_logger`
//! backend, so stdout stays clean for `--stdout` exports. `RUST_LOG` takes
//! precedence over the configured level.
//!
//! # Invariants
//! - Initialization is idempotent; later calls are no-ops.
//! - Initialization never panics.

use env_logger::{Builder, Env, Target};
use log::debug;

use crate::error::{PinError, PinResult};

/// Initialize logging at `level` unless `RUST_LOG` is set.
///
/// # Errors
/// Returns a configuration error when `level` is not a known log level.
pub fn init_logging(level: &str) -> PinResult<()> {
    let level = normalize_level(level)?;

    let installed = Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Stderr)
        .format_timestamp_secs()
        .try_init();

    // Err means a logger is already installed
    if installed.is_ok() {
        debug!("logging initialized at level {}", level);
    }
    Ok(())
}

/// Map a user-supplied level name to a filter directive
pub fn normalize_level(level: &str) -> PinResult<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(PinError::Config(format!(
            "unsupported log level `{}`; expected off|trace|debug|info|warn|error",
            other
        ))),
    }
}
