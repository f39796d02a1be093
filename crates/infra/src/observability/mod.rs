//! Tracing subscriber setup
//!
//! Library crates only emit `tracing` events. The embedding process calls
//! [`init_tracing`] once to decide where those events go.
//!
//! The filter honours `RUST_LOG` when set and falls back to
//! [`TracingOptions::default_directive`] otherwise.

use goalpulse_domain::{GoalPulseError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Subscriber settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingOptions {
    /// Filter used when `RUST_LOG` is unset (default: `info`)
    pub default_directive: String,
    /// Emit newline-delimited JSON instead of human-readable lines
    pub json: bool,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self { default_directive: "info".to_string(), json: false }
    }
}

/// Build the event filter for `options`
///
/// # Errors
/// Returns `GoalPulseError::Config` if the fallback directive is malformed.
pub fn env_filter(options: &TracingOptions) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&options.default_directive).map_err(|e| {
            GoalPulseError::Config(format!(
                "Invalid tracing directive '{}': {e}",
                options.default_directive
            ))
        }),
    }
}

/// Install the global tracing subscriber
///
/// # Errors
/// Returns `GoalPulseError::Config` if the directive is malformed or a
/// global subscriber is already installed.
pub fn init_tracing(options: &TracingOptions) -> Result<()> {
    let filter = env_filter(options)?;
    let builder = fmt().with_env_filter(filter).with_target(true);

    let installed = if options.json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| GoalPulseError::Config(format!("Failed to initialize tracing: {e}")))?;
    tracing::debug!(json = options.json, "Tracing initialized");
    Ok(())
}
