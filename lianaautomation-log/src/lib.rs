//! Diagnostic logging for the LianaAutomation client
//!
//! Call sites log through `tracing`. This crate owns the switches around it:
//! the `LIANAAUTOMATION_DEBUG` flag that gates raw response dumps, and a
//! subscriber that honours the same environment.
//!
//! # Environment Variables
//!
//! - `LIANAAUTOMATION_DEBUG=1` - Enable diagnostic logging
//! - `LIANAAUTOMATION_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `LIANAAUTOMATION_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `RUST_LOG` - Overrides the subscriber filter entirely
//!
//! # Usage
//!
//! ```rust
//! lianaautomation_log::init();
//!
//! if lianaautomation_log::is_debug_enabled() {
//!     tracing::debug!("verbose diagnostics enabled");
//! }
//! ```

use once_cell::sync::Lazy;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level passed to the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl Level {
    /// Parse a level name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Directive understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

/// Output format for the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Compact,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration read from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether diagnostic (debug) logging is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Compact,
        }
    }
}

impl LogConfig {
    /// Read the configuration from `LIANAAUTOMATION_*` variables.
    pub fn from_env() -> Self {
        let debug = env::var("LIANAAUTOMATION_DEBUG")
            .map(|v| flag_value(&v))
            .unwrap_or(false);

        let level = env::var("LIANAAUTOMATION_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = env::var("LIANAAUTOMATION_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Compact);

        if debug {
            DEBUG_ENABLED.store(true, Ordering::SeqCst);
        }

        Self {
            debug,
            level,
            format,
        }
    }
}

fn flag_value(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

// ============================================================================
// Public API
// ============================================================================

/// Read the environment once. Later calls are no-ops.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Whether diagnostic logging is on.
#[inline]
pub fn is_debug_enabled() -> bool {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Toggle diagnostic logging at runtime.
pub fn set_debug(enabled: bool) {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
}

/// The configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Whether the subscriber can emit JSON (`json` feature).
pub const JSON_OUTPUT: bool = cfg!(feature = "json");

/// Install a global `tracing` subscriber built from [`config`].
///
/// `RUST_LOG` wins over `LIANAAUTOMATION_LOG_LEVEL` when both are set. Fails
/// if another subscriber is already installed.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

    let config = config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        Format::Pretty => fmt::layer().pretty().boxed(),
        Format::Compact => fmt::layer().compact().boxed(),
        #[cfg(feature = "json")]
        Format::Json => fmt::layer().json().boxed(),
        #[cfg(not(feature = "json"))]
        Format::Json => fmt::layer().compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    tracing::debug!(
        level = config.level.as_directive(),
        format = ?config.format,
        debug = config.debug,
        "Tracing initialized"
    );
    Ok(())
}
