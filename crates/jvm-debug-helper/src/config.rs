use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Once;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::env::{Environment, BPL_LOG_LEVEL};
use crate::ipv6::DEFAULT_IPV6_PROBE_PATH;

/// Host-supplied settings for the helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperConfig {
    /// File whose first character is `1` when the kernel has IPv6 disabled.
    ///
    /// Tests point this at a temporary file.
    #[serde(default = "HelperConfig::default_ipv6_probe_path")]
    pub ipv6_probe_path: PathBuf,
}

impl HelperConfig {
    fn default_ipv6_probe_path() -> PathBuf {
        PathBuf::from(DEFAULT_IPV6_PROBE_PATH)
    }

    pub fn with_ipv6_probe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ipv6_probe_path = path.into();
        self
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            ipv6_probe_path: Self::default_ipv6_probe_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Buildpack log level: `trace`, `debug`, `info`, `warn` or `error`, any case.
    ///
    /// Per-target directives belong in `RUST_LOG`; anything unrecognized here falls
    /// back to `info`.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    /// Build the logging config from `BPL_LOG_LEVEL`, falling back to defaults.
    pub fn from_env(env: &Environment) -> Self {
        let mut config = Self::default();
        if let Some(level) = env.get(BPL_LOG_LEVEL) {
            config.level = level.to_owned();
        }
        config
    }

    /// The level named by `level`, or `None` if it isn't a buildpack level.
    pub fn parse_level(level: &str) -> Option<LevelFilter> {
        match level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LevelFilter::TRACE),
            "debug" => Some(LevelFilter::DEBUG),
            "info" => Some(LevelFilter::INFO),
            "warn" => Some(LevelFilter::WARN),
            "error" => Some(LevelFilter::ERROR),
            _ => None,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        Self::parse_level(&self.level).unwrap_or(LevelFilter::INFO)
    }

    /// Create the effective `EnvFilter`.
    ///
    /// The configured level is the default directive; `rust_log` (normally the value
    /// of `RUST_LOG`) adds per-target directives on top. Invalid directives are dropped.
    pub fn env_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level_filter().into())
            .parse_lossy(rust_log.unwrap_or_default().trim())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber, writing to stderr.
///
/// Stdout and fd 3 carry the helper output, so logs must never go there. Only the
/// first call has an effect.
pub fn init_tracing(config: &LoggingConfig, rust_log: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter(rust_log);
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let result = if config.json {
            builder.json().try_init()
        } else {
            builder.without_time().try_init()
        };
        if let Err(err) = result {
            eprintln!("jvm-debug-helper: failed to install tracing subscriber: {err}");
            return;
        }
        if LoggingConfig::parse_level(&config.level).is_none() {
            tracing::warn!(level = %config.level, "unknown {BPL_LOG_LEVEL}; using info");
        }
    });
}
