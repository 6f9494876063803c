//! Configurable tracing setup: timestamp timezone, level, and per-module
//! filter directives.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Which timezone log timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimezoneConfig {
    #[default]
    Local,
    Utc,
}

/// A configurable timer supporting both local and UTC timezones.
///
/// This avoids the type-system churn of picking between two different timer
/// types at the call site by using a single type with runtime configuration.
#[derive(Debug, Clone)]
pub struct ConfigurableTimer {
    timezone: TimezoneConfig,
}

impl ConfigurableTimer {
    pub fn new(timezone: TimezoneConfig) -> Self {
        Self { timezone }
    }
}

impl FormatTime for ConfigurableTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self.timezone {
            TimezoneConfig::Local => {
                let now = chrono::Local::now();
                write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f"))
            }
            TimezoneConfig::Utc => {
                let now = chrono::Utc::now();
                write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3fZ"))
            }
        }
    }
}

/// User-facing logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Include the source file/line of each event.
    pub location: bool,
    /// Include the tracing target (usually the module path) of each event.
    pub target: bool,
    /// Timezone used for rendered timestamps.
    pub timezone: TimezoneConfig,
    /// The base level directive, e.g. `"info"`.
    pub level: String,
    /// Additional per-module directives, e.g. `"tessera_core=debug"`.
    pub modules: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            location: false,
            target: true,
            timezone: TimezoneConfig::default(),
            level: "info".to_string(),
            modules: Vec::new(),
        }
    }
}

/// Build an [`EnvFilter`] from `logging`, deferring to the `RUST_LOG`
/// environment variable when it's set. `default_directive` is used as a
/// last-resort fallback if neither the environment nor `logging.level`
/// produce a parseable filter.
pub fn build_env_filter(logging: &LoggingConfig, default_directive: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directive = if logging.level.is_empty() {
        default_directive.to_string()
    } else {
        logging.level.clone()
    };

    for module in &logging.modules {
        directive.push(',');
        directive.push_str(module);
    }

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(default_directive.to_string()))
}

#[cfg(test)]
#[path = "logging.test.rs"]
mod tests;
