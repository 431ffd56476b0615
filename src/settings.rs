//! Tracer configuration loaded from TOML.
//!
//! All durations in the file are milliseconds. Every key is optional:
//!
//! ```toml
//! enabled = true
//! style = "detailed"
//! min_total_ms = 250
//!
//! [filters]
//! slow_only_ms = 50
//! group_similar_ms = 10
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::aggregator::FilterConfig;
use crate::output::OutputStyle;
use crate::tracer::options::PrintCondition;
use crate::utils::error::ConfigError;
use log::debug;

/// Settings applied to a `TracerBuilder` through `TracerBuilder::config`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TracerConfig {
    pub enabled: bool,
    pub silent: bool,
    pub style: OutputStyle,

    /// Print gate on the whole session
    pub min_total_ms: Option<u64>,

    /// Print gate on the longest interval; takes precedence over `min_total_ms`
    pub min_span_ms: Option<u64>,

    /// Force colour on or off; unset follows terminal detection
    pub color: Option<bool>,

    pub filters: FilterSettings,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            silent: false,
            style: OutputStyle::Default,
            min_total_ms: None,
            min_span_ms: None,
            color: None,
            filters: FilterSettings::default(),
        }
    }
}

impl TracerConfig {
    /// Print condition configured by the file, if any
    pub fn print_condition(&self) -> Option<PrintCondition> {
        match (self.min_span_ms, self.min_total_ms) {
            (Some(ms), _) => Some(PrintCondition::MinSpanDuration(Duration::from_millis(ms))),
            (None, Some(ms)) => Some(PrintCondition::MinTotalDuration(Duration::from_millis(ms))),
            (None, None) => None,
        }
    }
}

/// `[filters]` table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    pub slow_only_ms: Option<u64>,
    pub hide_ultra_fast_ms: Option<u64>,
    pub group_similar_ms: Option<u64>,
}

impl FilterSettings {
    /// Enable the stages set in the file; stages left unset keep their current value
    pub fn apply(&self, filters: &mut FilterConfig) {
        if let Some(ms) = self.slow_only_ms {
            filters.slow_only = Some(Duration::from_millis(ms));
        }
        if let Some(ms) = self.hide_ultra_fast_ms {
            filters.hide_ultra_fast = Some(Duration::from_millis(ms));
        }
        if let Some(ms) = self.group_similar_ms {
            filters.group_similar = Some(Duration::from_millis(ms));
        }
    }
}

/// Load tracer settings from a TOML file
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Returns
/// Parsed TracerConfig
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid or a style name is unknown
///
/// # Example
/// ```ignore
/// let config = load_config("quick-trace.toml")?;
/// let tracer = Tracer::builder("Import").config(&config).build();
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TracerConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading tracer config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: TracerConfig = toml::from_str(&contents)?;
    Ok(config)
}
