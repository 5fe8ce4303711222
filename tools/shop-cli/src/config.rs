//! CLI configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shop_observability::{LogFormat, LogLevel};
use shop_pdp::PdpConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Product detail view settings.
    #[serde(default)]
    pub pdp: PdpConfig,

    /// Diagnostics settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `human` or `json`.
    #[serde(default = "default_format")]
    pub format: String,

    /// Lowest level emitted by the view: trace, debug, info, warn or error.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_format() -> String {
    "human".to_string()
}

fn default_level() -> String {
    "debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    pub fn log_format(&self) -> Result<LogFormat> {
        match self.format.to_lowercase().as_str() {
            "human" => Ok(LogFormat::Human),
            "json" => Ok(LogFormat::Json),
            other => bail!("logging.format must be 'human' or 'json', got '{}'", other),
        }
    }

    pub fn log_level(&self) -> Result<LogLevel> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => bail!("Unknown logging.level '{}'", other),
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    r#"# Shop CLI configuration

[pdp]
api_base = "http://127.0.0.1:8000"
review_published_message = "Review published"
submit_error_message = "Could not publish the review"
# Ignore photo selections past the end of the image list
guard_photo_index = false
# Skip a review submission while another one is in flight
guard_double_submit = false
# Tell the shopper when a review submission fails
surface_submit_errors = false

[logging]
format = "human"
level = "debug"
"#
    .to_string()
}
