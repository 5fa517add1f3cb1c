//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::Duration;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inventory API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8001/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Where the login session is kept between invocations
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,

    /// Lifetime of an access token as issued by the API
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_hours: i64,
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("stacko").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.stacko_session.json".to_string())
}

fn default_token_lifetime() -> i64 {
    24
}

impl SessionConfig {
    /// Token lifetime as a duration; must be positive and representable
    pub fn token_lifetime(&self) -> Result<Duration, ConfigError> {
        let invalid = || ConfigError::Invalid {
            field: "session.token_lifetime_hours",
            error: format!("{} is out of range", self.token_lifetime_hours),
        };
        if self.token_lifetime_hours <= 0 {
            return Err(invalid());
        }
        Duration::try_hours(self.token_lifetime_hours).ok_or_else(invalid)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
            token_lifetime_hours: default_token_lifetime(),
        }
    }
}

/// Reports screen settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_top_n() -> usize {
    5
}

fn default_chart_width() -> usize {
    40
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            chart_width: default_chart_width(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.session.token_lifetime()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("stacko").join("config.toml")),
            Some(PathBuf::from("/etc/stacko/config.toml")),
            Some(PathBuf::from("./stacko.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(url) = std::env::var("STACKO_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("STACKO_API_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        // Session overrides
        if let Ok(file) = std::env::var("STACKO_SESSION_FILE") {
            self.session.file = file;
        }

        // Report overrides
        if let Ok(top_n) = std::env::var("STACKO_REPORT_TOP_N") {
            if let Ok(n) = top_n.parse() {
                self.report.top_n = n;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("STACKO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STACKO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {field}: {error}")]
    Invalid { field: &'static str, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Stacko Configuration
#
# Environment variables override these settings:
# - STACKO_API_URL
# - STACKO_API_TIMEOUT
# - STACKO_SESSION_FILE
# - STACKO_REPORT_TOP_N
# - STACKO_LOG_LEVEL
# - STACKO_LOG_FORMAT

[api]
# Inventory API base URL (including the /api prefix)
base_url = "http://localhost:8001/api"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Where the login session is stored between commands
file = "~/.local/share/stacko/session.json"

# Lifetime of access tokens issued by the API (hours)
token_lifetime_hours = 24

[report]
# Number of products in the "top by value" list
top_n = 5

# Width of text bar charts (characters)
chart_width = 40

# Currency symbol used when printing money
currency_symbol = "$"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/stacko/stacko.log"
"#
    .to_string()
}
