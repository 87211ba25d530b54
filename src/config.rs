//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input data configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("toronto_data.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Development mode: verbose default log filter
    #[serde(default = "default_debug")]
    pub debug: bool,

    #[serde(default = "default_title")]
    pub title: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_debug() -> bool {
    true
}

fn default_title() -> String {
    "Team-3 COVID-19 Dashboard".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: default_debug(),
            title: default_title(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error. `None` follows the debug flag.
    #[serde(default)]
    pub level: Option<String>,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive for the crate's own logs
    pub fn filter_directive(&self, debug: bool) -> String {
        match (&self.level, debug) {
            (Some(level), _) => format!("toronto_covid={level},tower_http={level}"),
            (None, true) => "toronto_covid=debug,tower_http=debug".to_string(),
            (None, false) => "toronto_covid=info".to_string(),
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

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> (Self, LoadReport) {
        let mut config = Config::default();
        let warnings = config.apply_env_overrides();
        (config, LoadReport { source: None, skipped: Vec::new(), warnings })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<(Self, LoadReport), ConfigError> {
        let mut config = Self::load(path)?;
        let warnings = config.apply_env_overrides();
        let report = LoadReport {
            source: Some(path.to_path_buf()),
            skipped: Vec::new(),
            warnings,
        };
        Ok((config, report))
    }

    /// Load from default locations or environment.
    ///
    /// Runs before logging is installed, so nothing is logged here; call
    /// [`LoadReport::log`] once the subscriber is up.
    pub fn load_default() -> (Self, LoadReport) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("toronto-covid").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths, |key| std::env::var(key).ok())
    }

    /// First readable file in `paths` wins; broken files are recorded and skipped
    fn load_first<F>(paths: &[PathBuf], var: F) -> (Self, LoadReport)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut skipped = Vec::new();
        let mut found = None;

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(config) => {
                    found = Some((config, path.clone()));
                    break;
                }
                Err(e) => skipped.push(e),
            }
        }

        let (mut config, source) = match found {
            Some((config, path)) => (config, Some(path)),
            None => (Config::default(), None),
        };
        let warnings = config.apply_overrides(var);

        (config, LoadReport { source, skipped, warnings })
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Vec<String> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, var: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        // Data overrides
        if let Some(path) = var("TORONTO_COVID_CSV_PATH") {
            self.data.csv_path = PathBuf::from(path);
        }

        // Server overrides
        if let Some(host) = var("TORONTO_COVID_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("TORONTO_COVID_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => warnings.push(format!("Ignoring invalid TORONTO_COVID_PORT {:?}", port)),
            }
        }
        if let Some(debug) = var("TORONTO_COVID_DEBUG") {
            self.server.debug = debug.to_lowercase() != "false" && debug != "0";
        }

        // Logging overrides
        if let Some(level) = var("TORONTO_COVID_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
        if let Some(format) = var("TORONTO_COVID_LOG_FORMAT") {
            match format.to_lowercase().as_str() {
                "json" => self.logging.format = LogFormat::Json,
                "pretty" => self.logging.format = LogFormat::Pretty,
                other => warnings.push(format!("Ignoring unknown log format {:?}", other)),
            }
        }

        warnings
    }
}

/// What happened while loading a config, held until logging is installed
#[derive(Debug, Default)]
pub struct LoadReport {
    /// File the config was read from, `None` for defaults
    pub source: Option<PathBuf>,
    /// Config files that exist but could not be read or parsed
    pub skipped: Vec<ConfigError>,
    /// Environment overrides that were ignored
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn log(&self) {
        for err in &self.skipped {
            tracing::warn!("Skipping config file: {}", err);
        }
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Toronto COVID-19 Dashboard Configuration
#
# Environment variables override these settings:
# - TORONTO_COVID_CSV_PATH
# - TORONTO_COVID_HOST
# - TORONTO_COVID_PORT
# - TORONTO_COVID_DEBUG
# - TORONTO_COVID_LOG_LEVEL
# - TORONTO_COVID_LOG_FORMAT

[data]
# Case records, one row per reported case
csv_path = "toronto_data.csv"

[server]
# Address to serve the dashboard on
host = "127.0.0.1"
port = 8050

# Development mode: debug logging
debug = true

# Browser tab title
title = "Team-3 COVID-19 Dashboard"

[logging]
# Log level: trace, debug, info, warn, error (default follows server.debug)
# level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
