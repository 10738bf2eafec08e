//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig as ServerConfig;
use crate::report::{ReportSchedule, ScheduleError};
use crate::sentiment::AnalyzerConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub reports: ReportsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_feedback_len")]
    pub max_feedback_len: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_max_feedback_len() -> usize {
    5_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8084".to_string(),
                "http://127.0.0.1:8084".to_string(),
            ],
            max_feedback_len: default_max_feedback_len(),
        }
    }
}

impl ApiConfig {
    /// Runtime server configuration
    pub fn to_server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            max_feedback_len: self.max_feedback_len,
        }
    }
}

/// Where clients (CLI, dashboard) reach the backend
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "http://localhost:8082".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

/// Where the weekly report goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSinkKind {
    #[default]
    Log,
    File,
    Webhook,
}

/// Weekly report scheduling and delivery
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Day of the week, e.g. "mon" or "Monday"
    #[serde(default = "default_report_weekday")]
    pub weekday: String,

    /// UTC time of day as HH:MM
    #[serde(default = "default_report_time")]
    pub time: String,

    #[serde(default)]
    pub sink: ReportSinkKind,

    #[serde(default = "default_report_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub webhook_url: Option<String>,
}

fn default_report_weekday() -> String {
    "mon".to_string()
}

fn default_report_time() -> String {
    "09:00".to_string()
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("./reports")
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            weekday: default_report_weekday(),
            time: default_report_time(),
            sink: ReportSinkKind::default(),
            output_dir: default_report_dir(),
            webhook_url: None,
        }
    }
}

impl ReportsConfig {
    pub fn schedule(&self) -> Result<ReportSchedule, ScheduleError> {
        ReportSchedule::parse(&self.weekday, &self.time)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
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
    ///
    /// Runs before logging exists, so the outcome is returned rather than
    /// logged; call [`ConfigSource::log`] once the subscriber is installed.
    pub fn load_default() -> (Self, ConfigSource) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("sentiment-board").join("config.toml")),
            Some(PathBuf::from("/etc/sentiment-board/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file that parses, falling back to defaults
    pub fn load_first(paths: &[PathBuf]) -> (Self, ConfigSource) {
        let mut failures = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    let source = ConfigSource {
                        path: Some(path.clone()),
                        failures,
                    };
                    return (config, source);
                }
                Err(e) => failures.push(e),
            }
        }

        (Self::from_env(), ConfigSource { path: None, failures })
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(host) = var("SENTIMENT_BOARD_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("SENTIMENT_BOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Client overrides
        if let Some(url) = var("SENTIMENT_BOARD_API_URL") {
            self.dashboard.api_url = url;
        }

        // Analyzer overrides
        if let Some(key) = var("OPENAI_API_KEY") {
            self.analyzer.api_key = Some(key);
            self.analyzer.enabled = true;
        }
        if let Some(url) = var("SENTIMENT_BOARD_ANALYZER_URL") {
            self.analyzer.base_url = url;
        }
        if let Some(model) = var("SENTIMENT_BOARD_ANALYZER_MODEL") {
            self.analyzer.model = model;
        }

        // Report overrides
        if let Some(enabled) = var("SENTIMENT_BOARD_REPORTS_ENABLED") {
            if let Ok(e) = enabled.parse() {
                self.reports.enabled = e;
            }
        }
        if let Some(url) = var("SENTIMENT_BOARD_REPORT_WEBHOOK_URL") {
            self.reports.webhook_url = Some(url);
            self.reports.sink = ReportSinkKind::Webhook;
        }

        // Logging overrides
        if let Some(level) = var("SENTIMENT_BOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SENTIMENT_BOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of [`Config::load_default`]
#[derive(Debug)]
pub struct ConfigSource {
    /// File the configuration came from; `None` means defaults
    pub path: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub failures: Vec<ConfigError>,
}

impl ConfigSource {
    pub fn log(&self) {
        for failure in &self.failures {
            tracing::warn!("{}", failure);
        }

        match &self.path {
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
    r#"# Sentiment Board Configuration
#
# Environment variables override these settings:
# - SENTIMENT_BOARD_HOST
# - SENTIMENT_BOARD_PORT
# - SENTIMENT_BOARD_API_URL
# - SENTIMENT_BOARD_ANALYZER_URL
# - SENTIMENT_BOARD_ANALYZER_MODEL
# - SENTIMENT_BOARD_LOG_LEVEL
# - SENTIMENT_BOARD_LOG_FORMAT
# - SENTIMENT_BOARD_REPORTS_ENABLED
# - SENTIMENT_BOARD_REPORT_WEBHOOK_URL (also selects the webhook sink)
# - OPENAI_API_KEY (also enables the analyzer)

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (empty allows any origin)
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

# Longest accepted feedback, in characters
max_feedback_len = 5000

[analyzer]
# Classify sentiment and filter spam with a chat-completions model.
# When disabled every feedback is accepted and stored as INCONCLUSIVO.
enabled = false

# OpenAI-compatible API base URL
base_url = "https://api.openai.com/v1"

# Model name
model = "gpt-3.5-turbo-0125"

# Request timeout in milliseconds
request_timeout_ms = 20000

[dashboard]
# Backend URL used by the CLI
api_url = "http://localhost:8082"

[reports]
# Generate the weekly report on a schedule
enabled = false

# Day and UTC time of the run
weekday = "mon"
time = "09:00"

# Delivery: log, file (HTML into output_dir) or webhook (JSON POST)
sink = "log"
output_dir = "./reports"
# webhook_url = "https://hooks.example.com/weekly-report"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.api.port, 8082);
        assert_eq!(config.api.max_feedback_len, 5000);
        assert!(!config.analyzer.enabled);
        assert_eq!(config.dashboard.api_url, "http://localhost:8082");
        assert_eq!(config.logging.format, "pretty");
        assert!(!config.reports.enabled);
        assert_eq!(config.reports.sink, ReportSinkKind::Log);
        assert_eq!(config.reports.schedule().unwrap(), ReportSchedule::default());
    }

    #[test]
    fn test_load_first_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nport = ").unwrap();

        let paths = vec![dir.path().join("missing.toml"), broken.clone()];
        let (config, source) = Config::load_first(&paths);

        assert!(source.path.is_none());
        assert_eq!(source.failures.len(), 1);
        assert!(matches!(
            &source.failures[0],
            ConfigError::Parse { path, .. } if *path == broken
        ));
        assert_eq!(config.api.port, Config::from_env().api.port);
    }

    #[test]
    fn test_load_first_skips_to_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let valid = dir.path().join("config.toml");
        std::fs::write(&broken, "not = [toml").unwrap();
        std::fs::write(&valid, "[dashboard]\napi_url = \"http://board:9000\"").unwrap();

        let (config, source) = Config::load_first(&[broken, valid.clone()]);

        assert_eq!(source.path, Some(valid));
        assert_eq!(source.failures.len(), 1);
        assert_eq!(config.dashboard.api_url, "http://board:9000");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = 9000\n\n[analyzer]\nmodel = \"local-model\"").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.analyzer.model, "local-model");
        assert_eq!(config.analyzer.base_url, "https://api.openai.com/v1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();

        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(Path::new("/nonexistent/sentiment-board.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SENTIMENT_BOARD_PORT", "9100"),
            ("SENTIMENT_BOARD_API_URL", "http://board.internal"),
            ("OPENAI_API_KEY", "sk-test"),
            ("SENTIMENT_BOARD_LOG_FORMAT", "json"),
            ("SENTIMENT_BOARD_REPORTS_ENABLED", "true"),
            ("SENTIMENT_BOARD_REPORT_WEBHOOK_URL", "http://hooks.internal/report"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.port, 9100);
        assert_eq!(config.dashboard.api_url, "http://board.internal");
        assert!(config.analyzer.enabled);
        assert_eq!(config.analyzer.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.logging.format, "json");
        assert!(config.reports.enabled);
        assert_eq!(config.reports.sink, ReportSinkKind::Webhook);
    }

    #[test]
    fn test_reports_section() {
        let config: Config =
            toml::from_str("[reports]\nenabled = true\nweekday = \"Friday\"\ntime = \"17:30\"\nsink = \"file\"")
                .unwrap();

        assert!(config.reports.enabled);
        assert_eq!(config.reports.sink, ReportSinkKind::File);
        let schedule = config.reports.schedule().unwrap();
        assert_eq!(schedule.weekday, chrono::Weekday::Fri);
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "SENTIMENT_BOARD_PORT").then(|| "http".to_string()));
        assert_eq!(config.api.port, 8082);
    }

    #[test]
    fn test_to_server_config() {
        let server = ApiConfig::default().to_server_config();
        assert_eq!(server.addr(), "0.0.0.0:8082");
        assert_eq!(server.cors_origins.len(), 2);
    }
}
