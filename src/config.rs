//! Configuration for the deck viewer
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/podium/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "dark", "light", "nord"
    pub theme: String,

    /// Render/animation tick interval in milliseconds
    pub tick_ms: u64,

    /// Counter count-up duration in milliseconds
    pub counter_duration_ms: u64,

    /// Rows shaved off the viewport bottom before entrance reveals trigger
    pub reveal_lead_rows: usize,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Whether to also write logs to rotating files
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_ms: 33,
            counter_duration_ms: 1500,
            reveal_lead_rows: crate::reveal::ENTRANCE_LEAD_ROWS,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "podium".to_string(),
        }
    }
}

/// Config file structure (everything optional; absent keys keep defaults)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    theme: Option<String>,
    tick_ms: Option<u64>,
    counter_duration_ms: Option<u64>,
    reveal_lead_rows: Option<usize>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
}

impl Config {
    /// Path of the config file, if a config directory exists on this platform
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("podium").join("config.toml"))
    }

    /// Load configuration with env > file > defaults precedence
    pub fn load() -> Self {
        let file = Self::read_file_config();
        let mut config = Self::from_file_config(file.unwrap_or_default());
        config.apply_env();
        config
    }

    fn read_file_config() -> Option<FileConfig> {
        let path = Self::config_path()?;
        let text = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&text) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                eprintln!(
                    "Warning: ignoring malformed config {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    fn from_file_config(file: FileConfig) -> Self {
        let defaults = Config::default();
        let logging = file.logging.unwrap_or_default();
        Self {
            theme: file.theme.unwrap_or(defaults.theme),
            tick_ms: file.tick_ms.unwrap_or(defaults.tick_ms),
            counter_duration_ms: file
                .counter_duration_ms
                .unwrap_or(defaults.counter_duration_ms),
            reveal_lead_rows: file.reveal_lead_rows.unwrap_or(defaults.reveal_lead_rows),
            logging: LoggingConfig {
                level: logging.level.unwrap_or(defaults.logging.level),
                file_enabled: logging
                    .file_enabled
                    .unwrap_or(defaults.logging.file_enabled),
                file_dir: logging
                    .file_dir
                    .map(PathBuf::from)
                    .unwrap_or(defaults.logging.file_dir),
                file_prefix: logging.file_prefix.unwrap_or(defaults.logging.file_prefix),
            },
        }
    }

    fn apply_env(&mut self) {
        if let Ok(theme) = std::env::var("PODIUM_THEME") {
            self.theme = theme;
        }
        if let Ok(level) = std::env::var("PODIUM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(tick) = env_parse("PODIUM_TICK_MS") {
            self.tick_ms = tick;
        }
        if let Some(duration) = env_parse("PODIUM_COUNTER_DURATION_MS") {
            self.counter_duration_ms = duration;
        }
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Write a commented template config if none exists yet
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(path, Self::template());
    }

    /// Reset the config file to the commented template
    pub fn reset_config_file() -> std::io::Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory")
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Self::template())?;
        Ok(path)
    }

    fn template() -> &'static str {
        r#"# podium configuration
# Values commented out fall back to built-in defaults.
# Environment variables (PODIUM_THEME, PODIUM_LOG_LEVEL, PODIUM_TICK_MS,
# PODIUM_COUNTER_DURATION_MS) override everything here.

# theme = "dark"              # dark | light | nord
# tick_ms = 33                # render/animation tick interval
# counter_duration_ms = 1500  # KPI count-up duration
# reveal_lead_rows = 2        # rows before the fold where reveals trigger

[logging]
# level = "info"              # error | warn | info | debug | trace
# file_enabled = false        # also write rotating log files
# file_dir = "./logs"
# file_prefix = "podium"
"#
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}
