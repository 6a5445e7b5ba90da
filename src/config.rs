use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::MatchParams;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub registry: RegistrySettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    /// CSV file holding the donor pool
    pub csv_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_age_window")]
    pub age_window: u32,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            age_window: default_age_window(),
        }
    }
}

impl MatchingSettings {
    /// Default quota and age window handed to the matcher
    pub fn params(&self) -> MatchParams {
        MatchParams {
            limit: self.default_limit.min(self.max_limit),
            age_window: self.age_window,
        }
    }
}

fn default_limit() -> usize { 10 }
fn default_max_limit() -> usize { 100 }
fn default_age_window() -> u32 { 2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DONOR__)
    /// 5. DONOR_CSV_PATH for the registry location
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DONOR__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("DONOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the standalone registry path variable on top of the layered config
fn apply_overrides(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DONOR_CSV_PATH") {
        Ok(path) if !path.trim().is_empty() => Config::builder()
            .add_source(settings)
            .set_override("registry.csv_path", path)?
            .build(),
        _ => Ok(settings),
    }
}
