use std::path::Path;
use std::sync::RwLock;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::error::Result;

lazy_static! {
    // Global configuration builder. Kept as a builder so `set` can layer
    // overrides on top of the file and environment sources.
    static ref CONFIG: RwLock<ConfigBuilder<DefaultState>> = RwLock::new(Config::builder());
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub max_size: u64,
    pub max_backups: u8,
}

/// Scan configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub include_subfolders: bool,
    pub channel_capacity: usize,
    pub log_consumer: bool,
}

/// Export configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub pretty_json: bool,
}

/// Typed view of the full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub log: LogConfig,
    pub scan: ScanConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// Initialize the global configuration from an embedded TOML string,
    /// with environment variables (prefix `APP`) layered on top.
    pub fn init(default_config: Option<&str>) -> Result<()> {
        let mut builder = Config::builder();

        if let Some(contents) = default_config {
            builder = builder.add_source(File::from_str(contents, FileFormat::Toml));
        }

        // APP_LOG__LEVEL=debug maps to log.level.
        builder = builder.add_source(Environment::with_prefix("APP").separator("__"));

        // Fail fast on malformed defaults.
        builder.build_cloned()?;

        *CONFIG.write()? = builder;
        Ok(())
    }

    /// Layer an optional configuration file over the current sources.
    pub fn merge_config(config_file: Option<&Path>) -> Result<()> {
        if let Some(path) = config_file {
            let mut writer = CONFIG.write()?;
            let merged = writer.clone().add_source(File::from(path));
            merged.build_cloned()?;
            *writer = merged;
        }
        Ok(())
    }

    /// Override a single configuration value.
    pub fn set(key: &str, value: &str) -> Result<()> {
        let mut writer = CONFIG.write()?;
        *writer = writer.clone().set_override(key, value)?;
        Ok(())
    }

    /// Get a single configuration value by dotted key.
    pub fn get<'de, T: Deserialize<'de>>(key: &str) -> Result<T> {
        Ok(CONFIG.read()?.build_cloned()?.get::<T>(key)?)
    }

    /// Deserialize the whole configuration into the typed view.
    pub fn fetch() -> Result<AppConfig> {
        Ok(CONFIG.read()?.build_cloned()?.try_deserialize()?)
    }
}
