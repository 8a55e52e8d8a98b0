//! Configuration file loading
//!
//! Handles loading and saving configuration as TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Returns `Ok(None)` only when no file exists at any default path.
    pub fn load_default() -> Result<Option<Config>, ConfigError> {
        Self::load_first(Self::default_paths())
    }

    /// Load the first existing file among `paths`
    ///
    /// A file that exists but fails to parse is an error, not skipped.
    pub fn load_first<I>(paths: I) -> Result<Option<Config>, ConfigError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in paths {
            if path.exists() {
                let config = Self::load(&path)?;
                log::info!("Loaded config from {}", path.display());
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    /// Save configuration to a file
    ///
    /// Refuses to replace an existing file unless `force` is set.
    pub fn save<P: AsRef<Path>>(config: &Config, path: P, force: bool) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.display().to_string()));
        }

        let contents = toml::to_string_pretty(config)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Get default configuration file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/alarmgen/config.toml"));

        // User config
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("alarmgen").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("alarmgen.toml"));
        paths.push(PathBuf::from(".alarmgen.toml"));

        paths
    }

    /// Path `config init` writes to when none is given
    pub fn default_save_path() -> PathBuf {
        PathBuf::from("alarmgen.toml")
    }
}
