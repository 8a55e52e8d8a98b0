//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile, NotificationMode};
use crate::error::ConfigError;
use crate::generator::NamingScheme;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must load; without one the default locations are
    /// searched and the built-in configuration is kept if none exists. A
    /// file found at a default location must parse.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => {
                let cfg = ConfigFile::load(path)?;
                log::info!("Loaded config from {}", path);
                Some(cfg)
            }
            None => ConfigFile::load_default()?,
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        } else {
            log::debug!("No config file found, using built-in environments");
        }

        Ok(self)
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override with CLI dry-run flag
    pub fn with_dry_run(mut self, dry_run: Option<bool>) -> Self {
        if let Some(d) = dry_run {
            self.config.general.dry_run = d;
        }
        self
    }

    /// Override with CLI output directory
    pub fn with_output_dir(mut self, dir: Option<String>) -> Self {
        if let Some(d) = dir {
            self.config.general.output_dir = d;
        }
        self
    }

    /// Override with CLI notification mode
    pub fn with_notification_mode(mut self, mode: Option<NotificationMode>) -> Self {
        if let Some(m) = mode {
            self.config.notification.mode = m;
        }
        self
    }

    /// Override with CLI subscription email
    pub fn with_email(mut self, email: Option<String>) -> Self {
        if let Some(e) = email {
            self.config.notification.email = Some(e);
        }
        self
    }

    /// Override with CLI naming scheme
    pub fn with_naming(mut self, scheme: Option<NamingScheme>) -> Self {
        if let Some(s) = scheme {
            self.config.naming.scheme = s;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
