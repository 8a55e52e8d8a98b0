//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod defaults;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::domain::{EnvironmentDescriptor, EnvironmentName, MetricCatalog, NotificationChannel};
use crate::error::{AppError, ConfigError, Result};
use crate::generator::NamingScheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default directory synthesized templates are written to
pub const DEFAULT_OUTPUT_DIR: &str = "alarmgen.out";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Notification channel settings
    pub notification: NotificationConfig,
    /// Alarm naming settings
    pub naming: NamingConfig,
    /// Metric tables, standard tables for any table left out
    pub catalog: MetricCatalog,
    /// Per-environment identifiers
    pub environments: Vec<EnvironmentConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            notification: NotificationConfig::default(),
            naming: NamingConfig::default(),
            catalog: MetricCatalog::standard(),
            environments: defaults::environments(),
        }
    }
}

impl Config {
    /// Resolve the selected environments into descriptors
    ///
    /// An empty selection resolves every configured environment, in
    /// configuration order.
    pub fn resolve_environments(
        &self,
        selected: &[EnvironmentName],
    ) -> Result<Vec<EnvironmentDescriptor>> {
        self.check_unique_environments()?;

        if selected.is_empty() {
            return self
                .environments
                .iter()
                .map(|e| e.to_descriptor(&self.notification))
                .collect();
        }

        selected
            .iter()
            .map(|name| {
                self.environments
                    .iter()
                    .find(|e| e.name == *name)
                    .ok_or_else(|| AppError::EnvironmentNotFound(name.to_string()))
                    .and_then(|e| e.to_descriptor(&self.notification))
            })
            .collect()
    }

    fn check_unique_environments(&self) -> std::result::Result<(), ConfigError> {
        let mut seen = Vec::with_capacity(self.environments.len());
        for env in &self.environments {
            if seen.contains(&env.name) {
                return Err(ConfigError::InvalidValue {
                    key: "environments".to_string(),
                    message: format!("environment {} defined more than once", env.name),
                });
            }
            seen.push(env.name);
        }
        Ok(())
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
    /// Directory templates are synthesized into
    pub output_dir: String,
}

impl GeneralConfig {
    /// Log level implied by the `verbose` setting
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            dry_run: false,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

/// How the notification topic is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationMode {
    /// Reference each environment's pre-existing topic
    #[default]
    Existing,
    /// Create a topic per environment with an email subscription
    Managed,
}

impl fmt::Display for NotificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing => write!(f, "existing"),
            Self::Managed => write!(f, "managed"),
        }
    }
}

/// Notification configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub mode: NotificationMode,
    /// Subscriber address for managed topics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Naming configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub scheme: NamingScheme,
}

/// Identifiers for one environment (TOML-friendly format)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Environment name (`Dev` or `Staging`)
    pub name: EnvironmentName,
    /// Alarm name prefix, defaults to `AHS-EHR-<name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Stack name, defaults to `<prefix>-Monitoring-Stack`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    /// Existing SNS topic ARN, required in `existing` notification mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_arn: Option<String>,
    /// Load balancer identifiers
    #[serde(default)]
    pub load_balancers: Vec<String>,
    /// EKS cluster name
    pub cluster_name: String,
    /// Namespaces with namespace-level pod alarms
    #[serde(default)]
    pub namespaces: Vec<String>,
    /// Grouping name to service names
    #[serde(default)]
    pub service_groups: BTreeMap<String, Vec<String>>,
}

impl EnvironmentConfig {
    /// Effective alarm name prefix
    pub fn prefix(&self) -> String {
        self.prefix
            .clone()
            .unwrap_or_else(|| self.name.default_prefix())
    }

    /// Effective stack name
    pub fn stack_name(&self) -> String {
        self.stack_name
            .clone()
            .unwrap_or_else(|| format!("{}-Monitoring-Stack", self.prefix()))
    }

    /// Convert to a validated EnvironmentDescriptor
    pub fn to_descriptor(&self, notification: &NotificationConfig) -> Result<EnvironmentDescriptor> {
        let prefix = self.prefix();

        let channel = match notification.mode {
            NotificationMode::Existing => {
                let topic_arn = self.topic_arn.as_deref().ok_or_else(|| {
                    ConfigError::MissingField(format!("environments.{}.topic_arn", self.name))
                })?;
                NotificationChannel::existing(topic_arn)?
            }
            NotificationMode::Managed => {
                let email = notification
                    .email
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingField("notification.email".to_string()))?;
                NotificationChannel::managed(&format!("{}-CloudWatch-Alerts", prefix), email)?
            }
        };

        let descriptor = EnvironmentDescriptor {
            name: self.name,
            stack_name: self.stack_name(),
            prefix,
            channel,
            load_balancers: self.load_balancers.clone(),
            cluster_name: self.cluster_name.clone(),
            namespaces: self.namespaces.clone(),
            service_groups: self.service_groups.clone(),
        };
        descriptor.validate()?;

        Ok(descriptor)
    }
}
