//! Unified error types for alarmgen
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error while expanding environments into alarms
    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),

    /// Error while synthesizing templates
    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),

    /// Requested environment is not configured
    #[error("Environment not configured: {0}")]
    EnvironmentNotFound(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier that must not be blank was empty
    #[error("Empty identifier: {0}")]
    EmptyIdentifier(&'static str),

    /// Unknown environment name
    #[error("Unknown environment: {0} (expected Dev or Staging)")]
    UnknownEnvironment(String),

    /// Notification topic ARN is malformed
    #[error("Invalid SNS topic ARN: {0}")]
    InvalidTopicArn(String),

    /// Email subscription endpoint is malformed
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Threshold is not a finite number
    #[error("Invalid threshold for {metric}: {value}")]
    InvalidThreshold { metric: String, value: String },

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Refusing to overwrite an existing file
    #[error("Configuration file already exists: {0} (use --force to overwrite)")]
    AlreadyExists(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error reading or writing a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from alarm generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Two alarms in one environment resolved to the same name
    #[error("Duplicate alarm name in {environment}: {name}")]
    DuplicateAlarmName { environment: String, name: String },
}

/// Errors from template synthesis
#[derive(Error, Debug)]
pub enum SynthError {
    /// Two constructs projected onto the same logical ID
    #[error("Logical ID collision in stack {stack}: {logical_id}")]
    DuplicateLogicalId { stack: String, logical_id: String },

    /// Construct ID has no alphanumeric characters left
    #[error("Cannot derive a logical ID from construct id '{0}'")]
    InvalidConstructId(String),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error reading or writing the assembly
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
