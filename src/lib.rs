//! alarmgen - CloudWatch alarm stack generator library
//!
//! This library expands per-environment identifiers and metric tables into
//! CloudWatch alarm descriptors and synthesizes them into CloudFormation
//! templates.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`generator`]: Alarm generation and naming
//! - [`synth`]: Template synthesis and assembly output

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod synth;

pub use error::{AppError, Result};
