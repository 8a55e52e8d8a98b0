//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod alarms;
pub mod config;
pub mod list;
pub mod summary;
pub mod synth;

pub use alarms::run_alarms;
pub use config::run_config;
pub use list::run_list;
pub use summary::run_summary;
pub use synth::run_synth;

use crate::cli::args::Cli;
use crate::config::{Config, ConfigBuilder};
use crate::domain::EnvironmentName;
use crate::error::Result;
use crate::generator::{AlarmGenerator, EnvironmentAlarms};

/// Build the effective configuration from the config file and CLI flags
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_dry_run(cli.dry_run.then_some(true))
        .with_notification_mode(cli.notification_mode.map(Into::into))
        .with_email(cli.email.clone())
        .with_naming(cli.naming.map(Into::into))
        .build();
    Ok(config)
}

/// Resolve the selected environments and generate their alarms
pub fn generate(config: &Config, selected: &[EnvironmentName]) -> Result<Vec<EnvironmentAlarms>> {
    let envs = config.resolve_environments(selected)?;
    let generator = AlarmGenerator::new(config.catalog.clone(), config.naming.scheme);
    let generated = generator.generate_all(&envs)?;

    for g in &generated {
        log::info!(
            "{}: {} alarms -> {}",
            g.environment.name,
            g.len(),
            g.environment.channel.display_id()
        );
    }

    Ok(generated)
}
