//! Config command implementation
//!
//! Writes or prints the configuration file.

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::cli::output::{print_output, Message};
use crate::config::{Config, ConfigFile};
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// Execute config commands
pub fn run_config(command: &ConfigCommands, config: &Config, format: OutputFormat) -> Result<()> {
    match command {
        ConfigCommands::Init { path, force } => {
            let path = path
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(ConfigFile::default_save_path);
            let message = init_config(&path, *force, config.general.dry_run)?;
            print_output(&message, format)?;
            Ok(())
        }
        ConfigCommands::Show => run_config_show(config, format),
    }
}

/// Write the built-in configuration to `path`
///
/// In dry-run mode only reports what would be written; an existing file
/// without `force` is still an error.
pub fn init_config(path: &Path, force: bool, dry_run: bool) -> Result<Message> {
    if dry_run {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.display().to_string()).into());
        }
        log::info!("Dry run, not writing {}", path.display());
        return Ok(Message {
            message: format!(
                "[DRY RUN] Would write default configuration to {}",
                path.display()
            ),
        });
    }

    ConfigFile::save(&Config::default(), path, force)?;
    log::info!("Saved default configuration to {}", path.display());

    Ok(Message {
        message: format!("Wrote default configuration to {}", path.display()),
    })
}

fn run_config_show(config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config).map_err(ConfigError::from)?;
            println!("{}", json);
        }
        OutputFormat::Table | OutputFormat::Compact => {
            let toml = toml::to_string_pretty(config).map_err(ConfigError::from)?;
            print!("{}", toml);
        }
    }
    Ok(())
}
