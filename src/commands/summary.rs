//! Summary command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, EnvironmentSummary, Summary};
use crate::commands::generate;
use crate::config::Config;
use crate::domain::EnvironmentName;
use crate::error::Result;

/// Execute the summary command
pub fn run_summary(
    config: &Config,
    selected: &[EnvironmentName],
    format: OutputFormat,
) -> Result<()> {
    let generated = generate(config, selected)?;

    let summary = Summary {
        environments: generated.iter().map(EnvironmentSummary::from).collect(),
    };

    print_output(&summary, format)?;

    Ok(())
}
