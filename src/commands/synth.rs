//! Synth command implementation
//!
//! Writes one template per environment plus the manifest.

use crate::cli::args::{OutputFormat, SynthArgs};
use crate::cli::output::{print_output, StackEntry, SynthReport};
use crate::commands::generate;
use crate::config::Config;
use crate::domain::EnvironmentName;
use crate::error::Result;
use crate::synth::{Assembly, Stack};

/// Execute the synth command
pub fn run_synth(
    args: &SynthArgs,
    config: &Config,
    selected: &[EnvironmentName],
    format: OutputFormat,
) -> Result<()> {
    let report = synthesize(config, selected, args.output.as_deref())?;
    print_output(&report, format)?;
    Ok(())
}

/// Generate, synthesize and (unless dry-run) write the assembly
pub fn synthesize(
    config: &Config,
    selected: &[EnvironmentName],
    output: Option<&str>,
) -> Result<SynthReport> {
    let generated = generate(config, selected)?;

    let stacks = generated
        .iter()
        .map(Stack::synthesize)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let output_dir = output.unwrap_or(&config.general.output_dir).to_string();
    let assembly = Assembly::new(&output_dir, stacks);

    let files = assembly
        .planned_files()
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    if config.general.dry_run {
        log::info!("Dry run, nothing written to {}", output_dir);
    } else {
        assembly.write()?;
    }

    Ok(SynthReport {
        output_dir,
        dry_run: config.general.dry_run,
        files,
        stacks: generated.iter().map(StackEntry::from).collect(),
    })
}
