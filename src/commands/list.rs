//! List command implementation
//!
//! Lists the stacks that would be synthesized.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, StackEntry, StackList};
use crate::commands::generate;
use crate::config::Config;
use crate::domain::EnvironmentName;
use crate::error::Result;

/// Execute the list command
pub fn run_list(config: &Config, selected: &[EnvironmentName], format: OutputFormat) -> Result<()> {
    let generated = generate(config, selected)?;

    let stack_list = StackList {
        stacks: generated.iter().map(StackEntry::from).collect(),
    };

    print_output(&stack_list, format)?;

    Ok(())
}
