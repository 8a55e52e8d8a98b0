//! Alarms command implementation
//!
//! Shows the generated alarm descriptors.

use crate::cli::args::{AlarmsArgs, OutputFormat};
use crate::cli::output::{print_output, AlarmList, AlarmRow};
use crate::commands::generate;
use crate::config::Config;
use crate::domain::{AlarmCategory, EnvironmentName};
use crate::error::Result;

/// Execute the alarms command
pub fn run_alarms(
    args: &AlarmsArgs,
    config: &Config,
    selected: &[EnvironmentName],
    format: OutputFormat,
) -> Result<()> {
    let list = alarm_list(config, selected, args.category.map(Into::into))?;
    print_output(&list, format)?;
    Ok(())
}

/// Build the alarm listing, optionally limited to one category
pub fn alarm_list(
    config: &Config,
    selected: &[EnvironmentName],
    category: Option<AlarmCategory>,
) -> Result<AlarmList> {
    let generated = generate(config, selected)?;

    let alarms = generated
        .iter()
        .flat_map(|g| {
            let env = g.environment.name.as_str();
            g.alarms
                .iter()
                .filter(move |a| category.map_or(true, |c| a.category() == c))
                .map(move |a| AlarmRow::new(env, a))
        })
        .collect();

    Ok(AlarmList { alarms })
}
