//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::domain::{AlarmCategory, AlarmDescriptor, ComparisonOperator};
use crate::generator::EnvironmentAlarms;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Stack list entry for display
#[derive(Debug, Clone, Serialize)]
pub struct StackEntry {
    pub stack_name: String,
    pub environment: String,
    pub channel: String,
    pub alarms: usize,
}

impl From<&EnvironmentAlarms> for StackEntry {
    fn from(generated: &EnvironmentAlarms) -> Self {
        Self {
            stack_name: generated.environment.stack_name.clone(),
            environment: generated.environment.name.to_string(),
            channel: generated.environment.channel.display_id().to_string(),
            alarms: generated.len(),
        }
    }
}

impl TableDisplay for StackEntry {
    fn to_table(&self) -> String {
        format!(
            "{} [{}] {} alarms -> {}",
            self.stack_name, self.environment, self.alarms, self.channel
        )
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.stack_name, self.alarms)
    }
}

/// Stack list for display
#[derive(Debug, Clone, Serialize)]
pub struct StackList {
    pub stacks: Vec<StackEntry>,
}

impl TableDisplay for StackList {
    fn to_table(&self) -> String {
        let mut output = format!("Stacks: {}\n\n", self.stacks.len());
        for stack in &self.stacks {
            output.push_str(&stack.to_table());
            output.push('\n');
        }
        output
    }

    fn to_compact(&self) -> String {
        self.stacks
            .iter()
            .map(|s| s.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One alarm row
#[derive(Debug, Clone, Serialize)]
pub struct AlarmRow {
    pub environment: String,
    pub category: AlarmCategory,
    pub name: String,
    pub metric: String,
    pub statistic: String,
    pub comparison: ComparisonOperator,
    pub threshold: f64,
    pub target: String,
}

impl AlarmRow {
    pub fn new(environment: &str, alarm: &AlarmDescriptor) -> Self {
        Self {
            environment: environment.to_string(),
            category: alarm.category(),
            name: alarm.name.clone(),
            metric: alarm.rule.name.clone(),
            statistic: alarm.rule.statistic.to_string(),
            comparison: alarm.comparison,
            threshold: alarm.rule.threshold.value(),
            target: alarm.scope.target().to_string(),
        }
    }
}

impl TableDisplay for AlarmRow {
    fn to_table(&self) -> String {
        format!(
            "  {:<9} {} ({} {} {} {})",
            self.category.to_string(),
            self.name,
            self.statistic,
            self.metric,
            self.comparison.symbol(),
            self.threshold
        )
    }

    fn to_compact(&self) -> String {
        self.name.clone()
    }
}

/// Alarm list for display
#[derive(Debug, Clone, Serialize)]
pub struct AlarmList {
    pub alarms: Vec<AlarmRow>,
}

impl TableDisplay for AlarmList {
    fn to_table(&self) -> String {
        let mut output = String::new();
        let mut current: Option<&str> = None;

        for row in &self.alarms {
            if current != Some(row.environment.as_str()) {
                if current.is_some() {
                    output.push('\n');
                }
                output.push_str(&format!("{}:\n", row.environment));
                current = Some(row.environment.as_str());
            }
            output.push_str(&row.to_table());
            output.push('\n');
        }

        output.push_str(&format!("\nTotal: {} alarms", self.alarms.len()));
        output
    }

    fn to_compact(&self) -> String {
        self.alarms
            .iter()
            .map(|a| a.to_compact())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Per-environment category counts
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentSummary {
    pub environment: String,
    pub counts: BTreeMap<AlarmCategory, usize>,
    pub total: usize,
}

impl From<&EnvironmentAlarms> for EnvironmentSummary {
    fn from(generated: &EnvironmentAlarms) -> Self {
        Self {
            environment: generated.environment.name.to_string(),
            counts: generated.counts(),
            total: generated.len(),
        }
    }
}

impl TableDisplay for EnvironmentSummary {
    fn to_table(&self) -> String {
        let mut output = format!("{}\n", self.environment);
        for (category, count) in &self.counts {
            output.push_str(&format!("  {:<10} {:>4}\n", category.to_string(), count));
        }
        output.push_str(&format!("  {:<10} {:>4}\n", "total", self.total));
        output
    }

    fn to_compact(&self) -> String {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(category, count)| format!("{}={}", category, count))
            .collect();
        format!("{}: {} total={}", self.environment, parts.join(" "), self.total)
    }
}

/// Summary report
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub environments: Vec<EnvironmentSummary>,
}

impl TableDisplay for Summary {
    fn to_table(&self) -> String {
        self.environments
            .iter()
            .map(|e| e.to_table())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_compact(&self) -> String {
        self.environments
            .iter()
            .map(|e| e.to_compact())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Files written (or planned) by synth
#[derive(Debug, Clone, Serialize)]
pub struct SynthReport {
    pub output_dir: String,
    pub dry_run: bool,
    pub files: Vec<String>,
    pub stacks: Vec<StackEntry>,
}

impl TableDisplay for SynthReport {
    fn to_table(&self) -> String {
        let verb = if self.dry_run { "Would write" } else { "Wrote" };
        let mut output = String::new();
        if self.dry_run {
            output.push_str("[DRY RUN] ");
        }
        output.push_str(&format!(
            "{} {} file(s) to {}\n",
            verb,
            self.files.len(),
            self.output_dir
        ));
        for file in &self.files {
            output.push_str(&format!("  {}\n", file));
        }
        for stack in &self.stacks {
            output.push_str(&format!("{}\n", stack.to_table()));
        }
        output
    }

    fn to_compact(&self) -> String {
        self.files.join(",")
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        format!("✓ {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generator::AlarmGenerator;

    fn generated() -> Vec<EnvironmentAlarms> {
        let envs = Config::default().resolve_environments(&[]).unwrap();
        AlarmGenerator::default().generate_all(&envs).unwrap()
    }

    #[test]
    fn test_stack_entry_table() {
        let all = generated();
        let entry = StackEntry::from(&all[0]);
        assert_eq!(entry.alarms, 33);
        assert!(entry.to_table().starts_with("AHS-EHR-Dev-Monitoring-Stack [Dev] 33 alarms"));
        assert_eq!(entry.to_compact(), "AHS-EHR-Dev-Monitoring-Stack:33");
    }

    #[test]
    fn test_alarm_row_symbol() {
        let all = generated();
        let running = all[0]
            .alarms
            .iter()
            .find(|a| a.rule.name == crate::domain::RUNNING_PODS_METRIC)
            .unwrap();
        let row = AlarmRow::new("Dev", running);
        assert!(row.to_table().contains("< 1"));
    }

    #[test]
    fn test_alarm_list_groups_by_environment() {
        let all = generated();
        let rows: Vec<AlarmRow> = all
            .iter()
            .flat_map(|g| {
                let env = g.environment.name.to_string();
                g.alarms.iter().map(move |a| AlarmRow::new(&env, a))
            })
            .collect();
        let list = AlarmList { alarms: rows };
        let table = list.to_table();
        assert!(table.starts_with("Dev:\n"));
        assert!(table.contains("\nStaging:\n"));
        assert!(table.ends_with("Total: 66 alarms"));
    }

    #[test]
    fn test_summary_compact() {
        let all = generated();
        let summary = EnvironmentSummary::from(&all[0]);
        assert_eq!(
            summary.to_compact(),
            "Dev: edge=4 namespace=16 service=8 node=5 total=33"
        );
    }

    #[test]
    fn test_message_display() {
        let msg = Message {
            message: "Operation completed".to_string(),
        };

        assert!(msg.to_table().starts_with('✓'));
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            serde_json::json!({ "message": "Operation completed" })
        );
    }
}
