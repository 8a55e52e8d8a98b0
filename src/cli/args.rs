//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::config::NotificationMode;
use crate::domain::{AlarmCategory, EnvironmentName};
use crate::generator::NamingScheme;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// CloudWatch alarm stack generator
///
/// Expands per-environment identifiers and metric tables into alarm
/// templates wired to an SNS notification topic.
#[derive(Parser, Debug)]
#[command(name = "alarmgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ALARMGEN_CONFIG")]
    pub config: Option<String>,

    /// Limit to an environment (repeatable, default: all)
    #[arg(short, long = "env", global = true, value_enum)]
    pub envs: Vec<EnvArg>,

    /// Dry run mode - don't write any files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Reference existing topics or create managed ones
    #[arg(long, global = true, value_enum)]
    pub notification_mode: Option<NotificationModeArg>,

    /// Email subscribed to managed topics
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Alarm naming scheme
    #[arg(long, global = true, value_enum)]
    pub naming: Option<NamingArg>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize templates into an output directory
    Synth(SynthArgs),

    /// List stacks and their alarm counts
    List,

    /// Show generated alarms
    Alarms(AlarmsArgs),

    /// Show alarm counts per category
    Summary,

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the synth command
#[derive(Parser, Debug)]
pub struct SynthArgs {
    /// Output directory (default: alarmgen.out)
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the alarms command
#[derive(Parser, Debug)]
pub struct AlarmsArgs {
    /// Only show one category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,
}

/// Arguments for config commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write the built-in configuration to a file
    Init {
        /// Destination (default: ./alarmgen.toml)
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Environment argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvArg {
    Dev,
    Staging,
}

impl From<EnvArg> for EnvironmentName {
    fn from(arg: EnvArg) -> Self {
        match arg {
            EnvArg::Dev => EnvironmentName::Dev,
            EnvArg::Staging => EnvironmentName::Staging,
        }
    }
}

/// Notification mode argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum NotificationModeArg {
    /// Reference the existing topic ARN
    Existing,
    /// Create a topic with an email subscription
    Managed,
}

impl From<NotificationModeArg> for NotificationMode {
    fn from(arg: NotificationModeArg) -> Self {
        match arg {
            NotificationModeArg::Existing => NotificationMode::Existing,
            NotificationModeArg::Managed => NotificationMode::Managed,
        }
    }
}

/// Naming scheme argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum NamingArg {
    /// Service and node names without grouping or cluster
    Compact,
    /// Service names include the grouping, node names the cluster
    Qualified,
}

impl From<NamingArg> for NamingScheme {
    fn from(arg: NamingArg) -> Self {
        match arg {
            NamingArg::Compact => NamingScheme::Compact,
            NamingArg::Qualified => NamingScheme::Qualified,
        }
    }
}

/// Alarm category argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CategoryArg {
    Edge,
    Namespace,
    Service,
    Node,
}

impl From<CategoryArg> for AlarmCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Edge => AlarmCategory::Edge,
            CategoryArg::Namespace => AlarmCategory::Namespace,
            CategoryArg::Service => AlarmCategory::Service,
            CategoryArg::Node => AlarmCategory::Node,
        }
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

impl Cli {
    /// Selected environments as domain names
    pub fn environments(&self) -> Vec<EnvironmentName> {
        let mut names: Vec<EnvironmentName> = Vec::new();
        for env in &self.envs {
            let name = EnvironmentName::from(*env);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
