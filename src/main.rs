//! alarmgen - CloudWatch alarm stack generator
//!
//! A command-line tool that synthesizes per-environment CloudWatch alarm
//! templates for load balancer and Container Insights metrics.

use alarmgen::cli::args::{generate_completions, Cli, Commands};
use alarmgen::commands::{
    load_config, run_alarms, run_config, run_list, run_summary, run_synth,
};
use alarmgen::error::AppError;
use clap::Parser;

fn main() {
    // Initialize logging; the max level gates output unless RUST_LOG is set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp(None)
        .init();
    let level_from_env = std::env::var_os("RUST_LOG").is_some();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if !level_from_env {
        log::set_max_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        });
    }

    // Run the appropriate command
    let result = run(&cli, level_from_env);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, level_from_env: bool) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let config = load_config(cli)?;
    if !level_from_env {
        log::set_max_level(config.general.log_level());
    }
    let envs = cli.environments();

    match &cli.command {
        Commands::Synth(args) => run_synth(args, &config, &envs, cli.format),

        Commands::List => run_list(&config, &envs, cli.format),

        Commands::Alarms(args) => run_alarms(args, &config, &envs, cli.format),

        Commands::Summary => run_summary(&config, &envs, cli.format),

        Commands::Config(args) => run_config(&args.command, &config, cli.format),

        Commands::Completions { .. } => Ok(()),
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(alarmgen::error::ConfigError::MissingField(field))
            if field == "notification.email" =>
        {
            eprintln!();
            eprintln!("Hint: Managed topics need a subscriber.");
            eprintln!("      Pass --email or set [notification] email in the config file.");
        }
        AppError::Config(alarmgen::error::ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Run 'alarmgen config init' to write the built-in configuration.");
        }
        AppError::Generate(_) => {
            eprintln!();
            eprintln!("Hint: Try --naming qualified to include grouping and cluster names.");
        }
        _ => {}
    }
}
