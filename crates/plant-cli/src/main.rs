//! Plant model store CLI.

use clap::{ColorChoice, Parser};
use plant_cli::commands::{
    open_store, run_backups, run_check, run_export, run_import, run_info, run_remove,
};
use plant_cli::logging::{LogConfig, LogFormat, init_logging};
use plant_cli::summary::{print_backups, print_check, print_import, print_info};
use plant_persistence::PersistenceError;
use std::io::{self, IsTerminal};
use tracing::debug;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let store = open_store(cli.home.as_deref(), cli.config.as_deref())?;
    match &cli.command {
        Command::Info => print_info(&run_info(&store)?),
        Command::Check { file } => {
            let check = run_check(&store, file)?;
            print_check(&check);
            if check.has_errors() {
                return Ok(1);
            }
        }
        Command::Import { file } => print_import(&run_import(&store, file)?),
        Command::Export { file } => {
            let summary = run_export(&store, file)?;
            println!("Exported {} entities to {}", summary.total(), file.display());
        }
        Command::Remove => {
            if run_remove(&store)? {
                println!("Removed {}", store.snapshot_path().display());
            } else {
                println!("No saved model to remove.");
            }
        }
        Command::Backups => print_backups(&run_backups(&store)?),
    }
    Ok(0)
}

fn report_error(error: &anyhow::Error) {
    debug!(error = ?error, "Command failed");
    match error.downcast_ref::<PersistenceError>() {
        Some(cause) => {
            eprintln!("error: {}", cause.user_message());
            if let Some(suggestion) = cause.suggestion() {
                eprintln!("hint: {suggestion}");
            }
        }
        None => eprintln!("error: {error:#}"),
    }
}

/// `--log-level` beats `-v/-q`, which beat `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = cli.verbosity.is_present() || cli.log_level.is_some();
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !explicit_level,
        format: LogFormat::from(cli.log_format),
        log_file: cli.log_file.clone(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
        ..LogConfig::default()
    }
}
