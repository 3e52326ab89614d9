//! CLI argument definitions for the plant model store.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use plant_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "plant-store",
    version,
    about = "Inspect, validate and maintain a durable plant model store",
    long_about = "Inspect, validate and maintain a durable plant model store.\n\n\
                  The store keeps one XML snapshot under <HOME>/data and copies the\n\
                  previous snapshot into data/backups before every overwrite."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Application home directory (default: current directory).
    #[arg(long = "home", value_name = "DIR", global = true)]
    pub home: Option<PathBuf>,

    /// Store configuration file (default: <HOME>/plant-store.toml).
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the saved model's name, digest and entity counts.
    Info,

    /// Validate a model document without changing the store.
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Replace the saved model with a model document.
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write the saved model to a document outside the store.
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Back up and delete the saved model.
    Remove,

    /// List snapshot backups, oldest first.
    Backups,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["plant-store", "check", "plant.xml", "--home", "/srv/plant"])
            .unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/srv/plant")));
        assert!(matches!(cli.command, Command::Check { ref file } if file == &PathBuf::from("plant.xml")));
    }

    #[test]
    fn explicit_log_level_parses() {
        let cli = Cli::try_parse_from(["plant-store", "--log-level", "debug", "info"]).unwrap();
        assert_eq!(cli.log_level.map(LevelFilter::from), Some(LevelFilter::DEBUG));
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Pretty);
    }
}
