//! CLI argument definitions for the library data pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ldp",
    version,
    about = "Library Data Pipeline - clean bronze-layer exports into the silver layer",
    long_about = "Clean raw library exports (circulation, events, catalogue, feedback)\n\
                  into validated silver-layer CSV files.\n\n\
                  Deduplicates rows, handles missing values, normalizes ambiguous\n\
                  dates to Year-Month-Day, and validates ISBN shapes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Run the cleaning pipeline over a bronze data folder.
    Run(RunArgs),

    /// List the known bronze sources and their cleaning steps.
    Sources,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the bronze data folder containing the raw exports.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for cleaned files (default: <DATA_DIR>/silver).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Preferred separator for normalized dates.
    #[arg(long = "separator", default_value = "-")]
    pub separator: char,

    /// Clean and report without writing silver outputs.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
