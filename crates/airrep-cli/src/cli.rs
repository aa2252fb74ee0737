//! CLI argument definitions.

use std::path::PathBuf;

use airrep_model::ReportKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "airrep",
    version,
    about = "Normalize airline back-office report exports",
    long_about = "Load CSV exports from an airline reservation back office into clean, typed tables.\n\n\
                  Preambles and summary rows are stripped, report periods are extracted,\n\
                  numeric fields are coerced and derived values are computed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: ./airrep.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
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

    /// Log output format.
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
    /// List the supported report kinds.
    Kinds,

    /// List CSV exports in the data directory and the kind each one matches.
    Discover(DiscoverArgs),

    /// Load one report and print its metadata, coercion counts and first rows.
    Load(LoadArgs),
}

#[derive(Args)]
pub struct DiscoverArgs {
    /// Directory holding the exports (overrides config and AIRREP_DATA_DIR).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct LoadArgs {
    /// Report kind, e.g. payment or seat-inventory.
    #[arg(value_name = "KIND")]
    pub kind: ReportKind,

    /// File to load, relative to the data directory (default: the kind's export name).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory holding the exports (overrides config and AIRREP_DATA_DIR).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for processed copies (overrides config and AIRREP_OUTPUT_DIR).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not write the processed copy.
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Number of rows to preview.
    #[arg(long = "rows", value_name = "N", default_value_t = 10)]
    pub rows: usize,
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
