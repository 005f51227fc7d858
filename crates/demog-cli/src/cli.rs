//! CLI argument definitions for demog-prep.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "demog-prep",
    version,
    about = "Clean a demographic dataset and its attribute metadata",
    long_about = "Harmonize the two attribute metadata sheets into one catalog,\n\
                  then clean the demographic dataset against it: unknown codes\n\
                  become missing values, low-value columns are dropped,\n\
                  categoricals are encoded, and gaps are imputed."
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
    /// Repair the two metadata sheets and write the merged attribute catalog.
    Metadata(MetadataArgs),

    /// Show the unknown-code map derived from a catalog.
    Unknowns(UnknownsArgs),

    /// Clean a demographic dataset against a catalog.
    Clean(CleanArgs),
}

#[derive(Parser)]
pub struct MetadataArgs {
    /// CSV export of the attribute/values sheet.
    #[arg(value_name = "ATT_VALS_CSV")]
    pub att_vals: PathBuf,

    /// CSV export of the information-levels sheet.
    #[arg(value_name = "INFO_LEVELS_CSV")]
    pub info_levels: PathBuf,

    /// Where to write the merged catalog CSV.
    #[arg(long = "output", value_name = "CSV")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct UnknownsArgs {
    /// Catalog CSV produced by the metadata command.
    #[arg(value_name = "CATALOG_CSV")]
    pub catalog: PathBuf,

    /// Meaning substring that marks codes as unknown.
    #[arg(long = "keyword", default_value = "unknown")]
    pub keyword: String,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Demographic dataset CSV.
    #[arg(value_name = "DATA_CSV")]
    pub data: PathBuf,

    /// Catalog CSV produced by the metadata command.
    #[arg(long = "catalog", value_name = "CSV")]
    pub catalog: PathBuf,

    /// Where to write the cleaned dataset CSV.
    #[arg(long = "output", value_name = "CSV")]
    pub output: PathBuf,

    /// JSON file overriding parts of the cleaning configuration.
    #[arg(long = "config", value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Keep rows regardless of how many values they are missing.
    #[arg(long = "keep-sparse-rows")]
    pub keep_sparse_rows: bool,

    /// The input is the customer extract; drop its extra columns first.
    #[arg(long = "customers")]
    pub customers: bool,
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
