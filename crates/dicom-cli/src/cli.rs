//! CLI argument definitions for `dicom-meta`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dicom-meta",
    version,
    about = "Filter and project DICOM metadata held as Native DICOM Model XML",
    long_about = "Filter, drop, and project rows of a metadata table whose records \
                  are Native DICOM Model XML documents.\n\n\
                  Input is a CSV file with id and metadata columns, or a directory \
                  of .xml files (one record per file, id = file stem)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Allow metadata values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Keep only the rows whose metadata matches every tag criterion.
    Filter(SelectArgs),

    /// Remove the rows whose metadata matches every tag criterion.
    Drop(SelectArgs),

    /// Append one column per keyword holding that keyword's value.
    Extract(ExtractArgs),
}

/// Where the dataset comes from and where the result goes.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// CSV file with id and metadata columns, or a directory of .xml files.
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: PathBuf,

    /// Write the resulting table as CSV (default: print the summary only).
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML file with [frame] and [output] settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Load the dataset into the in-process backend before running.
    #[arg(long)]
    pub remote: bool,

    /// Name of the row identifier column (overrides the config file).
    #[arg(long = "id-column", value_name = "NAME")]
    pub id_column: Option<String>,

    /// Name of the XML document column (overrides the config file).
    #[arg(long = "metadata-column", value_name = "NAME")]
    pub metadata_column: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// JSON object of tag code to expected value, e.g. '{"00080070":"SIEMENS"}'.
    #[arg(long, value_name = "JSON")]
    pub tags: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Keyword to extract; repeat for several (e.g. -k StudyDate -k Modality).
    #[arg(long = "keyword", short = 'k', value_name = "KEYWORD", required = true)]
    pub keywords: Vec<String>,
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

impl Command {
    pub fn dataset(&self) -> &DatasetArgs {
        match self {
            Self::Filter(args) | Self::Drop(args) => &args.dataset,
            Self::Extract(args) => &args.dataset,
        }
    }
}
