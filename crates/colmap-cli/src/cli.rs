//! CLI argument definitions for colmap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colmap_cli::input::parse_preset;
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "colmap",
    version,
    about = "Suggest how spreadsheet columns map onto import fields",
    long_about = "Suggest how the columns of a CSV file map onto the destination fields \
                  of an import profile.\n\n\
                  Matching is lexical: labels are normalized, scored for exact match, \
                  containment, token overlap and edit distance, then assigned one-to-one."
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
    /// Suggest a column for each destination field.
    Suggest(SuggestArgs),

    /// Rank every column against one destination field.
    Rank(RankArgs),

    /// List the destination fields of a profile.
    Fields(FieldsArgs),

    /// Check a confirmed mapping against a profile and a CSV header.
    Validate(ValidateArgs),

    /// Fill an import form from a remote suggestion endpoint.
    Apply(ApplyArgs),
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// CSV file whose header row holds the source columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Import profile JSON (default: built-in projects profile).
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Acceptance threshold in [0, 1] (overrides the profile).
    #[arg(long = "threshold", value_name = "X")]
    pub threshold: Option<f64>,

    /// Print the wire response instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct RankArgs {
    /// CSV file whose header row holds the source columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Destination field identifier to rank columns for.
    #[arg(long = "field", value_name = "ID")]
    pub field: String,

    /// Import profile JSON (default: built-in projects profile).
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Import profile JSON (default: built-in projects profile).
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// CSV file whose header row holds the source columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Confirmed mapping JSON, either `{"mapping": {...}}` or a bare object.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    /// Import profile JSON (default: built-in projects profile).
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// CSV file whose header row holds the source columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Suggestion endpoint URL.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: String,

    /// Import profile JSON (default: built-in projects profile).
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Selection made before suggestions arrive, as `field=column`.
    #[arg(long = "preset", value_name = "FIELD=COLUMN", value_parser = parse_preset)]
    pub presets: Vec<(String, String)>,

    /// Request timeout in seconds (default: no timeout beyond the transport's).
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<f64>,
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
