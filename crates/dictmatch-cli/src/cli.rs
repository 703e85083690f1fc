//! CLI argument definitions for dictmatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dictmatch_model::{NormalizationConfig, OutbidPolicy};

#[derive(Parser)]
#[command(
    name = "dictmatch",
    version,
    about = "Reconcile schema catalog column names with a data dictionary",
    long_about = "Reconcile the column names of a schema catalog table with the names in a \
                  data dictionary.\n\n\
                  Names are compared with a token-sort fuzzy score after stripping a \
                  configurable prefix, suffix, and reserved character. Each catalog column \
                  is assigned to at most one dictionary column; exact ties are reported \
                  for manual review."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Match a catalog table's columns against the data dictionary.
    Reconcile(ReconcileArgs),

    /// Find the data dictionary table for a catalog table name.
    Lookup(LookupArgs),

    /// Score a name against a target or a list of candidates.
    Score(ScoreArgs),
}

/// Name normalization flags shared by every subcommand.
#[derive(Args, Default)]
pub struct NormalizationArgs {
    /// Prefix removed once from the start of each name.
    #[arg(long = "prefix", value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Suffix removed once from the end of each name.
    #[arg(long = "suffix", value_name = "TEXT")]
    pub suffix: Option<String>,

    /// Character deleted everywhere in each name before scoring.
    #[arg(long = "reserve-char", value_name = "TEXT")]
    pub reserve_char: Option<String>,
}

impl NormalizationArgs {
    pub fn config(&self) -> NormalizationConfig {
        let mut config = NormalizationConfig::new();
        if let Some(prefix) = &self.prefix {
            config = config.with_prefix(prefix.clone());
        }
        if let Some(suffix) = &self.suffix {
            config = config.with_suffix(suffix.clone());
        }
        if let Some(reserved) = &self.reserve_char {
            config = config.with_reserved_char(reserved.clone());
        }
        config
    }
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// JSON request file (camelCase payload); flags override its fields.
    #[arg(long = "request", value_name = "PATH")]
    pub request: Option<PathBuf>,

    /// Catalog table to reconcile.
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Data dictionary file (CSV).
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Worksheet name for spreadsheet dictionaries.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Root directory of the JSON schema catalog.
    #[arg(long = "catalog-dir", value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Catalog database holding the table.
    #[arg(long = "database", value_name = "NAME")]
    pub database: Option<String>,

    /// Minimum score a match must exceed (0-100).
    #[arg(long = "threshold", value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// Minimum similarity for a fuzzy table lookup; 100 requires an exact match.
    #[arg(long = "lookup-threshold", value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub lookup_threshold: Option<u8>,

    /// What a column does when its best candidate is held at a higher score.
    #[arg(long = "outbid-policy", value_enum, default_value = "drop")]
    pub outbid_policy: OutbidPolicyArg,

    /// Write the pruned table back to the catalog instead of printing it.
    #[arg(long = "apply")]
    pub apply: bool,

    /// Print the assignment as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub normalization: NormalizationArgs,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Catalog table name to look up.
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Data dictionary file (CSV).
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: PathBuf,

    /// Worksheet name for spreadsheet dictionaries.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Minimum similarity for a fuzzy table match; 100 requires an exact match.
    #[arg(long = "threshold", default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: u8,

    #[command(flatten)]
    pub normalization: NormalizationArgs,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Name to score.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Single name to compare against (order-sensitive score).
    #[arg(long = "target", value_name = "NAME")]
    pub target: Option<String>,

    /// Candidate names to rank (token-sort score); repeatable.
    #[arg(long = "candidate", value_name = "NAME")]
    pub candidates: Vec<String>,

    #[command(flatten)]
    pub normalization: NormalizationArgs,
}

/// CLI outbid policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutbidPolicyArg {
    Drop,
    Rebid,
}

impl From<OutbidPolicyArg> for OutbidPolicy {
    fn from(value: OutbidPolicyArg) -> Self {
        match value {
            OutbidPolicyArg::Drop => Self::Drop,
            OutbidPolicyArg::Rebid => Self::Rebid,
        }
    }
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
