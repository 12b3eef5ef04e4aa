//! CLI argument definitions for the catalog importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use catalog_model::{DEFAULT_BATCH_SIZE, DEFAULT_OUTPUT_FILE, DEFAULT_TABLE};

#[derive(Parser)]
#[command(
    name = "catalog-import",
    version,
    about = "Import an ERP product export into the products table",
    long_about = "Import a semicolon-separated ERP product export into the products table.\n\n\
                  Rows are previewed (--dry-run), appended as literal SQL to a file\n\
                  (--emit-sql), or inserted in a single transaction using DATABASE_URL."
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

    /// Allow product values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a product CSV export.
    Import(ImportArgs),

    /// Show how CSV headers map to product fields.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Semicolon-separated product export with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Print a sample of every batch and write nothing.
    ///
    /// Takes precedence over --emit-sql.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Append literal INSERT statements to --output instead of using the database.
    #[arg(long = "emit-sql")]
    pub emit_sql: bool,

    /// SQL file for --emit-sql. Existing content is kept.
    #[arg(long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Merchant stamped on every row (default: MERCHANT_ID env var).
    #[arg(long = "merchant-id", value_name = "ID")]
    pub merchant_id: Option<String>,

    /// Rows per INSERT statement.
    #[arg(long = "batch-size", value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// JSON object of CSV header to product field, replacing the built-in map.
    #[arg(long = "field-map", value_name = "JSON")]
    pub field_map: Option<PathBuf>,

    /// Target table, optionally schema-qualified.
    #[arg(long = "table", value_name = "NAME", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Decimal mark used by numeric cells.
    #[arg(long = "decimal", value_enum, default_value = "auto")]
    pub decimal: DecimalArg,

    /// Fail on numeric cells that do not parse instead of storing NULL.
    #[arg(long = "strict-numbers")]
    pub strict_numbers: bool,

    /// Character encoding of the CSV file.
    #[arg(long = "encoding", value_enum, default_value = "utf-8")]
    pub encoding: EncodingArg,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Show this field map instead of the built-in one.
    #[arg(long = "field-map", value_name = "JSON")]
    pub field_map: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DecimalArg {
    /// Comma when present, otherwise period.
    Auto,
    /// `1.234,56`
    Comma,
    /// `1234.56`
    Period,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    #[value(name = "utf-8")]
    Utf8,
    #[value(name = "windows-1252")]
    Windows1252,
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
