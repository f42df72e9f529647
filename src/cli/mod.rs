//! CLI definitions.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scoring")]
#[command(author, version, about = "Multi-horizon technical signal scoring")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "SCORING_CONFIG")]
    pub config: PathBuf,

    /// Log level, overrides the configured level
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one asset from a CSV price history
    Evaluate(EvaluateArgs),
    /// Score every asset in a data directory
    Scan(ScanArgs),
    /// List the horizon evaluators and their defaults
    Horizons,
    /// Validate configuration
    ValidateConfig(ValidateArgs),
}

#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// Price history (CSV with Date,Open,High,Low,Close,Volume)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Asset id, defaults to the file name
    #[arg(short, long)]
    pub asset: Option<String>,

    /// Order book snapshot (JSON)
    #[arg(long)]
    pub order_book: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Directory of <asset>.csv files, with optional <asset>.book.json
    #[arg(short, long)]
    pub data: PathBuf,

    /// Only these assets (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub assets: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub show: bool,
}
