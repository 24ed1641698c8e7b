//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use perf_core::types::{BarSize, Mode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "perf")]
#[command(author, version, about = "Streaming trading-strategy performance accounting")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured level)
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
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a feed of fills and report performance
    Replay(ReplayArgs),
    /// List session modes
    Modes,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct ReplayArgs {
    /// Update feed (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Session mode (backtest, optimization, forward_test, trade)
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Contract multiplier
    #[arg(long)]
    pub multiplier: Option<i64>,

    /// Commission preset (none, stock, futures)
    #[arg(long)]
    pub commission: Option<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Save the chart series as CSV
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Save the chart series aggregated into bars as CSV
    #[arg(long)]
    pub chart_bars: Option<PathBuf>,

    /// Bar size for --chart-bars
    #[arg(long)]
    pub bar_size: Option<BarSize>,

    /// Feed channel capacity
    #[arg(long, default_value = "1024")]
    pub buffer: usize,
}
