//! CLI argument definitions and shared statics.

use chrono::NaiveDateTime;
use clap::{ArgAction, Parser, Subcommand};
use leaven_core::{RiseTarget, TempUnit};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "leaven",
    version,
    about = "Sourdough bulk-fermentation estimator"
)]
pub struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Calibration CSV replacing the built-in table (strict header)
    #[arg(long, value_name = "FILE")]
    pub calibration: Option<PathBuf>,

    /// Print results and errors as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        ignore_case = true,
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate bulk fermentation time
    Estimate {
        /// Dough temperature, in --unit (or the configured unit)
        #[arg(long = "temp", value_name = "DEGREES", allow_hyphen_values = true)]
        temperature: f64,
        /// Unit of --temp: C or F
        #[arg(long, value_name = "UNIT")]
        unit: Option<TempUnit>,
        /// Starter as % of flour weight
        #[arg(long, value_name = "PCT", allow_hyphen_values = true)]
        starter: f64,
        /// Rise target: 75 or 100
        #[arg(long, value_name = "PCT")]
        rise: Option<RiseTarget>,
        /// Start of bulk fermentation (YYYY-MM-DDTHH:MM[:SS], local wall clock)
        #[arg(long, value_name = "DATETIME", value_parser = parse_start)]
        start: Option<NaiveDateTime>,
    },
    /// Convert a temperature between C and F (whole degrees)
    Convert {
        /// Temperature to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Unit of the input: C or F
        #[arg(long, value_name = "UNIT")]
        from: TempUnit,
    },
    /// Print the active calibration table
    Table {
        /// Rise target column to print: 75 or 100 (default: configured)
        #[arg(long, value_name = "PCT")]
        rise: Option<RiseTarget>,
    },
}

const START_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn parse_start(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    START_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM[:SS], got {s:?}"))
}
