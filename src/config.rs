use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tempscope::generate::GeneratorConfig;
use tempscope::Unit;

#[derive(Parser, Debug)]
#[command(name = "tempscope")]
#[command(about = "Temperature series statistics and extremum analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Worker threads for parsing and analysis
    #[arg(long, global = true, env = "TEMPSCOPE_THREADS")]
    pub threads: Option<usize>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, env = "TEMPSCOPE_LOG", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "TEMPSCOPE_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse a `station;timestamp;value` measurements file
    Analyze {
        path: PathBuf,

        /// Unit of the values in the file
        #[arg(short, long, default_value = "celsius")]
        unit: Unit,

        /// Unit the statistics are reported in
        #[arg(short, long, default_value = "celsius")]
        report_unit: Unit,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write a synthetic daily series in measurements format
    Generate {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, default_value = "Research Station Alpha")]
        station: String,

        #[arg(long, default_value_t = 30)]
        days: usize,

        #[arg(long, default_value = "2023-06-01")]
        start: NaiveDate,

        #[arg(long, default_value_t = 75.0)]
        mean: f64,

        #[arg(long, default_value_t = 8.0)]
        std_dev: f64,

        #[arg(short, long, default_value = "fahrenheit")]
        unit: Unit,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Compact,
    Json,
}

impl Cli {
    pub fn threads(&self) -> usize {
        self.threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get)
    }
}

impl Command {
    /// Generator settings for `generate`; `None` for other commands.
    pub fn generator_config(&self) -> Option<(GeneratorConfig, Option<PathBuf>)> {
        match self {
            Command::Generate {
                output,
                station,
                days,
                start,
                mean,
                std_dev,
                unit,
                seed,
            } => Some((
                GeneratorConfig {
                    station: station.clone(),
                    start: *start,
                    days: *days,
                    mean: *mean,
                    std_dev: *std_dev,
                    unit: *unit,
                    seed: *seed,
                },
                output.clone(),
            )),
            Command::Analyze { .. } => None,
        }
    }
}
