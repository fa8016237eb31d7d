use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use mimalloc::MiMalloc;
use thiserror::Error;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tempscope::generate::{generate_series, render_measurements, GeneratorConfig};
use tempscope::ingest::read_measurements;
use tempscope::report::{render_compact, render_json, render_text};
use tempscope::{analyze_all, AnalysisError, AnalysisReport, IngestError, TemperatureSeries, Unit};

use config::{Cli, Command, Format};

mod config;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("failed to serialise report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} of {1} stations failed analysis")]
    StationsFailed(usize, usize),
}

fn init_tracing(cli: &Cli) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn runtime(threads: usize) -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .enable_all()
        .build()
}

fn run_analyze(
    path: &Path,
    unit: Unit,
    report_unit: Unit,
    format: Format,
    threads: usize,
) -> Result<(), AppError> {
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        warn!("rayon pool already initialised: {e}");
    }

    let stations = runtime(threads)?.block_on(read_measurements(path, unit))?;
    let stations = stations
        .into_iter()
        .map(|(station, series)| match series.to_unit(report_unit) {
            Ok(series) => Ok((station, series)),
            Err(source) => Err(IngestError::Series { station, source }),
        })
        .collect::<Result<Vec<(String, TemperatureSeries)>, _>>()?;

    let total = stations.len();
    let mut reports: Vec<AnalysisReport> = Vec::with_capacity(total);
    for (label, outcome) in analyze_all(&stations) {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => error!(station = %label, "analysis failed: {e}"),
        }
    }

    let output = match format {
        Format::Text => reports
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Compact => render_compact(&reports),
        Format::Json => render_json(&reports)?,
    };
    println!("{}", output.trim_end());

    if reports.len() < total {
        return Err(AppError::StationsFailed(total - reports.len(), total));
    }
    Ok(())
}

fn run_generate(
    config: &GeneratorConfig,
    output: Option<&Path>,
    threads: usize,
) -> Result<(), AppError> {
    let series = generate_series(config)?;
    let text = render_measurements(&config.station, &series);
    match output {
        Some(path) => runtime(threads)?.block_on(tokio::fs::write(path, text))?,
        None => print!("{text}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);
    let threads = cli.threads();

    let result = match &cli.command {
        Command::Analyze {
            path,
            unit,
            report_unit,
            format,
        } => run_analyze(path, *unit, *report_unit, *format, threads),
        command @ Command::Generate { .. } => match command.generator_config() {
            Some((config, output)) => run_generate(&config, output.as_deref(), threads),
            None => Ok(()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
