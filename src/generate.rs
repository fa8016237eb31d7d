//! Seeded synthetic daily temperature series.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::convert::Unit;
use crate::error::{AnalysisError, Result};
use crate::series::{Sample, TemperatureSeries};

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub station: String,
    pub start: NaiveDate,
    pub days: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub unit: Unit,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            station: "Research Station Alpha".to_string(),
            start: NaiveDate::from_ymd_opt(2023, 6, 1).expect("2023-06-01 is a valid date"),
            days: 30,
            mean: 75.0,
            std_dev: 8.0,
            unit: Unit::Fahrenheit,
            seed: 42,
        }
    }
}

/// Draws one normally distributed reading per day starting at midnight of
/// `config.start`. Identical configs yield identical series.
///
/// Fails with [`AnalysisError::DateOutOfRange`] if the last day falls past
/// the latest representable date.
pub fn generate_series(config: &GeneratorConfig) -> Result<TemperatureSeries> {
    if !config.std_dev.is_finite() || config.std_dev < 0.0 {
        return Err(AnalysisError::domain(
            config.std_dev,
            "standard deviation must be finite and non-negative",
        ));
    }
    if !config.mean.is_finite() {
        return Err(AnalysisError::domain(config.mean, "mean must be finite"));
    }
    let normal = Normal::new(config.mean, config.std_dev)
        .map_err(|_| AnalysisError::domain(config.std_dev, "invalid standard deviation"))?;
    let midnight = config.start.and_time(NaiveTime::MIN);
    let out_of_range = |day| AnalysisError::DateOutOfRange {
        start: config.start,
        day,
    };

    let mut rng = StdRng::seed_from_u64(config.seed);
    let samples = (0..config.days)
        .map(|day| -> Result<Sample> {
            let timestamp = i64::try_from(day)
                .ok()
                .and_then(TimeDelta::try_days)
                .and_then(|offset| midnight.checked_add_signed(offset))
                .ok_or_else(|| out_of_range(day))?;
            Ok(Sample::new(timestamp, normal.sample(&mut rng)))
        })
        .collect::<Result<Vec<_>>>()?;
    TemperatureSeries::new(config.unit, samples)
}

/// Renders `series` as `station;timestamp;value` lines.
pub fn render_measurements(station: &str, series: &TemperatureSeries) -> String {
    let mut out = String::with_capacity(series.len() * (station.len() + 32));
    for sample in series.samples() {
        let _ = writeln!(
            out,
            "{};{};{:.2}",
            station,
            sample.timestamp.format("%Y-%m-%dT%H:%M:%S"),
            sample.value
        );
    }
    out
}
