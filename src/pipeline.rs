//! Composes statistics and extremum lookup into a per-series report.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convert::Unit;
use crate::error::{AnalysisError, Result};
use crate::extrema::{locate_extrema, Extremum};
use crate::series::TemperatureSeries;
use crate::statistics::{compute_statistics, StatisticsSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub label: String,
    pub unit: Unit,
    pub summary: StatisticsSummary,
    pub min_extremum: Extremum,
    pub max_extremum: Extremum,
}

/// Analyses `series` as-is, in whatever unit it carries.
///
/// Errors from the statistics and extremum steps are returned unchanged.
pub fn analyze(series: &TemperatureSeries, label: &str) -> Result<AnalysisReport> {
    let summary = compute_statistics(&series.values())?;
    let extrema = locate_extrema(series)?;
    debug_assert_eq!(extrema.min.value, summary.min);
    debug_assert_eq!(extrema.max.value, summary.max);

    debug!(
        label,
        samples = summary.count,
        mean = summary.mean,
        range = summary.range,
        "analysed series"
    );

    Ok(AnalysisReport {
        label: label.to_string(),
        unit: series.unit(),
        summary,
        min_extremum: extrema.min,
        max_extremum: extrema.max,
    })
}

/// Outcome of analysing one labelled series.
pub type StationOutcome = (String, std::result::Result<AnalysisReport, AnalysisError>);

/// Analyses every station on the rayon pool; output order matches input.
pub fn analyze_all(stations: &[(String, TemperatureSeries)]) -> Vec<StationOutcome> {
    stations
        .par_iter()
        .map(|(label, series)| (label.clone(), analyze(series, label)))
        .collect()
}
