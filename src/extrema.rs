//! Locating the coldest and warmest samples of a series.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::series::{Sample, TemperatureSeries};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Extremum {
    fn at(index: usize, sample: &Sample) -> Self {
        Self {
            index,
            timestamp: sample.timestamp,
            value: sample.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremumResult {
    pub min: Extremum,
    pub max: Extremum,
}

/// Finds the minimum and maximum samples in one scan.
///
/// The first sample seeds both candidates and every later sample is
/// compared against them; only strictly better values replace a candidate,
/// so ties keep the lowest index.
pub fn locate_extrema(series: &TemperatureSeries) -> Result<ExtremumResult> {
    let samples = series.samples();
    let first = samples
        .first()
        .ok_or(AnalysisError::empty("locate_extrema"))?;

    let mut min = Extremum::at(0, first);
    let mut max = min;
    for (index, sample) in samples.iter().enumerate().skip(1) {
        if sample.value < min.value {
            min = Extremum::at(index, sample);
        }
        if sample.value > max.value {
            max = Extremum::at(index, sample);
        }
    }

    Ok(ExtremumResult { min, max })
}
