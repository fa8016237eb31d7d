//! Descriptive statistics over temperature values.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Single-pass running aggregate of a value stream.
///
/// Tracks extrema and a Welford-style running mean and sum of squared
/// deviations, so partial aggregates can be merged without revisiting data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    m2: f64,
    pub count: u64,
}

impl Accumulator {
    #[inline]
    pub fn new(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            mean: value,
            m2: 0.0,
            count: 1,
        }
    }

    #[inline]
    pub fn update(&mut self, other: &Accumulator) {
        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        self.mean += delta * other.count as f64 / count as f64;
        self.m2 += other.m2 + delta * delta * (self.count as f64 * other.count as f64) / count as f64;
        self.min = f64::min(self.min, other.min);
        self.max = f64::max(self.max, other.max);
        self.count = count;
    }

    #[inline]
    pub fn update_single(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.min = f64::min(self.min, value);
        self.max = f64::max(self.max, value);
    }

    /// Population variance (divisor N).
    pub fn variance(&self) -> f64 {
        self.m2 / self.count as f64
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Summary statistics of one analysed series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub count: u64,
}

/// Values per partial accumulator; partials are built in parallel and merged
/// in input order.
const CHUNK_LEN: usize = 4096;

/// Power of two that brings the largest magnitude into `[1, 2)`.
///
/// Dividing by a power of two is exact, so the running mean and squared
/// deviations are computed on scaled values without overflowing and then
/// scaled back.
fn power_of_two_scale(max_abs: f64) -> f64 {
    if max_abs < f64::MIN_POSITIVE {
        return 1.0;
    }
    max_abs.log2().floor().exp2()
}

fn accumulate(values: &[f64], scale: f64) -> Option<Accumulator> {
    values
        .par_chunks(CHUNK_LEN)
        .map(|chunk| {
            let (&first, rest) = chunk.split_first()?;
            let mut acc = Accumulator::new(first / scale);
            rest.iter().for_each(|&value| acc.update_single(value / scale));
            Some(acc)
        })
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .reduce(|mut merged, partial| {
            merged.update(&partial);
            merged
        })
}

fn finite(value: f64, reason: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::domain(value, reason))
    }
}

/// Computes mean, median, population standard deviation, extrema and range.
///
/// Fails with [`AnalysisError::EmptyInput`] for an empty slice and with
/// [`AnalysisError::Domain`] if any value is NaN or infinite, or if a
/// statistic is not representable as a finite `f64`.
pub fn compute_statistics(values: &[f64]) -> Result<StatisticsSummary> {
    if values.is_empty() {
        return Err(AnalysisError::empty("compute_statistics"));
    }
    if let Some(&bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(AnalysisError::domain(bad, "value is not finite"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);

    let scale = power_of_two_scale(f64::max(min.abs(), max.abs()));
    let acc = accumulate(values, scale).ok_or(AnalysisError::empty("compute_statistics"))?;

    let range = finite(max - min, "range exceeds the f64 range")?;
    let std_dev = finite(acc.std_dev() * scale, "standard deviation exceeds the f64 range")?;
    // Rounding in the running mean can land one ulp outside the extrema.
    let mean = finite(acc.mean * scale, "mean is not finite")?.clamp(min, max);

    Ok(StatisticsSummary {
        mean,
        median: median_of_sorted(&sorted),
        std_dev,
        min,
        max,
        range,
        count: acc.count,
    })
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        let (a, b) = (sorted[mid - 1], sorted[mid]);
        let midpoint = (a + b) / 2.0;
        if midpoint.is_finite() {
            midpoint
        } else {
            a / 2.0 + b / 2.0
        }
    } else {
        sorted[mid]
    }
}
