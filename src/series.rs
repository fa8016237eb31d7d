//! Validated, time-ordered temperature series.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::convert::Unit;
use crate::error::{AnalysisError, Result};

/// One reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Ordered readings in a single unit.
///
/// Timestamps are strictly increasing and every value is finite and at or
/// above absolute zero. The series is immutable once built; conversions
/// produce a new series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureSeries {
    unit: Unit,
    samples: Vec<Sample>,
}

impl TemperatureSeries {
    pub fn new(unit: Unit, samples: Vec<Sample>) -> Result<Self> {
        if let Some(sample) = samples.iter().find(|s| !s.value.is_finite()) {
            return Err(AnalysisError::domain(sample.value, "value is not finite"));
        }
        for sample in &samples {
            unit.check_physical(sample.value)?;
        }
        if let Some(index) = samples
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(AnalysisError::UnorderedTimestamps { index: index + 1 });
        }
        Ok(Self { unit, samples })
    }

    pub fn from_pairs<I>(unit: Unit, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDateTime, f64)>,
    {
        let samples = pairs
            .into_iter()
            .map(|(timestamp, value)| Sample::new(timestamp, value))
            .collect();
        Self::new(unit, samples)
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Re-expresses every value in `target`; fails on the first value the
    /// converter rejects.
    pub fn to_unit(&self, target: Unit) -> Result<Self> {
        if target == self.unit {
            return Ok(self.clone());
        }
        let samples = self
            .samples
            .iter()
            .map(|s| {
                let value = target.convert_celsius(self.unit.to_celsius(s.value)?)?;
                Ok(Sample::new(s.timestamp, value))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            unit: target,
            samples,
        })
    }
}
