//! Property tests for conversion, statistics and extremum invariants.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use tempscope::{
    celsius_to_fahrenheit, compute_statistics, fahrenheit_to_celsius, kelvin_to_celsius,
    locate_extrema, AnalysisError, TemperatureSeries, Unit,
};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn hourly(values: &[f64]) -> TemperatureSeries {
    TemperatureSeries::from_pairs(
        Unit::Celsius,
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (start() + Duration::hours(i as i64), v)),
    )
    .unwrap()
}

fn arb_values(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-273.0..1.0e6f64, min..max)
}

proptest! {
    #[test]
    fn range_is_max_minus_min(values in arb_values(1, 200)) {
        let stats = compute_statistics(&values).unwrap();
        prop_assert_eq!(stats.max - stats.min, stats.range);
        prop_assert!(stats.range >= 0.0);
        prop_assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
    }

    #[test]
    fn single_value_extrema_at_zero(value in -273.0..500.0f64) {
        let result = locate_extrema(&hourly(&[value])).unwrap();
        prop_assert_eq!(result.min.index, 0);
        prop_assert_eq!(result.max.index, 0);
    }

    #[test]
    fn extrema_agree_with_statistics(values in arb_values(1, 100)) {
        let series = hourly(&values);
        let stats = compute_statistics(&series.values()).unwrap();
        let extrema = locate_extrema(&series).unwrap();
        prop_assert_eq!(extrema.min.value, stats.min);
        prop_assert_eq!(extrema.max.value, stats.max);
        prop_assert!(extrema.min.index < values.len());
        prop_assert_eq!(extrema.max.timestamp, series.samples()[extrema.max.index].timestamp);
        prop_assert!(values[..extrema.min.index].iter().all(|&v| v > stats.min));
        prop_assert!(values[..extrema.max.index].iter().all(|&v| v < stats.max));
    }

    #[test]
    fn fahrenheit_round_trip(f in -1.0e6..1.0e6f64) {
        let back = celsius_to_fahrenheit(fahrenheit_to_celsius(f));
        prop_assert!((back - f).abs() <= 1e-9 * f.abs().max(1.0));
    }

    #[test]
    fn negative_kelvin_is_rejected(k in -1.0e6..-1.0e-9f64) {
        let is_domain = matches!(kelvin_to_celsius(k), Err(AnalysisError::Domain { .. }));
        prop_assert!(is_domain);
    }

    #[test]
    fn series_below_absolute_zero_is_rejected(k in -1.0e6..-1.0e-9f64) {
        let built = TemperatureSeries::from_pairs(Unit::Kelvin, [(start(), k)]);
        let is_domain = matches!(built, Err(AnalysisError::Domain { .. }));
        prop_assert!(is_domain);
    }
}

#[test]
fn empty_inputs_fail() {
    assert!(matches!(
        compute_statistics(&[]),
        Err(AnalysisError::EmptyInput { .. })
    ));
    let empty = TemperatureSeries::new(Unit::Celsius, Vec::new()).unwrap();
    assert!(matches!(
        locate_extrema(&empty),
        Err(AnalysisError::EmptyInput { .. })
    ));
}

#[test]
fn kelvin_reference_points() {
    assert_eq!(kelvin_to_celsius(0.0), Ok(-273.15));
    assert!(kelvin_to_celsius(-1.0).is_err());
    assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
    assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
}
