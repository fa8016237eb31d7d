//! Conversions between Celsius, Fahrenheit and Kelvin.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Absolute zero expressed in degrees Celsius.
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Temperature scale a value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Kelvin => "K",
        }
    }

    pub fn to_celsius(self, value: f64) -> Result<f64> {
        match self {
            Unit::Celsius => Ok(value),
            Unit::Fahrenheit => Ok(fahrenheit_to_celsius(value)),
            Unit::Kelvin => kelvin_to_celsius(value),
        }
    }

    /// Fails if `value` lies below absolute zero on this scale.
    pub fn check_physical(self, value: f64) -> Result<()> {
        celsius_to_kelvin(self.to_celsius(value)?).map(|_| ())
    }

    pub fn convert_celsius(self, celsius: f64) -> Result<f64> {
        match self {
            Unit::Celsius => Ok(celsius),
            Unit::Fahrenheit => Ok(celsius_to_fahrenheit(celsius)),
            Unit::Kelvin => celsius_to_kelvin(celsius),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Celsius => "celsius",
            Unit::Fahrenheit => "fahrenheit",
            Unit::Kelvin => "kelvin",
        };
        f.write_str(name)
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "celsius" => Ok(Unit::Celsius),
            "f" | "fahrenheit" => Ok(Unit::Fahrenheit),
            "k" | "kelvin" => Ok(Unit::Kelvin),
            other => Err(format!("unknown temperature unit `{other}`")),
        }
    }
}

#[inline]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[inline]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Fails for negative (or NaN) absolute temperatures.
pub fn kelvin_to_celsius(kelvin: f64) -> Result<f64> {
    if kelvin.is_nan() || kelvin < 0.0 {
        return Err(AnalysisError::domain(
            kelvin,
            "absolute temperature cannot be negative",
        ));
    }
    Ok(kelvin + ABSOLUTE_ZERO_CELSIUS)
}

/// Fails below absolute zero.
pub fn celsius_to_kelvin(celsius: f64) -> Result<f64> {
    if celsius.is_nan() || celsius < ABSOLUTE_ZERO_CELSIUS {
        return Err(AnalysisError::domain(celsius, "below absolute zero"));
    }
    Ok(celsius - ABSOLUTE_ZERO_CELSIUS)
}

/// Converts `value` from one scale to another through Celsius.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64> {
    to.convert_celsius(from.to_celsius(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn fahrenheit_fixed_points() {
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn subtraction_happens_before_scaling() {
        // 50°F is 10°C; dropping the grouping would give 32.22.
        assert!((fahrenheit_to_celsius(50.0) - 10.0).abs() < EPS);
    }

    #[test]
    fn kelvin_domain() {
        assert_eq!(kelvin_to_celsius(0.0), Ok(-273.15));
        assert!(matches!(
            kelvin_to_celsius(-1.0),
            Err(AnalysisError::Domain { .. })
        ));
        assert!(kelvin_to_celsius(f64::NAN).is_err());
        assert!(celsius_to_kelvin(-274.0).is_err());
        assert_eq!(celsius_to_kelvin(ABSOLUTE_ZERO_CELSIUS), Ok(0.0));
    }

    #[test]
    fn convert_between_scales() {
        let k = convert(212.0, Unit::Fahrenheit, Unit::Kelvin).unwrap();
        assert!((k - 373.15).abs() < EPS);
        let f = convert(273.15, Unit::Kelvin, Unit::Fahrenheit).unwrap();
        assert!((f - 32.0).abs() < EPS);
        assert!(convert(-500.0, Unit::Fahrenheit, Unit::Kelvin).is_err());
        assert!(convert(-5.0, Unit::Kelvin, Unit::Kelvin).is_err());
        assert_eq!(convert(21.5, Unit::Celsius, Unit::Celsius), Ok(21.5));
    }

    #[test]
    fn physical_range_per_scale() {
        assert!(Unit::Kelvin.check_physical(0.0).is_ok());
        assert!(Unit::Kelvin.check_physical(-0.5).is_err());
        assert!(Unit::Celsius.check_physical(-273.15).is_ok());
        assert!(Unit::Celsius.check_physical(-273.2).is_err());
        assert!(Unit::Fahrenheit.check_physical(-459.0).is_ok());
        assert!(Unit::Fahrenheit.check_physical(-460.0).is_err());
    }

    #[test]
    fn unit_round_trips_through_celsius() {
        assert_eq!(Unit::Fahrenheit.convert_celsius(100.0), Ok(212.0));
        assert_eq!(Unit::Kelvin.convert_celsius(ABSOLUTE_ZERO_CELSIUS), Ok(0.0));
        assert!(Unit::Kelvin.convert_celsius(-300.0).is_err());
        assert_eq!(Unit::Fahrenheit.to_celsius(212.0), Ok(100.0));
        assert!(Unit::Kelvin.to_celsius(-1.0).is_err());
    }

    #[test]
    fn parse_unit_names() {
        assert_eq!("F".parse::<Unit>(), Ok(Unit::Fahrenheit));
        assert_eq!("celsius".parse::<Unit>(), Ok(Unit::Celsius));
        assert_eq!("Kelvin".parse::<Unit>(), Ok(Unit::Kelvin));
        assert!("rankine".parse::<Unit>().is_err());
        assert_eq!(Unit::Kelvin.to_string(), "kelvin");
    }
}
