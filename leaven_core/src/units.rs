//! Temperature units and the integer-rounding °F/°C conversions.
//!
//! Both directions round half away from zero (`f64::round`) and saturate at
//! the `i32` bounds (`as` casts saturate; NaN maps to 0). The round trip is
//! lossy by up to one degree, which matches the 2 °F spacing of the
//! calibration grid.

use crate::error::LeavenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `round((f - 32) * 5/9)`
#[inline]
pub fn fahrenheit_to_celsius(f: f64) -> i32 {
    ((f - 32.0) * 5.0 / 9.0).round() as i32
}

/// `round(c * 9/5 + 32)`
#[inline]
pub fn celsius_to_fahrenheit(c: f64) -> i32 {
    (c * 9.0 / 5.0 + 32.0).round() as i32
}

/// Display unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TempUnit {
    #[serde(rename = "C", alias = "c")]
    Celsius,
    #[default]
    #[serde(rename = "F", alias = "f")]
    Fahrenheit,
}

impl TempUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }
}

impl FromStr for TempUnit {
    type Err = LeavenError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C" | "c" => Ok(TempUnit::Celsius),
            "F" | "f" => Ok(TempUnit::Fahrenheit),
            other => Err(LeavenError::InvalidTemperatureUnit(other.to_string())),
        }
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        })
    }
}

/// A temperature reading as the user entered it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: f64,
    pub unit: TempUnit,
}

impl Temperature {
    pub fn new(value: f64, unit: TempUnit) -> Self {
        Self { value, unit }
    }

    pub fn fahrenheit(value: f64) -> Self {
        Self::new(value, TempUnit::Fahrenheit)
    }

    pub fn celsius(value: f64) -> Self {
        Self::new(value, TempUnit::Celsius)
    }

    /// Value on the estimator's °F axis. °F readings pass through untouched;
    /// °C readings go through the rounding conversion.
    pub fn to_fahrenheit(&self) -> f64 {
        match self.unit {
            TempUnit::Fahrenheit => self.value,
            TempUnit::Celsius => f64::from(celsius_to_fahrenheit(self.value)),
        }
    }

    /// Whole-degree value for display in `unit`.
    pub fn display_in(&self, unit: TempUnit) -> i32 {
        match (self.unit, unit) {
            (TempUnit::Fahrenheit, TempUnit::Celsius) => fahrenheit_to_celsius(self.value),
            (TempUnit::Celsius, TempUnit::Fahrenheit) => celsius_to_fahrenheit(self.value),
            _ => self.value.round() as i32,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.display_in(self.unit), self.unit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_points() {
        assert_eq!(fahrenheit_to_celsius(32.0), 0);
        assert_eq!(fahrenheit_to_celsius(212.0), 100);
        assert_eq!(fahrenheit_to_celsius(-40.0), -40);
        assert_eq!(fahrenheit_to_celsius(70.0), 21);
        assert_eq!(celsius_to_fahrenheit(22.0), 72);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40);
    }

    #[test]
    fn halves_round_away_from_zero() {
        // -17.5 °C -> 0.5 °F
        assert_eq!(celsius_to_fahrenheit(-17.5), 1);
        // 36.5 °F -> 2.5 °C, 27.5 °F -> -2.5 °C
        assert_eq!(fahrenheit_to_celsius(36.5), 3);
        assert_eq!(fahrenheit_to_celsius(27.5), -3);
    }

    #[test]
    fn extremes_saturate() {
        assert_eq!(fahrenheit_to_celsius(f64::INFINITY), i32::MAX);
        assert_eq!(celsius_to_fahrenheit(f64::NEG_INFINITY), i32::MIN);
        assert_eq!(celsius_to_fahrenheit(f64::NAN), 0);
    }

    #[test]
    fn temperature_normalisation() {
        assert_eq!(Temperature::fahrenheit(69.5).to_fahrenheit(), 69.5);
        assert_eq!(Temperature::celsius(22.0).to_fahrenheit(), 72.0);
        assert_eq!(Temperature::celsius(21.0).display_in(TempUnit::Celsius), 21);
        assert_eq!(Temperature::fahrenheit(70.0).display_in(TempUnit::Celsius), 21);
        assert_eq!(Temperature::celsius(21.0).to_string(), "21°C");
    }

    #[test]
    fn unit_parsing() {
        assert_eq!("c".parse::<TempUnit>().unwrap(), TempUnit::Celsius);
        assert_eq!(" F ".parse::<TempUnit>().unwrap(), TempUnit::Fahrenheit);
        assert!("K".parse::<TempUnit>().is_err());
    }
}
