//! Presentation values derived from an estimate: hour/minute split, the
//! ±10 % window and the projected completion instant.

use crate::estimator::EstimateResult;
use crate::projection::project_completion;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative spread of the displayed min/max window around an estimate.
pub const RANGE_SPREAD: f64 = 0.10;

/// A duration split into whole hours and rounded minutes (`minutes < 60`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationParts {
    pub hours: u32,
    pub minutes: u32,
}

impl DurationParts {
    /// Negative and non-finite inputs collapse to zero. A fraction that
    /// rounds up to 60 minutes carries into the hour.
    pub fn from_hours(h: f64) -> Self {
        if !(h.is_finite() && h > 0.0) {
            return Self::default();
        }
        let whole = h.floor();
        let minutes = ((h - whole) * 60.0).round() as u32;
        let hours = whole.min(f64::from(u32::MAX - 1)) as u32;
        if minutes >= 60 {
            Self {
                hours: hours + 1,
                minutes: 0,
            }
        } else {
            Self { hours, minutes }
        }
    }
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimateSummary {
    pub estimated_hours: f64,
    pub estimate: DurationParts,
    pub min: DurationParts,
    pub max: DurationParts,
    pub completion: Option<NaiveDateTime>,
}

impl EstimateSummary {
    pub fn new(result: EstimateResult, start: Option<NaiveDateTime>) -> Self {
        let h = result.hours;
        Self {
            estimated_hours: h,
            estimate: DurationParts::from_hours(h),
            min: DurationParts::from_hours(h * (1.0 - RANGE_SPREAD)),
            max: DurationParts::from_hours(h * (1.0 + RANGE_SPREAD)),
            completion: project_completion(start, h),
        }
    }
}
