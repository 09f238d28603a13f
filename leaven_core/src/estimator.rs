//! Bilinear fermentation-time estimator.
//!
//! Inputs are bracketed on both axes of a [`CalibrationTable`] and the four
//! corner measurements are blended by relative distance. Inputs outside the
//! table are not clamped: the bracket sticks to the nearest edge cell and the
//! weights run past `[0, 1]`, which extends that cell's slope linearly.
//! Callers that care about the calibrated envelope use
//! [`CalibrationTable::advisories`].

use crate::table::{CalibrationTable, RiseTarget};
use serde::{Deserialize, Serialize};

/// Stand-in duration for a corner the table has no measurement for.
pub const MISSING_CORNER_HOURS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub temperature_f: f64,
    pub starter_percent: f64,
    pub rise_target: RiseTarget,
}

impl EstimateRequest {
    pub fn new(temperature_f: f64, starter_percent: f64, rise_target: RiseTarget) -> Self {
        Self {
            temperature_f,
            starter_percent,
            rise_target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub hours: f64,
}

/// Input lies outside the calibrated envelope; the estimate was extrapolated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeAdvisory {
    TemperatureOutsideCalibration {
        temperature_f: f64,
        min: f64,
        max: f64,
    },
    StarterOutsideCalibration {
        starter_percent: f64,
        min: f64,
        max: f64,
    },
}

impl std::fmt::Display for RangeAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeAdvisory::TemperatureOutsideCalibration {
                temperature_f,
                min,
                max,
            } => write!(
                f,
                "temperature {temperature_f}°F is outside the tested {min}-{max}°F range; result is extrapolated"
            ),
            RangeAdvisory::StarterOutsideCalibration {
                starter_percent,
                min,
                max,
            } => write!(
                f,
                "starter {starter_percent}% is outside the tested {min}-{max}% range; result is extrapolated"
            ),
        }
    }
}

/// Indices of the two axis points enclosing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bracket {
    pub lo: usize,
    pub hi: usize,
}

/// First consecutive pair with `axis[i] <= x <= axis[i + 1]`.
/// Values above the axis use the last pair; anything else (below the axis,
/// NaN) uses the first pair. A single-point axis yields `lo == hi == 0`.
pub(crate) fn bracket(axis: &[f64], x: f64) -> Bracket {
    if let Some(i) = axis.windows(2).position(|w| x >= w[0] && x <= w[1]) {
        return Bracket { lo: i, hi: i + 1 };
    }
    let last = axis.len().saturating_sub(1);
    match axis.last() {
        Some(&top) if x > top => Bracket {
            lo: last.saturating_sub(1),
            hi: last,
        },
        _ => Bracket {
            lo: 0,
            hi: last.min(1),
        },
    }
}

/// Relative position of `x` between `lo` and `hi`; a zero-width span divides by 1.
#[inline]
fn weight(x: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    (x - lo) / if span == 0.0 { 1.0 } else { span }
}

impl CalibrationTable {
    /// Estimate bulk-fermentation hours. Never fails; see the module docs for
    /// the behavior outside the calibrated envelope.
    pub fn estimate(&self, req: &EstimateRequest) -> EstimateResult {
        let starters = self.starters();
        let temps = self.temperatures_f();
        let sb = bracket(starters, req.starter_percent);
        let tb = bracket(temps, req.temperature_f);

        let corner = |si: usize, ti: usize| {
            self.hours_at(si, ti, req.rise_target).unwrap_or_else(|| {
                tracing::warn!(
                    starter = starters[si],
                    temperature_f = temps[ti],
                    rise = req.rise_target.percent(),
                    fallback_h = MISSING_CORNER_HOURS,
                    "no calibration entry; using fallback"
                );
                MISSING_CORNER_HOURS
            })
        };
        // q{x}{y}: x indexes the temperature bracket, y the starter bracket.
        let q11 = corner(sb.lo, tb.lo);
        let q21 = corner(sb.lo, tb.hi);
        let q12 = corner(sb.hi, tb.lo);
        let q22 = corner(sb.hi, tb.hi);

        let wx = weight(req.temperature_f, temps[tb.lo], temps[tb.hi]);
        let wy = weight(req.starter_percent, starters[sb.lo], starters[sb.hi]);

        let hours = q11 * (1.0 - wx) * (1.0 - wy)
            + q21 * wx * (1.0 - wy)
            + q12 * (1.0 - wx) * wy
            + q22 * wx * wy;

        tracing::debug!(
            temperature_f = req.temperature_f,
            starter_percent = req.starter_percent,
            rise = req.rise_target.percent(),
            wx,
            wy,
            hours,
            "fermentation estimate"
        );
        EstimateResult { hours }
    }

    /// Out-of-envelope notices for `req`. Empty when both inputs are within
    /// the tested range (bounds inclusive).
    pub fn advisories(&self, req: &EstimateRequest) -> Vec<RangeAdvisory> {
        let mut out = Vec::new();
        let (tmin, tmax) = self.temperature_range_f();
        if !(tmin..=tmax).contains(&req.temperature_f) {
            out.push(RangeAdvisory::TemperatureOutsideCalibration {
                temperature_f: req.temperature_f,
                min: tmin,
                max: tmax,
            });
        }
        let (smin, smax) = self.starter_range();
        if !(smin..=smax).contains(&req.starter_percent) {
            out.push(RangeAdvisory::StarterOutsideCalibration {
                starter_percent: req.starter_percent,
                min: smin,
                max: smax,
            });
        }
        for a in &out {
            tracing::debug!(advisory = %a, "estimate outside calibration");
        }
        out
    }
}

/// Estimate against the standard table.
pub fn estimate_fermentation_hours(
    temperature_f: f64,
    starter_percent: f64,
    rise_target: RiseTarget,
) -> f64 {
    CalibrationTable::standard()
        .estimate(&EstimateRequest::new(
            temperature_f,
            starter_percent,
            rise_target,
        ))
        .hours
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXIS: [f64; 5] = [66.0, 68.0, 70.0, 72.0, 74.0];

    #[test]
    fn bracket_inside_picks_first_matching_pair() {
        assert_eq!(bracket(&AXIS, 67.0), Bracket { lo: 0, hi: 1 });
        // A grid point shared by two pairs belongs to the lower one.
        assert_eq!(bracket(&AXIS, 68.0), Bracket { lo: 0, hi: 1 });
        assert_eq!(bracket(&AXIS, 74.0), Bracket { lo: 3, hi: 4 });
    }

    #[test]
    fn bracket_outside_uses_edge_pairs() {
        assert_eq!(bracket(&AXIS, 10.0), Bracket { lo: 0, hi: 1 });
        assert_eq!(bracket(&AXIS, 80.0), Bracket { lo: 3, hi: 4 });
        assert_eq!(bracket(&AXIS, f64::NAN), Bracket { lo: 0, hi: 1 });
    }

    #[test]
    fn bracket_degenerate_axis() {
        assert_eq!(bracket(&[70.0], 10.0), Bracket { lo: 0, hi: 0 });
        assert_eq!(bracket(&[70.0], 90.0), Bracket { lo: 0, hi: 0 });
    }

    #[test]
    fn zero_width_span_divides_by_one() {
        assert_eq!(weight(71.0, 70.0, 70.0), 1.0);
        assert_eq!(weight(71.0, 70.0, 72.0), 0.5);
    }

    #[test]
    fn advisories_flag_each_axis() {
        let t = CalibrationTable::standard();
        let inside = EstimateRequest::new(74.0, 5.0, RiseTarget::Percent75);
        assert!(t.advisories(&inside).is_empty());

        let both = EstimateRequest::new(76.0, 25.0, RiseTarget::Percent75);
        let a = t.advisories(&both);
        assert_eq!(a.len(), 2);
        assert!(matches!(
            a[0],
            RangeAdvisory::TemperatureOutsideCalibration { max, .. } if max == 74.0
        ));
        assert!(matches!(
            a[1],
            RangeAdvisory::StarterOutsideCalibration { min, .. } if min == 5.0
        ));
        assert!(a[1].to_string().contains("5-20%"));
    }
}
