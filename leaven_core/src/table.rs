//! Calibration table of measured bulk-fermentation times.
//!
//! The table is a dense grid over two sorted axes (starter percentage and
//! dough temperature in °F). Each cell holds one measured duration per
//! [`RiseTarget`]. The standard table is built once per process and only read
//! afterwards; custom tables come from CSV rows via
//! [`CalibrationTable::from_rows`].

use crate::error::LeavenError;
use leaven_config::CalibrationRow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Volume increase at which bulk fermentation is considered done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RiseTarget {
    /// 75 % rise.
    Percent75,
    /// 100 % rise (doubled).
    Percent100,
}

impl RiseTarget {
    pub const ALL: [RiseTarget; 2] = [RiseTarget::Percent75, RiseTarget::Percent100];

    #[inline]
    pub fn percent(self) -> u32 {
        match self {
            RiseTarget::Percent75 => 75,
            RiseTarget::Percent100 => 100,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            RiseTarget::Percent75 => 0,
            RiseTarget::Percent100 => 1,
        }
    }
}

impl TryFrom<u32> for RiseTarget {
    type Error = LeavenError;
    fn try_from(pct: u32) -> Result<Self, Self::Error> {
        match pct {
            75 => Ok(RiseTarget::Percent75),
            100 => Ok(RiseTarget::Percent100),
            other => Err(LeavenError::InvalidRiseTarget(other.to_string())),
        }
    }
}

impl From<RiseTarget> for u32 {
    fn from(r: RiseTarget) -> Self {
        r.percent()
    }
}

impl FromStr for RiseTarget {
    type Err = LeavenError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pct: u32 = s
            .trim()
            .trim_end_matches('%')
            .parse()
            .map_err(|_| LeavenError::InvalidRiseTarget(s.trim().to_string()))?;
        RiseTarget::try_from(pct)
    }
}

impl fmt::Display for RiseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Starter axis of the standard table (% of flour weight).
pub const STANDARD_STARTERS: [f64; 4] = [5.0, 10.0, 15.0, 20.0];
/// Temperature axis of the standard table (°F).
pub const STANDARD_TEMPERATURES_F: [f64; 5] = [66.0, 68.0, 70.0, 72.0, 74.0];

// hours[starter][temperature] = [rise 75 %, rise 100 %]
const STANDARD_HOURS: [[[f64; 2]; 5]; 4] = [
    // 5 %
    [[12.5, 14.5], [10.5, 12.0], [9.0, 10.5], [7.5, 9.0], [6.5, 7.5]],
    // 10 %
    [[10.0, 11.5], [8.5, 9.5], [7.0, 8.5], [6.0, 7.0], [5.0, 6.0]],
    // 15 %
    [[8.5, 9.5], [7.0, 8.0], [6.0, 7.0], [5.0, 6.0], [4.0, 5.0]],
    // 20 %
    [[7.0, 8.0], [6.0, 7.0], [5.0, 6.0], [4.0, 5.0], [3.5, 4.0]],
];

/// Dense fermentation-time grid.
///
/// Invariants (enforced by every constructor):
/// - both axes are strictly ascending, finite, with at least two points;
/// - `cells.len() == starters.len() * temperatures_f.len()`;
/// - every present hours value is finite and > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    starters: Vec<f64>,
    temperatures_f: Vec<f64>,
    // row-major: starter index * temperatures_f.len() + temperature index
    cells: Vec<[Option<f64>; 2]>,
}

static STANDARD: OnceLock<CalibrationTable> = OnceLock::new();

impl CalibrationTable {
    /// The built-in table measured for the original recipe.
    pub fn standard() -> &'static CalibrationTable {
        STANDARD.get_or_init(|| {
            let cells = STANDARD_HOURS
                .iter()
                .flat_map(|row| row.iter().map(|&[h75, h100]| [Some(h75), Some(h100)]))
                .collect();
            CalibrationTable {
                starters: STANDARD_STARTERS.to_vec(),
                temperatures_f: STANDARD_TEMPERATURES_F.to_vec(),
                cells,
            }
        })
    }

    /// Build a table from long-format rows (one row per measured value).
    ///
    /// Axis points are the distinct starter and temperature values found in
    /// the rows. Combinations with no row are left empty; the estimator falls
    /// back to a default duration for them.
    pub fn from_rows(rows: &[CalibrationRow]) -> Result<Self, LeavenError> {
        if rows.is_empty() {
            return Err(LeavenError::InvalidTable("no rows".into()));
        }
        for (i, r) in rows.iter().enumerate() {
            if !r.starter_percent.is_finite() || !r.temperature_f.is_finite() {
                return Err(LeavenError::InvalidTable(format!(
                    "row {i}: axis values must be finite"
                )));
            }
            if !(r.hours.is_finite() && r.hours > 0.0) {
                return Err(LeavenError::InvalidTable(format!(
                    "row {i}: hours must be a positive number, got {}",
                    r.hours
                )));
            }
        }

        let starters = distinct_sorted(rows.iter().map(|r| r.starter_percent));
        let temperatures_f = distinct_sorted(rows.iter().map(|r| r.temperature_f));
        if starters.len() < 2 {
            return Err(LeavenError::InvalidTable(
                "starter axis needs at least two distinct points".into(),
            ));
        }
        if temperatures_f.len() < 2 {
            return Err(LeavenError::InvalidTable(
                "temperature axis needs at least two distinct points".into(),
            ));
        }

        let width = temperatures_f.len();
        let mut cells = vec![[None, None]; starters.len() * width];
        for (i, r) in rows.iter().enumerate() {
            let rise = RiseTarget::try_from(r.rise_target)
                .map_err(|e| LeavenError::InvalidTable(format!("row {i}: {e}")))?;
            // Both lookups succeed: the axes were built from these very values.
            let si = axis_position(&starters, r.starter_percent);
            let ti = axis_position(&temperatures_f, r.temperature_f);
            let (Some(si), Some(ti)) = (si, ti) else {
                return Err(LeavenError::InvalidTable(format!(
                    "row {i}: value not on axis"
                )));
            };
            let slot = &mut cells[si * width + ti][rise.index()];
            if slot.is_some() {
                return Err(LeavenError::InvalidTable(format!(
                    "duplicate entry for starter {}%, {}°F, rise {}",
                    r.starter_percent, r.temperature_f, rise
                )));
            }
            *slot = Some(r.hours);
        }

        let missing: usize = cells
            .iter()
            .map(|c| c.iter().filter(|v| v.is_none()).count())
            .sum();
        if missing > 0 {
            tracing::warn!(
                missing,
                starters = starters.len(),
                temperatures = width,
                "calibration table has gaps; estimates touching them use the default duration"
            );
        }

        Ok(Self {
            starters,
            temperatures_f,
            cells,
        })
    }

    /// Starter-percentage axis, ascending.
    pub fn starters(&self) -> &[f64] {
        &self.starters
    }

    /// Temperature axis in °F, ascending.
    pub fn temperatures_f(&self) -> &[f64] {
        &self.temperatures_f
    }

    /// Measured hours at grid position `(starter_idx, temperature_idx)`.
    /// `None` for out-of-bounds indices or a gap in a custom table.
    pub fn hours_at(
        &self,
        starter_idx: usize,
        temperature_idx: usize,
        rise: RiseTarget,
    ) -> Option<f64> {
        if starter_idx >= self.starters.len() || temperature_idx >= self.temperatures_f.len() {
            return None;
        }
        self.cells[starter_idx * self.temperatures_f.len() + temperature_idx][rise.index()]
    }

    /// Calibrated starter envelope `(min, max)`.
    pub fn starter_range(&self) -> (f64, f64) {
        span(&self.starters)
    }

    /// Calibrated temperature envelope `(min, max)` in °F.
    pub fn temperature_range_f(&self) -> (f64, f64) {
        span(&self.temperatures_f)
    }
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v
}

fn axis_position(axis: &[f64], x: f64) -> Option<usize> {
    axis.iter().position(|&p| p == x)
}

fn span(axis: &[f64]) -> (f64, f64) {
    match (axis.first(), axis.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (f64::NAN, f64::NAN),
    }
}
