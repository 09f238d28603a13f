//! Conversions bridging `leaven_config` types to `leaven_core` types.

use crate::config::Preferences;
use crate::error::LeavenError;
use crate::table::{CalibrationTable, RiseTarget};
use crate::units::TempUnit;

// ── Preferences ──────────────────────────────────────────────────────────────

impl TryFrom<&leaven_config::Preferences> for Preferences {
    type Error = LeavenError;
    fn try_from(c: &leaven_config::Preferences) -> Result<Self, Self::Error> {
        Ok(Self {
            temp_unit: c.temp_unit.parse::<TempUnit>()?,
            rise_target: RiseTarget::try_from(c.rise_target)?,
        })
    }
}

// ── CalibrationTable ─────────────────────────────────────────────────────────

impl TryFrom<&[leaven_config::CalibrationRow]> for CalibrationTable {
    type Error = LeavenError;
    fn try_from(rows: &[leaven_config::CalibrationRow]) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl TryFrom<Vec<leaven_config::CalibrationRow>> for CalibrationTable {
    type Error = LeavenError;
    fn try_from(rows: Vec<leaven_config::CalibrationRow>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}
