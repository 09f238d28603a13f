//! Runtime preferences for the estimator's callers.
//!
//! These are the typed counterparts of the TOML sections in `leaven_config`;
//! see `conversions` for the mapping.

use crate::table::RiseTarget;
use crate::units::TempUnit;

/// Defaults applied when a request leaves a field unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    /// Unit temperatures are entered and displayed in.
    pub temp_unit: TempUnit,
    /// Rise target used when a request does not name one.
    pub rise_target: RiseTarget,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            temp_unit: TempUnit::Fahrenheit,
            rise_target: RiseTarget::Percent100,
        }
    }
}
