#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Sourdough bulk-fermentation estimator.
//!
//! Everything here is synchronous and free of I/O. The standard calibration
//! table is built once and shared read-only, so every function may be called
//! from any thread.
//!
//! ## Architecture
//!
//! - **Table**: measured hours on a (starter %, °F) grid per rise target (`table`)
//! - **Estimator**: bilinear interpolation with edge-cell extrapolation (`estimator`)
//! - **Units**: integer-rounding °F/°C conversion (`units`)
//! - **Projection**: completion instant from a start time (`projection`)
//! - **Summary**: hour/minute split and ±10 % window (`summary`)
//! - **History**: recent calculations and favorites owned by the caller (`history`)
//! - **Dough**: water and leavening scaling helpers (`dough`)

pub mod config;
pub mod conversions;
pub mod dough;
pub mod error;
pub mod estimator;
pub mod history;
pub mod projection;
pub mod summary;
pub mod table;
pub mod units;

pub use config::Preferences;
pub use error::{LeavenError, Result};
pub use estimator::{
    EstimateRequest, EstimateResult, MISSING_CORNER_HOURS, RangeAdvisory,
    estimate_fermentation_hours,
};
pub use history::{Favorite, FavoriteId, FavoriteSettings, Favorites, History, HistoryEntry};
pub use projection::project_completion;
pub use summary::{DurationParts, EstimateSummary};
pub use table::{CalibrationTable, RiseTarget};
pub use units::{TempUnit, Temperature, celsius_to_fahrenheit, fahrenheit_to_celsius};
