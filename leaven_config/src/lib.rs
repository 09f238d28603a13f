#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and calibration-table parsing for the fermentation estimator.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - The calibration CSV loader enforces headers and row shape; table-level
//!   checks (axis coverage, duplicates) happen when `leaven_core` builds the
//!   table from the rows.
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Calibration CSV schema (long format, one row per measured value).
///
/// Expected headers:
/// starter_percent,temperature_f,rise_target,hours
///
/// Example:
/// starter_percent,temperature_f,rise_target,hours
/// 5,66,75,12.5
/// 5,66,100,14.5
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CalibrationRow {
    pub starter_percent: f64,
    pub temperature_f: f64,
    pub rise_target: u32,
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Display unit for temperatures: "C" or "F" (case-insensitive).
    pub temp_unit: String,
    /// Default rise target for `estimate` when none is given (75 or 100).
    pub rise_target: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            temp_unit: "F".to_string(),
            rise_target: 100,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CalibrationCfg {
    /// Optional CSV replacing the built-in calibration table.
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub preferences: Preferences,
    pub calibration: CalibrationCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file from disk.
pub fn load_toml_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("invalid configuration in {:?}: {}", path, e))
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const ROTATIONS: [&str; 3] = ["never", "daily", "hourly"];

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Preferences
        let unit = self.preferences.temp_unit.trim();
        if !unit.eq_ignore_ascii_case("c") && !unit.eq_ignore_ascii_case("f") {
            eyre::bail!(
                "preferences.temp_unit must be \"C\" or \"F\", got {:?}",
                self.preferences.temp_unit
            );
        }
        if !matches!(self.preferences.rise_target, 75 | 100) {
            eyre::bail!(
                "preferences.rise_target must be 75 or 100, got {}",
                self.preferences.rise_target
            );
        }

        // Calibration
        if let Some(path) = &self.calibration.csv
            && path.as_os_str().is_empty()
        {
            eyre::bail!("calibration.csv must not be empty when set");
        }

        // Logging
        if let Some(level) = &self.logging.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.level must be one of {}", LOG_LEVELS.join("|"));
        }
        if let Some(rotation) = &self.logging.rotation
            && !ROTATIONS.contains(&rotation.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.rotation must be one of {}", ROTATIONS.join("|"));
        }

        Ok(())
    }
}

pub fn load_calibration_csv(path: &Path) -> eyre::Result<Vec<CalibrationRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open calibration CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["starter_percent", "temperature_f", "rise_target", "hours"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "calibration CSV must have headers '{}', got: {}",
            expected.join(","),
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<CalibrationRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    if rows.is_empty() {
        eyre::bail!("calibration CSV {:?} has no data rows", path);
    }

    Ok(rows)
}
