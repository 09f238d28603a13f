//! Human-readable error descriptions and structured JSON error formatting.

use leaven_core::LeavenError;

fn find_leaven_error(err: &eyre::Report) -> Option<&LeavenError> {
    err.chain().find_map(|c| c.downcast_ref::<LeavenError>())
}

fn chain_contains(err: &eyre::Report, needle: &str) -> bool {
    err.chain()
        .any(|c| c.to_string().to_ascii_lowercase().contains(needle))
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(le) = find_leaven_error(err) {
        return match le {
            LeavenError::InvalidTable(msg) => format!(
                "What happened: The calibration table is unusable ({msg}).\nLikely causes: Too few distinct starter or temperature values, duplicate rows, or non-positive hours.\nHow to fix: Each axis needs at least two points and every row a positive duration; see etc/calibration.csv for the expected layout."
            ),
            LeavenError::InvalidTemperatureUnit(unit) => format!(
                "What happened: Unknown temperature unit {unit:?}.\nLikely causes: preferences.temp_unit is misspelled.\nHow to fix: Use \"C\" or \"F\"."
            ),
            LeavenError::InvalidRiseTarget(rise) => format!(
                "What happened: Unsupported rise target {rise}.\nLikely causes: preferences.rise_target or a CSV row uses another value.\nHow to fix: Only 75 and 100 are calibrated."
            ),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    let msg = format!("{err:#}");

    // Calibration CSV header special-case
    if chain_contains(err, "calibration csv must have headers") {
        return "Invalid headers in calibration CSV. Expected 'starter_percent,temperature_f,rise_target,hours'.".to_string();
    }

    if chain_contains(err, "open calibration csv") || chain_contains(err, "invalid csv row") {
        return format!(
            "What happened: The calibration CSV could not be read.\nLikely causes: Wrong path or a malformed row.\nHow to fix: Check the file named below. Original: {msg}"
        );
    }

    if chain_contains(err, "invalid configuration") || chain_contains(err, "read config") {
        return format!(
            "What happened: Configuration is invalid or unreadable.\nLikely causes: Missing file, TOML syntax error, or an out-of-range value.\nHow to fix: Edit the TOML config and try again. Original: {msg}"
        );
    }

    // Generic fallback
    format!(
        "Something went wrong.\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 for calibration problems, 4 for configuration, 1 otherwise.
/// Usage errors never reach here; clap exits with 2.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if matches!(find_leaven_error(err), Some(LeavenError::InvalidTable(_)))
        || chain_contains(err, "calibration csv")
        || chain_contains(err, "invalid csv row")
    {
        return 3;
    }
    if chain_contains(err, "invalid configuration") || chain_contains(err, "read config") {
        return 4;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = match find_leaven_error(err) {
        Some(LeavenError::InvalidTable(_)) => "InvalidTable",
        Some(LeavenError::InvalidTemperatureUnit(_)) => "InvalidTemperatureUnit",
        Some(LeavenError::InvalidRiseTarget(_)) => "InvalidRiseTarget",
        Some(_) => "Error",
        None => match exit_code_for_error(err) {
            3 => "Calibration",
            4 => "Config",
            _ => "Error",
        },
    };
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
