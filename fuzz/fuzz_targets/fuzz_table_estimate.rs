#![no_main]
use leaven_config::CalibrationRow;
use leaven_core::{CalibrationTable, EstimateRequest, RiseTarget};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<(f64, f64, bool, f64)>, f64, f64, bool)| {
    let (raw, temperature_f, starter, hundred) = input;
    let rows: Vec<CalibrationRow> = raw
        .into_iter()
        .map(|(starter_percent, temperature_f, hundred, hours)| CalibrationRow {
            starter_percent,
            temperature_f,
            rise_target: if hundred { 100 } else { 75 },
            hours,
        })
        .collect();
    let Ok(table) = CalibrationTable::from_rows(&rows) else {
        return;
    };
    let rise = if hundred {
        RiseTarget::Percent100
    } else {
        RiseTarget::Percent75
    };
    let req = EstimateRequest::new(temperature_f, starter, rise);
    let _ = table.estimate(&req);
    let _ = table.advisories(&req);
});
