//! Subcommand execution: config mapping, table selection, output rendering.

use chrono::NaiveDateTime;
use eyre::WrapErr;
use leaven_core::error::Result as CoreResult;
use leaven_core::{
    CalibrationTable, EstimateRequest, EstimateSummary, Preferences, RiseTarget, TempUnit,
    Temperature, fahrenheit_to_celsius,
};
use serde_json::json;
use std::borrow::Cow;
use std::path::Path;

/// Everything a subcommand needs besides its own arguments.
pub struct Context {
    pub table: Cow<'static, CalibrationTable>,
    pub prefs: Preferences,
    pub json: bool,
}

impl Context {
    /// Map the loaded config onto core types. A CSV given on the command line
    /// wins over the one named in the config.
    pub fn from_config(
        cfg: &leaven_config::Config,
        calibration_override: Option<&Path>,
        json: bool,
    ) -> CoreResult<Self> {
        let prefs = Preferences::try_from(&cfg.preferences)
            .map_err(eyre::Report::new)
            .wrap_err("invalid configuration")?;
        let csv = calibration_override.or(cfg.calibration.csv.as_deref());
        let table = match csv {
            Some(path) => {
                let rows = leaven_config::load_calibration_csv(path)?;
                let table = CalibrationTable::try_from(rows)
                    .map_err(eyre::Report::new)
                    .wrap_err_with(|| format!("calibration table {}", path.display()))?;
                tracing::info!(
                    path = %path.display(),
                    starters = table.starters().len(),
                    temperatures = table.temperatures_f().len(),
                    "loaded calibration table"
                );
                Cow::Owned(table)
            }
            None => Cow::Borrowed(CalibrationTable::standard()),
        };
        Ok(Self { table, prefs, json })
    }
}

pub fn run_estimate(
    ctx: &Context,
    temperature: f64,
    unit: Option<TempUnit>,
    starter: f64,
    rise: Option<RiseTarget>,
    start: Option<NaiveDateTime>,
) -> CoreResult<String> {
    let reading = Temperature::new(temperature, unit.unwrap_or(ctx.prefs.temp_unit));
    let rise = rise.unwrap_or(ctx.prefs.rise_target);
    let req = EstimateRequest::new(reading.to_fahrenheit(), starter, rise);
    let result = ctx.table.estimate(&req);
    let advisories = ctx.table.advisories(&req);
    let summary = EstimateSummary::new(result, start);
    tracing::info!(
        temperature_f = req.temperature_f,
        starter_percent = starter,
        rise = rise.percent(),
        hours = result.hours,
        extrapolated = !advisories.is_empty(),
        "estimate"
    );

    if ctx.json {
        let out = json!({
            "request": {
                "temperature_f": req.temperature_f,
                "temperature_c": fahrenheit_to_celsius(req.temperature_f),
                "starter_percent": req.starter_percent,
                "rise_target": rise,
            },
            "summary": summary,
            "advisories": advisories,
        });
        return Ok(out.to_string());
    }

    let display_unit = ctx.prefs.temp_unit;
    let other_unit = match display_unit {
        TempUnit::Celsius => TempUnit::Fahrenheit,
        TempUnit::Fahrenheit => TempUnit::Celsius,
    };
    let mut lines = vec![
        format!(
            "Estimated bulk fermentation: {} ({:.2} h)",
            summary.estimate, summary.estimated_hours
        ),
        format!("Expected range: {} - {}", summary.min, summary.max),
        format!(
            "Dough {}{} ({}{}), starter {}%, rise {}",
            reading.display_in(display_unit),
            display_unit.symbol(),
            reading.display_in(other_unit),
            other_unit.symbol(),
            starter,
            rise
        ),
    ];
    if let Some(done) = summary.completion {
        lines.push(format!("Complete at: {}", done.format("%Y-%m-%d %H:%M")));
    }
    for a in &advisories {
        lines.push(format!("Warning: {a}"));
    }
    Ok(lines.join("\n"))
}

pub fn run_convert(ctx: &Context, value: f64, from: TempUnit) -> String {
    let reading = Temperature::new(value, from);
    let to = match from {
        TempUnit::Celsius => TempUnit::Fahrenheit,
        TempUnit::Fahrenheit => TempUnit::Celsius,
    };
    let converted = reading.display_in(to);
    if ctx.json {
        json!({ "input": value, "from": from, "to": to, "value": converted }).to_string()
    } else {
        format!("{converted}{}", to.symbol())
    }
}

pub fn run_table(ctx: &Context, rise: Option<RiseTarget>) -> String {
    let rise = rise.unwrap_or(ctx.prefs.rise_target);
    let table = ctx.table.as_ref();
    let grid: Vec<Vec<Option<f64>>> = (0..table.starters().len())
        .map(|si| {
            (0..table.temperatures_f().len())
                .map(|ti| table.hours_at(si, ti, rise))
                .collect()
        })
        .collect();

    if ctx.json {
        return json!({
            "rise_target": rise,
            "starters": table.starters(),
            "temperatures_f": table.temperatures_f(),
            "hours": grid,
        })
        .to_string();
    }

    let mut out = format!("Bulk fermentation hours, rise {rise}\nstarter");
    for t in table.temperatures_f() {
        out.push_str(&format!(" {:>6}", format!("{t}°F")));
    }
    for (s, row) in table.starters().iter().zip(&grid) {
        out.push_str(&format!("\n{:>7}", format!("{s}%")));
        for cell in row {
            match cell {
                Some(h) => out.push_str(&format!(" {h:>6.1}")),
                None => out.push_str(&format!(" {:>6}", "-")),
            }
        }
    }
    out
}
