//! Completion-time projection.

use chrono::{NaiveDateTime, TimeDelta};

pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// `start + hours` on the naive wall clock (no DST or calendar adjustment).
///
/// The offset is rounded to whole milliseconds. Returns `None` when there is
/// no start, when `hours` is not finite, or when the result leaves chrono's
/// representable range.
pub fn project_completion(start: Option<NaiveDateTime>, hours: f64) -> Option<NaiveDateTime> {
    let start = start?;
    if !hours.is_finite() {
        return None;
    }
    let ms = (hours * MILLIS_PER_HOUR).round();
    if ms.abs() >= i64::MAX as f64 {
        return None;
    }
    let offset = TimeDelta::try_milliseconds(ms as i64)?;
    start.checked_add_signed(offset)
}
