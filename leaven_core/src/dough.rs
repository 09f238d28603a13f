//! Ingredient helpers for scaled recipes.

use serde::{Deserialize, Serialize};

/// Hydration the base recipes are written for (%).
pub const BASE_HYDRATION_PCT: f64 = 80.0;
/// Commercial yeast doughs take slightly less water.
pub const COMMERCIAL_WATER_FACTOR: f64 = 0.98;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leavening {
    Sourdough,
    Commercial,
}

/// Water for `hydration_pct`, scaled from a base recipe at 80 % hydration.
/// Rounded to whole grams.
pub fn water_amount(base_water_g: f64, hydration_pct: f64, leavening: Leavening) -> f64 {
    let adjusted = base_water_g * (hydration_pct / BASE_HYDRATION_PCT);
    match leavening {
        Leavening::Commercial => (adjusted * COMMERCIAL_WATER_FACTOR).round(),
        Leavening::Sourdough => adjusted.round(),
    }
}

// Exponential decay anchored at (12 h, max) and (72 h, min).
const DECAY_START_H: f64 = 12.0;
const DECAY_END_H: f64 = 72.0;

fn decay(max: f64, min: f64, fermentation_hours: f64) -> f64 {
    let k = (max / min).ln() / (DECAY_END_H - DECAY_START_H);
    max * (-k * (fermentation_hours - DECAY_START_H)).exp()
}

/// Leavening for a planned fermentation time: longer ferments need less.
///
/// Sourdough starter in grams (100 g at 12 h down to 25 g at 72 h), rounded
/// to whole grams. Commercial yeast in grams (2 g down to 0.5 g), rounded to
/// 0.1 g. Times outside 12..72 h follow the same curve.
pub fn leavening_amount(fermentation_hours: f64, leavening: Leavening) -> f64 {
    match leavening {
        Leavening::Sourdough => decay(100.0, 25.0, fermentation_hours).round(),
        Leavening::Commercial => (decay(2.0, 0.5, fermentation_hours) * 10.0).round() / 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_scales_with_hydration() {
        assert_eq!(water_amount(400.0, 80.0, Leavening::Sourdough), 400.0);
        assert_eq!(water_amount(400.0, 70.0, Leavening::Sourdough), 350.0);
        assert_eq!(water_amount(400.0, 80.0, Leavening::Commercial), 392.0);
    }

    #[test]
    fn leavening_hits_curve_anchors() {
        assert_eq!(leavening_amount(12.0, Leavening::Sourdough), 100.0);
        assert_eq!(leavening_amount(72.0, Leavening::Sourdough), 25.0);
        assert_eq!(leavening_amount(42.0, Leavening::Sourdough), 50.0);
        assert_eq!(leavening_amount(12.0, Leavening::Commercial), 2.0);
        assert_eq!(leavening_amount(72.0, Leavening::Commercial), 0.5);
        assert_eq!(leavening_amount(42.0, Leavening::Commercial), 1.0);
    }
}
