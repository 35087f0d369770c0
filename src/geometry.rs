//! Shared arithmetic for axis-aligned fitting.
//!
//! Every fitter in this crate reduces to the same few steps: count how many
//! units fit along an axis, compare the two footprint orientations, and split
//! a quantity into full loads plus a last partial load.

use serde::Serialize;
use utoipa::ToSchema;

/// How the unit footprint is laid onto a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Unit width along the surface length, unit depth along the surface width.
    Standard,
    /// Unit depth along the surface length, unit width along the surface width.
    Rotated,
}

/// Number of whole items of length `item` that fit into `space`.
///
/// Returns 0 when the item does not fit or the input is degenerate.
///
/// # Examples
/// ```
/// use dpp_logistics::geometry::fit_count;
///
/// assert_eq!(fit_count(120.0, 30.0), 4);
/// assert_eq!(fit_count(80.0, 30.0), 2);
/// assert_eq!(fit_count(10.0, 12.0), 0);
/// ```
pub fn fit_count(space: f64, item: f64) -> u64 {
    if item.is_nan() || space.is_nan() || item <= 0.0 || space <= 0.0 {
        return 0;
    }
    // Saturating float-to-int cast.
    (space / item).floor() as u64
}

/// Result of the two-orientation footprint search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FootprintFit {
    pub orientation: Orientation,
    pub units: u64,
}

/// Compares the standard and rotated orientation of a unit footprint
/// (`unit_width` × `unit_depth`) on a surface (`surface_length` × `surface_width`).
///
/// `multiplier` scales both candidates (e.g. the number of layers) before the
/// comparison. The rotated orientation only wins when it is strictly better.
pub fn best_footprint(
    surface_length: f64,
    surface_width: f64,
    unit_width: f64,
    unit_depth: f64,
    multiplier: u64,
) -> FootprintFit {
    let standard = fit_count(surface_length, unit_width)
        .saturating_mul(fit_count(surface_width, unit_depth))
        .saturating_mul(multiplier);
    let rotated = fit_count(surface_length, unit_depth)
        .saturating_mul(fit_count(surface_width, unit_width))
        .saturating_mul(multiplier);

    if rotated > standard {
        FootprintFit {
            orientation: Orientation::Rotated,
            units: rotated,
        }
    } else {
        FootprintFit {
            orientation: Orientation::Standard,
            units: standard,
        }
    }
}

/// Ceiling division; `0 / n == 0`.
#[inline]
pub fn ceil_div(quantity: u64, per_load: u64) -> u64 {
    if per_load == 0 {
        return 0;
    }
    quantity.div_ceil(per_load)
}

/// Units in the last load: the remainder, or a full load when the quantity
/// divides evenly.
#[inline]
pub fn remainder_or_full(quantity: u64, per_load: u64) -> u64 {
    if per_load == 0 || quantity == 0 {
        return 0;
    }
    match quantity % per_load {
        0 => per_load,
        rest => rest,
    }
}

/// `part / whole × 100`, or 0 for an empty whole.
#[inline]
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Like [`percent_of`], capped at 100.
#[inline]
pub fn capped_percent(part: f64, whole: f64) -> f64 {
    percent_of(part, whole).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_count_floors() {
        assert_eq!(fit_count(180.0, 20.0), 9);
        assert_eq!(fit_count(179.9, 20.0), 8);
        assert_eq!(fit_count(20.0, 20.0), 1);
    }

    #[test]
    fn fit_count_handles_degenerate_input() {
        assert_eq!(fit_count(10.0, 0.0), 0);
        assert_eq!(fit_count(0.0, 10.0), 0);
        assert_eq!(fit_count(10.0, f64::NAN), 0);
    }

    #[test]
    fn footprint_prefers_standard_on_tie() {
        // 120×80 with a 40×40 unit: both orientations give 3×2.
        let fit = best_footprint(120.0, 80.0, 40.0, 40.0, 1);
        assert_eq!(fit.orientation, Orientation::Standard);
        assert_eq!(fit.units, 6);
    }

    #[test]
    fn footprint_takes_strictly_better_rotation() {
        // Standard: floor(20/15) × floor(15/20) = 0; rotated: 1 × 1.
        let fit = best_footprint(20.0, 15.0, 15.0, 20.0, 1);
        assert_eq!(fit.orientation, Orientation::Rotated);
        assert_eq!(fit.units, 1);
    }

    #[test]
    fn footprint_multiplier_scales_both_candidates() {
        let fit = best_footprint(120.0, 80.0, 30.0, 40.0, 9);
        assert_eq!(fit.orientation, Orientation::Standard);
        assert_eq!(fit.units, 72);
    }

    #[test]
    fn remainder_or_full_returns_full_load_on_exact_multiple() {
        assert_eq!(remainder_or_full(144, 72), 72);
        assert_eq!(remainder_or_full(500, 72), 68);
        assert_eq!(remainder_or_full(0, 72), 0);
    }

    #[test]
    fn ceil_div_rounds_up() {
        assert_eq!(ceil_div(500, 72), 7);
        assert_eq!(ceil_div(144, 72), 2);
        assert_eq!(ceil_div(0, 72), 0);
        assert_eq!(ceil_div(5, 0), 0);
    }

    #[test]
    fn percentages() {
        assert!((percent_of(68.0, 72.0) - 94.444_444).abs() < 1e-4);
        assert_eq!(percent_of(1.0, 0.0), 0.0);
        assert_eq!(capped_percent(150.0, 100.0), 100.0);
    }
}
