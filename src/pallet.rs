//! EUR pallet fitting.
//!
//! Units are laid out in identical layers using one of two footprint
//! orientations, stacked up to the pallet's height limit and then capped by
//! the pallet's weight limit. This is an estimate, not a packing proof.

use serde::Serialize;
use utoipa::ToSchema;

use crate::geometry::{
    Orientation, best_footprint, ceil_div, fit_count, percent_of, remainder_or_full,
};
use crate::reference::{EUR_PALLET, PalletSpec};
use crate::types::{Dimensions, GRAMS_PER_KG};

/// Packing solution for one pallet type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct PalletCalculation {
    pub pallet: PalletSpec,
    pub orientation: Orientation,
    pub units_per_layer: u64,
    pub layers_per_pallet: u64,
    pub units_per_pallet: u64,
    pub pallets_needed: u64,
    pub last_pallet_units: u64,
    pub last_pallet_fill_percent: f64,
    /// Weight of the load of a completely filled pallet, without the pallet itself.
    pub full_pallet_load_kg: Option<f64>,
    pub max_units_by_weight: Option<u64>,
    /// `true` when the weight limit, not the geometry, bounds the pallet.
    pub weight_limited: bool,
}

/// Calculates how `quantity` units of size `dims` fit onto EUR pallets.
///
/// `units_per_pallet` is always at least 1, even when the unit is larger than
/// the pallet.
pub fn calculate_pallet_fit(
    dims: &Dimensions,
    quantity: u64,
    unit_weight_g: Option<f64>,
) -> PalletCalculation {
    calculate_pallet_fit_on(&EUR_PALLET, dims, quantity, unit_weight_g)
}

fn calculate_pallet_fit_on(
    pallet: &PalletSpec,
    dims: &Dimensions,
    quantity: u64,
    unit_weight_g: Option<f64>,
) -> PalletCalculation {
    let footprint = best_footprint(
        pallet.length_cm,
        pallet.width_cm,
        dims.width_cm,
        dims.depth_cm,
        1,
    );
    let units_per_layer = footprint.units.max(1);
    let mut layers_per_pallet = fit_count(pallet.max_stack_height_cm, dims.height_cm).max(1);
    let mut units_per_pallet = units_per_layer.saturating_mul(layers_per_pallet);

    let unit_weight_g = unit_weight_g.filter(|w| w.is_finite() && *w > 0.0);
    let max_units_by_weight = unit_weight_g.map(|w| fit_count(pallet.max_weight_g(), w));

    let mut weight_limited = false;
    if let Some(max_units) = max_units_by_weight {
        if max_units < units_per_pallet {
            layers_per_pallet = (max_units / units_per_layer).max(1);
            units_per_pallet = units_per_layer * layers_per_pallet;
            weight_limited = true;
        }
    }

    let last_pallet_units = remainder_or_full(quantity, units_per_pallet);

    PalletCalculation {
        pallet: *pallet,
        orientation: footprint.orientation,
        units_per_layer,
        layers_per_pallet,
        units_per_pallet,
        pallets_needed: ceil_div(quantity, units_per_pallet),
        last_pallet_units,
        last_pallet_fill_percent: percent_of(last_pallet_units as f64, units_per_pallet as f64),
        full_pallet_load_kg: unit_weight_g.map(|w| units_per_pallet as f64 * w / GRAMS_PER_KG),
        max_units_by_weight,
        weight_limited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dims(h: f64, w: f64, d: f64) -> Dimensions {
        Dimensions::new(h, w, d).unwrap()
    }

    #[test]
    fn concrete_carton_scenario() {
        let calc = calculate_pallet_fit(&dims(20.0, 30.0, 40.0), 500, Some(2000.0));
        assert_eq!(calc.orientation, Orientation::Standard);
        assert_eq!(calc.units_per_layer, 8);
        assert_eq!(calc.layers_per_pallet, 9);
        assert_eq!(calc.units_per_pallet, 72);
        assert_eq!(calc.max_units_by_weight, Some(750));
        assert!(!calc.weight_limited);
        assert_eq!(calc.pallets_needed, 7);
        assert_eq!(calc.last_pallet_units, 68);
        assert!((calc.last_pallet_fill_percent - 94.444_444).abs() < 1e-4);
        assert_eq!(calc.full_pallet_load_kg, Some(144.0));
    }

    #[test]
    fn exact_multiple_fills_last_pallet() {
        let calc = calculate_pallet_fit(&dims(20.0, 30.0, 40.0), 144, None);
        assert_eq!(calc.pallets_needed, 2);
        assert_eq!(calc.last_pallet_units, 72);
        assert_eq!(calc.last_pallet_fill_percent, 100.0);
        assert_eq!(calc.full_pallet_load_kg, None);
        assert_eq!(calc.max_units_by_weight, None);
    }

    #[test]
    fn rotated_orientation_is_chosen_when_strictly_better() {
        // Standard: floor(120/50) × floor(80/30) = 2 × 2 = 4.
        // Rotated:  floor(120/30) × floor(80/50) = 4 × 1 = 4 → tie, standard.
        let tie = calculate_pallet_fit(&dims(10.0, 50.0, 30.0), 1, None);
        assert_eq!(tie.orientation, Orientation::Standard);
        assert_eq!(tie.units_per_layer, 4);

        // Standard: floor(120/80) × floor(80/60) = 1 × 1 = 1.
        // Rotated:  floor(120/60) × floor(80/80) = 2 × 1 = 2.
        let rotated = calculate_pallet_fit(&dims(10.0, 80.0, 60.0), 1, None);
        assert_eq!(rotated.orientation, Orientation::Rotated);
        assert_eq!(rotated.units_per_layer, 2);
    }

    #[test]
    fn oversized_unit_still_counts_one_per_pallet() {
        let calc = calculate_pallet_fit(&dims(200.0, 130.0, 90.0), 3, None);
        assert_eq!(calc.units_per_layer, 1);
        assert_eq!(calc.layers_per_pallet, 1);
        assert_eq!(calc.units_per_pallet, 1);
        assert_eq!(calc.pallets_needed, 3);
    }

    #[test]
    fn heavy_units_limit_layers() {
        // Geometry: 8 per layer × 9 layers = 72. Weight: floor(1_500_000 / 50_000) = 30.
        let calc = calculate_pallet_fit(&dims(20.0, 30.0, 40.0), 100, Some(50_000.0));
        assert!(calc.weight_limited);
        assert_eq!(calc.max_units_by_weight, Some(30));
        assert_eq!(calc.layers_per_pallet, 3);
        assert_eq!(calc.units_per_pallet, 24);
        assert_eq!(calc.pallets_needed, 5);
        assert_eq!(calc.last_pallet_units, 4);
    }

    #[test]
    fn extremely_heavy_units_keep_one_layer() {
        // Weight allows 2 units, fewer than one layer of 8: one layer is kept.
        let calc = calculate_pallet_fit(&dims(20.0, 30.0, 40.0), 10, Some(600_000.0));
        assert!(calc.weight_limited);
        assert_eq!(calc.layers_per_pallet, 1);
        assert_eq!(calc.units_per_pallet, 8);
    }

    #[test]
    fn zero_weight_is_ignored() {
        let calc = calculate_pallet_fit(&dims(20.0, 30.0, 40.0), 10, Some(0.0));
        assert!(!calc.weight_limited);
        assert_eq!(calc.max_units_by_weight, None);
        assert_eq!(calc.full_pallet_load_kg, None);
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let a = calculate_pallet_fit(&dims(12.5, 17.3, 9.1), 777, Some(431.0));
        let b = calculate_pallet_fit(&dims(12.5, 17.3, 9.1), 777, Some(431.0));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn units_per_pallet_is_positive_and_pallet_count_is_exact(
            h in 0.5f64..250.0,
            w in 0.5f64..150.0,
            d in 0.5f64..150.0,
            quantity in 1u64..100_000,
        ) {
            let calc = calculate_pallet_fit(&dims(h, w, d), quantity, None);
            prop_assert!(calc.units_per_pallet >= 1);
            prop_assert_eq!(calc.pallets_needed, quantity.div_ceil(calc.units_per_pallet));
            prop_assert!(calc.last_pallet_units >= 1);
            prop_assert!(calc.last_pallet_units <= calc.units_per_pallet);
            if quantity % calc.units_per_pallet == 0 {
                prop_assert_eq!(calc.last_pallet_units, calc.units_per_pallet);
            }
        }

        #[test]
        fn heavier_units_never_fit_more_per_pallet(
            h in 1.0f64..100.0,
            w in 1.0f64..100.0,
            d in 1.0f64..100.0,
            weight in 1.0f64..200_000.0,
            extra in 0.0f64..200_000.0,
        ) {
            let unit = dims(h, w, d);
            let light = calculate_pallet_fit(&unit, 1_000, Some(weight));
            let heavy = calculate_pallet_fit(&unit, 1_000, Some(weight + extra));
            prop_assert!(heavy.units_per_pallet <= light.units_per_pallet);

            let geometry = calculate_pallet_fit(&unit, 1_000, None);
            if heavy.max_units_by_weight.unwrap() < geometry.units_per_pallet {
                prop_assert!(heavy.weight_limited);
            }
        }
    }
}
