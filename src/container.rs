//! Freight container fitting for palletized goods.
//!
//! Pallets are assigned to containers by spot count, reduced when the
//! average pallet weight would exceed the container payload. Fill
//! percentages assume volume and weight are spread evenly across all
//! containers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::geometry::{capped_percent, ceil_div, fit_count, percent_of, remainder_or_full};
use crate::reference::{ContainerSpec, ContainerType};

/// Packing solution of pallets into one container type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct ContainerCalculation {
    pub container_type: ContainerType,
    pub spec: ContainerSpec,
    pub pallets_per_container: u64,
    pub containers_needed: u64,
    pub last_container_pallets: u64,
    /// Share of pallet spots used in the last container.
    pub last_container_fill_percent: f64,
    pub fill_percent_volume: f64,
    pub fill_percent_weight: Option<f64>,
    /// `true` when payload, not pallet spots, bounds the container.
    pub weight_limited: bool,
}

/// Calculates how `pallets_needed` pallets fit into containers of `container_type`.
///
/// The caller chooses between container types; this only evaluates one.
pub fn calculate_container_fit(
    total_volume_m3: f64,
    pallets_needed: u64,
    total_weight_kg: Option<f64>,
    container_type: ContainerType,
) -> ContainerCalculation {
    let spec = container_type.spec();
    let total_weight_kg = total_weight_kg.filter(|w| w.is_finite() && *w >= 0.0);

    let mut pallets_per_container = spec.pallet_spots;
    let mut weight_limited = false;
    if let Some(weight) = total_weight_kg {
        if pallets_needed > 0 {
            let weight_per_pallet = weight / pallets_needed as f64;
            let max_by_weight = fit_count(spec.max_payload_kg, weight_per_pallet);
            // Weightless pallets (fit_count == 0 for a zero divisor) never bind.
            if weight_per_pallet > 0.0 && max_by_weight < pallets_per_container {
                pallets_per_container = max_by_weight.max(1);
                weight_limited = true;
            }
        }
    }

    let containers_needed = ceil_div(pallets_needed, pallets_per_container);
    let last_container_pallets = remainder_or_full(pallets_needed, pallets_per_container);

    let (fill_percent_volume, fill_percent_weight) = if containers_needed == 0 {
        (0.0, total_weight_kg.map(|_| 0.0))
    } else {
        let per_container = containers_needed as f64;
        (
            capped_percent(total_volume_m3 / per_container, spec.usable_volume_m3),
            total_weight_kg.map(|w| capped_percent(w / per_container, spec.max_payload_kg)),
        )
    };

    ContainerCalculation {
        container_type,
        spec: *spec,
        pallets_per_container,
        containers_needed,
        last_container_pallets,
        last_container_fill_percent: percent_of(
            last_container_pallets as f64,
            pallets_per_container as f64,
        ),
        fill_percent_volume,
        fill_percent_weight,
        weight_limited,
    }
}

/// Evaluates every container type in table order.
pub fn calculate_all_container_fits(
    total_volume_m3: f64,
    pallets_needed: u64,
    total_weight_kg: Option<f64>,
) -> Vec<ContainerCalculation> {
    ContainerType::ALL
        .into_iter()
        .map(|container_type| {
            calculate_container_fit(
                total_volume_m3,
                pallets_needed,
                total_weight_kg,
                container_type,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_count_bounds_light_pallets() {
        let calc = calculate_container_fit(12.0, 7, Some(1000.0), ContainerType::Ft20);
        assert_eq!(calc.pallets_per_container, 11);
        assert!(!calc.weight_limited);
        assert_eq!(calc.containers_needed, 1);
        assert_eq!(calc.last_container_pallets, 7);
        assert!((calc.fill_percent_volume - 12.0 / 33.2 * 100.0).abs() < 1e-9);
        let weight_fill = calc.fill_percent_weight.unwrap();
        assert!((weight_fill - 1000.0 / 28_200.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn heavy_pallets_reduce_pallets_per_container() {
        // 10 pallets at 5000 kg each: floor(28200 / 5000) = 5 per 20ft container.
        let calc = calculate_container_fit(20.0, 10, Some(50_000.0), ContainerType::Ft20);
        assert!(calc.weight_limited);
        assert_eq!(calc.pallets_per_container, 5);
        assert_eq!(calc.containers_needed, 2);
        assert_eq!(calc.last_container_pallets, 5);
        assert_eq!(calc.last_container_fill_percent, 100.0);
        let weight_fill = calc.fill_percent_weight.unwrap();
        assert!((weight_fill - 25_000.0 / 28_200.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn pallet_heavier_than_payload_still_ships_one_per_container() {
        let calc = calculate_container_fit(3.0, 2, Some(80_000.0), ContainerType::Ft40);
        assert_eq!(calc.pallets_per_container, 1);
        assert_eq!(calc.containers_needed, 2);
        assert_eq!(calc.fill_percent_weight, Some(100.0));
    }

    #[test]
    fn volume_fill_is_capped() {
        let calc = calculate_container_fit(500.0, 3, None, ContainerType::Ft20);
        assert_eq!(calc.containers_needed, 1);
        assert_eq!(calc.fill_percent_volume, 100.0);
        assert_eq!(calc.fill_percent_weight, None);
    }

    #[test]
    fn exact_multiple_fills_last_container() {
        let calc = calculate_container_fit(10.0, 48, None, ContainerType::Ft40Hc);
        assert_eq!(calc.containers_needed, 2);
        assert_eq!(calc.last_container_pallets, 24);
    }

    #[test]
    fn no_pallets_need_no_containers() {
        let calc = calculate_container_fit(0.0, 0, Some(0.0), ContainerType::Ft20);
        assert_eq!(calc.containers_needed, 0);
        assert_eq!(calc.last_container_pallets, 0);
        assert_eq!(calc.fill_percent_volume, 0.0);
        assert_eq!(calc.fill_percent_weight, Some(0.0));
    }

    #[test]
    fn all_container_types_are_evaluated_in_order() {
        let calcs = calculate_all_container_fits(12.0, 30, None);
        let types: Vec<_> = calcs.iter().map(|c| c.container_type).collect();
        assert_eq!(types, ContainerType::ALL.to_vec());
        assert_eq!(calcs[0].containers_needed, 3);
        assert_eq!(calcs[1].containers_needed, 2);
        assert_eq!(calcs[2].containers_needed, 2);
    }
}
