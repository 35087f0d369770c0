//! Shipping carton fitting and carrier parcel compliance.

use serde::Serialize;
use utoipa::ToSchema;

use crate::geometry::{
    Orientation, best_footprint, ceil_div, fit_count, percent_of, remainder_or_full,
};
use crate::reference::{
    CARRIER_LIMITS, CARTON_TARE_KG, CarrierParcelLimit, SHIPPING_CARTONS, ShippingCartonSpec,
};
use crate::types::{Dimensions, GRAMS_PER_KG, PackageDimensions};

/// Outcome of checking one package against one carrier.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct CarrierComplianceResult {
    pub carrier_id: String,
    pub carrier_name: String,
    pub fits: bool,
    /// First violated limit, when `fits` is false.
    pub reason: Option<String>,
}

/// Packing solution for one carton size.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct CartonFitResult {
    pub carton: ShippingCartonSpec,
    pub orientation: Orientation,
    pub units_per_carton: u64,
    pub cartons_needed: u64,
    pub last_carton_units: u64,
    pub last_carton_fill_percent: f64,
    /// Weight of a full carton including tare.
    pub carton_weight_kg: Option<f64>,
    pub carrier_compliance: Vec<CarrierComplianceResult>,
}

/// Fits `quantity` units into every catalog carton.
///
/// Cartons that cannot hold a single unit are left out. The rest are sorted
/// by the number of cartons needed, fewest first; equal counts keep catalog
/// order.
pub fn calculate_carton_fit(
    unit_dims: &Dimensions,
    quantity: u64,
    unit_weight_g: Option<f64>,
) -> Vec<CartonFitResult> {
    let unit_weight_g = unit_weight_g.filter(|w| w.is_finite() && *w > 0.0);

    let mut results: Vec<CartonFitResult> = SHIPPING_CARTONS
        .iter()
        .filter_map(|carton| fit_into_carton(carton, unit_dims, quantity, unit_weight_g))
        .collect();

    // `sort_by_key` is stable.
    results.sort_by_key(|result| result.cartons_needed);
    results
}

fn fit_into_carton(
    carton: &ShippingCartonSpec,
    unit_dims: &Dimensions,
    quantity: u64,
    unit_weight_g: Option<f64>,
) -> Option<CartonFitResult> {
    let layers = fit_count(carton.inner.height_cm, unit_dims.height_cm);
    let footprint = best_footprint(
        carton.inner.length_cm,
        carton.inner.width_cm,
        unit_dims.width_cm,
        unit_dims.depth_cm,
        layers,
    );
    let units_per_carton = footprint.units;
    if units_per_carton < 1 {
        return None;
    }

    let last_carton_units = remainder_or_full(quantity, units_per_carton);
    let carton_weight_kg =
        unit_weight_g.map(|w| units_per_carton as f64 * w / GRAMS_PER_KG + CARTON_TARE_KG);

    let carrier_compliance = CARRIER_LIMITS
        .iter()
        .map(|carrier| check_carrier_compliance(&carton.inner, carton_weight_kg, carrier))
        .collect();

    Some(CartonFitResult {
        carton: *carton,
        orientation: footprint.orientation,
        units_per_carton,
        cartons_needed: ceil_div(quantity, units_per_carton),
        last_carton_units,
        last_carton_fill_percent: percent_of(last_carton_units as f64, units_per_carton as f64),
        carton_weight_kg,
        carrier_compliance,
    })
}

/// Checks a package against a carrier's parcel limits.
///
/// The package axes are sorted longest first and compared positionally with
/// the carrier's length, width and height limits. Girth is taken from the
/// package's own axis order. Weight is only checked when known. The first
/// failing check, in the order length, width, height, girth, weight, is
/// reported.
pub fn check_carrier_compliance(
    package: &PackageDimensions,
    package_weight_kg: Option<f64>,
    carrier: &CarrierParcelLimit,
) -> CarrierComplianceResult {
    let [length, width, height] = package.sorted_desc();
    let girth = package.girth_cm();

    let reason = if length > carrier.max_length_cm {
        Some(limit_reason("Length", length, carrier.name, carrier.max_length_cm, "cm"))
    } else if width > carrier.max_width_cm {
        Some(limit_reason("Width", width, carrier.name, carrier.max_width_cm, "cm"))
    } else if height > carrier.max_height_cm {
        Some(limit_reason("Height", height, carrier.name, carrier.max_height_cm, "cm"))
    } else if girth > carrier.max_girth_cm {
        Some(limit_reason("Girth", girth, carrier.name, carrier.max_girth_cm, "cm"))
    } else {
        match package_weight_kg {
            Some(weight) if weight > carrier.max_weight_kg => Some(limit_reason(
                "Weight",
                weight,
                carrier.name,
                carrier.max_weight_kg,
                "kg",
            )),
            _ => None,
        }
    };

    CarrierComplianceResult {
        carrier_id: carrier.id.to_string(),
        carrier_name: carrier.name.to_string(),
        fits: reason.is_none(),
        reason,
    }
}

fn limit_reason(what: &str, actual: f64, carrier: &str, limit: f64, unit: &str) -> String {
    format!(
        "{} {} {} exceeds {} limit of {} {}",
        what, actual, unit, carrier, limit, unit
    )
}
