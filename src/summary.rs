//! One consolidated space report for a product batch.
//!
//! Composes volume, pallet, container and carton fitting for a concrete
//! quantity. Weight is optional: without it every weight-based limit is
//! skipped and a warning is attached instead.

use serde::Serialize;
use utoipa::ToSchema;

use crate::carton::{CartonFitResult, calculate_carton_fit};
use crate::container::{ContainerCalculation, calculate_all_container_fits};
use crate::model::{Product, ProductBatch, effective_unit_weight_g};
use crate::pallet::{PalletCalculation, calculate_pallet_fit};
use crate::types::GRAMS_PER_KG;
use crate::volume::{VolumeResult, calculate_volume};

pub const WARNING_NO_WEIGHT_DATA: &str = "No weight data";
pub const WARNING_WEIGHT_LIMITED: &str = "Weight-limited";
pub const WARNING_NO_CARTON_FITS: &str = "No standard carton fits the unit";

/// Space requirements of a batch.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct BatchSpaceSummary {
    pub volume: VolumeResult,
    pub pallet: PalletCalculation,
    /// One entry per container type, in table order.
    pub containers: Vec<ContainerCalculation>,
    /// Cartons able to hold the unit, fewest cartons first.
    pub cartons: Vec<CartonFitResult>,
    pub unit_weight_g: Option<f64>,
    pub total_weight_kg: Option<f64>,
    pub warnings: Vec<String>,
}

/// Calculates the space summary, or `None` for a non-positive quantity or
/// an unmeasured product.
pub fn calculate_batch_space(
    product: &Product,
    batch: Option<&ProductBatch>,
    quantity: i64,
) -> Option<BatchSpaceSummary> {
    let quantity = u64::try_from(quantity).ok().filter(|q| *q > 0)?;
    let volume = calculate_volume(product, quantity, batch)?;

    let mut warnings = Vec::new();
    let unit_weight_g = effective_unit_weight_g(product, batch);
    if unit_weight_g.is_none() {
        warnings.push(WARNING_NO_WEIGHT_DATA.to_string());
    }
    let total_weight_kg = unit_weight_g.map(|w| w * quantity as f64 / GRAMS_PER_KG);

    let pallet = calculate_pallet_fit(&volume.dimensions, quantity, unit_weight_g);
    if pallet.weight_limited {
        warnings.push(WARNING_WEIGHT_LIMITED.to_string());
    }

    let containers = calculate_all_container_fits(
        volume.total_volume_m3,
        pallet.pallets_needed,
        total_weight_kg,
    );

    let cartons = calculate_carton_fit(&volume.dimensions, quantity, unit_weight_g);
    if cartons.is_empty() {
        warnings.push(WARNING_NO_CARTON_FITS.to_string());
    }

    Some(BatchSpaceSummary {
        volume,
        pallet,
        containers,
        cartons,
        unit_weight_g,
        total_weight_kg,
        warnings,
    })
}
