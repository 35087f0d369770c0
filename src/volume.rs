//! Unit and total volume, storage-location capacity, and volume display.

use serde::Serialize;
use utoipa::ToSchema;

use crate::dimensions::resolve_effective_dimensions;
use crate::geometry::percent_of;
use crate::model::{DimensionSource, Product, ProductBatch};
use crate::types::Dimensions;

/// Fill percentage (after adding incoming stock) from which a location is flagged.
pub const CAPACITY_WARNING_PERCENT: f64 = 80.0;

/// Fill percentage above which a location is over capacity.
pub const CAPACITY_LIMIT_PERCENT: f64 = 100.0;

/// Volume of a quantity of identical units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct VolumeResult {
    pub unit_volume_m3: f64,
    pub total_volume_m3: f64,
    pub source: DimensionSource,
    pub dimensions: Dimensions,
    pub quantity: u64,
}

/// Calculates unit and total volume, or `None` when dimensions cannot be resolved.
pub fn calculate_volume(
    product: &Product,
    quantity: u64,
    batch: Option<&ProductBatch>,
) -> Option<VolumeResult> {
    let resolved = resolve_effective_dimensions(product, batch)?;
    let unit_volume_m3 = resolved.dimensions.volume_m3();
    Some(VolumeResult {
        unit_volume_m3,
        total_volume_m3: unit_volume_m3 * quantity as f64,
        source: resolved.source,
        dimensions: resolved.dimensions,
        quantity,
    })
}

/// Fill state of a storage location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    /// The location has no capacity configured.
    Unknown,
    Ok,
    Warning,
    OverCapacity,
}

/// Capacity check of a storage location against incoming volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct CapacityAnalysis {
    pub incoming_m3: f64,
    pub capacity_m3: Option<f64>,
    pub current_used_m3: f64,
    pub used_after_m3: f64,
    pub remaining_after_m3: Option<f64>,
    pub fill_percent_after: Option<f64>,
    pub status: CapacityStatus,
}

/// Classifies a fill percentage; 80 and 100 are both still a warning.
pub fn classify_fill(fill_percent: f64) -> CapacityStatus {
    if fill_percent > CAPACITY_LIMIT_PERCENT {
        CapacityStatus::OverCapacity
    } else if fill_percent >= CAPACITY_WARNING_PERCENT {
        CapacityStatus::Warning
    } else {
        CapacityStatus::Ok
    }
}

/// Checks whether `incoming_m3` fits into a storage location.
///
/// Untracked usage counts as empty. A missing or non-positive capacity yields
/// [`CapacityStatus::Unknown`]. Returns `None` only for a negative or
/// non-finite incoming volume.
pub fn analyze_capacity(
    incoming_m3: f64,
    location_capacity_m3: Option<f64>,
    current_used_m3: Option<f64>,
) -> Option<CapacityAnalysis> {
    if !incoming_m3.is_finite() || incoming_m3 < 0.0 {
        return None;
    }

    let current_used_m3 = current_used_m3.filter(|v| v.is_finite()).unwrap_or(0.0);
    let used_after_m3 = current_used_m3 + incoming_m3;

    let capacity_m3 = location_capacity_m3.filter(|c| c.is_finite() && *c > 0.0);
    let Some(capacity) = capacity_m3 else {
        return Some(CapacityAnalysis {
            incoming_m3,
            capacity_m3: None,
            current_used_m3,
            used_after_m3,
            remaining_after_m3: None,
            fill_percent_after: None,
            status: CapacityStatus::Unknown,
        });
    };

    let fill_percent_after = percent_of(used_after_m3, capacity);
    Some(CapacityAnalysis {
        incoming_m3,
        capacity_m3: Some(capacity),
        current_used_m3,
        used_after_m3,
        remaining_after_m3: Some(capacity - used_after_m3),
        fill_percent_after: Some(fill_percent_after),
        status: classify_fill(fill_percent_after),
    })
}

/// Formats a volume in cubic meters for display.
///
/// Tiny volumes keep more decimals so they never collapse to zero.
///
/// # Examples
/// ```
/// use dpp_logistics::volume::format_volume_m3;
///
/// assert_eq!(format_volume_m3(0.000_25), "0.000250 m³");
/// assert_eq!(format_volume_m3(0.024), "0.0240 m³");
/// assert_eq!(format_volume_m3(12.0), "12.00 m³");
/// ```
pub fn format_volume_m3(value: f64) -> String {
    if value < 0.001 {
        format!("{:.6} m³", value)
    } else if value < 0.1 {
        format!("{:.4} m³", value)
    } else {
        format!("{:.2} m³", value)
    }
}
