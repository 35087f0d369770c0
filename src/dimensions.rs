//! Picks the authoritative unit dimensions for a product or batch.
//!
//! Four candidate sets are checked in a fixed order:
//! batch packaging, product packaging, batch product, product product.
//! A set only counts when all three axes are usable; axes are never mixed
//! across sets.

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{AxisTriple, DimensionSource, Product, ProductBatch, usable};
use crate::types::Dimensions;

/// Dimensions together with the set they were taken from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct ResolvedDimensions {
    pub dimensions: Dimensions,
    pub source: DimensionSource,
}

fn complete(axes: AxisTriple) -> Option<Dimensions> {
    let (height, width, depth) = axes;
    Some(Dimensions {
        height_cm: usable(height)?,
        width_cm: usable(width)?,
        depth_cm: usable(depth)?,
    })
}

/// Resolves the effective dimensions, or `None` when no candidate set is complete.
///
/// `None` is not an error: it means the product has not been measured yet.
pub fn resolve_effective_dimensions(
    product: &Product,
    batch: Option<&ProductBatch>,
) -> Option<ResolvedDimensions> {
    let candidates = [
        (batch.map(ProductBatch::packaging_axes), DimensionSource::Packaging),
        (Some(product.packaging_axes()), DimensionSource::Packaging),
        (batch.map(ProductBatch::product_axes), DimensionSource::Product),
        (Some(product.product_axes()), DimensionSource::Product),
    ];

    candidates
        .into_iter()
        .find_map(|(axes, source)| {
            complete(axes?).map(|dimensions| ResolvedDimensions { dimensions, source })
        })
}
