//! Input records for the space-fitting engine.
//!
//! This module defines the data handed in by the data-access layer:
//! - `Product`: catalog-level dimensions and weight
//! - `ProductBatch`: batch-level overrides of the same fields
//! - `ValidationError`: rejected request values
//!
//! All lengths are centimeters, all weights grams. Every physical field is
//! optional because products are frequently created before they are measured.

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

/// Validation error for request data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Invalid volume: {0}")]
    InvalidVolume(String),
}

/// Raw, possibly incomplete set of three axis values.
pub type AxisTriple = (Option<f64>, Option<f64>, Option<f64>);

/// Product record as stored in the catalog.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Oak stool",
    "height_cm": 45.0,
    "width_cm": 30.0,
    "depth_cm": 30.0,
    "packaging_height_cm": 48.0,
    "packaging_width_cm": 33.0,
    "packaging_depth_cm": 33.0,
    "gross_weight_g": 3200.0
}))]
pub struct Product {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub width_cm: Option<f64>,
    #[serde(default)]
    pub depth_cm: Option<f64>,
    #[serde(default)]
    pub packaging_height_cm: Option<f64>,
    #[serde(default)]
    pub packaging_width_cm: Option<f64>,
    #[serde(default)]
    pub packaging_depth_cm: Option<f64>,
    #[serde(default)]
    pub gross_weight_g: Option<f64>,
}

impl Product {
    /// Bare product dimensions (height, width, depth).
    pub fn product_axes(&self) -> AxisTriple {
        (self.height_cm, self.width_cm, self.depth_cm)
    }

    /// Shipping packaging dimensions (height, width, depth).
    pub fn packaging_axes(&self) -> AxisTriple {
        (
            self.packaging_height_cm,
            self.packaging_width_cm,
            self.packaging_depth_cm,
        )
    }
}

/// Production batch of a product. Any field set here overrides the product.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductBatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub width_cm: Option<f64>,
    #[serde(default)]
    pub depth_cm: Option<f64>,
    #[serde(default)]
    pub packaging_height_cm: Option<f64>,
    #[serde(default)]
    pub packaging_width_cm: Option<f64>,
    #[serde(default)]
    pub packaging_depth_cm: Option<f64>,
    #[serde(default)]
    pub gross_weight_g: Option<f64>,
}

impl ProductBatch {
    /// Bare product dimensions recorded on the batch.
    pub fn product_axes(&self) -> AxisTriple {
        (self.height_cm, self.width_cm, self.depth_cm)
    }

    /// Packaging dimensions recorded on the batch.
    pub fn packaging_axes(&self) -> AxisTriple {
        (
            self.packaging_height_cm,
            self.packaging_width_cm,
            self.packaging_depth_cm,
        )
    }
}

/// Which of the two dimension sets was used for a calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DimensionSource {
    Packaging,
    Product,
}

/// Returns the value when it is usable as a measurement (present, finite, > 0).
#[inline]
pub(crate) fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Resolves the effective unit weight in grams: batch first, then product.
pub fn effective_unit_weight_g(product: &Product, batch: Option<&ProductBatch>) -> Option<f64> {
    batch
        .and_then(|b| usable(b.gross_weight_g))
        .or_else(|| usable(product.gross_weight_g))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_weight_overrides_product_weight() {
        let product = Product {
            gross_weight_g: Some(1200.0),
            ..Product::default()
        };
        let batch = ProductBatch {
            gross_weight_g: Some(1350.0),
            ..ProductBatch::default()
        };
        assert_eq!(effective_unit_weight_g(&product, Some(&batch)), Some(1350.0));
        assert_eq!(effective_unit_weight_g(&product, None), Some(1200.0));
    }

    #[test]
    fn zero_batch_weight_falls_back_to_product() {
        let product = Product {
            gross_weight_g: Some(800.0),
            ..Product::default()
        };
        let batch = ProductBatch {
            gross_weight_g: Some(0.0),
            ..ProductBatch::default()
        };
        assert_eq!(effective_unit_weight_g(&product, Some(&batch)), Some(800.0));
    }

    #[test]
    fn missing_weight_everywhere_is_none() {
        assert_eq!(effective_unit_weight_g(&Product::default(), None), None);
    }

    #[test]
    fn product_deserializes_with_missing_fields() {
        let product: Product =
            serde_json::from_str(r#"{"height_cm": 10.0, "width_cm": 20.0}"#).unwrap();
        assert_eq!(product.product_axes(), (Some(10.0), Some(20.0), None));
        assert_eq!(product.packaging_axes(), (None, None, None));
    }

    #[test]
    fn dimension_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DimensionSource::Packaging).unwrap(),
            "\"packaging\""
        );
    }
}
