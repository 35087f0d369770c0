//! Common value types for unit and package geometry.
//!
//! All lengths are centimeters, all volumes derived from them are either
//! cubic meters (`*_m3`) or liters. Values are immutable once constructed.

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

use crate::model::ValidationError;

/// Cubic centimeters per cubic meter.
pub const CM3_PER_M3: f64 = 1_000_000.0;

/// Cubic centimeters per liter.
pub const CM3_PER_LITER: f64 = 1_000.0;

/// Grams per kilogram.
pub const GRAMS_PER_KG: f64 = 1_000.0;

/// Bounding box of a single unit.
///
/// The box is orientation-agnostic: `height_cm` is the axis that stays
/// vertical when units are stacked, `width_cm` and `depth_cm` form the
/// footprint and may be swapped by the fitters.
///
/// # Examples
/// ```
/// use dpp_logistics::types::Dimensions;
///
/// let dims = Dimensions::new(20.0, 30.0, 40.0).unwrap();
/// assert!((dims.volume_m3() - 0.024).abs() < 1e-12);
/// assert!(Dimensions::new(0.0, 30.0, 40.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"height_cm": 20.0, "width_cm": 30.0, "depth_cm": 40.0}))]
pub struct Dimensions {
    pub height_cm: f64,
    pub width_cm: f64,
    pub depth_cm: f64,
}

impl Dimensions {
    /// Creates a validated dimension set.
    ///
    /// Every axis must be finite and strictly positive.
    pub fn new(height_cm: f64, width_cm: f64, depth_cm: f64) -> Result<Self, ValidationError> {
        validation::validate_dimension(height_cm, "Height")?;
        validation::validate_dimension(width_cm, "Width")?;
        validation::validate_dimension(depth_cm, "Depth")?;
        Ok(Self {
            height_cm,
            width_cm,
            depth_cm,
        })
    }

    /// Re-runs validation on a deserialized value.
    pub fn validated(self) -> Result<Self, ValidationError> {
        Self::new(self.height_cm, self.width_cm, self.depth_cm)
    }

    /// Volume in cubic centimeters.
    #[inline]
    pub fn volume_cm3(&self) -> f64 {
        self.height_cm * self.width_cm * self.depth_cm
    }

    /// Volume in cubic meters.
    #[inline]
    pub fn volume_m3(&self) -> f64 {
        self.volume_cm3() / CM3_PER_M3
    }
}

/// Inner dimensions of a package (carton), measured along its own axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PackageDimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl PackageDimensions {
    #[inline]
    pub const fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }

    /// Returns the three axes ordered longest first.
    pub fn sorted_desc(&self) -> [f64; 3] {
        let mut axes = [self.length_cm, self.width_cm, self.height_cm];
        axes.sort_by(|a, b| b.total_cmp(a));
        axes
    }

    /// Carrier girth: length + 2 × width + 2 × height, in the package's own axis order.
    #[inline]
    pub fn girth_cm(&self) -> f64 {
        self.length_cm + 2.0 * self.width_cm + 2.0 * self.height_cm
    }

    /// Volume in liters.
    #[inline]
    pub fn volume_liters(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm / CM3_PER_LITER
    }
}

/// Validation helpers shared by request types.
pub mod validation {
    use crate::model::ValidationError;

    /// Validates a single length axis.
    pub fn validate_dimension(value: f64, name: &str) -> Result<(), ValidationError> {
        if value <= 0.0 || !value.is_finite() {
            return Err(ValidationError::InvalidDimension(format!(
                "{} must be positive, got: {}",
                name, value
            )));
        }
        Ok(())
    }

    /// Validates an optional unit weight in grams. Absence is allowed.
    pub fn validate_optional_weight(value: Option<f64>, name: &str) -> Result<(), ValidationError> {
        match value {
            Some(weight) if weight < 0.0 || !weight.is_finite() => {
                Err(ValidationError::InvalidWeight(format!(
                    "{} must not be negative, got: {}",
                    name, weight
                )))
            }
            _ => Ok(()),
        }
    }

    /// Validates a unit count and converts it to `u64`.
    pub fn validate_quantity(value: i64) -> Result<u64, ValidationError> {
        u64::try_from(value)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or_else(|| {
                ValidationError::InvalidQuantity(format!(
                    "Quantity must be a positive integer, got: {}",
                    value
                ))
            })
    }

    /// Validates a volume in cubic meters (zero allowed).
    pub fn validate_volume(value: f64, name: &str) -> Result<(), ValidationError> {
        if value < 0.0 || !value.is_finite() {
            return Err(ValidationError::InvalidVolume(format!(
                "{} must not be negative, got: {}",
                name, value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_reject_non_positive_axes() {
        assert!(Dimensions::new(10.0, 20.0, 30.0).is_ok());
        assert!(Dimensions::new(0.0, 20.0, 30.0).is_err());
        assert!(Dimensions::new(10.0, -1.0, 30.0).is_err());
        assert!(Dimensions::new(10.0, 20.0, f64::NAN).is_err());
        assert!(Dimensions::new(f64::INFINITY, 20.0, 30.0).is_err());
    }

    #[test]
    fn volume_converts_cm3_to_m3() {
        let dims = Dimensions::new(100.0, 100.0, 100.0).unwrap();
        assert!((dims.volume_cm3() - 1_000_000.0).abs() < 1e-9);
        assert!((dims.volume_m3() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn package_axes_sort_longest_first() {
        let package = PackageDimensions::new(40.0, 130.0, 20.0);
        assert_eq!(package.sorted_desc(), [130.0, 40.0, 20.0]);
    }

    #[test]
    fn girth_uses_package_axis_order() {
        let package = PackageDimensions::new(40.0, 130.0, 20.0);
        assert!((package.girth_cm() - (40.0 + 260.0 + 40.0)).abs() < 1e-9);
    }

    #[test]
    fn optional_weight_validation() {
        assert!(validation::validate_optional_weight(None, "Weight").is_ok());
        assert!(validation::validate_optional_weight(Some(0.0), "Weight").is_ok());
        assert!(validation::validate_optional_weight(Some(-5.0), "Weight").is_err());
        assert!(validation::validate_optional_weight(Some(f64::NAN), "Weight").is_err());
    }

    #[test]
    fn quantity_validation() {
        assert_eq!(validation::validate_quantity(12), Ok(12));
        assert!(matches!(
            validation::validate_quantity(0),
            Err(ValidationError::InvalidQuantity(_))
        ));
        assert!(validation::validate_quantity(-3).is_err());
    }
}
