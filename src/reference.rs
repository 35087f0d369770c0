//! Static reference data: pallet, freight containers, shipping cartons and
//! carrier parcel limits.
//!
//! These tables are fixed design constants. Nothing here is configurable or
//! loaded at runtime.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::{GRAMS_PER_KG, PackageDimensions};

/// A pallet type with fixed footprint and load limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct PalletSpec {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub label: &'static str,
    pub length_cm: f64,
    pub width_cm: f64,
    pub max_stack_height_cm: f64,
    pub max_weight_kg: f64,
}

impl PalletSpec {
    /// Maximum load in grams.
    pub fn max_weight_g(&self) -> f64 {
        self.max_weight_kg * GRAMS_PER_KG
    }
}

/// The Euro-pallet every pallet calculation is based on.
pub const EUR_PALLET: PalletSpec = PalletSpec {
    id: "eur1",
    label: "EUR 1",
    length_cm: 120.0,
    width_cm: 80.0,
    max_stack_height_cm: 180.0,
    max_weight_kg: 1_500.0,
};

/// Freight container types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ContainerType {
    #[serde(rename = "20ft")]
    Ft20,
    #[serde(rename = "40ft")]
    Ft40,
    #[serde(rename = "40ft_hc")]
    Ft40Hc,
}

impl ContainerType {
    /// All container types in table order.
    pub const ALL: [ContainerType; 3] = [
        ContainerType::Ft20,
        ContainerType::Ft40,
        ContainerType::Ft40Hc,
    ];

    /// Stable identifier, identical to the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            ContainerType::Ft20 => "20ft",
            ContainerType::Ft40 => "40ft",
            ContainerType::Ft40Hc => "40ft_hc",
        }
    }

    /// Reference data for this container type.
    pub fn spec(&self) -> &'static ContainerSpec {
        match self {
            ContainerType::Ft20 => &CONTAINER_SPECS[0],
            ContainerType::Ft40 => &CONTAINER_SPECS[1],
            ContainerType::Ft40Hc => &CONTAINER_SPECS[2],
        }
    }
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Capacity of one freight container type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct ContainerSpec {
    pub container_type: ContainerType,
    #[schema(value_type = String)]
    pub label: &'static str,
    /// Nominal number of EUR pallet spots (single stacked).
    pub pallet_spots: u64,
    pub usable_volume_m3: f64,
    pub max_payload_kg: f64,
}

pub static CONTAINER_SPECS: [ContainerSpec; 3] = [
    ContainerSpec {
        container_type: ContainerType::Ft20,
        label: "20ft Standard",
        pallet_spots: 11,
        usable_volume_m3: 33.2,
        max_payload_kg: 28_200.0,
    },
    ContainerSpec {
        container_type: ContainerType::Ft40,
        label: "40ft Standard",
        pallet_spots: 24,
        usable_volume_m3: 67.7,
        max_payload_kg: 26_700.0,
    },
    ContainerSpec {
        container_type: ContainerType::Ft40Hc,
        label: "40ft High Cube",
        pallet_spots: 24,
        usable_volume_m3: 76.4,
        max_payload_kg: 26_500.0,
    },
];

/// Tare weight added to every filled carton, in kg.
pub const CARTON_TARE_KG: f64 = 0.5;

/// A standard shipping carton size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct ShippingCartonSpec {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub label: &'static str,
    pub inner: PackageDimensions,
    pub volume_liters: f64,
    /// Fraction of a EUR pallet footprint the carton occupies.
    #[schema(value_type = String)]
    pub pallet_module: &'static str,
}

const fn carton(
    id: &'static str,
    label: &'static str,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    pallet_module: &'static str,
) -> ShippingCartonSpec {
    ShippingCartonSpec {
        id,
        label,
        inner: PackageDimensions::new(length_cm, width_cm, height_cm),
        volume_liters: length_cm * width_cm * height_cm / 1_000.0,
        pallet_module,
    }
}

pub static SHIPPING_CARTONS: [ShippingCartonSpec; 9] = [
    carton("xs", "XS 20×15×10", 20.0, 15.0, 10.0, "1/32"),
    carton("s", "S 30×20×15", 30.0, 20.0, 15.0, "1/16"),
    carton("m", "M 40×30×20", 40.0, 30.0, 20.0, "1/8"),
    carton("m_tall", "M tall 40×30×30", 40.0, 30.0, 30.0, "1/8"),
    carton("l", "L 60×40×30", 60.0, 40.0, 30.0, "1/4"),
    carton("l_tall", "L tall 60×40×40", 60.0, 40.0, 40.0, "1/4"),
    carton("xl", "XL 80×60×40", 80.0, 60.0, 40.0, "1/2"),
    carton("xl_tall", "XL tall 80×60×60", 80.0, 60.0, 60.0, "1/2"),
    carton("xxl", "XXL 120×80×60", 120.0, 80.0, 60.0, "1/1"),
];

/// Parcel limits of a named carrier.
///
/// The three axis limits are entered longest first and are compared against
/// a package's axes sorted the same way.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct CarrierParcelLimit {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    pub max_length_cm: f64,
    pub max_width_cm: f64,
    pub max_height_cm: f64,
    pub max_girth_cm: f64,
    pub max_weight_kg: f64,
}

const fn carrier(
    id: &'static str,
    name: &'static str,
    axes: [f64; 3],
    max_girth_cm: f64,
    max_weight_kg: f64,
) -> CarrierParcelLimit {
    CarrierParcelLimit {
        id,
        name,
        max_length_cm: axes[0],
        max_width_cm: axes[1],
        max_height_cm: axes[2],
        max_girth_cm,
        max_weight_kg,
    }
}

pub static CARRIER_LIMITS: [CarrierParcelLimit; 13] = [
    carrier("dhl_paket", "DHL Paket", [120.0, 60.0, 60.0], 300.0, 31.5),
    carrier("dhl_paeckchen", "DHL Päckchen", [60.0, 30.0, 15.0], 150.0, 2.0),
    carrier("dhl_express", "DHL Express", [120.0, 80.0, 80.0], 400.0, 70.0),
    carrier("dhl_sperrgut", "DHL Sperrgut", [200.0, 60.0, 60.0], 360.0, 31.5),
    carrier("dpd_classic", "DPD Classic", [175.0, 100.0, 100.0], 300.0, 31.5),
    carrier("gls", "GLS", [200.0, 80.0, 60.0], 300.0, 40.0),
    carrier("ups_standard", "UPS Standard", [274.0, 150.0, 150.0], 400.0, 70.0),
    carrier("fedex", "FedEx", [274.0, 150.0, 150.0], 330.0, 68.0),
    carrier("hermes", "Hermes", [120.0, 60.0, 60.0], 300.0, 25.0),
    carrier(
        "deutsche_post_maxibrief",
        "Deutsche Post Maxibrief",
        [35.3, 25.0, 5.0],
        95.3,
        1.0,
    ),
    carrier("post_at", "Österreichische Post", [100.0, 60.0, 60.0], 300.0, 31.5),
    carrier("swiss_post", "Swiss Post", [100.0, 60.0, 60.0], 300.0, 30.0),
    carrier("tnt", "TNT", [240.0, 150.0, 120.0], 600.0, 70.0),
];

/// Looks up a carrier by id.
pub fn find_carrier(id: &str) -> Option<&'static CarrierParcelLimit> {
    CARRIER_LIMITS.iter().find(|carrier| carrier.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eur_pallet_matches_standard() {
        assert_eq!(EUR_PALLET.length_cm, 120.0);
        assert_eq!(EUR_PALLET.width_cm, 80.0);
        assert_eq!(EUR_PALLET.max_stack_height_cm, 180.0);
        assert_eq!(EUR_PALLET.max_weight_g(), 1_500_000.0);
    }

    #[test]
    fn container_type_resolves_its_own_spec() {
        for container_type in ContainerType::ALL {
            assert_eq!(container_type.spec().container_type, container_type);
        }
    }

    #[test]
    fn container_type_serializes_to_code() {
        for container_type in ContainerType::ALL {
            let json = serde_json::to_string(&container_type).unwrap();
            assert_eq!(json, format!("\"{}\"", container_type.code()));
        }
        let parsed: ContainerType = serde_json::from_str("\"40ft_hc\"").unwrap();
        assert_eq!(parsed, ContainerType::Ft40Hc);
    }

    #[test]
    fn carton_catalog_volumes_match_dimensions() {
        assert_eq!(SHIPPING_CARTONS.len(), 9);
        for carton in &SHIPPING_CARTONS {
            assert!(
                (carton.volume_liters - carton.inner.volume_liters()).abs() < 1e-9,
                "volume mismatch for carton {}",
                carton.id
            );
        }
    }

    #[test]
    fn carrier_ids_are_unique() {
        assert_eq!(CARRIER_LIMITS.len(), 13);
        for (idx, carrier) in CARRIER_LIMITS.iter().enumerate() {
            assert!(
                CARRIER_LIMITS[idx + 1..].iter().all(|other| other.id != carrier.id),
                "duplicate carrier id {}",
                carrier.id
            );
        }
        assert_eq!(find_carrier("gls").map(|c| c.name), Some("GLS"));
        assert!(find_carrier("pigeon").is_none());
    }

    /// Compliance compares sorted package axes positionally, which is only
    /// meaningful while every carrier lists its axis limits longest first.
    #[test]
    fn carrier_axis_limits_are_entered_longest_first() {
        for carrier in &CARRIER_LIMITS {
            assert!(
                carrier.max_length_cm >= carrier.max_width_cm
                    && carrier.max_width_cm >= carrier.max_height_cm,
                "carrier {} does not list its limits longest first",
                carrier.id
            );
        }
    }
}
