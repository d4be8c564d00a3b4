//! The vehicle registration record and its vehicle-type classification.

use serde::{Deserialize, Serialize};

/// Drivetrain category of a registered vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "BEV", alias = "bev")]
    BatteryElectric,
    #[serde(rename = "PHEV", alias = "phev")]
    PlugInHybrid,
}

impl VehicleType {
    /// Human readable label for the type distribution view.
    pub fn label(self) -> &'static str {
        match self {
            VehicleType::BatteryElectric => "Battery Electric (BEV)",
            VehicleType::PlugInHybrid => "Plug-in Hybrid (PHEV)",
        }
    }
}

/// Maps the free-text "Electric Vehicle Type" column to a [`VehicleType`].
///
/// Anything mentioning "Battery" is a BEV; everything else, including an
/// empty or unexpected value, is treated as a PHEV.
pub fn classify(raw: &str) -> VehicleType {
    if raw.contains("Battery") {
        VehicleType::BatteryElectric
    } else {
        VehicleType::PlugInHybrid
    }
}

/// One row of the registration dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub vin: String,
    pub county: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub model_year: i32,
    pub make: String,
    pub model: String,
    pub vehicle_type: VehicleType,
    pub cafv_eligibility: String,
    /// Miles; 0 means not reported.
    pub electric_range: i32,
    #[serde(rename = "baseMSRP")]
    pub base_msrp: i64,
    pub legislative_district: i32,
    pub electric_utility: String,
}

impl VehicleRecord {
    /// A record is kept only with a positive model year and a make.
    pub fn is_valid(&self) -> bool {
        self.model_year > 0 && !self.make.is_empty()
    }

    pub fn is_bev(&self) -> bool {
        self.vehicle_type == VehicleType::BatteryElectric
    }

    /// Whether the electric range was reported.
    pub fn has_range(&self) -> bool {
        self.electric_range > 0
    }
}
