//! Derived view shapes produced by the aggregation library.
//!
//! Keys serialize in camelCase, the field names the chart layer reads.

use serde::Serialize;

use crate::record::VehicleType;

/// Registrations for one model year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTrend {
    pub year: i32,
    pub count: usize,
    pub bev: usize,
    pub phev: usize,
}

/// One entry of a ranked category tally (makes, states, cities).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    pub name: String,
    pub value: usize,
    pub fill: &'static str,
}

/// One of the two vehicle type buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeShare {
    pub name: &'static str,
    pub vehicle_type: VehicleType,
    pub value: usize,
    pub fill: &'static str,
}

/// One electric range bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBucket {
    #[serde(rename = "range")]
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// Mean electric range of one make in one model year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPoint {
    pub model_year: i32,
    /// Rounded mean of the reported ranges.
    pub electric_range: i64,
    pub make: String,
    pub count: usize,
}

/// Registrations and mean range of one make/model pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub make: String,
    pub model: String,
    pub count: usize,
    pub avg_range: i64,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopManufacturer {
    pub name: String,
    pub count: usize,
    /// Percentage of the filtered set.
    pub share: f64,
}

/// Headline figures for the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_vehicles: usize,
    pub bev_percentage: f64,
    pub avg_range: i64,
    pub top_manufacturer: Option<TopManufacturer>,
    /// Percentage change between the two latest model years present.
    pub yoy_change: f64,
    pub unique_makes: usize,
    pub unique_models: usize,
    /// Filtered count as a percentage of the whole dataset.
    pub share_of_total: f64,
}
