//! Every derived view for one filter specification, computed in one pass
//! of calls and stamped for the presentation layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::analyzers::types::{
    CorrelationPoint, KpiSummary, ModelSummary, RangeBucket, RankedItem, TypeShare, YearTrend,
};
use crate::analyzers::{
    adoption_trend, calculate_kpis, geographic_distribution, range_distribution, top_cities,
    top_manufacturers, top_models, vehicle_type_distribution, year_range_correlation,
};
use crate::filter::{FilterSpec, filter_records};
use crate::record::VehicleRecord;

/// Entry counts for the ranked views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewLimits {
    pub manufacturers: usize,
    pub states: usize,
    pub cities: usize,
    pub models: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            manufacturers: 8,
            states: 8,
            cities: 8,
            models: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub filters: FilterSpec,
    /// No record passed the filters; every view below is empty or zero.
    pub is_empty: bool,
    pub kpis: KpiSummary,
    pub adoption_trend: Vec<YearTrend>,
    pub top_manufacturers: Vec<RankedItem>,
    pub vehicle_types: [TypeShare; 2],
    pub range_distribution: Vec<RangeBucket>,
    pub geographic_distribution: Vec<RankedItem>,
    pub top_cities: Vec<RankedItem>,
    pub range_correlation: Vec<CorrelationPoint>,
    pub top_models: Vec<ModelSummary>,
}

impl DashboardSnapshot {
    /// Filters `all` with `spec` and computes every view with default limits.
    pub fn compute(all: &[VehicleRecord], spec: &FilterSpec) -> Self {
        Self::compute_with_limits(all, spec, ViewLimits::default())
    }

    pub fn compute_with_limits(
        all: &[VehicleRecord],
        spec: &FilterSpec,
        limits: ViewLimits,
    ) -> Self {
        let filtered = filter_records(all, spec);
        debug!(total = all.len(), filtered = filtered.len(), "Computing dashboard views");

        Self {
            generated_at: Utc::now(),
            filters: spec.clone(),
            is_empty: filtered.is_empty(),
            kpis: calculate_kpis(&filtered, all),
            adoption_trend: adoption_trend(&filtered),
            top_manufacturers: top_manufacturers(&filtered, limits.manufacturers),
            vehicle_types: vehicle_type_distribution(&filtered),
            range_distribution: range_distribution(&filtered),
            geographic_distribution: geographic_distribution(&filtered, limits.states),
            top_cities: top_cities(&filtered, limits.cities),
            range_correlation: year_range_correlation(&filtered),
            top_models: top_models(&filtered, limits.models),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VehicleType::{BatteryElectric, PlugInHybrid};
    use crate::record::tests::vehicle;

    #[test]
    fn test_snapshot_respects_filters() {
        let records = vec![
            vehicle("Tesla", 2022, BatteryElectric, 300),
            vehicle("Toyota", 2019, PlugInHybrid, 25),
            vehicle("Tesla", 2023, BatteryElectric, 330),
        ];
        let spec = FilterSpec {
            vehicle_types: [BatteryElectric].into_iter().collect(),
            ..FilterSpec::default()
        };

        let snapshot = DashboardSnapshot::compute(&records, &spec);

        assert!(!snapshot.is_empty);
        assert_eq!(snapshot.kpis.total_vehicles, 2);
        assert_eq!(snapshot.adoption_trend.len(), 2);
        assert_eq!(snapshot.top_manufacturers[0].name, "Tesla");
        assert_eq!(snapshot.vehicle_types[1].value, 0);
        assert_eq!(snapshot.top_models.len(), 1);
    }

    #[test]
    fn test_snapshot_empty_selection() {
        let records = vec![vehicle("Tesla", 2022, BatteryElectric, 300)];
        let spec = FilterSpec {
            year_range: (2000, 2001),
            ..FilterSpec::default()
        };

        let snapshot = DashboardSnapshot::compute(&records, &spec);

        assert!(snapshot.is_empty);
        assert_eq!(snapshot.kpis.total_vehicles, 0);
        assert!(snapshot.top_manufacturers.is_empty());
        assert_eq!(snapshot.range_distribution.len(), 8);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let records = vec![vehicle("Tesla", 2022, BatteryElectric, 300)];
        let snapshot = DashboardSnapshot::compute(&records, &FilterSpec::default());

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["kpis"]["totalVehicles"], 1);
        assert_eq!(json["topModels"][0]["type"], "BEV");
        assert_eq!(json["rangeDistribution"][5]["range"], "251-300 mi");
        assert!(json["generatedAt"].is_string());
    }
}
