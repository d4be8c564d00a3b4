//! Declarative filter over a record collection.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::options::FilterOptions;
use crate::record::{VehicleRecord, VehicleType};

/// The four independent predicates applied before aggregation.
///
/// An empty set means "no restriction" for that predicate, not "allow none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Inclusive `[min, max]` model year bounds.
    pub year_range: (i32, i32),
    pub manufacturers: BTreeSet<String>,
    pub vehicle_types: BTreeSet<VehicleType>,
    pub states: BTreeSet<String>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            year_range: (i32::MIN, i32::MAX),
            manufacturers: BTreeSet::new(),
            vehicle_types: BTreeSet::new(),
            states: BTreeSet::new(),
        }
    }
}

impl FilterSpec {
    /// The reset state for a dataset: its full year span, every make and
    /// state, and both vehicle types selected.
    pub fn from_options(options: &FilterOptions) -> Self {
        Self {
            year_range: options.year_range,
            vehicle_types: [VehicleType::BatteryElectric, VehicleType::PlugInHybrid]
                .into_iter()
                .collect(),
            ..Self::default()
        }
    }

    /// Loads a spec from a JSON file. Missing keys fall back to [`Default`].
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading filter file '{path}'"))?;
        serde_json::from_str(&content).with_context(|| format!("parsing filter file '{path}'"))
    }

    /// Whether a single record satisfies all four predicates.
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        let (min_year, max_year) = self.year_range;

        (min_year..=max_year).contains(&record.model_year)
            && allows(&self.manufacturers, &record.make)
            && allows(&self.vehicle_types, &record.vehicle_type)
            && allows(&self.states, &record.state)
    }
}

fn allows<T: Ord>(selected: &BTreeSet<T>, value: &T) -> bool {
    selected.is_empty() || selected.contains(value)
}

/// Returns the records passing `spec`, in their original order.
pub fn filter_records<'a>(
    records: &'a [VehicleRecord],
    spec: &FilterSpec,
) -> Vec<&'a VehicleRecord> {
    let kept: Vec<&VehicleRecord> = records.iter().filter(|r| spec.matches(r)).collect();
    debug!(input = records.len(), kept = kept.len(), "Applied filter");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VehicleType::{BatteryElectric, PlugInHybrid};
    use crate::record::tests::vehicle;

    fn sample() -> Vec<VehicleRecord> {
        let mut oregon = vehicle("Nissan", 2015, BatteryElectric, 84);
        oregon.state = "OR".to_string();
        vec![
            vehicle("Tesla", 2022, BatteryElectric, 300),
            vehicle("Toyota", 2019, PlugInHybrid, 25),
            oregon,
            vehicle("Tesla", 2012, BatteryElectric, 0),
        ]
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_spec_passes_everything() {
        let records = sample();
        let kept = filter_records(&records, &FilterSpec::default());
        assert_eq!(kept.len(), records.len());
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let records = sample();
        let spec = FilterSpec {
            year_range: (2015, 2019),
            ..FilterSpec::default()
        };
        let years: Vec<i32> = filter_records(&records, &spec)
            .iter()
            .map(|r| r.model_year)
            .collect();
        assert_eq!(years, vec![2019, 2015]);
    }

    #[test]
    fn test_categorical_predicates_combine_with_and() {
        let records = sample();
        let spec = FilterSpec {
            manufacturers: set(&["Tesla", "Nissan"]),
            vehicle_types: [BatteryElectric].into_iter().collect(),
            states: set(&["WA"]),
            ..FilterSpec::default()
        };
        let kept = filter_records(&records, &spec);

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.make == "Tesla"));
    }

    #[test]
    fn test_filter_keeps_expected_records_in_order() {
        let records = sample();
        let spec = FilterSpec {
            year_range: (2013, 2030),
            vehicle_types: [PlugInHybrid, BatteryElectric].into_iter().collect(),
            states: set(&["OR", "WA"]),
            ..FilterSpec::default()
        };
        let vins: Vec<&str> = filter_records(&records, &spec)
            .iter()
            .map(|r| r.vin.as_str())
            .collect();

        // the 2012 Tesla is the only record outside the year bounds
        assert_eq!(
            vins,
            vec!["VIN-Tesla-2022", "VIN-Toyota-2019", "VIN-Nissan-2015"]
        );
    }

    #[test]
    fn test_unknown_state_excludes_all() {
        let records = sample();
        let spec = FilterSpec {
            states: set(&["CA"]),
            ..FilterSpec::default()
        };
        assert!(filter_records(&records, &spec).is_empty());
    }

    #[test]
    fn test_from_options_selects_both_types() {
        let options = FilterOptions {
            year_range: (2011, 2024),
            manufacturers: vec!["Tesla".to_string()],
            states: vec!["WA".to_string()],
        };
        let spec = FilterSpec::from_options(&options);

        assert_eq!(spec.year_range, (2011, 2024));
        assert_eq!(spec.vehicle_types.len(), 2);
        assert!(spec.manufacturers.is_empty());
        assert!(spec.states.is_empty());
    }

    #[test]
    fn test_spec_deserializes_with_defaults() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"yearRange": [2018, 2020], "vehicleTypes": ["PHEV"]}"#)
                .unwrap();

        assert_eq!(spec.year_range, (2018, 2020));
        assert!(spec.vehicle_types.contains(&PlugInHybrid));
        assert!(spec.manufacturers.is_empty());
    }
}
