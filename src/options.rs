//! Selectable filter values derived from the full record collection.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::record::VehicleRecord;

/// The universe of values a [`crate::filter::FilterSpec`] can select from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Inclusive `[min, max]` model year; `(0, 0)` for an empty dataset.
    pub year_range: (i32, i32),
    /// Sorted distinct makes.
    pub manufacturers: Vec<String>,
    /// Sorted distinct non-empty states.
    pub states: Vec<String>,
}

/// Computes filter options over all records.
pub fn filter_options(records: &[VehicleRecord]) -> FilterOptions {
    let years = records.iter().map(|r| r.model_year);
    let year_range = match (years.clone().min(), years.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => (0, 0),
    };

    let manufacturers: BTreeSet<&str> = records.iter().map(|r| r.make.as_str()).collect();
    let states: BTreeSet<&str> = records
        .iter()
        .map(|r| r.state.as_str())
        .filter(|s| !s.is_empty())
        .collect();

    FilterOptions {
        year_range,
        manufacturers: manufacturers.into_iter().map(str::to_string).collect(),
        states: states.into_iter().map(str::to_string).collect(),
    }
}
