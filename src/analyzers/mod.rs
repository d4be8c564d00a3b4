//! Aggregation library.
//!
//! Every function here is a pure reduction of a record slice into one
//! derived view. They accept owned records (`&[VehicleRecord]`) as well as
//! the borrowed subsets returned by [`crate::filter::filter_records`].

pub mod correlation;
pub mod distribution;
pub mod kpi;
pub mod ranking;
pub mod trend;
pub mod types;
pub mod utility;

use std::borrow::Borrow;

use crate::record::VehicleRecord;

pub use correlation::{MIN_CORRELATION_GROUP, year_range_correlation};
pub use distribution::{RANGE_BUCKETS, range_distribution, vehicle_type_distribution};
pub use kpi::calculate_kpis;
pub use ranking::{geographic_distribution, top_cities, top_manufacturers, top_models};
pub use trend::adoption_trend;

pub(crate) fn iter_records<R: Borrow<VehicleRecord>>(
    records: &[R],
) -> impl Iterator<Item = &VehicleRecord> {
    records.iter().map(|r| <R as Borrow<VehicleRecord>>::borrow(r))
}
