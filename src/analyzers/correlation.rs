use std::borrow::Borrow;
use std::collections::HashMap;

use crate::analyzers::iter_records;
use crate::analyzers::types::CorrelationPoint;
use crate::analyzers::utility::rounded_mean;
use crate::record::VehicleRecord;

/// Groups with fewer reported ranges than this are too small to plot.
pub const MIN_CORRELATION_GROUP: usize = 5;

/// Mean reported range per (model year, make).
///
/// Only records with a positive range contribute, and groups below
/// [`MIN_CORRELATION_GROUP`] are dropped. Output is ordered by year, then make.
pub fn year_range_correlation<R: Borrow<VehicleRecord>>(records: &[R]) -> Vec<CorrelationPoint> {
    let mut groups: HashMap<(i32, &str), (i64, usize)> = HashMap::new();

    for r in iter_records(records).filter(|r| r.has_range()) {
        let (sum, count) = groups.entry((r.model_year, r.make.as_str())).or_default();
        *sum += i64::from(r.electric_range);
        *count += 1;
    }

    let mut points: Vec<CorrelationPoint> = groups
        .into_iter()
        .filter(|(_, (_, count))| *count >= MIN_CORRELATION_GROUP)
        .map(|((model_year, make), (sum, count))| CorrelationPoint {
            model_year,
            electric_range: rounded_mean(sum, count),
            make: make.to_string(),
            count,
        })
        .collect();
    points.sort_by(|a, b| (a.model_year, &a.make).cmp(&(b.model_year, &b.make)));

    points
}
