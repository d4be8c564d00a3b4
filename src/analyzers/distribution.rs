use std::borrow::Borrow;

use crate::analyzers::iter_records;
use crate::analyzers::types::{RangeBucket, TypeShare};
use crate::analyzers::utility::pct;
use crate::record::{VehicleRecord, VehicleType};

pub const BEV_COLOR: &str = "#3b82f6";
pub const PHEV_COLOR: &str = "#8b5cf6";

/// Inclusive bounds of an electric range bucket, in miles.
#[derive(Debug, Clone, Copy)]
pub struct RangeBounds {
    pub min: i32,
    pub max: i32,
    pub label: &'static str,
}

impl RangeBounds {
    pub fn contains(&self, range: i32) -> bool {
        (self.min..=self.max).contains(&range)
    }
}

/// Fixed, ascending, non-overlapping range buckets. The last one is open ended.
pub const RANGE_BUCKETS: [RangeBounds; 8] = [
    RangeBounds {
        min: 0,
        max: 50,
        label: "0-50 mi",
    },
    RangeBounds {
        min: 51,
        max: 100,
        label: "51-100 mi",
    },
    RangeBounds {
        min: 101,
        max: 150,
        label: "101-150 mi",
    },
    RangeBounds {
        min: 151,
        max: 200,
        label: "151-200 mi",
    },
    RangeBounds {
        min: 201,
        max: 250,
        label: "201-250 mi",
    },
    RangeBounds {
        min: 251,
        max: 300,
        label: "251-300 mi",
    },
    RangeBounds {
        min: 301,
        max: 350,
        label: "301-350 mi",
    },
    RangeBounds {
        min: 351,
        max: i32::MAX,
        label: "350+ mi",
    },
];

/// BEV and PHEV counts. Both buckets are always present.
pub fn vehicle_type_distribution<R: Borrow<VehicleRecord>>(records: &[R]) -> [TypeShare; 2] {
    let bev = iter_records(records).filter(|r| r.is_bev()).count();
    let phev = records.len() - bev;

    [
        TypeShare {
            name: VehicleType::BatteryElectric.label(),
            vehicle_type: VehicleType::BatteryElectric,
            value: bev,
            fill: BEV_COLOR,
        },
        TypeShare {
            name: VehicleType::PlugInHybrid.label(),
            vehicle_type: VehicleType::PlugInHybrid,
            value: phev,
            fill: PHEV_COLOR,
        },
    ]
}

/// Counts per [`RANGE_BUCKETS`] entry.
///
/// Unreported (zero) ranges are counted in the first bucket but left out of
/// the percentage base, which is the number of records with a positive range.
/// Bucket percentages therefore only sum to 100 when every range is reported.
pub fn range_distribution<R: Borrow<VehicleRecord>>(records: &[R]) -> Vec<RangeBucket> {
    let mut counts = [0usize; RANGE_BUCKETS.len()];
    let mut reported = 0;

    for r in iter_records(records) {
        if r.has_range() {
            reported += 1;
        }
        if let Some(idx) = RANGE_BUCKETS.iter().position(|b| b.contains(r.electric_range)) {
            counts[idx] += 1;
        }
    }

    RANGE_BUCKETS
        .iter()
        .zip(counts)
        .map(|(bounds, count)| RangeBucket {
            label: bounds.label,
            count,
            percentage: pct(count, reported),
        })
        .collect()
}
