//! Ranked category tallies.
//!
//! Ties on count are broken by name ascending so rankings are stable
//! regardless of hashing order.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analyzers::iter_records;
use crate::analyzers::types::{ModelSummary, RankedItem};
use crate::analyzers::utility::{chart_color, rounded_mean};
use crate::record::{VehicleRecord, VehicleType};

/// Sorts `(name, count)` pairs by count descending, then name ascending.
pub(crate) fn sort_ranked(entries: &mut [(&str, usize)]) {
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
}

fn tally<'a, I>(keys: I) -> HashMap<&'a str, usize>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn rank(counts: HashMap<&str, usize>, limit: usize) -> Vec<RankedItem> {
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    sort_ranked(&mut entries);

    entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (name, value))| RankedItem {
            name: name.to_string(),
            value,
            fill: chart_color(index),
        })
        .collect()
}

/// The `limit` makes with the most registrations.
pub fn top_manufacturers<R: Borrow<VehicleRecord>>(records: &[R], limit: usize) -> Vec<RankedItem> {
    rank(tally(iter_records(records).map(|r| r.make.as_str())), limit)
}

/// The `limit` states with the most registrations. Empty states are skipped.
pub fn geographic_distribution<R: Borrow<VehicleRecord>>(
    records: &[R],
    limit: usize,
) -> Vec<RankedItem> {
    let states = iter_records(records)
        .map(|r| r.state.as_str())
        .filter(|s| !s.is_empty());
    rank(tally(states), limit)
}

/// The `limit` cities with the most registrations. Empty cities are skipped.
pub fn top_cities<R: Borrow<VehicleRecord>>(records: &[R], limit: usize) -> Vec<RankedItem> {
    let cities = iter_records(records)
        .map(|r| r.city.as_str())
        .filter(|c| !c.is_empty());
    rank(tally(cities), limit)
}

#[derive(Default)]
struct ModelTally {
    count: usize,
    range_sum: i64,
    bev: usize,
    phev: usize,
}

impl ModelTally {
    /// Majority type of the group; an even split counts as BEV.
    fn vehicle_type(&self) -> VehicleType {
        if self.bev >= self.phev {
            VehicleType::BatteryElectric
        } else {
            VehicleType::PlugInHybrid
        }
    }
}

/// The `limit` make/model pairs with the most registrations.
///
/// The mean range covers every record of the pair, unreported (zero)
/// ranges included.
pub fn top_models<R: Borrow<VehicleRecord>>(records: &[R], limit: usize) -> Vec<ModelSummary> {
    let mut groups: HashMap<(&str, &str), ModelTally> = HashMap::new();

    for r in iter_records(records) {
        let group = groups
            .entry((r.make.as_str(), r.model.as_str()))
            .or_default();
        group.count += 1;
        group.range_sum += i64::from(r.electric_range);
        if r.is_bev() {
            group.bev += 1;
        } else {
            group.phev += 1;
        }
    }

    let mut entries: Vec<((&str, &str), ModelTally)> = groups.into_iter().collect();
    entries.sort_by(|(ka, a), (kb, b)| match b.count.cmp(&a.count) {
        Ordering::Equal => ka.cmp(kb),
        other => other,
    });

    entries
        .into_iter()
        .take(limit)
        .map(|((make, model), group)| ModelSummary {
            make: make.to_string(),
            model: model.to_string(),
            count: group.count,
            avg_range: rounded_mean(group.range_sum, group.count),
            vehicle_type: group.vehicle_type(),
        })
        .collect()
}
