use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::analyzers::iter_records;
use crate::analyzers::ranking::sort_ranked;
use crate::analyzers::types::{KpiSummary, TopManufacturer};
use crate::analyzers::utility::{pct, rounded_mean};
use crate::record::VehicleRecord;

/// Headline figures for `filtered`, with `all` as the reference population.
///
/// Every figure is defined for an empty input: counts and percentages are
/// zero and there is no top manufacturer.
pub fn calculate_kpis<F, A>(filtered: &[F], all: &[A]) -> KpiSummary
where
    F: Borrow<VehicleRecord>,
    A: Borrow<VehicleRecord>,
{
    let total = filtered.len();

    let mut bev = 0;
    let mut range_sum = 0i64;
    let mut reported = 0;
    let mut makes: HashMap<&str, usize> = HashMap::new();
    let mut models: HashSet<(&str, &str)> = HashSet::new();
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();

    for r in iter_records(filtered) {
        if r.is_bev() {
            bev += 1;
        }
        if r.has_range() {
            range_sum += i64::from(r.electric_range);
            reported += 1;
        }
        *makes.entry(r.make.as_str()).or_insert(0) += 1;
        models.insert((r.make.as_str(), r.model.as_str()));
        *years.entry(r.model_year).or_insert(0) += 1;
    }

    let unique_makes = makes.len();
    let mut ranked: Vec<(&str, usize)> = makes.into_iter().collect();
    sort_ranked(&mut ranked);
    let top_manufacturer = ranked.first().map(|&(name, count)| TopManufacturer {
        name: name.to_string(),
        count,
        share: pct(count, total),
    });

    KpiSummary {
        total_vehicles: total,
        bev_percentage: pct(bev, total),
        avg_range: rounded_mean(range_sum, reported),
        top_manufacturer,
        yoy_change: year_over_year(&years),
        unique_makes,
        unique_models: models.len(),
        share_of_total: pct(total, all.len()),
    }
}

/// Percentage change from the second latest to the latest model year.
fn year_over_year(years: &BTreeMap<i32, usize>) -> f64 {
    let mut latest = years.values().rev();
    match (latest.next(), latest.next()) {
        (Some(&current), Some(&prior)) if prior > 0 => {
            (current as f64 - prior as f64) / prior as f64 * 100.0
        }
        _ => 0.0,
    }
}
