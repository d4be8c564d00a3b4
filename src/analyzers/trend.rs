use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::analyzers::iter_records;
use crate::analyzers::types::YearTrend;
use crate::record::VehicleRecord;

/// Registrations per model year, split by vehicle type, oldest year first.
///
/// Only years present in the input appear; gaps are not filled.
pub fn adoption_trend<R: Borrow<VehicleRecord>>(records: &[R]) -> Vec<YearTrend> {
    let mut years: BTreeMap<i32, YearTrend> = BTreeMap::new();

    for r in iter_records(records) {
        let entry = years.entry(r.model_year).or_insert(YearTrend {
            year: r.model_year,
            count: 0,
            bev: 0,
            phev: 0,
        });
        entry.count += 1;
        if r.is_bev() {
            entry.bev += 1;
        } else {
            entry.phev += 1;
        }
    }

    years.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VehicleType::{BatteryElectric, PlugInHybrid};
    use crate::record::tests::vehicle;

    #[test]
    fn test_trend_sorted_without_gap_filling() {
        let records = vec![
            vehicle("Tesla", 2022, BatteryElectric, 300),
            vehicle("Toyota", 2018, PlugInHybrid, 25),
            vehicle("Nissan", 2022, BatteryElectric, 150),
            vehicle("Ford", 2022, PlugInHybrid, 20),
        ];

        let trend = adoption_trend(&records);

        assert_eq!(
            trend,
            vec![
                YearTrend {
                    year: 2018,
                    count: 1,
                    bev: 0,
                    phev: 1,
                },
                YearTrend {
                    year: 2022,
                    count: 3,
                    bev: 2,
                    phev: 1,
                },
            ]
        );
    }

    #[test]
    fn test_trend_accepts_borrowed_records() {
        let records = vec![vehicle("Kia", 2020, BatteryElectric, 239)];
        let refs: Vec<&VehicleRecord> = records.iter().collect();

        assert_eq!(adoption_trend(&refs).len(), 1);
        assert!(adoption_trend::<VehicleRecord>(&[]).is_empty());
    }
}
