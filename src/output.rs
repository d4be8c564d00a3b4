//! Output formatting and persistence for derived views.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::KpiSummary;

/// Logs any view using Rust's debug pretty-print format.
pub fn print_pretty(view: &impl std::fmt::Debug) {
    debug!("{:#?}", view);
}

/// Logs the KPI summary as structured fields.
pub fn log_kpis(kpis: &KpiSummary) {
    let (top_name, top_share) = kpis
        .top_manufacturer
        .as_ref()
        .map(|t| (t.name.as_str(), t.share))
        .unwrap_or(("-", 0.0));

    info!(
        total = kpis.total_vehicles,
        bev_pct = kpis.bev_percentage,
        avg_range_mi = kpis.avg_range,
        top_manufacturer = top_name,
        top_share_pct = top_share,
        yoy_pct = kpis.yoy_change,
        makes = kpis.unique_makes,
        models = kpis.unique_models,
        "KPI summary"
    );
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes `value` as pretty JSON to `path`, replacing any existing file.
pub fn write_json_file(path: &str, value: &impl Serialize) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating '{path}'"))?;
    write_json(file, value)?;
    debug!(path, "Wrote JSON output");
    Ok(())
}

/// Writes rows as CSV with a header line.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes rows as CSV to `path`, replacing any existing file.
pub fn write_csv_file<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating '{path}'"))?;
    write_csv(file, rows)?;
    debug!(path, rows = rows.len(), "Wrote CSV output");
    Ok(())
}
