//! CLI entry point for EV Insights.
//!
//! Loads a registration dataset from a file or URL, applies a filter, and
//! emits derived views as log summaries, JSON, or CSV.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ev_insights::analyzers::{
    adoption_trend, calculate_kpis, geographic_distribution, range_distribution, top_cities,
    top_manufacturers, top_models, vehicle_type_distribution, year_range_correlation,
};
use ev_insights::dashboard::{DashboardSnapshot, ViewLimits};
use ev_insights::fetch::source_for;
use ev_insights::output::{
    log_kpis, print_pretty, write_csv, write_csv_file, write_json, write_json_file,
};
use ev_insights::{
    FilterOptions, FilterSpec, VehicleRecord, VehicleType, filter_options, filter_records,
    parse_with_report,
};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Environment variable holding an optional open-data portal app token.
const APP_TOKEN_ENV: &str = "EV_DATA_APP_TOKEN";

#[derive(Parser)]
#[command(name = "ev_insights")]
#[command(
    about = "Trends, rankings and distributions over EV registration data",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log the KPI summary for the filtered dataset
    Summary {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print the selectable filter values as JSON
    Options {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Write every derived view as one JSON document
    Dashboard {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file to write (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Export a single view as CSV
    Export {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// View to export
        #[arg(value_enum)]
        view: ExportView,

        /// CSV file to write (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Maximum entries for ranked views
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportView {
    Trend,
    Manufacturers,
    Types,
    Ranges,
    States,
    Cities,
    Correlation,
    Models,
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Bev,
    Phev,
}

impl From<TypeArg> for VehicleType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Bev => VehicleType::BatteryElectric,
            TypeArg::Phev => VehicleType::PlugInHybrid,
        }
    }
}

#[derive(Args)]
struct FilterArgs {
    /// JSON filter file; flags below override its fields
    #[arg(long, value_name = "FILE")]
    filters: Option<String>,

    /// Earliest model year to include
    #[arg(long)]
    min_year: Option<i32>,

    /// Latest model year to include
    #[arg(long)]
    max_year: Option<i32>,

    /// Restrict to these makes (repeatable)
    #[arg(long = "make")]
    makes: Vec<String>,

    /// Restrict to these vehicle types (repeatable)
    #[arg(long = "vehicle-type", value_enum)]
    vehicle_types: Vec<TypeArg>,

    /// Restrict to these states (repeatable)
    #[arg(long = "state")]
    states: Vec<String>,
}

impl FilterArgs {
    /// Builds the filter: the dataset's reset state, then the filter file,
    /// then individual flags.
    fn resolve(&self, options: &FilterOptions) -> Result<FilterSpec> {
        let mut spec = match &self.filters {
            Some(path) => FilterSpec::load(path)?,
            None => FilterSpec::from_options(options),
        };

        if let Some(min) = self.min_year {
            spec.year_range.0 = min;
        }
        if let Some(max) = self.max_year {
            spec.year_range.1 = max;
        }
        if !self.makes.is_empty() {
            spec.manufacturers = self.makes.iter().cloned().collect();
        }
        if !self.vehicle_types.is_empty() {
            spec.vehicle_types = self.vehicle_types.iter().map(|&t| t.into()).collect();
        }
        if !self.states.is_empty() {
            spec.states = self.states.iter().cloned().collect();
        }

        if spec.year_range.0 > spec.year_range.1 {
            warn!(
                min = spec.year_range.0,
                max = spec.year_range.1,
                "Year range is inverted, no records will match"
            );
        }

        Ok(spec)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ev_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ev_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { source, filters } => {
            let records = load_source(&source).await?;
            let spec = filters.resolve(&filter_options(&records))?;
            let filtered = filter_records(&records, &spec);

            let kpis = calculate_kpis(&filtered, &records);
            print_pretty(&spec);
            log_kpis(&kpis);
        }
        Commands::Options { source } => {
            let records = load_source(&source).await?;
            let options = filter_options(&records);
            info!(
                min_year = options.year_range.0,
                max_year = options.year_range.1,
                makes = options.manufacturers.len(),
                states = options.states.len(),
                "Filter options"
            );
            write_json(std::io::stdout().lock(), &options)?;
        }
        Commands::Dashboard {
            source,
            output,
            filters,
        } => {
            let records = load_source(&source).await?;
            let spec = filters.resolve(&filter_options(&records))?;
            let snapshot =
                DashboardSnapshot::compute_with_limits(&records, &spec, ViewLimits::default());

            if snapshot.is_empty {
                warn!("No vehicles match the current filters");
            }
            log_kpis(&snapshot.kpis);

            match output {
                Some(path) => {
                    write_json_file(&path, &snapshot)?;
                    info!(path = %path, "Dashboard written");
                }
                None => write_json(std::io::stdout().lock(), &snapshot)?,
            }
        }
        Commands::Export {
            source,
            view,
            output,
            limit,
            filters,
        } => {
            let records = load_source(&source).await?;
            let spec = filters.resolve(&filter_options(&records))?;
            let filtered = filter_records(&records, &spec);
            let out = output.as_deref();

            match view {
                ExportView::Trend => emit_csv(out, &adoption_trend(&filtered))?,
                ExportView::Manufacturers => emit_csv(out, &top_manufacturers(&filtered, limit))?,
                ExportView::Types => emit_csv(out, &vehicle_type_distribution(&filtered))?,
                ExportView::Ranges => emit_csv(out, &range_distribution(&filtered))?,
                ExportView::States => emit_csv(out, &geographic_distribution(&filtered, limit))?,
                ExportView::Cities => emit_csv(out, &top_cities(&filtered, limit))?,
                ExportView::Correlation => emit_csv(out, &year_range_correlation(&filtered))?,
                ExportView::Models => emit_csv(out, &top_models(&filtered, limit))?,
            }
        }
    }

    Ok(())
}

/// Loads and parses the dataset from a local file path or over HTTP.
#[tracing::instrument]
async fn load_source(location: &str) -> Result<Vec<VehicleRecord>> {
    let token = std::env::var(APP_TOKEN_ENV).ok();
    let source = source_for(location, token.as_deref())?;

    let started = std::time::Instant::now();
    let text = source.load().await?;
    let elapsed = started.elapsed();
    if elapsed.as_secs() > 15 {
        warn!(elapsed_secs = elapsed.as_secs(), "Dataset load was slow");
    }
    info!(source = %source.describe(), bytes = text.len(), "Dataset loaded");

    let report = parse_with_report(&text);
    if report.dropped > 0 {
        warn!(dropped = report.dropped, "Skipped rows without a model year or make");
    }

    Ok(report.records)
}

/// Writes rows to `path`, or to stdout when no path is given.
fn emit_csv<T: Serialize>(path: Option<&str>, rows: &[T]) -> Result<()> {
    match path {
        Some(path) => {
            write_csv_file(path, rows)?;
            info!(path, rows = rows.len(), "View exported");
            Ok(())
        }
        None => write_csv(std::io::stdout().lock(), rows),
    }
}
