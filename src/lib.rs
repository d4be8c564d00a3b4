pub mod analyzers;
pub mod dashboard;
pub mod fetch;
pub mod filter;
pub mod options;
pub mod output;
pub mod parser;
pub mod record;

pub use dashboard::DashboardSnapshot;
pub use filter::{FilterSpec, filter_records};
pub use options::{FilterOptions, filter_options};
pub use parser::{ParseReport, parse, parse_with_report};
pub use record::{VehicleRecord, VehicleType, classify};
