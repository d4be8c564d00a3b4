//! Delimited-text parser for the EV registration dataset.
//!
//! The input is comma separated with an unvalidated header row. Fields may
//! be wrapped in double quotes to carry embedded commas. Each physical line
//! is one record attempt: a quote left open at the end of a line simply
//! ends the field, it never continues onto the next line.

use std::str::FromStr;

use tracing::{debug, info};

use crate::record::{VehicleRecord, classify};

pub const DELIMITER: char = ',';
pub const QUOTE: char = '"';

/// Number of positional columns in a registration row.
pub const COLUMN_COUNT: usize = 14;

/// Outcome of a parse, including rows that were skipped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseReport {
    pub records: Vec<VehicleRecord>,
    /// Rows dropped for a non-positive model year or an empty make.
    pub dropped: usize,
    /// Whitespace-only lines after the header.
    pub blank_lines: usize,
}

/// Parses raw dataset text into vehicle records.
///
/// Invalid rows are dropped silently; use [`parse_with_report`] to see how
/// many. Empty or header-only input yields an empty vector.
pub fn parse(text: &str) -> Vec<VehicleRecord> {
    parse_with_report(text).records
}

/// Same as [`parse`], but also reports dropped and blank lines.
pub fn parse_with_report(text: &str) -> ParseReport {
    let mut report = ParseReport::default();

    // First line is the header and is never interpreted.
    for (idx, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            report.blank_lines += 1;
            continue;
        }

        let record = record_from_fields(&split_line(line));
        if record.is_valid() {
            report.records.push(record);
        } else {
            report.dropped += 1;
            debug!(
                line = idx + 1,
                model_year = record.model_year,
                make = %record.make,
                "Dropping invalid row"
            );
        }
    }

    info!(
        records = report.records.len(),
        dropped = report.dropped,
        blank = report.blank_lines,
        "Parsed vehicle records"
    );

    report
}

/// Splits one line into trimmed fields.
///
/// Every `"` toggles the quoted state and is removed from the output; a
/// comma separates fields only outside quotes. Doubled quotes are not
/// unescaped, so `"say ""hi"""` becomes `say hi`.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(COLUMN_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

fn record_from_fields(fields: &[String]) -> VehicleRecord {
    let text = |i: usize| fields.get(i).cloned().unwrap_or_default();
    let number = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

    VehicleRecord {
        vin: text(0),
        county: text(1),
        city: text(2),
        state: text(3),
        postal_code: text(4),
        model_year: leading_int(number(5)),
        make: text(6),
        model: text(7),
        vehicle_type: classify(number(8)),
        cafv_eligibility: text(9),
        electric_range: leading_int(number(10)),
        base_msrp: leading_int(number(11)),
        legislative_district: leading_int(number(12)),
        electric_utility: text(13),
    }
}

/// Reads the leading integer of a field, ignoring anything after it.
///
/// `"2022"` and `"2022.0"` both give 2022; text with no leading digits
/// (or a value that does not fit) gives zero.
pub fn leading_int<T: FromStr + Default>(raw: &str) -> T {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return T::default();
    }

    s[..end].parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VehicleType;

    const HEADER: &str = "VIN (1-10),County,City,State,Postal Code,Model Year,Make,Model,Electric Vehicle Type,Clean Alternative Fuel Vehicle (CAFV) Eligibility,Electric Range,Base MSRP,Legislative District,DOL Vehicle ID";

    #[test]
    fn test_quoted_field_keeps_comma() {
        let text = format!(
            "{HEADER}\nVIN1,King,\"Seattle, Area\",WA,98101,2022,Tesla,Model 3,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible,250,40000,43,City Light\n"
        );
        let records = parse(&text);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.city, "Seattle, Area");
        assert_eq!(r.state, "WA");
        assert_eq!(r.model_year, 2022);
        assert_eq!(r.make, "Tesla");
        assert_eq!(r.vehicle_type, VehicleType::BatteryElectric);
        assert_eq!(r.electric_range, 250);
        assert_eq!(r.base_msrp, 40000);
        assert_eq!(r.legislative_district, 43);
        assert_eq!(r.electric_utility, "City Light");
    }

    #[test]
    fn test_invalid_rows_and_blank_lines_are_excluded() {
        let text = format!(
            "{HEADER}\n\
             A,King,Seattle,WA,98101,2020,Nissan,Leaf,Battery Electric Vehicle (BEV),x,150,0,43,PSE\n\
             B,King,Seattle,WA,98101,0,Nissan,Leaf,Battery Electric Vehicle (BEV),x,150,0,43,PSE\n\
             \n\
             C,King,Seattle,WA,98101,2021,,Leaf,Battery Electric Vehicle (BEV),x,150,0,43,PSE\n\
             D,King,Seattle,WA,98101,2019,Chevrolet,Volt,Plug-in Hybrid Electric Vehicle (PHEV),x,53,0,43,PSE\n"
        );
        let report = parse_with_report(&text);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.dropped, 2);
        assert_eq!(report.blank_lines, 1);
        assert_eq!(report.records[0].vin, "A");
        assert_eq!(report.records[1].vin, "D");
        assert_eq!(report.records[1].vehicle_type, VehicleType::PlugInHybrid);
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(parse("").is_empty());
        assert!(parse(HEADER).is_empty());
        assert!(parse(&format!("{HEADER}\n\n  \n")).is_empty());
    }

    #[test]
    fn test_missing_trailing_columns_default() {
        let records = parse("h\nVIN9,Pierce,Tacoma,WA,98402,2018,BMW\n");

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.model, "");
        assert_eq!(r.vehicle_type, VehicleType::PlugInHybrid);
        assert_eq!(r.electric_range, 0);
        assert_eq!(r.electric_utility, "");
    }

    #[test]
    fn test_non_numeric_values_coerce_to_zero() {
        let records = parse("h\nV,c,c,WA,1,2020,Kia,Niro,Battery,x,n/a,unknown,,u\n");

        assert_eq!(records[0].electric_range, 0);
        assert_eq!(records[0].base_msrp, 0);
        assert_eq!(records[0].legislative_district, 0);
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = parse("h\r\nV,c,Yakima,WA,1,2023,Ford,F-150,Battery,x,320,0,1,u\r\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].electric_utility, "u");
    }

    #[test]
    fn test_split_line_quotes_are_stripped_not_unescaped() {
        assert_eq!(split_line("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
        assert_eq!(split_line("\"say \"\"hi\"\"\""), vec!["say hi"]);
        assert_eq!(split_line(" x , y "), vec!["x", "y"]);
        assert_eq!(split_line(""), vec![""]);
    }

    #[test]
    fn test_open_quote_does_not_span_lines() {
        let records = parse(
            "h\n\
             V1,c,\"Open,WA,1,2020,Audi\n\
             V2,c,Bellevue,WA,1,2021,Audi,e-tron,Battery,x,200,0,1,u\n",
        );

        // the first row swallows its delimiters and loses its make
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vin, "V2");
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int::<i32>("2022"), 2022);
        assert_eq!(leading_int::<i32>("2022.7"), 2022);
        assert_eq!(leading_int::<i32>("  42abc"), 42);
        assert_eq!(leading_int::<i32>("-5"), -5);
        assert_eq!(leading_int::<i32>("abc"), 0);
        assert_eq!(leading_int::<i32>("-"), 0);
        assert_eq!(leading_int::<i32>(""), 0);
        assert_eq!(leading_int::<i32>("99999999999"), 0);
        assert_eq!(leading_int::<i64>("99999999999"), 99_999_999_999);
    }
}
