//! Date formats and helpers shared by the loaders and the chart renderer.

use crate::error::{DashError, Result};
use chrono::NaiveDate;

/// Format used on chart axes and in API query parameters: "YYYY-MM-DD"
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of the local stock price files: "DD-MM-YYYY"
pub const DAY_MONTH_YEAR_FORMAT: &str = "%d-%m-%Y";

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse a date string in "YYYY-MM-DD" format
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT)
        .map_err(|e| DashError::unavailable(format!("Failed to parse date '{s}': {e}")))
}

/// Parse a date with an explicit format, returning None when it does not match.
pub fn parse_with(s: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), format).ok()
}

/// January 1st of the given year.
pub fn year_start(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| DashError::invalid(format!("Year {year} is out of range")))
}

/// December 31st of the given year.
pub fn year_end(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| DashError::invalid(format!("Year {year} is out of range")))
}
