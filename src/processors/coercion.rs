//! Cell-level conversions: null markers, timestamps and numbers.
//!
//! None of these fail. A cell that cannot be read becomes absent (`None`).

use crate::models::RawValue;
use crate::utils::excel_dates::excel_serial_to_datetime;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Replace null markers and error cells with `Empty`
pub fn normalize_null(value: RawValue, markers: &[String]) -> RawValue {
    if value.is_null_marker(markers) {
        RawValue::Empty
    } else {
        value
    }
}

/// Read a timestamp cell. Numbers are taken as Excel serial day numbers;
/// month-first is assumed for slash-separated dates.
pub fn parse_timestamp(value: &RawValue) -> Option<NaiveDateTime> {
    match value {
        RawValue::DateTime(dt) => Some(*dt),
        RawValue::Number(serial) => excel_serial_to_datetime(*serial),
        RawValue::Text(s) => parse_timestamp_text(s.trim()),
        RawValue::Empty | RawValue::Bool(_) | RawValue::Error(_) => None,
    }
}

fn parse_timestamp_text(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Read a numeric cell. Non-finite results count as absent.
pub fn parse_numeric(value: &RawValue) -> Option<f64> {
    let number = match value {
        RawValue::Number(n) => *n,
        RawValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Empty | RawValue::DateTime(_) | RawValue::Error(_) => return None,
    };

    number.is_finite().then_some(number)
}
