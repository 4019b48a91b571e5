use chrono::{Duration, NaiveDate, NaiveDateTime};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Largest serial Excel accepts (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_466.0;

fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert an Excel serial day number (1900 date system) to a date-time
///
/// # Examples
/// ```
/// use station_cleaner::utils::excel_serial_to_datetime;
///
/// let dt = excel_serial_to_datetime(44927.5).unwrap();
/// assert_eq!(dt.to_string(), "2023-01-01 12:00:00");
/// ```
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    let millis = (serial * MS_PER_DAY).round() as i64;
    excel_epoch().checked_add_signed(Duration::milliseconds(millis))
}

/// Convert a date-time to an Excel serial day number
pub fn datetime_to_excel_serial(datetime: &NaiveDateTime) -> f64 {
    let elapsed = *datetime - excel_epoch();
    elapsed.num_milliseconds() as f64 / MS_PER_DAY
}
