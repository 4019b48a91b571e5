/// Physical operating ranges per measurement channel: (channel, min, max)
pub const DEFAULT_RANGE_TABLE: [(&str, f64, f64); 15] = [
    ("PM10", 0.0, 450.0),
    ("PM2.5", 0.0, 350.0),
    ("O3", 0.0, 180.0),
    ("NO", 0.0, 400.0),
    ("NO2", 0.0, 400.0),
    ("NOX", 0.0, 400.0),
    ("SO2", 0.0, 450.0),
    ("CO", 0.0, 45.0),
    ("RH", 0.0, 100.0),
    ("WS", 0.0, 45.0),
    ("TOUT", 0.0, 45.0),
    ("SR", 0.0, 1500.0),
    ("BP", 850.0, 1050.0),
    ("WDR", 0.0, 360.0),
    ("RAINF", 0.0, 35.0),
];

/// Monitoring stations, one sheet each, in output order
pub const DEFAULT_STATIONS: [&str; 15] = [
    "SE", "CE", "SO", "NE2", "SE2", "SE3", "NE", "NO", "NO2", "NTE", "NTE2", "SO2", "SUR", "NO3",
    "NE3",
];

/// Column names and markers
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "date";
pub const DEFAULT_NULL_MARKER: &str = "NULL";

/// Cleaning thresholds
pub const DEFAULT_COLUMN_SPARSITY_THRESHOLD: f64 = 0.10;
pub const DEFAULT_ROW_SPARSITY_FRACTION: f64 = 0.5;

/// Output formats
pub const TIMESTAMP_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const EXCEL_DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
pub const EXCEL_MAX_ROWS: usize = 1_048_576;
pub const EXCEL_MAX_COLUMNS: usize = 16_384;

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "STATION_CLEANER";
