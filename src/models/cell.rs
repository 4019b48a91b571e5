use chrono::NaiveDateTime;
use std::fmt;

/// A single cell as delivered by a sheet source, before any cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Spreadsheet error cell such as `#N/A` or `#DIV/0!`
    Error(String),
}

impl RawValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    /// True for cells matching one of the configured null markers.
    /// Error cells always count as null.
    pub fn is_null_marker(&self, markers: &[String]) -> bool {
        match self {
            RawValue::Text(s) => {
                let trimmed = s.trim();
                markers.iter().any(|m| m == trimmed)
            }
            RawValue::Error(_) => true,
            _ => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::DateTime(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Empty, Into::into)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Empty => Ok(()),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            RawValue::Error(e) => write!(f, "{}", e),
        }
    }
}
