use super::RawValue;
use chrono::NaiveDateTime;

/// One named column of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<T> {
    pub name: String,
    pub values: Vec<T>,
}

impl<T> Column<T> {
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub type NumericColumn = Column<Option<f64>>;
pub type TimestampColumn = Column<Option<NaiveDateTime>>;

impl NumericColumn {
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn has_absent(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }
}

/// A station sheet exactly as read: header names plus a grid of raw cells.
///
/// The first data row is the units row. Every row is padded or truncated to
/// the header width on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, RawValue::Empty);
                row
            })
            .collect();

        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&RawValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// Cleaned output for one station: an optional timestamp column followed by
/// the numeric measurement columns, all row-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSheet {
    pub name: String,
    pub timestamp: Option<TimestampColumn>,
    pub columns: Vec<NumericColumn>,
}

impl CleanedSheet {
    pub fn row_count(&self) -> usize {
        self.timestamp
            .as_ref()
            .map(Column::len)
            .or_else(|| self.columns.first().map(Column::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Output header, timestamp first
    pub fn headers(&self) -> Vec<&str> {
        self.timestamp
            .iter()
            .map(|t| t.name.as_str())
            .chain(self.columns.iter().map(|c| c.name.as_str()))
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&NumericColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_absent_values(&self) -> bool {
        self.columns.iter().any(NumericColumn::has_absent)
    }
}
