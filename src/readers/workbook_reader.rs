use super::headers::normalize_headers;
use super::SheetSource;
use crate::error::{CleaningError, Result};
use crate::models::{RawSheet, RawValue};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads station sheets from a spreadsheet workbook (xlsx, xlsm, xls, ods).
///
/// The first row of each sheet is the header; everything below it, the
/// units row included, is handed over as data.
pub struct WorkbookReader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookReader {
    pub fn open(path: &Path) -> Result<Self> {
        let workbook = open_workbook_auto(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
        })
    }
}

impl SheetSource for WorkbookReader {
    fn location(&self) -> &Path {
        &self.path
    }

    fn sheet_names(&self) -> Result<Vec<String>> {
        Ok(self.workbook.sheet_names())
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet> {
        let range =
            self.workbook
                .worksheet_range(name)
                .map_err(|e| CleaningError::SourceUnavailable {
                    station: name.to_string(),
                    reason: e.to_string(),
                })?;

        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|header| normalize_headers(header.iter().map(|cell| cell.to_string())))
            .unwrap_or_default();

        let data: Vec<Vec<RawValue>> = rows
            .map(|row| row.iter().map(raw_value_from_cell).collect())
            .collect();

        debug!(
            "Read sheet {} from {}: {} columns, {} rows",
            name,
            self.path.display(),
            headers.len(),
            data.len()
        );

        Ok(RawSheet::new(name, headers, data))
    }
}

/// Convert a calamine cell into a raw value
pub fn raw_value_from_cell(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        Data::String(s) => RawValue::Text(s.clone()),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => RawValue::DateTime(datetime),
            None => RawValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawValue::Text(s.clone()),
        Data::Error(e) => RawValue::Error(e.to_string()),
    }
}
