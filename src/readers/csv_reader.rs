use super::headers::normalize_headers;
use super::SheetSource;
use crate::error::{CleaningError, Result};
use crate::models::{RawSheet, RawValue};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads station sheets from a directory holding one `{station}.csv` per
/// station.
pub struct CsvDirectoryReader {
    dir: PathBuf,
}

impl CsvDirectoryReader {
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(CleaningError::InvalidFormat(format!(
                "Path is not a directory: {}",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", name))
    }
}

impl SheetSource for CsvDirectoryReader {
    fn location(&self) -> &Path {
        &self.dir
    }

    fn sheet_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !path.is_file() || !is_csv {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet> {
        let path = self.sheet_path(name);
        let bytes = fs::read(&path).map_err(|e| CleaningError::SourceUnavailable {
            station: name.to_string(),
            reason: e.to_string(),
        })?;
        let text = decode_text(&bytes);
        if matches!(text, Cow::Owned(_)) {
            debug!("Decoded {} with transcoding", path.display());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = normalize_headers(reader.headers()?.iter());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            RawValue::Empty
                        } else {
                            RawValue::Text(field.to_string())
                        }
                    })
                    .collect(),
            );
        }

        debug!(
            "Read {}: {} columns, {} rows",
            path.display(),
            headers.len(),
            rows.len()
        );

        Ok(RawSheet::new(name, headers, rows))
    }
}

/// UTF-8 (BOM stripped) when valid, otherwise Windows-1252 as exported by
/// Spanish-locale spreadsheets
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }

    warn!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}
