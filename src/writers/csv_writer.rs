use super::SheetSink;
use crate::error::Result;
use crate::models::CleanedSheet;
use crate::utils::constants::TIMESTAMP_TEXT_FORMAT;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes each cleaned sheet to `{dir}/{station}.csv`, creating the directory
/// and overwriting existing files.
pub struct CsvDirectoryWriter {
    dir: PathBuf,
}

impl CsvDirectoryWriter {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl SheetSink for CsvDirectoryWriter {
    fn destination(&self) -> &Path {
        &self.dir
    }

    fn write_sheet(&mut self, sheet: &CleanedSheet) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.csv", sheet.name));
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(sheet.headers())?;

        let mut record: Vec<String> = Vec::with_capacity(sheet.columns.len() + 1);
        for row in 0..sheet.row_count() {
            record.clear();
            if let Some(timestamp) = &sheet.timestamp {
                record.push(
                    timestamp.values[row]
                        .map(|dt| dt.format(TIMESTAMP_TEXT_FORMAT).to_string())
                        .unwrap_or_default(),
                );
            }
            for column in &sheet.columns {
                record.push(column.values[row].map(|v| v.to_string()).unwrap_or_default());
            }
            writer.write_record(&record)?;
        }

        writer.flush()?;
        debug!("Wrote {} ({} rows)", path.display(), sheet.row_count());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}
