pub mod csv_reader;
pub mod headers;
pub mod workbook_reader;

pub use csv_reader::CsvDirectoryReader;
pub use headers::normalize_headers;
pub use workbook_reader::WorkbookReader;

use crate::error::Result;
use crate::models::RawSheet;
use std::path::Path;

/// A collection of named station sheets
pub trait SheetSource {
    fn location(&self) -> &Path;

    /// Sheet names in source order
    fn sheet_names(&self) -> Result<Vec<String>>;

    /// Fails with `SourceUnavailable` when the sheet cannot be found or read
    fn read_sheet(&mut self, name: &str) -> Result<RawSheet>;
}

/// Open a directory as CSV-per-station, anything else as a workbook
pub fn open_source(path: &Path) -> Result<Box<dyn SheetSource>> {
    if path.is_dir() {
        Ok(Box::new(CsvDirectoryReader::open(path)?))
    } else {
        Ok(Box::new(WorkbookReader::open(path)?))
    }
}
