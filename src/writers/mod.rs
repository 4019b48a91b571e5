pub mod csv_writer;
pub mod workbook_writer;

pub use csv_writer::CsvDirectoryWriter;
pub use workbook_writer::WorkbookWriter;

use crate::error::Result;
use crate::models::CleanedSheet;
use std::path::Path;

/// Destination for cleaned station sheets
pub trait SheetSink {
    fn destination(&self) -> &Path;

    fn write_sheet(&mut self, sheet: &CleanedSheet) -> Result<()>;

    /// Flush everything to the destination, creating or overwriting it
    fn finish(&mut self) -> Result<()>;
}

/// `.xlsx` paths become a workbook, anything else a CSV directory
pub fn create_sink(path: &Path) -> Box<dyn SheetSink> {
    let is_workbook = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

    if is_workbook {
        Box::new(WorkbookWriter::new(path))
    } else {
        Box::new(CsvDirectoryWriter::new(path))
    }
}
