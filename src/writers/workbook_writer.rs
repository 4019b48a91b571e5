use super::SheetSink;
use crate::error::{CleaningError, Result};
use crate::models::CleanedSheet;
use crate::utils::constants::{EXCEL_DATETIME_FORMAT, EXCEL_MAX_COLUMNS, EXCEL_MAX_ROWS};
use crate::utils::excel_dates::datetime_to_excel_serial;
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes cleaned sheets into a single `.xlsx` workbook, one worksheet per
/// station. Nothing touches the disk until `finish`.
pub struct WorkbookWriter {
    path: PathBuf,
    workbook: Workbook,
    datetime_format: Format,
    sheets_written: usize,
}

impl WorkbookWriter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            workbook: Workbook::new(),
            datetime_format: Format::new().set_num_format(EXCEL_DATETIME_FORMAT),
            sheets_written: 0,
        }
    }
}

impl SheetSink for WorkbookWriter {
    fn destination(&self) -> &Path {
        &self.path
    }

    fn write_sheet(&mut self, sheet: &CleanedSheet) -> Result<()> {
        let headers = sheet.headers();
        if sheet.row_count() >= EXCEL_MAX_ROWS || headers.len() > EXCEL_MAX_COLUMNS {
            return Err(CleaningError::InvalidFormat(format!(
                "Sheet {} ({} rows, {} columns) exceeds worksheet limits",
                sheet.name,
                sheet.row_count(),
                headers.len()
            )));
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }

        let mut first_numeric_col: u16 = 0;
        if let Some(timestamp) = &sheet.timestamp {
            worksheet.set_column_width(0, 20)?;
            for (row, value) in timestamp.values.iter().enumerate() {
                if let Some(datetime) = value {
                    worksheet.write_number_with_format(
                        row as u32 + 1,
                        0,
                        datetime_to_excel_serial(datetime),
                        &self.datetime_format,
                    )?;
                }
            }
            first_numeric_col = 1;
        }

        for (index, column) in sheet.columns.iter().enumerate() {
            let col = first_numeric_col + index as u16;
            for (row, value) in column.values.iter().enumerate() {
                if let Some(number) = value {
                    worksheet.write_number(row as u32 + 1, col, *number)?;
                }
            }
        }

        self.sheets_written += 1;
        debug!(
            "Added worksheet {} ({} rows) to {}",
            sheet.name,
            sheet.row_count(),
            self.path.display()
        );
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        if self.sheets_written == 0 {
            self.workbook.add_worksheet();
        }
        self.workbook.save(&self.path)?;
        Ok(())
    }
}
