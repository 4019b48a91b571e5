use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// What the pipeline did to one station sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station: String,
    /// Rows as read, units row included
    pub raw_rows: usize,
    /// Rows after the units row is stripped
    pub data_rows: usize,
    pub rows_kept: usize,
    pub timestamp_parse_failures: usize,
    pub numeric_parse_failures: usize,
    pub empty_columns: Vec<String>,
    pub sparse_columns: Vec<String>,
    /// Columns with no valid value left after row pruning
    pub unfillable_columns: Vec<String>,
    /// Unfillable columns removed under the drop policy
    #[serde(default)]
    pub unfillable_dropped: usize,
    pub cells_interpolated: usize,
    pub cells_median_filled: usize,
    pub outliers_replaced: BTreeMap<String, usize>,
    pub columns_kept: usize,
}

impl StationSummary {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            ..Self::default()
        }
    }

    pub fn rows_dropped(&self) -> usize {
        self.data_rows.saturating_sub(self.rows_kept)
    }

    pub fn columns_dropped(&self) -> usize {
        self.empty_columns.len() + self.sparse_columns.len() + self.unfillable_dropped
    }

    pub fn total_outliers(&self) -> usize {
        self.outliers_replaced.values().sum()
    }
}

/// Summaries for every station in a run, in processing order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub stations: Vec<StationSummary>,
}

impl CleaningReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, summary: StationSummary) {
        self.stations.push(summary);
    }

    pub fn station(&self, name: &str) -> Option<&StationSummary> {
        self.stations.iter().find(|s| s.station == name)
    }

    pub fn total_rows_kept(&self) -> usize {
        self.stations.iter().map(|s| s.rows_kept).sum()
    }

    pub fn total_rows_dropped(&self) -> usize {
        self.stations.iter().map(StationSummary::rows_dropped).sum()
    }

    pub fn total_outliers(&self) -> usize {
        self.stations.iter().map(StationSummary::total_outliers).sum()
    }

    pub fn total_imputed(&self) -> usize {
        self.stations
            .iter()
            .map(|s| s.cells_interpolated + s.cells_median_filled)
            .sum()
    }

    /// Generate a summary report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Cleaning Report ===\n");
        summary.push_str(&format!("Stations: {}\n", self.stations.len()));
        summary.push_str(&format!("Rows Kept: {}\n", self.total_rows_kept()));
        summary.push_str(&format!("Rows Dropped: {}\n", self.total_rows_dropped()));
        summary.push_str(&format!("Cells Imputed: {}\n", self.total_imputed()));
        summary.push_str(&format!("Outliers Replaced: {}\n", self.total_outliers()));

        if !self.stations.is_empty() {
            summary.push_str("\nPer Station:\n");
        }

        for s in &self.stations {
            summary.push_str(&format!(
                "  {}: {}/{} rows kept, {} columns kept ({} dropped), {} interpolated, {} median-filled, {} outliers\n",
                s.station,
                s.rows_kept,
                s.data_rows,
                s.columns_kept,
                s.columns_dropped(),
                s.cells_interpolated,
                s.cells_median_filled,
                s.total_outliers()
            ));

            if !s.sparse_columns.is_empty() {
                summary.push_str(&format!(
                    "    sparse columns: {}\n",
                    s.sparse_columns.join(", ")
                ));
            }
            if !s.unfillable_columns.is_empty() {
                summary.push_str(&format!(
                    "    unfillable columns: {}\n",
                    s.unfillable_columns.join(", ")
                ));
            }
        }

        summary
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
