use super::cleaning_report::StationSummary;
use super::coercion::{normalize_null, parse_numeric, parse_timestamp};
use super::imputation::{fill_with_median, interpolate_linear};
use super::outlier_corrector::correct_out_of_range;
use super::pruning::{apply_mask, drop_empty_columns, drop_sparse_columns, row_mask};
use crate::config::{CleanerConfig, EmptyColumnPolicy};
use crate::models::{
    CleanedSheet, Column, NumericColumn, RangeTable, RawSheet, RawValue, TimestampColumn,
};
use tracing::{debug, warn};

/// Result of cleaning one station sheet
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    pub sheet: CleanedSheet,
    pub summary: StationSummary,
}

/// Turns one raw station sheet into a cleaned one.
///
/// Stages run in a fixed order: strip the units row, normalise null markers,
/// hold the timestamp column aside, drop empty columns, coerce to numbers,
/// drop sparse columns, drop sparse rows, interpolate, median-fill, correct
/// out-of-range values, then reassemble. Pruning precedes imputation and
/// imputation precedes outlier correction, so no stage sees a gap it cannot
/// handle. Malformed cells never raise; they become absent and get imputed.
pub struct TableCleaner {
    config: CleanerConfig,
    ranges: RangeTable,
}

impl TableCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        let ranges = config.range_table();
        Self { config, ranges }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn clean(&self, sheet: RawSheet) -> CleaningOutcome {
        let RawSheet {
            name,
            headers,
            rows,
        } = sheet;
        let mut summary = StationSummary::new(&name);
        summary.raw_rows = rows.len();

        // Units row
        let rows: Vec<Vec<RawValue>> = rows.into_iter().skip(1).collect();
        let row_count = rows.len();
        summary.data_rows = row_count;

        let mut columns = self.null_normalized_columns(headers, rows);

        let timestamp = self.extract_timestamp(&mut columns, &mut summary);

        let (columns, empty) = drop_empty_columns(columns);
        if !empty.is_empty() {
            debug!("{}: dropped empty columns {:?}", name, empty);
        }
        summary.empty_columns = empty;

        let numeric = Self::coerce_numeric(columns, &mut summary);

        let (numeric, sparse) =
            drop_sparse_columns(numeric, self.config.column_sparsity_threshold, row_count);
        if !sparse.is_empty() {
            debug!(
                "{}: dropped columns below {:.0}% validity {:?}",
                name,
                self.config.column_sparsity_threshold * 100.0,
                sparse
            );
        }
        summary.sparse_columns = sparse;

        let min_valid = self.config.min_valid_per_row(numeric.len());
        let mask = row_mask(&numeric, row_count, min_valid);
        let mut numeric: Vec<NumericColumn> = numeric
            .into_iter()
            .map(|c| Column::new(c.name, apply_mask(c.values, &mask)))
            .collect();
        let timestamp =
            timestamp.map(|t| Column::new(t.name, apply_mask(t.values, &mask)));
        summary.rows_kept = mask.iter().filter(|&&keep| keep).count();
        debug!(
            "{}: kept {}/{} rows with at least {} valid cells",
            name, summary.rows_kept, row_count, min_valid
        );

        for column in numeric.iter_mut() {
            summary.cells_interpolated += interpolate_linear(&mut column.values);
        }

        for column in numeric.iter_mut() {
            if column.has_absent() {
                summary.cells_median_filled += fill_with_median(&mut column.values);
            }
        }

        let numeric = self.resolve_unfillable(&name, numeric, &mut summary);
        let numeric = self.correct_outliers(numeric, &mut summary);

        summary.columns_kept = numeric.len();

        CleaningOutcome {
            sheet: CleanedSheet {
                name,
                timestamp,
                columns: numeric,
            },
            summary,
        }
    }

    /// Transpose rows into columns, replacing null markers on the way
    fn null_normalized_columns(
        &self,
        headers: Vec<String>,
        rows: Vec<Vec<RawValue>>,
    ) -> Vec<Column<RawValue>> {
        let mut columns: Vec<Column<RawValue>> = headers
            .into_iter()
            .map(|h| Column::new(h, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column
                    .values
                    .push(normalize_null(value, &self.config.null_markers));
            }
        }

        columns
    }

    fn extract_timestamp(
        &self,
        columns: &mut Vec<Column<RawValue>>,
        summary: &mut StationSummary,
    ) -> Option<TimestampColumn> {
        let index = columns
            .iter()
            .position(|c| c.name == self.config.timestamp_column)?;
        let raw = columns.remove(index);

        let values: Vec<_> = raw.values.iter().map(parse_timestamp).collect();
        summary.timestamp_parse_failures = raw
            .values
            .iter()
            .zip(&values)
            .filter(|(cell, parsed)| !cell.is_empty() && parsed.is_none())
            .count();

        Some(Column::new(raw.name, values))
    }

    fn coerce_numeric(
        columns: Vec<Column<RawValue>>,
        summary: &mut StationSummary,
    ) -> Vec<NumericColumn> {
        columns
            .into_iter()
            .map(|column| {
                let values: Vec<Option<f64>> = column.values.iter().map(parse_numeric).collect();
                summary.numeric_parse_failures += column
                    .values
                    .iter()
                    .zip(&values)
                    .filter(|(cell, parsed)| !cell.is_empty() && parsed.is_none())
                    .count();
                Column::new(column.name, values)
            })
            .collect()
    }

    /// Apply the empty-column policy to columns imputation could not fill
    fn resolve_unfillable(
        &self,
        station: &str,
        columns: Vec<NumericColumn>,
        summary: &mut StationSummary,
    ) -> Vec<NumericColumn> {
        let policy = self.config.empty_column_policy;
        let mut kept = Vec::with_capacity(columns.len());

        for mut column in columns {
            if !column.has_absent() {
                kept.push(column);
                continue;
            }

            warn!(
                "{}: column '{}' has no valid values after pruning ({:?})",
                station, column.name, policy
            );
            summary.unfillable_columns.push(column.name.clone());

            match policy {
                EmptyColumnPolicy::Drop => summary.unfillable_dropped += 1,
                EmptyColumnPolicy::ZeroFill => {
                    column.values.iter_mut().for_each(|v| *v = Some(0.0));
                    kept.push(column);
                }
                EmptyColumnPolicy::KeepAbsent => kept.push(column),
            }
        }

        kept
    }

    fn correct_outliers(
        &self,
        mut columns: Vec<NumericColumn>,
        summary: &mut StationSummary,
    ) -> Vec<NumericColumn> {
        for column in columns.iter_mut() {
            if let Some(range) = self.ranges.get(&column.name) {
                let replaced = correct_out_of_range(&mut column.values, range);
                if replaced > 0 {
                    summary
                        .outliers_replaced
                        .insert(column.name.clone(), replaced);
                }
            }
        }
        columns
    }
}

impl Default for TableCleaner {
    fn default() -> Self {
        Self::new(CleanerConfig::default())
    }
}
