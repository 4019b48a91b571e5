use crate::models::{Column, NumericColumn, RawValue};

/// Split off columns in which every cell is empty.
///
/// With zero rows every column is vacuously empty.
pub fn drop_empty_columns(
    columns: Vec<Column<RawValue>>,
) -> (Vec<Column<RawValue>>, Vec<String>) {
    let (empty, kept): (Vec<_>, Vec<_>) = columns
        .into_iter()
        .partition(|c| c.values.iter().all(RawValue::is_empty));

    (kept, empty.into_iter().map(|c| c.name).collect())
}

/// Fraction of non-absent cells over `row_count`; zero when there are no rows
pub fn validity_ratio(column: &NumericColumn, row_count: usize) -> f64 {
    if row_count == 0 {
        return 0.0;
    }
    column.valid_count() as f64 / row_count as f64
}

/// Split off columns whose validity ratio is below `threshold`
pub fn drop_sparse_columns(
    columns: Vec<NumericColumn>,
    threshold: f64,
    row_count: usize,
) -> (Vec<NumericColumn>, Vec<String>) {
    let (kept, sparse): (Vec<_>, Vec<_>) = columns
        .into_iter()
        .partition(|c| validity_ratio(c, row_count) >= threshold);

    (kept, sparse.into_iter().map(|c| c.name).collect())
}

/// Row keep-mask: a row survives when it has at least `min_valid`
/// non-absent cells across `columns`
pub fn row_mask(columns: &[NumericColumn], row_count: usize, min_valid: usize) -> Vec<bool> {
    (0..row_count)
        .map(|row| {
            let valid = columns
                .iter()
                .filter(|c| matches!(c.values.get(row), Some(Some(_))))
                .count();
            valid >= min_valid
        })
        .collect()
}

/// Keep the values whose mask entry is true
pub fn apply_mask<T>(values: Vec<T>, mask: &[bool]) -> Vec<T> {
    values
        .into_iter()
        .zip(mask)
        .filter_map(|(value, &keep)| keep.then_some(value))
        .collect()
}
