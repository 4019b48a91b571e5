use super::imputation::median;
use crate::models::StationRange;

/// Replace values strictly outside `range` with the column median.
///
/// The median is taken over the column as it stands, outliers included, so
/// when most values are outliers the replacement is itself out of range.
/// Absent cells are never touched. Returns the number of replaced cells.
pub fn correct_out_of_range(values: &mut [Option<f64>], range: &StationRange) -> usize {
    let Some(replacement) = median(values) else {
        return 0;
    };

    let mut replaced = 0;
    for value in values.iter_mut().flatten() {
        if *value < range.min || *value > range.max {
            *value = replacement;
            replaced += 1;
        }
    }
    replaced
}
