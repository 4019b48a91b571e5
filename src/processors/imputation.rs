/// Fill absent cells by linear interpolation over row position.
///
/// Gaps between two known values are filled on the straight line between
/// them. Leading and trailing gaps take the nearest known value. A column
/// with no known value is left untouched. Returns the number of cells filled.
pub fn interpolate_linear(values: &mut [Option<f64>]) -> usize {
    let known: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|_| i))
        .collect();

    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        return 0;
    };

    let mut filled = 0;

    let head = values[first];
    for slot in values[..first].iter_mut() {
        *slot = head;
        filled += 1;
    }

    let tail = values[last];
    for slot in values[last + 1..].iter_mut() {
        *slot = tail;
        filled += 1;
    }

    for pair in known.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        if right - left < 2 {
            continue;
        }
        let (Some(start), Some(end)) = (values[left], values[right]) else {
            continue;
        };

        let span = (right - left) as f64;
        for i in left + 1..right {
            let t = (i - left) as f64 / span;
            values[i] = Some(start + (end - start) * t);
            filled += 1;
        }
    }

    filled
}

/// Median of the known values; the mean of the middle pair for even counts
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut known: Vec<f64> = values.iter().flatten().copied().collect();
    if known.is_empty() {
        return None;
    }

    known.sort_by(f64::total_cmp);
    let mid = known.len() / 2;
    if known.len() % 2 == 0 {
        Some((known[mid - 1] + known[mid]) / 2.0)
    } else {
        Some(known[mid])
    }
}

/// Set remaining absent cells to the column median. Returns the number of
/// cells filled; zero when the column has no known value.
pub fn fill_with_median(values: &mut [Option<f64>]) -> usize {
    let Some(fill) = median(values) else {
        return 0;
    };

    let mut filled = 0;
    for slot in values.iter_mut().filter(|v| v.is_none()) {
        *slot = Some(fill);
        filled += 1;
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interpolation_with_boundary_extension() {
        let mut values = vec![None, Some(5.0), None, Some(15.0), None];

        let filled = interpolate_linear(&mut values);

        assert_eq!(filled, 3);
        assert_eq!(
            values,
            vec![Some(5.0), Some(5.0), Some(10.0), Some(15.0), Some(15.0)]
        );
    }

    #[test]
    fn test_interpolation_over_long_gap() {
        let mut values = vec![Some(0.0), None, None, None, Some(8.0)];

        interpolate_linear(&mut values);

        assert_eq!(
            values,
            vec![Some(0.0), Some(2.0), Some(4.0), Some(6.0), Some(8.0)]
        );
    }

    #[test]
    fn test_interpolation_single_known_value() {
        let mut values = vec![None, None, Some(3.0), None];

        assert_eq!(interpolate_linear(&mut values), 3);
        assert_eq!(values, vec![Some(3.0); 4]);
    }

    #[test]
    fn test_interpolation_all_absent() {
        let mut values = vec![None, None];

        assert_eq!(interpolate_linear(&mut values), 0);
        assert_eq!(values, vec![None, None]);
    }

    #[test]
    fn test_interpolation_complete_column_unchanged() {
        let mut values = vec![Some(1.0), Some(2.0), Some(4.0)];

        assert_eq!(interpolate_linear(&mut values), 0);
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(4.0)]);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[Some(10.0), Some(20.0), Some(999.0), Some(30.0)]), Some(25.0));
        assert_eq!(median(&[Some(3.0), None, Some(1.0), Some(2.0)]), Some(2.0));
        assert_eq!(median(&[None, None]), None);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_fill_with_median() {
        let mut values = vec![Some(1.0), None, Some(9.0), Some(2.0)];

        assert_eq!(fill_with_median(&mut values), 1);
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(9.0), Some(2.0)]);

        let mut empty = vec![None, None];
        assert_eq!(fill_with_median(&mut empty), 0);
        assert_eq!(empty, vec![None, None]);
    }
}
