use ndarray::Dimension as _;
use ndarray::{ArrayD, ArrayView1, ArrayView2, ArrayViewD, Axis, IxDyn};
use tracing::{debug, warn};

use ctab_model::{ContingencyTable, Dimension, Result, TableError};

/// Translate one row of 1-based category values into a 0-based table index.
///
/// Values are truncated toward zero after the shift. Anything that lands
/// outside `0..bound` (including NaN and infinities) is rejected before the
/// table is touched.
fn table_index(
    row_idx: usize,
    row: ArrayView1<'_, f64>,
    dimension: &Dimension,
    index: &mut [usize],
) -> Result<()> {
    for (axis, (&value, &bound)) in row.iter().zip(dimension.as_slice()).enumerate() {
        let shifted = (value - 1.0).trunc();
        if !shifted.is_finite() || shifted < 0.0 || shifted >= bound as f64 {
            return Err(TableError::IndexOutOfRange {
                row: row_idx,
                axis,
                index: value,
                bound,
            });
        }
        index[axis] = shifted as usize;
    }
    Ok(())
}

/// Counts at or above 2^64 have no `u64` representation.
const COUNT_LIMIT: f64 = u64::MAX as f64;

fn count_value(location: impl FnOnce() -> String, value: f64) -> Result<u64> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < 0.0 || truncated >= COUNT_LIMIT {
        return Err(TableError::InvalidCount {
            location: location(),
            value,
        });
    }
    Ok(truncated as u64)
}

/// Aggregate case-form observations into a contingency table.
///
/// Each row holds one 1-based category per variable; every row adds one to
/// the cell it addresses, so the table total equals the number of rows.
pub fn case_form_to_table(
    data: ArrayView2<'_, f64>,
    dimension: &Dimension,
) -> Result<ContingencyTable> {
    if data.ncols() != dimension.len() {
        return Err(TableError::ShapeMismatch {
            context: "case form",
            actual: data.shape().to_vec(),
            expected: format!("{} columns for dimension {dimension}", dimension.len()),
        });
    }
    debug!(rows = data.nrows(), %dimension, "converting case form");

    let mut counts = ArrayD::<u64>::zeros(IxDyn(dimension.as_slice()));
    let mut index = vec![0usize; dimension.len()];
    for (row_idx, row) in data.rows().into_iter().enumerate() {
        table_index(row_idx, row, dimension, &mut index)?;
        counts[index.as_slice()] += 1;
    }
    Ok(ContingencyTable::from_counts(counts))
}

/// Build a contingency table from frequency-form rows.
///
/// The last column is the count for the cell addressed by the other columns.
/// Counts are assigned, not summed: when several rows address the same cell,
/// the last row wins.
pub fn frequency_form_to_table(
    data: ArrayView2<'_, f64>,
    dimension: &Dimension,
) -> Result<ContingencyTable> {
    let n_vars = dimension.len();
    if data.ncols() != n_vars + 1 {
        return Err(TableError::ShapeMismatch {
            context: "frequency form",
            actual: data.shape().to_vec(),
            expected: format!("{} columns ({n_vars} variables + frequency)", n_vars + 1),
        });
    }
    debug!(rows = data.nrows(), %dimension, "converting frequency form");

    let mut counts = ArrayD::<u64>::zeros(IxDyn(dimension.as_slice()));
    let mut assigned = ArrayD::from_elem(IxDyn(dimension.as_slice()), false);
    let mut overwritten = 0usize;
    let mut index = vec![0usize; n_vars];
    for (row_idx, row) in data.rows().into_iter().enumerate() {
        let (categories, frequency) = row.split_at(Axis(0), n_vars);
        table_index(row_idx, categories, dimension, &mut index)?;
        let count = count_value(|| format!("row {row_idx}"), frequency[0])?;
        let seen = &mut assigned[index.as_slice()];
        if *seen {
            overwritten += 1;
        }
        *seen = true;
        counts[index.as_slice()] = count;
    }
    if overwritten > 0 {
        warn!(
            overwritten,
            "frequency rows repeated a cell; the last frequency for each cell was kept"
        );
    }
    Ok(ContingencyTable::from_counts(counts))
}

/// Validate an already aggregated table.
///
/// The shape must equal the dimension exactly (a transposed table with the
/// same number of cells is still a mismatch). Values are truncated to counts.
pub fn table_form_to_table(
    data: ArrayViewD<'_, f64>,
    dimension: &Dimension,
) -> Result<ContingencyTable> {
    if data.shape() != dimension.as_slice() {
        return Err(TableError::ShapeMismatch {
            context: "table form",
            actual: data.shape().to_vec(),
            expected: dimension.to_string(),
        });
    }
    debug!(%dimension, "validating table form");

    let mut values = Vec::with_capacity(data.len());
    for (idx, &value) in data.indexed_iter() {
        values.push(count_value(|| format!("cell {:?}", idx.slice()), value)?);
    }
    let counts = ArrayD::from_shape_vec(IxDyn(dimension.as_slice()), values).map_err(|err| {
        TableError::ShapeMismatch {
            context: "table form",
            actual: data.shape().to_vec(),
            expected: err.to_string(),
        }
    })?;
    Ok(ContingencyTable::from_counts(counts))
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn dim(axes: &[usize]) -> Dimension {
        Dimension::new(axes.to_vec()).unwrap()
    }

    #[test]
    fn case_rows_accumulate() {
        let data = array![[1.0, 1.0], [2.0, 3.0], [1.0, 1.0]];
        let table = case_form_to_table(data.view(), &dim(&[2, 3])).unwrap();
        assert_eq!(table.get(&[0, 0]), Some(2));
        assert_eq!(table.get(&[1, 2]), Some(1));
        assert_eq!(table.total().unwrap(), 3);
    }

    #[test]
    fn case_values_truncate_toward_zero() {
        let data = array![[1.9, 2.2]];
        let table = case_form_to_table(data.view(), &dim(&[2, 3])).unwrap();
        assert_eq!(table.get(&[0, 1]), Some(1));
    }

    #[test]
    fn zero_category_is_out_of_range() {
        let data = array![[1.0, 0.0]];
        let err = case_form_to_table(data.view(), &dim(&[2, 2])).unwrap_err();
        assert!(matches!(
            err,
            TableError::IndexOutOfRange { row: 0, axis: 1, bound: 2, .. }
        ));
    }

    #[test]
    fn category_above_dimension_is_out_of_range() {
        let data = array![[1.0, 1.0], [3.0, 1.0]];
        let err = case_form_to_table(data.view(), &dim(&[2, 2])).unwrap_err();
        assert!(matches!(err, TableError::IndexOutOfRange { row: 1, axis: 0, .. }));
    }

    #[test]
    fn nan_category_is_out_of_range() {
        let data = array![[f64::NAN]];
        let err = case_form_to_table(data.view(), &dim(&[2])).unwrap_err();
        assert!(matches!(err, TableError::IndexOutOfRange { .. }));
    }

    #[test]
    fn case_column_count_must_match() {
        let data = array![[1.0, 1.0, 1.0]];
        let err = case_form_to_table(data.view(), &dim(&[2, 2])).unwrap_err();
        assert!(matches!(err, TableError::ShapeMismatch { context: "case form", .. }));
    }

    #[test]
    fn frequency_rows_overwrite() {
        let data = array![[1.0, 2.0, 5.0], [2.0, 1.0, 4.0], [1.0, 2.0, 7.0]];
        let table = frequency_form_to_table(data.view(), &dim(&[2, 2])).unwrap();
        assert_eq!(table.get(&[0, 1]), Some(7));
        assert_eq!(table.get(&[1, 0]), Some(4));
        assert_eq!(table.total().unwrap(), 11);
    }

    #[test]
    fn frequency_needs_trailing_count_column() {
        let data = array![[1.0, 2.0]];
        let err = frequency_form_to_table(data.view(), &dim(&[2, 2])).unwrap_err();
        assert!(matches!(
            err,
            TableError::ShapeMismatch { context: "frequency form", .. }
        ));
    }

    #[test]
    fn negative_frequency_is_rejected() {
        let data = array![[1.0, 1.0, -3.0]];
        let err = frequency_form_to_table(data.view(), &dim(&[2, 2])).unwrap_err();
        assert!(matches!(err, TableError::InvalidCount { .. }));
    }

    #[test]
    fn frequency_zero_category_is_out_of_range() {
        let data = array![[0.0, 1.0, 3.0]];
        let err = frequency_form_to_table(data.view(), &dim(&[2, 2])).unwrap_err();
        assert!(matches!(
            err,
            TableError::IndexOutOfRange { row: 0, axis: 0, bound: 2, .. }
        ));
    }

    #[test]
    fn frequency_category_above_dimension_is_out_of_range() {
        let data = array![[1.0, 1.0, 2.0], [2.0, 3.0, 1.0]];
        let err = frequency_form_to_table(data.view(), &dim(&[2, 2])).unwrap_err();
        assert!(matches!(
            err,
            TableError::IndexOutOfRange { row: 1, axis: 1, bound: 2, .. }
        ));
    }

    #[test]
    fn frequency_too_large_for_a_count_is_rejected() {
        let data = array![[1.0, 1e300]];
        let err = frequency_form_to_table(data.view(), &dim(&[2])).unwrap_err();
        assert!(matches!(err, TableError::InvalidCount { ref location, .. } if location == "row 0"));

        let edge = array![[1.0, 18_446_744_073_709_551_616.0]];
        assert!(frequency_form_to_table(edge.view(), &dim(&[2])).is_err());
    }

    #[test]
    fn largest_exact_count_is_kept() {
        let data = array![[1.0, 9_007_199_254_740_992.0]];
        let table = frequency_form_to_table(data.view(), &dim(&[1])).unwrap();
        assert_eq!(table.get(&[0]), Some(9_007_199_254_740_992));
    }

    #[test]
    fn table_cell_too_large_for_a_count_is_rejected() {
        let data = array![[1.0, 1e20]].into_dyn();
        let err = table_form_to_table(data.view(), &dim(&[1, 2])).unwrap_err();
        assert!(matches!(
            err,
            TableError::InvalidCount { ref location, .. } if location == "cell [0, 1]"
        ));
    }

    #[test]
    fn table_form_passes_through() {
        let data = array![[1.0, 0.0, 2.0], [3.0, 4.0, 0.0]].into_dyn();
        let table = table_form_to_table(data.view(), &dim(&[2, 3])).unwrap();
        assert_eq!(table.shape(), &[2, 3]);
        assert_eq!(table.get(&[1, 1]), Some(4));
        assert_eq!(table.total().unwrap(), 10);
    }

    #[test]
    fn transposed_table_is_a_shape_mismatch() {
        let data = array![[1.0, 0.0, 2.0], [3.0, 4.0, 0.0]].into_dyn();
        let err = table_form_to_table(data.view(), &dim(&[3, 2])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "table form: shape [2, 3] doesn't match expected [3, 2]"
        );
    }
}
