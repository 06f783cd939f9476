//! Conversions from a table back to observations and from 0-based
//! observations into a table.

use ndarray::Dimension as _;
use ndarray::{Array2, ArrayD, ArrayViewD, Axis, IxDyn};
use tracing::debug;

use ctab_model::{ContingencyTable, Dimension, Result, TableError};

/// Expand a table into one row per observation.
///
/// Each non-zero cell contributes `count` identical rows holding its 0-based
/// index. Cells are visited in row-major order; empty cells produce nothing.
///
/// # Errors
///
/// [`TableError::CountOverflow`] when the total does not fit in a row count.
pub fn contingency_to_case_form(table: &ContingencyTable) -> Result<Array2<usize>> {
    let total = table.total()?;
    let n_rows = usize::try_from(total).map_err(|_| TableError::CountOverflow {
        shape: table.shape().to_vec(),
        max: usize::MAX as u64,
    })?;
    let mut cases = Array2::<usize>::zeros((n_rows, table.ndim()));
    let mut next_row = 0usize;
    for (idx, &count) in table.counts().indexed_iter() {
        for _ in 0..count {
            cases
                .row_mut(next_row)
                .iter_mut()
                .zip(idx.slice())
                .for_each(|(cell, &value)| *cell = value);
            next_row += 1;
        }
    }
    debug!(rows = n_rows, shape = ?table.shape(), "expanded table to case form");
    Ok(cases)
}

/// Aggregate 0-based observations into a table of the given shape.
///
/// `cases` is either a 2-D array of rows or a 3-D stack of row batches; both
/// accumulate as if every row were in one list. `axis_order[i]` names the
/// table axis fed by column `i` (identity when omitted), and axes that no
/// column feeds stay at index 0. Repeated rows add up. If two columns name
/// the same axis, the later column wins.
pub fn case_form_to_contingency(
    cases: ArrayViewD<'_, usize>,
    shape: &Dimension,
    axis_order: Option<&[usize]>,
) -> Result<ContingencyTable> {
    if !matches!(cases.ndim(), 2 | 3) {
        return Err(TableError::ShapeMismatch {
            context: "cases",
            actual: cases.shape().to_vec(),
            expected: "a 2-D array of rows or a 3-D stack of row batches".to_string(),
        });
    }
    let row_axis = Axis(cases.ndim() - 1);
    let n_cols = cases.len_of(row_axis);
    let identity: Vec<usize>;
    let axis_order = match axis_order {
        Some(order) => order,
        None => {
            identity = (0..n_cols).collect();
            &identity
        }
    };
    validate_axis_order(axis_order, n_cols, shape)?;

    let bounds = shape.as_slice();
    let mut counts = ArrayD::<u64>::zeros(IxDyn(bounds));
    let mut index = vec![0usize; bounds.len()];
    let mut n_rows = 0usize;
    for (row_idx, case) in cases.lanes(row_axis).into_iter().enumerate() {
        index.fill(0);
        for (&value, &axis) in case.iter().zip(axis_order) {
            if value >= bounds[axis] {
                return Err(TableError::IndexOutOfRange {
                    row: row_idx,
                    axis,
                    index: value as f64,
                    bound: bounds[axis],
                });
            }
            index[axis] = value;
        }
        counts[index.as_slice()] += 1;
        n_rows += 1;
    }
    debug!(rows = n_rows, %shape, "aggregated cases into table");
    Ok(ContingencyTable::from_counts(counts))
}

fn validate_axis_order(axis_order: &[usize], n_cols: usize, shape: &Dimension) -> Result<()> {
    if axis_order.len() != n_cols {
        return Err(TableError::ShapeMismatch {
            context: "axis order",
            actual: vec![axis_order.len()],
            expected: format!("{n_cols} entries, one per case column"),
        });
    }
    if axis_order.iter().any(|&axis| axis >= shape.len()) {
        return Err(TableError::ShapeMismatch {
            context: "axis order",
            actual: axis_order.to_vec(),
            expected: format!("axes below {} for shape {shape}", shape.len()),
        });
    }
    Ok(())
}
