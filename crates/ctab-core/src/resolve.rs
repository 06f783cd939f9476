//! Category resolution.
//!
//! Turns a grid of numbers and labels into a purely numeric array. Labels in
//! mapped columns are replaced by their category index; whatever labels are
//! left must parse as numbers or the whole call fails, naming every value
//! that could not be converted.

use std::borrow::Cow;
use std::collections::BTreeSet;

use ndarray::Array2;
use tracing::{debug, warn};

use ctab_model::{CategoryMap, Cell, CellGrid, DataForm, Result, TableError};

/// Resolve labels to category indices and coerce the grid to numbers.
///
/// The input grid is never modified; mapping happens on a copy. Grids that
/// are already fully numeric are returned as-is without consulting the map.
/// Only case- and frequency-form grids are mapped.
pub fn resolve_categories(
    grid: &CellGrid,
    category_map: Option<&CategoryMap>,
    var_list: Option<&[String]>,
    form: DataForm,
) -> Result<Array2<f64>> {
    if let Some(values) = grid.to_numeric() {
        return Ok(values);
    }
    let Some(map) = category_map.filter(|_| form.is_row_oriented()) else {
        return coerce_numeric(grid);
    };
    let mut resolved = grid.clone();
    apply_category_map(&mut resolved, map, var_list)?;
    coerce_numeric(&resolved)
}

fn apply_category_map(
    grid: &mut CellGrid,
    map: &CategoryMap,
    var_list: Option<&[String]>,
) -> Result<()> {
    let n_cols = grid.n_cols();
    let n_vars = var_list.map_or(n_cols, <[String]>::len);
    if n_vars > n_cols {
        return Err(TableError::ShapeMismatch {
            context: "variable list",
            actual: grid.shape().to_vec(),
            expected: format!("at least {n_vars} columns, one per named variable"),
        });
    }

    let mut seen = BTreeSet::new();
    for col in 0..n_vars {
        let name: Cow<'_, str> = match var_list {
            Some(names) => Cow::Borrowed(names[col].as_str()),
            None => Cow::Owned(col.to_string()),
        };
        let Some(categories) = map.get(&name) else {
            continue;
        };
        seen.insert(name.to_string());
        let lookup = categories.lookup(&name)?;
        let mut replaced = 0usize;
        for cell in grid.column_mut(col) {
            if let Cell::Label(text) = cell
                && let Some(&index) = lookup.get(text.trim())
            {
                *cell = Cell::Number(f64::from(index));
                replaced += 1;
            }
        }
        debug!(variable = %name, column = col, replaced, "applied category mapping");
    }

    for variable in map.variables().filter(|name| !seen.contains(*name)) {
        warn!(variable, "category mapping names a variable that is not in the data");
    }
    Ok(())
}

/// Coerce every cell to a number.
///
/// Labels are parsed after trimming. Labels that still do not parse are
/// collected (deduplicated) into a single `NumericConversion` error.
pub fn coerce_numeric(grid: &CellGrid) -> Result<Array2<f64>> {
    let mut values = Vec::with_capacity(grid.n_rows() * grid.n_cols());
    let mut unconvertible = BTreeSet::new();
    for cell in grid.cells() {
        match cell {
            Cell::Number(value) => values.push(*value),
            Cell::Label(text) => match text.trim().parse::<f64>() {
                Ok(value) => values.push(value),
                Err(_) => {
                    unconvertible.insert(text.trim().to_string());
                }
            },
        }
    }
    if !unconvertible.is_empty() {
        return Err(TableError::NumericConversion {
            values: unconvertible,
        });
    }
    Array2::from_shape_vec((grid.n_rows(), grid.n_cols()), values).map_err(|err| {
        TableError::ShapeMismatch {
            context: "numeric coercion",
            actual: grid.shape().to_vec(),
            expected: err.to_string(),
        }
    })
}
