//! Polars AnyValue utility functions.
//!
//! This module converts Polars `AnyValue`s and whole `DataFrame`s into the
//! cell grids consumed by the category resolver.

use polars::prelude::*;

use ctab_model::{Cell, CellGrid, Result, TableError};

use crate::source::RawTable;

/// Converts an AnyValue to f64, returning None for non-numeric or null values.
pub fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Converts a Polars AnyValue into a grid cell.
/// Numbers and booleans become `Number`, nulls an empty label, anything else
/// its text.
pub fn any_to_cell(value: AnyValue<'_>) -> Cell {
    if let Some(number) = any_to_f64(&value) {
        return Cell::Number(number);
    }
    match value {
        AnyValue::Null => Cell::Label(String::new()),
        AnyValue::String(s) => Cell::Label(s.to_string()),
        AnyValue::StringOwned(s) => Cell::Label(s.to_string()),
        other => Cell::Label(other.to_string()),
    }
}

/// Extract every row of a frame, plus its column names when `named`.
pub fn frame_to_raw(df: &DataFrame, named: bool) -> Result<RawTable> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column.get(idx).map_err(|err| TableError::Read {
                origin: format!("data frame column '{}'", column.name()),
                message: err.to_string(),
            })?;
            row.push(any_to_cell(value));
        }
        rows.push(row);
    }
    let headers = named.then(|| {
        df.get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    });
    let grid = if rows.is_empty() {
        CellGrid::empty(columns.len())
    } else {
        CellGrid::from_rows(rows)?
    };
    Ok(RawTable { headers, grid })
}
