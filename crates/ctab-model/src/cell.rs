//! Rectangular input grids.
//!
//! Raw observations arrive as rows of [`Cell`]s. A cell is either a number or
//! a free-text label; the category resolver turns labels into numbers before
//! any conversion runs.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Cell {
    Number(f64),
    Label(String),
}

impl Cell {
    /// Classify raw text: anything that parses as a number after trimming is
    /// a `Number`, everything else keeps its original text as a `Label`.
    pub fn from_text(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Label(raw.to_string()),
        }
    }

    pub fn label(value: impl Into<String>) -> Self {
        Cell::Label(value.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Label(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Label(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Label(value)
    }
}

/// A row-major grid of cells where every row has the same column count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    n_cols: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Build a grid from rows, rejecting ragged input.
    ///
    /// An empty row list yields an empty grid with zero columns.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * n_cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(TableError::ShapeMismatch {
                    context: "ragged input",
                    actual: vec![idx, row.len()],
                    expected: format!("{n_cols} columns in every row"),
                });
            }
            cells.extend(row);
        }
        Ok(Self { n_cols, cells })
    }

    /// Build a grid with `n_cols` columns and no rows.
    pub fn empty(n_cols: usize) -> Self {
        Self {
            n_cols,
            cells: Vec::new(),
        }
    }

    pub fn from_numeric(values: &Array2<f64>) -> Self {
        Self {
            n_cols: values.ncols(),
            cells: values.iter().copied().map(Cell::Number).collect(),
        }
    }

    pub fn n_rows(&self) -> usize {
        if self.n_cols == 0 {
            0
        } else {
            self.cells.len() / self.n_cols
        }
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.n_rows(), self.n_cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if col >= self.n_cols {
            return None;
        }
        self.cells.get(row * self.n_cols + col)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.n_cols.max(1))
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.cells.iter().skip(col).step_by(self.n_cols.max(1))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn column_mut(&mut self, col: usize) -> impl Iterator<Item = &mut Cell> {
        let step = self.n_cols.max(1);
        self.cells.iter_mut().skip(col).step_by(step)
    }

    /// True when no cell holds a label.
    pub fn is_numeric(&self) -> bool {
        self.cells.iter().all(Cell::is_number)
    }

    /// Numeric view of the grid, or `None` if any cell is still a label.
    pub fn to_numeric(&self) -> Option<Array2<f64>> {
        let values: Option<Vec<f64>> = self.cells.iter().map(Cell::as_number).collect();
        Array2::from_shape_vec((self.n_rows(), self.n_cols), values?).ok()
    }
}
