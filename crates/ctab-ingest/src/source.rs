use std::path::{Path, PathBuf};

use ndarray::ArrayD;
use polars::prelude::DataFrame;

use ctab_model::{CellGrid, LoadOptions, Result};

use crate::delimited::read_delimited;
use crate::polars_utils::frame_to_raw;

/// A rectangular grid plus the variable names found alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Option<Vec<String>>,
    pub grid: CellGrid,
}

impl RawTable {
    pub fn unnamed(grid: CellGrid) -> Self {
        Self {
            headers: None,
            grid,
        }
    }
}

/// Where the loader gets its observations from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// A delimited text file.
    Path(PathBuf),
    /// An in-memory grid of numbers and labels.
    Grid(CellGrid),
    /// A data frame with named columns.
    Frame(DataFrame),
    /// An already numeric N-dimensional array (typically table form).
    Array(ArrayD<f64>),
}

impl DataSource {
    pub fn path(path: impl AsRef<Path>) -> Self {
        DataSource::Path(path.as_ref().to_path_buf())
    }

    /// Short description used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DataSource::Path(_) => "path",
            DataSource::Grid(_) => "grid",
            DataSource::Frame(_) => "frame",
            DataSource::Array(_) => "array",
        }
    }
}

impl From<CellGrid> for DataSource {
    fn from(grid: CellGrid) -> Self {
        DataSource::Grid(grid)
    }
}

impl From<DataFrame> for DataSource {
    fn from(df: DataFrame) -> Self {
        DataSource::Frame(df)
    }
}

impl From<ArrayD<f64>> for DataSource {
    fn from(values: ArrayD<f64>) -> Self {
        DataSource::Array(values)
    }
}

/// What a [`DataSource`] yields once read.
#[derive(Debug, Clone)]
pub enum SourceData {
    Table(RawTable),
    Array(ArrayD<f64>),
}

/// Read a file, frame, or grid source into a [`RawTable`].
///
/// [`DataSource::Array`] passes through untouched as [`SourceData::Array`].
pub fn read_source(source: DataSource, options: &LoadOptions) -> Result<SourceData> {
    let raw = match source {
        DataSource::Path(path) => read_delimited(&path, options.named, options.delimiter)?,
        DataSource::Frame(df) => frame_to_raw(&df, options.named)?,
        DataSource::Grid(grid) => RawTable::unnamed(grid),
        DataSource::Array(values) => return Ok(SourceData::Array(values)),
    };
    Ok(SourceData::Table(raw))
}
