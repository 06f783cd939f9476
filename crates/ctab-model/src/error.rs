use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, resolving, or converting categorical data.
///
/// Every failure is returned to the immediate caller; no partially built
/// table ever escapes a failing call.
#[derive(Debug, Error)]
pub enum TableError {
    /// The data form string is not one of the known forms.
    #[error("data_form must be case_form, frequency_form, or table_form (got '{0}')")]
    InvalidForm(String),

    /// The input file does not exist.
    #[error("data file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// The input could not be read or parsed by an external reader.
    #[error("failed to read {origin}: {message}")]
    Read { origin: String, message: String },

    /// Column count or table shape disagrees with the declared dimension.
    #[error("{context}: shape {actual:?} doesn't match expected {expected}")]
    ShapeMismatch {
        context: &'static str,
        actual: Vec<usize>,
        expected: String,
    },

    /// The declared dimension is empty or has an axis with zero categories.
    #[error("invalid dimension {0:?}: every axis needs at least one category")]
    InvalidDimension(Vec<usize>),

    /// A category mapping could not be applied to a variable.
    #[error("error converting categories for variable '{variable}': {reason}")]
    CategoryMapping { variable: String, reason: String },

    /// Values that remained non-numeric after category mapping.
    #[error("could not convert categories to numeric: {}", format_values(.values))]
    NumericConversion { values: BTreeSet<String> },

    /// An observation addresses a category outside the declared dimension.
    #[error("row {row}: category {index} on axis {axis} is outside the {bound} declared categories")]
    IndexOutOfRange {
        row: usize,
        axis: usize,
        index: f64,
        bound: usize,
    },

    /// A frequency or table cell holds a negative or non-finite count.
    #[error("{location}: count {value} is not a non-negative number")]
    InvalidCount { location: String, value: f64 },

    /// The cell counts of a table sum past what a count can hold.
    #[error("counts in table of shape {shape:?} sum past {max}")]
    CountOverflow { shape: Vec<usize>, max: u64 },
}

fn format_values(values: &BTreeSet<String>) -> String {
    let quoted: Vec<String> = values.iter().map(|value| format!("'{value}'")).collect();
    format!("{{{}}}", quoted.join(", "))
}

pub type Result<T> = std::result::Result<T, TableError>;
