//! The three interchangeable layouts of categorical data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// Layout of the data handed to the loader.
///
/// - **CaseForm**: one row per observation, one 1-based category per column.
/// - **FrequencyForm**: case form plus a trailing count column.
/// - **TableForm**: an already aggregated N-dimensional count table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataForm {
    CaseForm,
    FrequencyForm,
    TableForm,
}

impl DataForm {
    /// Returns the canonical name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataForm::CaseForm => "case_form",
            DataForm::FrequencyForm => "frequency_form",
            DataForm::TableForm => "table_form",
        }
    }

    /// Whether rows of this form carry category labels that can be mapped.
    pub fn is_row_oriented(&self) -> bool {
        matches!(self, DataForm::CaseForm | DataForm::FrequencyForm)
    }
}

impl fmt::Display for DataForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataForm {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "case_form" => Ok(DataForm::CaseForm),
            "frequency_form" => Ok(DataForm::FrequencyForm),
            "table_form" => Ok(DataForm::TableForm),
            _ => Err(TableError::InvalidForm(s.to_string())),
        }
    }
}
