use std::fmt;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Number of categories per variable, in variable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Dimension(Vec<usize>);

impl Dimension {
    pub fn new(axes: impl Into<Vec<usize>>) -> Result<Self> {
        let axes = axes.into();
        if axes.is_empty() || axes.contains(&0) {
            return Err(TableError::InvalidDimension(axes));
        }
        Ok(Self(axes))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of variables (table axes).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.0.iter().product()
    }
}

impl TryFrom<Vec<usize>> for Dimension {
    type Error = TableError;

    fn try_from(value: Vec<usize>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Dimension> for Vec<usize> {
    fn from(value: Dimension) -> Self {
        value.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Canonical N-dimensional table of non-negative counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTable {
    counts: ArrayD<u64>,
}

impl ContingencyTable {
    /// A zero-filled table shaped like `dimension`.
    pub fn zeros(dimension: &Dimension) -> Self {
        Self {
            counts: ArrayD::zeros(IxDyn(dimension.as_slice())),
        }
    }

    pub fn from_counts(counts: ArrayD<u64>) -> Self {
        Self { counts }
    }

    pub fn shape(&self) -> &[usize] {
        self.counts.shape()
    }

    pub fn ndim(&self) -> usize {
        self.counts.ndim()
    }

    /// Sum of all cells, i.e. the number of observations represented.
    ///
    /// # Errors
    ///
    /// [`TableError::CountOverflow`] when the sum does not fit in a `u64`.
    pub fn total(&self) -> Result<u64> {
        self.counts
            .iter()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
            .ok_or_else(|| TableError::CountOverflow {
                shape: self.shape().to_vec(),
                max: u64::MAX,
            })
    }

    pub fn get(&self, index: &[usize]) -> Option<u64> {
        self.counts.get(index).copied()
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut u64> {
        self.counts.get_mut(index)
    }

    pub fn counts(&self) -> &ArrayD<u64> {
        &self.counts
    }

    pub fn into_counts(self) -> ArrayD<u64> {
        self.counts
    }
}
