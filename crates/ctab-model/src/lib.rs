//! Data model for categorical observations and contingency tables.
//!
//! Observations come in three interchangeable layouts ([`DataForm`]); all of
//! them normalize into a [`ContingencyTable`] shaped by a [`Dimension`].

pub mod category;
pub mod cell;
pub mod error;
pub mod form;
pub mod options;
pub mod table;

pub use category::{CategoryMap, VariableCategories};
pub use cell::{Cell, CellGrid};
pub use error::{Result, TableError};
pub use form::DataForm;
pub use options::LoadOptions;
pub use table::{ContingencyTable, Dimension};

/// Ordered variable names, one per column.
pub type VariableList = Vec<String>;
