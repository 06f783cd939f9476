//! Normalize categorical observations into contingency tables.
//!
//! Three layouts are accepted (see [`DataForm`]): individual cases, cases
//! with a trailing frequency column, and pre-aggregated tables. [`load_data`]
//! reads any of them from a file, frame, grid, or array and returns the
//! canonical [`ContingencyTable`]. [`contingency_to_case_form`] and
//! [`case_form_to_contingency`] convert in the other direction for
//! resampling and export.
//!
//! # Example
//!
//! ```
//! use ctab_core::load_data;
//! use ctab_ingest::DataSource;
//! use ctab_model::{CategoryMap, Cell, CellGrid, DataForm, Dimension, LoadOptions, VariableCategories};
//!
//! let grid = CellGrid::from_rows(vec![
//!     vec![Cell::from("yes"), Cell::from(1.0)],
//!     vec![Cell::from("no"), Cell::from(2.0)],
//!     vec![Cell::from("yes"), Cell::from(1.0)],
//! ])
//! .unwrap();
//! let options = LoadOptions::new()
//!     .with_var_list(["smoker", "group"])
//!     .with_category_map(CategoryMap::new().with_variable(
//!         "smoker",
//!         VariableCategories::new().with("no", 1).with("yes", 2),
//!     ));
//!
//! let table = load_data(
//!     DataSource::Grid(grid),
//!     DataForm::CaseForm,
//!     &Dimension::new([2, 2]).unwrap(),
//!     &options,
//! )
//! .unwrap();
//! assert_eq!(table.get(&[1, 0]), Some(2));
//! assert_eq!(table.total().unwrap(), 3);
//! ```

pub mod convert;
pub mod inverse;
pub mod loader;
pub mod resolve;

pub use convert::{case_form_to_table, frequency_form_to_table, table_form_to_table};
pub use inverse::{case_form_to_contingency, contingency_to_case_form};
pub use loader::load_data;
pub use resolve::{coerce_numeric, resolve_categories};

pub use ctab_ingest::DataSource;
pub use ctab_model::{ContingencyTable, DataForm, Dimension, LoadOptions, TableError};
