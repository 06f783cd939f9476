pub mod delimited;
pub mod polars_utils;
pub mod source;

pub use delimited::read_delimited;
pub use polars_utils::{any_to_cell, any_to_f64, frame_to_raw};
pub use source::{DataSource, RawTable, SourceData, read_source};
