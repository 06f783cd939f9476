//! Configuration options for loading data.

use serde::{Deserialize, Serialize};

use crate::VariableList;
use crate::category::CategoryMap;

/// Optional inputs of the loader.
///
/// All fields default to "absent", so `LoadOptions::default()` loads plain
/// numeric data positionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Variable names in column order. Filled from the header row or frame
    /// column names when `named` is set and this is `None`.
    pub var_list: Option<VariableList>,

    /// Label to category index mappings, keyed by variable name (or by
    /// column position when no variable list is known).
    pub category_map: Option<CategoryMap>,

    /// Whether the first row of a file, or the frame's columns, name the
    /// variables.
    pub named: bool,

    /// Column separator for delimited text. `None` means whitespace for
    /// unnamed files and `,` for named ones.
    pub delimiter: Option<char>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.var_list = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_category_map(mut self, map: CategoryMap) -> Self {
        self.category_map = Some(map);
        self
    }

    pub fn with_named(mut self, named: bool) -> Self {
        self.named = named;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Parse options from a JSON configuration document.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_positional_and_unnamed() {
        let options = LoadOptions::default();
        assert!(options.var_list.is_none());
        assert!(options.category_map.is_none());
        assert!(!options.named);
        assert!(options.delimiter.is_none());
    }

    #[test]
    fn parses_partial_json_config() {
        let options = LoadOptions::from_json_str(
            r#"{
                "named": true,
                "delimiter": ";",
                "category_map": {"smoker": {"no": 1, "yes": 2}}
            }"#,
        )
        .unwrap();
        assert!(options.named);
        assert_eq!(options.delimiter, Some(';'));
        assert!(options.var_list.is_none());
        let map = options.category_map.expect("category map");
        assert_eq!(map.get("smoker").map(crate::VariableCategories::len), Some(2));
    }
}
