//! Category label mappings.
//!
//! A [`CategoryMap`] ties each variable name to a [`VariableCategories`]
//! table of `label -> 1-based category index`. Variables are addressed either
//! by name (when a variable list is known) or by their column position
//! rendered as a string (`"0"`, `"1"`, ...).
//!
//! ## Example
//!
//! ```text
//! colour:  red -> 1, green -> 2, blue -> 3
//! size:    S -> 1, M -> 2, L -> 3
//! ```
//!
//! Labels are looked up after trimming surrounding whitespace. A label with
//! no entry is left untouched; the numeric coercion step decides whether it
//! is a usable number or an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Label to category index table for a single variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableCategories {
    /// Key: label as written by the caller. Value: 1-based category index.
    labels: BTreeMap<String, u32>,
}

impl VariableCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label, returning `self` for chaining.
    pub fn with(mut self, label: impl Into<String>, index: u32) -> Self {
        self.insert(label, index);
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, index: u32) {
        self.labels.insert(label.into(), index);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Build the trimmed lookup table used during resolution.
    ///
    /// Fails when an index is not 1-based or when two labels collapse to the
    /// same trimmed text but disagree on their index.
    pub fn lookup(&self, variable: &str) -> Result<BTreeMap<&str, u32>> {
        let mut lookup: BTreeMap<&str, u32> = BTreeMap::new();
        for (label, &index) in &self.labels {
            if index == 0 {
                return Err(TableError::CategoryMapping {
                    variable: variable.to_string(),
                    reason: format!("label '{label}' maps to 0, category indices start at 1"),
                });
            }
            let key = label.trim();
            if let Some(&existing) = lookup.get(key)
                && existing != index
            {
                return Err(TableError::CategoryMapping {
                    variable: variable.to_string(),
                    reason: format!(
                        "label '{key}' is ambiguous: mapped to both {existing} and {index}"
                    ),
                });
            }
            lookup.insert(key, index);
        }
        Ok(lookup)
    }
}

impl<L: Into<String>> FromIterator<(L, u32)> for VariableCategories {
    fn from_iter<T: IntoIterator<Item = (L, u32)>>(iter: T) -> Self {
        let mut categories = Self::new();
        for (label, index) in iter {
            categories.insert(label, index);
        }
        categories
    }
}

/// Category mappings for every variable that carries labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap {
    variables: BTreeMap<String, VariableCategories>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, name: impl Into<String>, categories: VariableCategories) -> Self {
        self.insert(name, categories);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, categories: VariableCategories) {
        self.variables.insert(name.into(), categories);
    }

    pub fn get(&self, name: &str) -> Option<&VariableCategories> {
        self.variables.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Parse a mapping from JSON of the form `{"var": {"label": 1}}`.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_trims_labels() {
        let colour = VariableCategories::new().with(" red ", 1).with("green", 2);
        let lookup = colour.lookup("colour").unwrap();
        assert_eq!(lookup.get("red"), Some(&1));
        assert_eq!(lookup.get("green"), Some(&2));
        assert_eq!(lookup.get(" red "), None);
    }

    #[test]
    fn zero_index_is_a_mapping_error() {
        let colour = VariableCategories::new().with("red", 0);
        let err = colour.lookup("colour").unwrap_err();
        assert!(matches!(
            err,
            TableError::CategoryMapping { ref variable, .. } if variable == "colour"
        ));
    }

    #[test]
    fn conflicting_trimmed_labels_are_ambiguous() {
        let colour = VariableCategories::new().with("red", 1).with("red ", 2);
        assert!(colour.lookup("colour").is_err());

        let agreeing = VariableCategories::new().with("red", 1).with("red ", 1);
        assert_eq!(agreeing.lookup("colour").unwrap().len(), 1);
    }

    #[test]
    fn parses_json_mapping() {
        let map = CategoryMap::from_json_str(r#"{"colour": {"red": 1, "blue": 2}}"#).unwrap();
        let colour = map.get("colour").expect("colour mapping");
        assert_eq!(colour.len(), 2);
        assert_eq!(map.variables().collect::<Vec<_>>(), vec!["colour"]);
    }
}
