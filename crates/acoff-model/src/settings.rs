//! Module settings and the configured field set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One repeatable settings group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteOffGroup {
    /// Field names picked in the settings dialog. Unset pickers are `null`.
    #[serde(default)]
    pub autocomplete_off_field_name: Vec<Option<String>>,
}

/// Project-level settings of the module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSettings {
    #[serde(default)]
    pub autocomplete_off_fields: Vec<AutocompleteOffGroup>,
}

impl ModuleSettings {
    pub fn field_config(&self) -> FieldConfig {
        self.autocomplete_off_fields
            .iter()
            .flat_map(|group| group.autocomplete_off_field_name.iter())
            .filter_map(Option::as_deref)
            .collect()
    }
}

/// Deduplicated set of configured field names.
///
/// Blank names never enter the set. Serialized as a plain list of names;
/// `null` and blank entries are dropped when reading one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<String>>", into = "Vec<String>")]
pub struct FieldConfig {
    fields: BTreeSet<String>,
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.fields.insert(trimmed.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for FieldConfig {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut config = Self::new();
        for name in iter {
            config.insert(name);
        }
        config
    }
}

impl<'a> FromIterator<Option<&'a str>> for FieldConfig {
    fn from_iter<I: IntoIterator<Item = Option<&'a str>>>(iter: I) -> Self {
        iter.into_iter().flatten().collect()
    }
}

impl From<Vec<Option<String>>> for FieldConfig {
    fn from(names: Vec<Option<String>>) -> Self {
        names.iter().map(Option::as_deref).collect()
    }
}

impl From<FieldConfig> for Vec<String> {
    fn from(config: FieldConfig) -> Self {
        config.fields.into_iter().collect()
    }
}
