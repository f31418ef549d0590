//! The host's data dictionary export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::{ElementType, ValidationType};
use crate::metadata::FieldMetadata;

/// One data dictionary row. Column names match the host's CSV export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub field_name: String,
    #[serde(default)]
    pub form_name: String,
    #[serde(default)]
    pub field_type: String,
    #[serde(default)]
    pub field_label: String,
    #[serde(default)]
    pub select_choices_or_calculations: String,
    #[serde(default)]
    pub text_validation_type_or_show_slider_number: String,
    #[serde(default)]
    pub required_field: String,
}

impl DictionaryEntry {
    pub fn element_type(&self) -> ElementType {
        ElementType::from(self.field_type.clone())
    }

    pub fn validation(&self) -> Option<ValidationType> {
        ValidationType::parse(&self.text_validation_type_or_show_slider_number)
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self.required_field.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "1"
        )
    }

    pub fn to_field_metadata(&self) -> FieldMetadata {
        FieldMetadata::new(
            self.field_name.clone(),
            self.form_name.clone(),
            self.element_type(),
        )
        .with_label(self.field_label.clone())
        .with_required(self.is_required())
        .with_validation(self.validation())
    }
}

/// Dictionary rows in export order, indexed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DictionaryEntry>", into = "Vec<DictionaryEntry>")]
pub struct DataDictionary {
    entries: Vec<DictionaryEntry>,
    index: BTreeMap<String, usize>,
}

impl DataDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a row; a repeated field name replaces the earlier row in place.
    pub fn push(&mut self, entry: DictionaryEntry) {
        match self.index.get(&entry.field_name) {
            Some(&position) => self.entries[position] = entry,
            None => {
                self.index
                    .insert(entry.field_name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&DictionaryEntry> {
        self.index.get(field).map(|&position| &self.entries[position])
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<DictionaryEntry>> for DataDictionary {
    fn from(entries: Vec<DictionaryEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<DataDictionary> for Vec<DictionaryEntry> {
    fn from(dictionary: DataDictionary) -> Self {
        dictionary.entries
    }
}

impl FromIterator<DictionaryEntry> for DataDictionary {
    fn from_iter<I: IntoIterator<Item = DictionaryEntry>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for entry in iter {
            dictionary.push(entry);
        }
        dictionary
    }
}
