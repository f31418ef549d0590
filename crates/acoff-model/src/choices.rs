//! Choice dictionaries for select, radio, and checkbox fields.
//!
//! The data dictionary stores choices as one string:
//!
//! ```text
//! 1, Red, White, Blue|2, Green|3, Other
//! ```
//!
//! Segments are split on `|`, then each segment on its first `, `.
//! Everything after that separator is the label, commas included.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One code/label pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub code: String,
    pub label: String,
}

/// Ordered mapping from stored code to display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Choice>", into = "Vec<Choice>")]
pub struct ChoiceDictionary {
    choices: Vec<Choice>,
    positions: BTreeMap<String, usize>,
}

impl ChoiceDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a pipe-delimited, comma-delimited choice string.
    pub fn parse(source: &str) -> Self {
        let mut dictionary = Self::new();
        for segment in source.split('|') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (code, label) = match segment.split_once(", ") {
                Some((code, label)) => (code, label),
                None => (segment, ""),
            };
            dictionary.insert(code.trim(), label);
        }
        dictionary
    }

    /// Adds a choice. A code that is already present keeps its first label.
    pub fn insert(&mut self, code: impl Into<String>, label: impl Into<String>) -> bool {
        let code = code.into();
        if self.positions.contains_key(&code) {
            return false;
        }
        self.positions.insert(code.clone(), self.choices.len());
        self.choices.push(Choice {
            code,
            label: label.into(),
        });
        true
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.positions
            .get(code)
            .map(|&index| self.choices[index].label.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.positions.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.choices
            .iter()
            .map(|choice| (choice.code.as_str(), choice.label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl From<Vec<Choice>> for ChoiceDictionary {
    fn from(choices: Vec<Choice>) -> Self {
        let mut dictionary = Self::new();
        for choice in choices {
            dictionary.insert(choice.code, choice.label);
        }
        dictionary
    }
}

impl From<ChoiceDictionary> for Vec<Choice> {
    fn from(dictionary: ChoiceDictionary) -> Self {
        dictionary.choices
    }
}

impl<C, L> FromIterator<(C, L)> for ChoiceDictionary
where
    C: Into<String>,
    L: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, L)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (code, label) in iter {
            dictionary.insert(code, label);
        }
        dictionary
    }
}

/// Parses a choice string into an ordered code/label dictionary.
pub fn flatten_choice_string(source: &str) -> ChoiceDictionary {
    ChoiceDictionary::parse(source)
}
