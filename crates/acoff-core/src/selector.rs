//! Field selection: configured fields that appear on an instrument.

use std::collections::BTreeSet;
use std::fmt;

use acoff_model::FieldConfig;
use serde::Serialize;

/// A DOM selector for one field's input element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldSelector(String);

impl FieldSelector {
    /// `input[name='<field>']`, with `\` and `'` escaped.
    pub fn for_field(field: &str) -> Self {
        let mut escaped = String::with_capacity(field.len());
        for ch in field.chars() {
            if matches!(ch, '\\' | '\'') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        Self(format!("input[name='{escaped}']"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Selectors for every instrument field that is also configured.
///
/// Output follows `instrument_fields` order and names each field once.
pub fn select_fields_to_disable<S: AsRef<str>>(
    configured: &FieldConfig,
    instrument_fields: &[S],
) -> Vec<FieldSelector> {
    if configured.is_empty() {
        return Vec::new();
    }
    let mut seen = BTreeSet::new();
    instrument_fields
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| configured.contains(field))
        .filter(|field| seen.insert(*field))
        .map(FieldSelector::for_field)
        .collect()
}
