//! Longitudinal layout: which forms belong to which events, and which
//! forms repeat.

use std::path::Path;

use acoff_model::{DataDictionary, EventId, ProjectMetadata};
use tracing::{debug, warn};

use crate::csv_table::{cell, read_csv_table};
use crate::error::Result;

const COLUMN_EVENT: &[&str] = &["unique_event_name", "event_name", "redcap_event_name"];
const COLUMN_FORM: &[&str] = &["form", "form_name", "instrument"];

/// One row of the instrument/event mapping export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEvent {
    pub form: String,
    pub event: EventId,
}

/// A form that repeats within an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingForm {
    pub event: EventId,
    pub form: String,
}

/// Loads the instrument/event mapping (`arm_num,unique_event_name,form`).
pub fn load_event_mapping(path: &Path) -> Result<Vec<FormEvent>> {
    let table = read_csv_table(path)?;
    let event = table.require_column(COLUMN_EVENT, path)?;
    let form = table.require_column(COLUMN_FORM, path)?;
    let mut mapping = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let form_name = cell(row, Some(form));
        let Ok(event_id) = EventId::new(cell(row, Some(event))) else {
            warn!(form = form_name, "mapping row without event skipped");
            continue;
        };
        if form_name.is_empty() {
            continue;
        }
        mapping.push(FormEvent {
            form: form_name.to_string(),
            event: event_id,
        });
    }
    Ok(mapping)
}

/// Loads the repeating instruments export (`event_name,form_name,...`).
///
/// Classic projects leave `event_name` blank; those rows use the default
/// event.
pub fn load_repeating_forms(path: &Path) -> Result<Vec<RepeatingForm>> {
    let table = read_csv_table(path)?;
    let event = table.column(COLUMN_EVENT);
    let form = table.require_column(COLUMN_FORM, path)?;
    Ok(table
        .rows
        .iter()
        .filter(|row| !cell(row, Some(form)).is_empty())
        .map(|row| RepeatingForm {
            event: EventId::new(cell(row, event)).unwrap_or_else(|_| EventId::default_event()),
            form: cell(row, Some(form)).to_string(),
        })
        .collect())
}

/// Assembles project metadata from the dictionary and layout exports.
///
/// Without a mapping every form belongs to the default event. Mapping rows
/// or repeating rows naming forms that the dictionary does not define are
/// ignored.
pub fn build_project_metadata(
    dictionary: &DataDictionary,
    mapping: &[FormEvent],
    repeating: &[RepeatingForm],
) -> Result<ProjectMetadata> {
    let mut builder = ProjectMetadata::builder();
    let mut forms: Vec<&str> = Vec::new();
    for entry in dictionary.entries() {
        if !forms.contains(&entry.form_name.as_str()) {
            forms.push(&entry.form_name);
        }
        builder = builder.field(entry.to_field_metadata());
    }

    if mapping.is_empty() {
        for form in &forms {
            builder = builder.attach(*form, EventId::default_event());
        }
    } else {
        for attachment in mapping {
            if !forms.contains(&attachment.form.as_str()) {
                debug!(form = %attachment.form, "mapped form not in dictionary");
                continue;
            }
            builder = builder.attach(attachment.form.clone(), attachment.event.clone());
        }
    }

    for entry in repeating {
        builder = builder.repeating(entry.event.clone(), entry.form.clone());
    }

    let metadata = builder.build()?;
    debug!(
        fields = metadata.field_count(),
        forms = forms.len(),
        "project metadata assembled"
    );
    Ok(metadata)
}
