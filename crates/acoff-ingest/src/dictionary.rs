//! Data dictionary CSV loading.
//!
//! Both the API export (snake_case headers) and the download from the
//! project's dictionary page (`Variable / Field Name`, ...) are accepted.

use std::path::Path;

use acoff_model::{DataDictionary, DictionaryEntry};

use crate::csv_table::{cell, read_csv_table};
use crate::error::Result;

const COLUMN_FIELD_NAME: &[&str] = &["field_name", "Variable / Field Name"];
const COLUMN_FORM_NAME: &[&str] = &["form_name", "Form Name"];
const COLUMN_FIELD_TYPE: &[&str] = &["field_type", "Field Type"];
const COLUMN_FIELD_LABEL: &[&str] = &["field_label", "Field Label"];
const COLUMN_CHOICES: &[&str] = &[
    "select_choices_or_calculations",
    "Choices, Calculations, OR Slider Labels",
];
const COLUMN_VALIDATION: &[&str] = &[
    "text_validation_type_or_show_slider_number",
    "Text Validation Type OR Show Slider Number",
];
const COLUMN_REQUIRED: &[&str] = &["required_field", "Required Field?"];

pub fn load_data_dictionary(path: &Path) -> Result<DataDictionary> {
    let table = read_csv_table(path)?;
    let field_name = table.require_column(COLUMN_FIELD_NAME, path)?;
    let form_name = table.column(COLUMN_FORM_NAME);
    let field_type = table.column(COLUMN_FIELD_TYPE);
    let field_label = table.column(COLUMN_FIELD_LABEL);
    let choices = table.column(COLUMN_CHOICES);
    let validation = table.column(COLUMN_VALIDATION);
    let required = table.column(COLUMN_REQUIRED);

    let mut dictionary = DataDictionary::new();
    for row in &table.rows {
        let name = cell(row, Some(field_name));
        if name.is_empty() {
            continue;
        }
        dictionary.push(DictionaryEntry {
            field_name: name.to_string(),
            form_name: cell(row, form_name).to_string(),
            field_type: cell(row, field_type).to_string(),
            field_label: cell(row, field_label).to_string(),
            select_choices_or_calculations: cell(row, choices).to_string(),
            text_validation_type_or_show_slider_number: cell(row, validation).to_string(),
            required_field: cell(row, required).to_string(),
        });
    }
    tracing::info!(path = %path.display(), fields = dictionary.len(), "data dictionary loaded");
    Ok(dictionary)
}
