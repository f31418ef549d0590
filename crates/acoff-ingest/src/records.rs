//! Flat record exports.
//!
//! The host exports one row per record, event and repeat instance. This
//! module folds those rows back into nested [`Record`]s.

use std::collections::BTreeMap;
use std::path::Path;

use acoff_model::{CheckboxValues, ElementType, EventId, ProjectMetadata, RawValue, Record};
use serde_json::{Map, Value};
use tracing::debug;

use crate::csv_table::read_csv_table;
use crate::error::{IngestError, Result};

pub const EVENT_COLUMN: &str = "redcap_event_name";
pub const REPEAT_INSTRUMENT_COLUMN: &str = "redcap_repeat_instrument";
pub const REPEAT_INSTANCE_COLUMN: &str = "redcap_repeat_instance";
const CHECKBOX_SEPARATOR: &str = "___";

/// One flat export row, column name to cell.
pub type FlatRow = Map<String, Value>;

/// Loads a flat export. `.json` files hold an array of row objects; any
/// other extension is read as CSV.
pub fn load_flat_export(path: &Path) -> Result<Vec<FlatRow>> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let rows = if is_json {
        let contents = std::fs::read_to_string(path).map_err(|e| IngestError::open(path, e))?;
        serde_json::from_str::<Vec<FlatRow>>(&contents).map_err(|source| {
            IngestError::JsonParse {
                path: path.to_path_buf(),
                source,
            }
        })?
    } else {
        let table = read_csv_table(path)?;
        table
            .rows
            .iter()
            .map(|row| {
                table
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| (header.clone(), Value::String(cell.clone())))
                    .collect()
            })
            .collect()
    };
    tracing::info!(path = %path.display(), rows = rows.len(), "record export loaded");
    Ok(rows)
}

/// Folds flat export rows into records keyed by record id.
///
/// Rows of a repeating form keep only that form's fields. Other rows keep
/// every field that does not belong to a repeating form. Unknown columns
/// are ignored.
pub fn records_from_flat_export(
    rows: &[FlatRow],
    metadata: &ProjectMetadata,
) -> Result<BTreeMap<String, Record>> {
    let primary_key = metadata
        .primary_key()
        .ok_or_else(|| IngestError::InvalidRow {
            row: 0,
            reason: "project has no fields".to_string(),
        })?;

    let mut records: BTreeMap<String, Record> = BTreeMap::new();
    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let record_id = text_cell(row, primary_key);
        if record_id.is_empty() {
            return Err(IngestError::InvalidRow {
                row: row_number,
                reason: format!("missing {primary_key}"),
            });
        }

        let event_name = text_cell(row, EVENT_COLUMN);
        let event = if event_name.is_empty() {
            EventId::default_event()
        } else {
            EventId::new(event_name)?
        };
        let repeat = repeat_target(row, row_number)?;
        let values = row_values(row, metadata, row_number)?;

        let record = records.entry(record_id.clone()).or_default();
        record.set(
            event.clone(),
            primary_key,
            RawValue::text(record_id.as_str()),
        );
        for (field, value) in values {
            if field == primary_key {
                continue;
            }
            let Some(form) = metadata.field(&field).and_then(|f| metadata.form(&f.form)) else {
                continue;
            };
            match &repeat {
                Some((instrument, instance)) => {
                    if form.name == *instrument {
                        record.set_instance(
                            event.clone(),
                            instrument.as_str(),
                            *instance,
                            field,
                            value,
                        );
                    }
                }
                None if !form.repeating => record.set(event.clone(), field, value),
                None => {}
            }
        }
    }
    debug!(records = records.len(), "flat export folded");
    Ok(records)
}

fn repeat_target(row: &FlatRow, row_number: usize) -> Result<Option<(String, u32)>> {
    let instrument = text_cell(row, REPEAT_INSTRUMENT_COLUMN);
    if instrument.is_empty() {
        return Ok(None);
    }
    let raw = text_cell(row, REPEAT_INSTANCE_COLUMN);
    let instance = raw
        .parse::<u32>()
        .ok()
        .filter(|instance| *instance > 0)
        .ok_or_else(|| IngestError::InvalidRow {
            row: row_number,
            reason: format!("invalid repeat instance {raw:?} for {instrument}"),
        })?;
    Ok(Some((instrument, instance)))
}

/// Field values of one row, with `field___code` columns folded into
/// checkbox maps.
fn row_values(
    row: &FlatRow,
    metadata: &ProjectMetadata,
    row_number: usize,
) -> Result<BTreeMap<String, RawValue>> {
    let mut values = BTreeMap::new();
    let mut checkboxes: BTreeMap<String, CheckboxValues> = BTreeMap::new();
    for (column, cell) in row {
        if metadata.field(column).is_some() {
            let value = serde_json::from_value::<RawValue>(cell.clone()).map_err(|e| {
                IngestError::InvalidRow {
                    row: row_number,
                    reason: format!("{column}: {e}"),
                }
            })?;
            values.insert(column.clone(), value);
            continue;
        }
        let Some((field, code)) = column.split_once(CHECKBOX_SEPARATOR) else {
            continue;
        };
        let is_checkbox = metadata
            .field(field)
            .is_some_and(|f| f.element_type == ElementType::Checkbox);
        if is_checkbox {
            checkboxes
                .entry(field.to_string())
                .or_default()
                .set(code, value_text(cell));
        }
    }
    for (field, states) in checkboxes {
        values.insert(field, RawValue::Checkbox(states));
    }
    Ok(values)
}

fn text_cell(row: &FlatRow, column: &str) -> String {
    row.get(column).map(value_text).unwrap_or_default()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_bools_read_as_text() {
        assert_eq!(value_text(&json!(3)), "3");
        assert_eq!(value_text(&json!(true)), "1");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(" a ")), "a");
    }

    #[test]
    fn repeat_instance_must_be_positive() {
        let row: FlatRow = serde_json::from_value(json!({
            "redcap_repeat_instrument": "visits",
            "redcap_repeat_instance": "0"
        }))
        .unwrap();
        assert!(matches!(
            repeat_target(&row, 4),
            Err(IngestError::InvalidRow { row: 4, .. })
        ));
    }
}
