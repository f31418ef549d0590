//! Display values for stored field data.
//!
//! Resolution order for one field:
//!
//! 1. pick the stored value (last instance for repeating forms),
//! 2. derive a sort key for the record identifier field,
//! 3. decode form statuses, then structured element types,
//! 4. reformat known date validations and key them by timestamp.

use acoff_model::{ChoiceDictionary, FieldMetadata, RawValue, Record, ValidationType};
use serde::Serialize;
use tracing::{trace, warn};

use crate::context::RenderContext;
use crate::datetime::{DatePattern, format_date, unix_timestamp};
use crate::decode::{DecodeInput, decode, decode_form_status, passthrough};

/// Width the second part of a `<site>-<number>` record id is padded to.
const RECORD_SORT_WIDTH: usize = 10;

/// A resolved, human-readable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    /// Checked checkbox options, code to label, in stored order.
    Selected(ChoiceDictionary),
}

impl DisplayValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Selected(_) => None,
        }
    }
}

/// A key that orders resolved values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum SortKey {
    Text(String),
    Timestamp(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    pub value: Option<DisplayValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<u32>,
}

impl ResolvedField {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.sort_key.is_none() && self.instance.is_none()
    }
}

/// Resolves `field_name` within `record`.
///
/// Unknown fields and unavailable metadata yield an empty result. With
/// `use_raw_value`, select and radio fields keep their stored code.
pub fn resolve_field_value(
    ctx: &RenderContext<'_>,
    field_name: &str,
    record: &Record,
    use_raw_value: bool,
) -> ResolvedField {
    let metadata = match ctx.metadata() {
        Ok(metadata) => metadata,
        Err(error) => {
            warn!(field = field_name, %error, "metadata unavailable, value not resolved");
            return ResolvedField::default();
        }
    };
    let Some(field) = metadata.field(field_name) else {
        trace!(field = field_name, "not a project field");
        return ResolvedField::default();
    };

    let mut result = ResolvedField::default();
    let raw = stored_value(ctx, field, record, &mut result);

    if metadata.is_primary_key(field_name) {
        result.sort_key = raw
            .and_then(RawValue::as_text)
            .map(|value| SortKey::Text(record_sort_key(value)));
    }

    let mut value = if metadata.is_form_status(field_name) {
        decode_form_status(raw)
    } else if field.element_type.is_unstructured() {
        passthrough(raw)
    } else {
        decode(
            &field.element_type,
            &DecodeInput {
                ctx,
                field: field_name,
                raw,
                use_raw_value,
            },
        )
    };

    let dated = field
        .validation
        .as_ref()
        .and_then(ValidationType::date_pattern)
        .and_then(|pattern| match &value {
            Some(DisplayValue::Text(text)) if !text.is_empty() => {
                Some(reformat_date(text, &DatePattern::new(pattern)))
            }
            _ => None,
        });
    match dated {
        Some(Some((timestamp, formatted))) => {
            result.sort_key = Some(SortKey::Timestamp(timestamp));
            value = Some(DisplayValue::Text(formatted));
        }
        Some(None) => warn!(field = field_name, "stored date not recognized, shown as is"),
        None => {}
    }

    result.value = value;
    result
}

fn stored_value<'r>(
    ctx: &RenderContext<'_>,
    field: &FieldMetadata,
    record: &'r Record,
    result: &mut ResolvedField,
) -> Option<&'r RawValue> {
    let form = ctx.metadata().ok()?.form(&field.form)?;
    let event = form.event_id.as_ref()?;
    if form.repeating {
        let (instance, values) = record.last_instance(event, &form.name)?;
        result.instance = Some(instance);
        values.get(&field.name)
    } else {
        record.event_values(event)?.get(&field.name)
    }
}

fn reformat_date(text: &str, pattern: &DatePattern) -> Option<(i64, String)> {
    let timestamp = unix_timestamp(text).ok()?;
    let formatted = format_date(text, Some(pattern)).ok()?;
    Some((timestamp, formatted))
}

/// `<site>-<number>` ids sort as `<site>.<number padded to 10>`; ids
/// without a `-` sort by their raw value.
pub fn record_sort_key(value: &str) -> String {
    let mut parts = value.split('-');
    match (parts.next(), parts.next()) {
        (Some(site), Some(number)) => {
            format!("{site}.{number:0>width$}", width = RECORD_SORT_WIDTH)
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sort_key_pads_second_part() {
        assert_eq!(record_sort_key("100-7"), "100.0000000007");
        assert_eq!(record_sort_key("100"), "100");
        assert_eq!(record_sort_key("1-2-3"), "1.0000000002");
        assert_eq!(record_sort_key("9-12345678901"), "9.12345678901");
    }

    #[test]
    fn sort_keys_order_text_before_timestamps() {
        assert!(SortKey::Text("z".to_string()) < SortKey::Timestamp(0));
    }

    #[test]
    fn empty_result_serializes_value_only() {
        let json = serde_json::to_string(&ResolvedField::default()).unwrap();
        assert_eq!(json, r#"{"value":null}"#);
    }
}
