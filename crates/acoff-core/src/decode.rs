//! One decoder per element type.

use acoff_model::{ChoiceDictionary, ElementType, RawValue};
use tracing::debug;

use crate::context::RenderContext;
use crate::resolver::DisplayValue;

const YES_NO: [(&str, &str); 2] = [("1", "Yes"), ("0", "No")];
const TRUE_FALSE: [(&str, &str); 2] = [("1", "True"), ("0", "False")];

/// What a decoder sees of the field being resolved.
pub(crate) struct DecodeInput<'a, 'p> {
    pub ctx: &'a RenderContext<'p>,
    pub field: &'a str,
    pub raw: Option<&'a RawValue>,
    pub use_raw_value: bool,
}

pub(crate) fn decode(element: &ElementType, input: &DecodeInput<'_, '_>) -> Option<DisplayValue> {
    match element {
        ElementType::Select | ElementType::Radio => decode_choice(input),
        ElementType::Checkbox => decode_checkbox(input),
        ElementType::YesNo => decode_fixed(&YES_NO, input.raw),
        ElementType::TrueFalse => decode_fixed(&TRUE_FALSE, input.raw),
        ElementType::Sql => decode_sql(input),
        ElementType::Text | ElementType::Textarea | ElementType::Other(_) => {
            passthrough(input.raw)
        }
    }
}

/// The stored value as it is.
pub(crate) fn passthrough(raw: Option<&RawValue>) -> Option<DisplayValue> {
    raw.map(|raw| match raw {
        RawValue::Text(value) => DisplayValue::Text(value.clone()),
        RawValue::Checkbox(states) => {
            DisplayValue::Selected(states.iter().collect::<ChoiceDictionary>())
        }
    })
}

fn decode_choice(input: &DecodeInput<'_, '_>) -> Option<DisplayValue> {
    if input.use_raw_value {
        return passthrough(input.raw);
    }
    let Some(RawValue::Text(code)) = input.raw else {
        return passthrough(input.raw);
    };
    let label = input.ctx.choices_for(input.field).label(code).map(str::to_string);
    if label.is_none() {
        debug!(field = input.field, "stored code has no choice label");
    }
    label.map(DisplayValue::Text)
}

fn decode_checkbox(input: &DecodeInput<'_, '_>) -> Option<DisplayValue> {
    let states = match input.raw {
        Some(RawValue::Checkbox(states)) => states,
        Some(RawValue::Text(_)) => return passthrough(input.raw),
        None => return Some(DisplayValue::Selected(ChoiceDictionary::new())),
    };
    let choices = input.ctx.choices_for(input.field);
    let selected = states
        .iter()
        .filter(|(_, state)| *state == "1")
        .map(|(code, _)| (code, choices.label(code).unwrap_or_default()))
        .collect();
    Some(DisplayValue::Selected(selected))
}

fn decode_fixed(table: &[(&str, &str)], raw: Option<&RawValue>) -> Option<DisplayValue> {
    let code = raw?.as_text()?;
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, label)| DisplayValue::Text((*label).to_string()))
}

/// Custom dictionaries come from the host; an unmatched, non-empty value
/// shows as empty rather than leaking the stored code.
fn decode_sql(input: &DecodeInput<'_, '_>) -> Option<DisplayValue> {
    let Some(RawValue::Text(code)) = input.raw else {
        return passthrough(input.raw);
    };
    if let Some(label) = input
        .ctx
        .custom_dictionary(input.field)
        .and_then(|dictionary| dictionary.label(code))
    {
        return Some(DisplayValue::Text(label.to_string()));
    }
    if code.is_empty() {
        return passthrough(input.raw);
    }
    debug!(field = input.field, "sql value has no custom label, hiding it");
    Some(DisplayValue::Text(String::new()))
}

/// Form-status codes to their display labels.
pub(crate) fn decode_form_status(raw: Option<&RawValue>) -> Option<DisplayValue> {
    decode_fixed(&acoff_model::FORM_STATUSES, raw)
}
