//! Raw stored values of one record.
//!
//! Layout follows the host's record array:
//!
//! ```text
//! { "<event>": { "<field>": value, ... },
//!   "repeat_instances": { "<event>": { "<form>": { "<n>": { "<field>": value } } } } }
//! ```
//!
//! A value is a string, or for checkbox fields a map of choice code to
//! `"1"` (checked) / `"0"` (unchecked).

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ids::EventId;

/// Checkbox state in stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckboxValues(Vec<(String, String)>);

impl CheckboxValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the state for `code`, keeping the first position of a code
    /// that is already present.
    pub fn set(&mut self, code: impl Into<String>, state: impl Into<String>) {
        let code = code.into();
        let state = state.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == code) {
            Some(entry) => entry.1 = state,
            None => self.0.push((code, state)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == code)
            .map(|(_, state)| state.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(code, state)| (code.as_str(), state.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<C, S> FromIterator<(C, S)> for CheckboxValues
where
    C: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, S)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (code, state) in iter {
            values.set(code, state);
        }
        values
    }
}

impl Serialize for CheckboxValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, state) in &self.0 {
            map.serialize_entry(code, state)?;
        }
        map.end()
    }
}

/// A stored field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Checkbox(CheckboxValues),
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Checkbox(_) => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) => serializer.serialize_str(value),
            Self::Checkbox(values) => values.serialize(serializer),
        }
    }
}

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, or map of checkbox states")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RawValue, E> {
        Ok(RawValue::text(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<RawValue, E> {
        Ok(RawValue::Text(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<RawValue, E> {
        Ok(RawValue::Text(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<RawValue, E> {
        Ok(RawValue::Text(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<RawValue, E> {
        Ok(RawValue::Text(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<RawValue, E> {
        Ok(RawValue::text(if value { "1" } else { "0" }))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Text(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawValue, E> {
        self.visit_unit()
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawValue, A::Error> {
        let mut values = CheckboxValues::new();
        while let Some((code, state)) = access.next_entry::<String, RawValue>()? {
            let state = match state {
                RawValue::Text(state) => state,
                RawValue::Checkbox(_) => {
                    return Err(de::Error::custom(format!(
                        "nested map for checkbox code {code}"
                    )));
                }
            };
            values.set(code, state);
        }
        Ok(RawValue::Checkbox(values))
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawValueVisitor)
    }
}

/// Field name to stored value.
pub type FieldValues = BTreeMap<String, RawValue>;

/// Instance number to that instance's values.
pub type InstanceValues = BTreeMap<u32, FieldValues>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Values of non-repeating forms, keyed by event.
    #[serde(flatten)]
    pub events: BTreeMap<EventId, FieldValues>,
    /// Values of repeating forms, keyed by event then form.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub repeat_instances: BTreeMap<EventId, BTreeMap<String, InstanceValues>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_values(&self, event: &EventId) -> Option<&FieldValues> {
        self.events.get(event)
    }

    /// The highest-numbered instance of `form` within `event`.
    pub fn last_instance(&self, event: &EventId, form: &str) -> Option<(u32, &FieldValues)> {
        self.repeat_instances
            .get(event)?
            .get(form)?
            .iter()
            .next_back()
            .map(|(&instance, values)| (instance, values))
    }

    pub fn set(&mut self, event: EventId, field: impl Into<String>, value: RawValue) {
        self.events
            .entry(event)
            .or_default()
            .insert(field.into(), value);
    }

    pub fn set_instance(
        &mut self,
        event: EventId,
        form: impl Into<String>,
        instance: u32,
        field: impl Into<String>,
        value: RawValue,
    ) {
        self.repeat_instances
            .entry(event)
            .or_default()
            .entry(form.into())
            .or_default()
            .entry(instance)
            .or_default()
            .insert(field.into(), value);
    }
}
