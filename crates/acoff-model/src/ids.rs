#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Unique event name assigned by the host to every longitudinal event.
///
/// Classic (non-longitudinal) projects still carry exactly one event,
/// [`EventId::default_event`].
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct EventId(String);

/// Name the host gives the single event of a classic project.
pub const DEFAULT_EVENT_NAME: &str = "event_1_arm_1";

impl EventId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidEventId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn default_event() -> Self {
        Self(DEFAULT_EVENT_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
