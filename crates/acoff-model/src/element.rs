//! Field element and validation kinds.
//!
//! The host stores both as free-form strings. They are parsed once into
//! enums so that decoding can match on a closed set of variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The widget type of a field, as reported by the data dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ElementType {
    Text,
    /// Multi-line text. Dictionary exports call this `notes`.
    Textarea,
    /// Single-choice drop-down. Dictionary exports call this `dropdown`.
    Select,
    Radio,
    Checkbox,
    YesNo,
    TrueFalse,
    /// Choices produced by a host-side query.
    Sql,
    /// Any other widget (calc, file, slider, descriptive, ...).
    Other(String),
}

impl ElementType {
    /// Free-text widgets whose stored value is already the display value.
    pub fn is_unstructured(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::YesNo => "yesno",
            Self::TrueFalse => "truefalse",
            Self::Sql => "sql",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for ElementType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(match normalized.as_str() {
            "text" => Self::Text,
            "textarea" | "notes" => Self::Textarea,
            "select" | "dropdown" => Self::Select,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "yesno" => Self::YesNo,
            "truefalse" => Self::TrueFalse,
            "sql" => Self::Sql,
            _ => Self::Other(normalized),
        })
    }
}

impl From<String> for ElementType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        }
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text validation applied to a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ValidationType {
    /// Date stored as `Y-m-d`, displayed month first.
    DateMdy,
    /// Date and time stored as `Y-m-d H:i`, displayed month first.
    DatetimeMdy,
    Other(String),
}

impl ValidationType {
    /// Parses a dictionary cell; blank cells carry no validation.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed {
            "date_mdy" => Self::DateMdy,
            "datetime_mdy" => Self::DatetimeMdy,
            other => Self::Other(other.to_string()),
        })
    }

    /// Display pattern, in the host's date token syntax, for known date kinds.
    pub fn date_pattern(&self) -> Option<&'static str> {
        match self {
            Self::DateMdy => Some("m/d/Y"),
            Self::DatetimeMdy => Some("m/d/Y G:i"),
            Self::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::DateMdy => "date_mdy",
            Self::DatetimeMdy => "datetime_mdy",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ValidationType {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or(Self::Other(value))
    }
}

impl From<ValidationType> for String {
    fn from(value: ValidationType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ValidationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
