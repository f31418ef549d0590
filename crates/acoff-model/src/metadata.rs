//! Project metadata: fields, forms, and their event/repeat layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::{ElementType, ValidationType};
use crate::error::{ModelError, Result};
use crate::ids::EventId;

/// Suffix of the status field the host adds to every form.
pub const FORM_STATUS_SUFFIX: &str = "_complete";

/// Display labels for form-status codes.
pub const FORM_STATUSES: [(&str, &str); 3] =
    [("0", "Incomplete"), ("1", "Unverified"), ("2", "Complete")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub name: String,
    /// Owning form.
    pub form: String,
    pub label: String,
    pub required: bool,
    pub element_type: ElementType,
    pub validation: Option<ValidationType>,
}

impl FieldMetadata {
    pub fn new(
        name: impl Into<String>,
        form: impl Into<String>,
        element_type: ElementType,
    ) -> Self {
        Self {
            name: name.into(),
            form: form.into(),
            label: String::new(),
            required: false,
            element_type,
            validation: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: Option<ValidationType>) -> Self {
        self.validation = validation;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMetadata {
    pub name: String,
    /// Event the form is attached to. When a form is attached to several
    /// events, the last attachment wins.
    pub event_id: Option<EventId>,
    pub repeating: bool,
    /// Field names in dictionary order, form-status field last.
    pub fields: Vec<String>,
}

impl FormMetadata {
    pub fn status_field(&self) -> String {
        format!("{}{FORM_STATUS_SUFFIX}", self.name)
    }
}

/// Read-only view of a project's fields and forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    fields: BTreeMap<String, FieldMetadata>,
    forms: BTreeMap<String, FormMetadata>,
    /// Form names in dictionary order.
    form_order: Vec<String>,
    primary_key: Option<String>,
}

impl ProjectMetadata {
    pub fn builder() -> ProjectMetadataBuilder {
        ProjectMetadataBuilder::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.get(name)
    }

    pub fn form(&self, name: &str) -> Option<&FormMetadata> {
        self.forms.get(name)
    }

    /// Forms in dictionary order.
    pub fn forms(&self) -> impl Iterator<Item = &FormMetadata> {
        self.form_order
            .iter()
            .filter_map(|name| self.forms.get(name))
    }

    /// Field names of one form in dictionary order, or `None` for an
    /// unknown form.
    pub fn form_field_names(&self, form: &str) -> Option<&[String]> {
        self.forms.get(form).map(|form| form.fields.as_slice())
    }

    /// The record identifier field: the first field of the project.
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    pub fn is_primary_key(&self, field: &str) -> bool {
        self.primary_key.as_deref() == Some(field)
    }

    /// Whether `field` is the synthesized status field of one of the forms.
    pub fn is_form_status(&self, field: &str) -> bool {
        field
            .strip_suffix(FORM_STATUS_SUFFIX)
            .is_some_and(|form| self.forms.contains_key(form))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Collects fields and form layout, then synthesizes form-status fields.
#[derive(Debug, Default)]
pub struct ProjectMetadataBuilder {
    fields: Vec<FieldMetadata>,
    attachments: Vec<(String, EventId)>,
    repeating: Vec<(EventId, String)>,
}

impl ProjectMetadataBuilder {
    #[must_use]
    pub fn field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    /// Attaches a form to an event. Later attachments replace earlier ones.
    #[must_use]
    pub fn attach(mut self, form: impl Into<String>, event: EventId) -> Self {
        self.attachments.push((form.into(), event));
        self
    }

    /// Marks a form as repeating within an event.
    #[must_use]
    pub fn repeating(mut self, event: EventId, form: impl Into<String>) -> Self {
        self.repeating.push((event, form.into()));
        self
    }

    pub fn build(self) -> Result<ProjectMetadata> {
        let mut metadata = ProjectMetadata::default();
        for field in self.fields {
            if metadata.fields.contains_key(&field.name) {
                return Err(ModelError::DuplicateField(field.name));
            }
            if metadata.primary_key.is_none() {
                metadata.primary_key = Some(field.name.clone());
            }
            let form = metadata
                .forms
                .entry(field.form.clone())
                .or_insert_with(|| FormMetadata {
                    name: field.form.clone(),
                    event_id: None,
                    repeating: false,
                    fields: Vec::new(),
                });
            if form.fields.is_empty() {
                metadata.form_order.push(field.form.clone());
            }
            form.fields.push(field.name.clone());
            metadata.fields.insert(field.name.clone(), field);
        }

        for form_name in &metadata.form_order {
            let Some(form) = metadata.forms.get_mut(form_name) else {
                continue;
            };
            let status = form.status_field();
            if metadata.fields.contains_key(&status) {
                continue;
            }
            form.fields.push(status.clone());
            metadata.fields.insert(
                status.clone(),
                FieldMetadata::new(status, form_name.clone(), ElementType::Select)
                    .with_label("Complete?"),
            );
        }

        for (form_name, event) in self.attachments {
            let form = metadata
                .forms
                .get_mut(&form_name)
                .ok_or_else(|| ModelError::UnknownForm(form_name.clone()))?;
            form.event_id = Some(event);
        }

        for (_event, form_name) in self.repeating {
            if let Some(form) = metadata.forms.get_mut(&form_name) {
                form.repeating = true;
            }
        }

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> ProjectMetadata {
        ProjectMetadata::builder()
            .field(FieldMetadata::new("record_id", "enrollment", ElementType::Text))
            .field(FieldMetadata::new("dob", "enrollment", ElementType::Text))
            .field(FieldMetadata::new("visit_date", "visits", ElementType::Text))
            .attach("enrollment", EventId::new("baseline_arm_1").unwrap())
            .attach("visits", EventId::new("baseline_arm_1").unwrap())
            .attach("visits", EventId::new("followup_arm_1").unwrap())
            .repeating(EventId::new("followup_arm_1").unwrap(), "visits")
            .build()
            .unwrap()
    }

    #[test]
    fn first_field_is_primary_key() {
        let metadata = demo();
        assert_eq!(metadata.primary_key(), Some("record_id"));
        assert!(metadata.is_primary_key("record_id"));
        assert!(!metadata.is_primary_key("dob"));
    }

    #[test]
    fn status_fields_are_synthesized_per_form() {
        let metadata = demo();
        assert_eq!(
            metadata.form_field_names("enrollment").unwrap(),
            ["record_id", "dob", "enrollment_complete"]
        );
        assert!(metadata.is_form_status("visits_complete"));
        assert!(!metadata.is_form_status("unknown_complete"));
        assert_eq!(
            metadata.field("visits_complete").unwrap().element_type,
            ElementType::Select
        );
    }

    #[test]
    fn last_event_attachment_wins() {
        let metadata = demo();
        let visits = metadata.form("visits").unwrap();
        assert_eq!(visits.event_id.as_ref().unwrap().as_str(), "followup_arm_1");
        assert!(visits.repeating);
        assert!(!metadata.form("enrollment").unwrap().repeating);
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let error = ProjectMetadata::builder()
            .field(FieldMetadata::new("a", "f", ElementType::Text))
            .field(FieldMetadata::new("a", "f", ElementType::Text))
            .build()
            .unwrap_err();
        assert_eq!(error, ModelError::DuplicateField("a".to_string()));
    }
}
