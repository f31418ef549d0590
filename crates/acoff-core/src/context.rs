//! Per-request cache over the host's metadata.
//!
//! A [`RenderContext`] is built once per page render (or CLI invocation)
//! and threaded through every call. Project metadata, the data dictionary,
//! and parsed choice dictionaries are fetched on first use and kept for the
//! lifetime of the context; nothing is ever invalidated.

use std::cell::{OnceCell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use acoff_model::{ChoiceDictionary, DataDictionary, EventId, ProjectMetadata, ValidationType};
use tracing::{debug, warn};

use crate::error::{CoreError, Result};

/// Read-only source of project metadata, supplied by the host.
pub trait MetadataProvider {
    fn project_metadata(&self) -> Result<ProjectMetadata>;

    fn data_dictionary(&self) -> Result<DataDictionary>;
}

/// Provider over metadata that is already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    pub metadata: ProjectMetadata,
    pub dictionary: DataDictionary,
}

impl StaticMetadata {
    pub fn new(metadata: ProjectMetadata, dictionary: DataDictionary) -> Self {
        Self {
            metadata,
            dictionary,
        }
    }

    /// Builds project metadata from the dictionary alone; every form lands
    /// in the default event and nothing repeats.
    pub fn from_dictionary(dictionary: DataDictionary) -> Result<Self> {
        let mut builder = ProjectMetadata::builder();
        let mut forms: Vec<&str> = Vec::new();
        for entry in dictionary.entries() {
            if !forms.contains(&entry.form_name.as_str()) {
                forms.push(&entry.form_name);
            }
            builder = builder.field(entry.to_field_metadata());
        }
        for form in forms {
            builder = builder.attach(form, EventId::default_event());
        }
        let metadata = builder.build()?;
        Ok(Self::new(metadata, dictionary))
    }
}

impl MetadataProvider for StaticMetadata {
    fn project_metadata(&self) -> Result<ProjectMetadata> {
        Ok(self.metadata.clone())
    }

    fn data_dictionary(&self) -> Result<DataDictionary> {
        Ok(self.dictionary.clone())
    }
}

pub struct RenderContext<'p> {
    provider: &'p dyn MetadataProvider,
    metadata: OnceCell<ProjectMetadata>,
    dictionary: OnceCell<DataDictionary>,
    choices: RefCell<BTreeMap<String, Rc<ChoiceDictionary>>>,
    custom_dictionaries: BTreeMap<String, ChoiceDictionary>,
}

impl<'p> RenderContext<'p> {
    pub fn new(provider: &'p dyn MetadataProvider) -> Self {
        Self {
            provider,
            metadata: OnceCell::new(),
            dictionary: OnceCell::new(),
            choices: RefCell::new(BTreeMap::new()),
            custom_dictionaries: BTreeMap::new(),
        }
    }

    /// Registers a host-supplied dictionary for an `sql` field.
    #[must_use]
    pub fn with_custom_dictionary(
        mut self,
        field: impl Into<String>,
        dictionary: ChoiceDictionary,
    ) -> Self {
        self.custom_dictionaries.insert(field.into(), dictionary);
        self
    }

    pub fn metadata(&self) -> Result<&ProjectMetadata> {
        if let Some(metadata) = self.metadata.get() {
            return Ok(metadata);
        }
        let loaded = self.provider.project_metadata()?;
        debug!(fields = loaded.field_count(), "project metadata cached");
        Ok(self.metadata.get_or_init(|| loaded))
    }

    pub fn data_dictionary(&self) -> Result<&DataDictionary> {
        if let Some(dictionary) = self.dictionary.get() {
            return Ok(dictionary);
        }
        let loaded = self.provider.data_dictionary()?;
        debug!(entries = loaded.len(), "data dictionary cached");
        Ok(self.dictionary.get_or_init(|| loaded))
    }

    /// Field names of an instrument, in form order.
    pub fn instrument_fields(&self, instrument: &str) -> Result<&[String]> {
        self.metadata()?
            .form_field_names(instrument)
            .ok_or_else(|| CoreError::UnknownInstrument(instrument.to_string()))
    }

    /// Parsed choices of `field`. An unavailable dictionary or unknown field
    /// yields an empty dictionary.
    pub fn choices_for(&self, field: &str) -> Rc<ChoiceDictionary> {
        if let Some(cached) = self.choices.borrow().get(field) {
            return Rc::clone(cached);
        }
        let parsed = match self.data_dictionary() {
            Ok(dictionary) => dictionary
                .get(field)
                .map(|entry| ChoiceDictionary::parse(&entry.select_choices_or_calculations))
                .unwrap_or_default(),
            Err(error) => {
                warn!(field, %error, "data dictionary unavailable, no choices");
                ChoiceDictionary::new()
            }
        };
        let parsed = Rc::new(parsed);
        self.choices
            .borrow_mut()
            .insert(field.to_string(), Rc::clone(&parsed));
        parsed
    }

    pub fn custom_dictionary(&self, field: &str) -> Option<&ChoiceDictionary> {
        self.custom_dictionaries.get(field)
    }

    /// Validation type of `field` from the data dictionary.
    pub fn field_validation_type(&self, field: &str) -> Option<ValidationType> {
        self.data_dictionary()
            .ok()?
            .get(field)
            .and_then(acoff_model::DictionaryEntry::validation)
    }

    /// Dictionary label of `field`, or the field name when it has none.
    pub fn dictionary_label(&self, field: &str) -> String {
        self.data_dictionary()
            .ok()
            .and_then(|dictionary| dictionary.get(field))
            .map(|entry| entry.field_label.trim())
            .filter(|label| !label.is_empty())
            .unwrap_or(field)
            .to_string()
    }
}
