pub mod choices;
pub mod dictionary;
pub mod element;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod record;
pub mod settings;

pub use choices::{Choice, ChoiceDictionary, flatten_choice_string};
pub use dictionary::{DataDictionary, DictionaryEntry};
pub use element::{ElementType, ValidationType};
pub use error::{ModelError, Result};
pub use ids::{DEFAULT_EVENT_NAME, EventId};
pub use metadata::{
    FORM_STATUS_SUFFIX, FORM_STATUSES, FieldMetadata, FormMetadata, ProjectMetadata,
    ProjectMetadataBuilder,
};
pub use record::{CheckboxValues, FieldValues, InstanceValues, RawValue, Record};
pub use settings::{AutocompleteOffGroup, FieldConfig, ModuleSettings};
