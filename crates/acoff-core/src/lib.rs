//! Autocomplete suppression for data entry forms and surveys, plus display
//! value resolution over the host's project metadata.

pub mod context;
pub mod datetime;
mod decode;
pub mod error;
pub mod hooks;
pub mod render;
pub mod resolver;
pub mod selector;
pub mod sort;

pub use acoff_model::flatten_choice_string;
pub use context::{MetadataProvider, RenderContext, StaticMetadata};
pub use datetime::{DatePattern, format_date, parse_datetime, unix_timestamp};
pub use error::{CoreError, DateError, Result};
pub use hooks::{AutocompleteOff, HookContext, MODULE_PREFIX};
pub use render::{AlertKind, alert, render_autocomplete_script};
pub use resolver::{DisplayValue, ResolvedField, SortKey, record_sort_key, resolve_field_value};
pub use selector::{FieldSelector, select_fields_to_disable};
pub use sort::{FieldLookup, sort_by_date_field};
