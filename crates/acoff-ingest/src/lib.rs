//! Loaders for host project exports.
//!
//! Turns the data dictionary, instrument/event mapping, repeating forms,
//! flat record export and module settings into `acoff-model` types.

pub mod csv_table;
pub mod dictionary;
pub mod error;
pub mod layout;
pub mod records;
pub mod settings;

pub use csv_table::{CsvTable, read_csv_table};
pub use dictionary::load_data_dictionary;
pub use error::{IngestError, Result};
pub use layout::{
    FormEvent, RepeatingForm, build_project_metadata, load_event_mapping, load_repeating_forms,
};
pub use records::{FlatRow, load_flat_export, records_from_flat_export};
pub use settings::load_module_settings;
