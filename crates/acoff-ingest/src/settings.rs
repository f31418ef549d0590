use std::path::Path;

use acoff_model::ModuleSettings;

use crate::error::{IngestError, Result};

/// Loads module settings from a JSON file.
///
/// Missing keys default to an empty configuration.
pub fn load_module_settings(path: &Path) -> Result<ModuleSettings> {
    let contents = std::fs::read_to_string(path).map_err(|e| IngestError::open(path, e))?;
    let settings: ModuleSettings =
        serde_json::from_str(&contents).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(
        path = %path.display(),
        groups = settings.autocomplete_off_fields.len(),
        "module settings loaded"
    );
    Ok(settings)
}
