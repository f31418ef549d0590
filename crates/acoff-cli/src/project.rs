//! Project loading and the operations behind each subcommand.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info_span};

use acoff_core::{
    AutocompleteOff, DisplayValue, FieldSelector, HookContext, RenderContext, ResolvedField,
    StaticMetadata, resolve_field_value, select_fields_to_disable, sort_by_date_field,
};
use acoff_ingest::{
    RepeatingForm, build_project_metadata, load_data_dictionary, load_event_mapping,
    load_flat_export, load_module_settings, records_from_flat_export,
};
use acoff_model::{ChoiceDictionary, EventId, ModuleSettings, Record};

use crate::logging::redact_value;

/// Exports describing one project.
#[derive(Debug, Clone, Copy)]
pub struct ProjectPaths<'a> {
    pub dictionary: &'a Path,
    pub mapping: Option<&'a Path>,
    pub repeating: &'a [String],
}

pub fn load_project(paths: ProjectPaths<'_>) -> Result<StaticMetadata> {
    let dictionary = load_data_dictionary(paths.dictionary)
        .with_context(|| format!("load data dictionary {}", paths.dictionary.display()))?;
    let mapping = match paths.mapping {
        Some(path) => load_event_mapping(path)
            .with_context(|| format!("load event mapping {}", path.display()))?,
        None => Vec::new(),
    };
    let repeating: Vec<RepeatingForm> = paths
        .repeating
        .iter()
        .map(|form| RepeatingForm {
            event: EventId::default_event(),
            form: form.clone(),
        })
        .collect();
    let metadata =
        build_project_metadata(&dictionary, &mapping, &repeating).context("build metadata")?;
    Ok(StaticMetadata::new(metadata, dictionary))
}

pub fn load_settings(path: &Path) -> Result<ModuleSettings> {
    load_module_settings(path).with_context(|| format!("load settings {}", path.display()))
}

pub fn load_records(path: &Path, project: &StaticMetadata) -> Result<BTreeMap<String, Record>> {
    let rows =
        load_flat_export(path).with_context(|| format!("load records {}", path.display()))?;
    records_from_flat_export(&rows, &project.metadata).context("fold record export")
}

/// Page-top output for `instrument`, as the host would inject it.
pub fn render_script(
    project: &StaticMetadata,
    settings: &ModuleSettings,
    instrument: &str,
    survey: bool,
) -> Option<String> {
    let ctx = RenderContext::new(project);
    let module = AutocompleteOff::new(settings);
    let hook = HookContext::for_instrument(0, instrument);
    if survey {
        module.survey_page_top(&ctx, &hook)
    } else {
        module.data_entry_form_top(&ctx, &hook)
    }
}

pub fn selectors(
    project: &StaticMetadata,
    settings: &ModuleSettings,
    instrument: &str,
) -> Result<Vec<FieldSelector>> {
    let ctx = RenderContext::new(project);
    let fields = ctx.instrument_fields(instrument)?;
    Ok(select_fields_to_disable(&settings.field_config(), fields))
}

pub fn resolve(
    project: &StaticMetadata,
    records: &BTreeMap<String, Record>,
    record_id: &str,
    field: &str,
    use_raw_value: bool,
) -> Result<ResolvedField> {
    let _span = info_span!("resolve", record = redact_value(record_id), field).entered();
    let record = records
        .get(record_id)
        .ok_or_else(|| anyhow!("record {} not in export", redact_value(record_id)))?;
    if project.metadata.field(field).is_none() {
        return Err(anyhow!("unknown field: {field}"));
    }
    let ctx = RenderContext::new(project);
    Ok(resolve_field_value(&ctx, field, record, use_raw_value))
}

/// One row of the `values` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRow {
    pub record: String,
    pub value: String,
    pub instance: Option<u32>,
}

/// Resolved `field` for every record. With `by_date` the rows are ordered
/// by the displayed date, record id breaking ties.
pub fn field_values(
    project: &StaticMetadata,
    records: &BTreeMap<String, Record>,
    field: &str,
    by_date: bool,
    descending: bool,
) -> Result<Vec<ValueRow>> {
    if project.metadata.field(field).is_none() {
        return Err(anyhow!("unknown field: {field}"));
    }
    let ctx = RenderContext::new(project);
    let mut rows: Vec<(ValueRow, BTreeMap<String, String>)> = records
        .iter()
        .map(|(record_id, record)| {
            let resolved = resolve_field_value(&ctx, field, record, false);
            let value = display_text(&resolved);
            let keys = BTreeMap::from([
                ("record".to_string(), record_id.clone()),
                ("value".to_string(), value.clone()),
            ]);
            let row = ValueRow {
                record: record_id.clone(),
                value,
                instance: resolved.instance,
            };
            (row, keys)
        })
        .collect();
    if by_date {
        sort_by_date_field(&mut rows, "value", "record", descending);
    } else if descending {
        rows.reverse();
    }
    debug!(rows = rows.len(), "field values resolved");
    Ok(rows.into_iter().map(|(row, _)| row).collect())
}

/// Text shown for a resolved value; checkbox selections join their labels.
pub fn display_text(resolved: &ResolvedField) -> String {
    match &resolved.value {
        None => String::new(),
        Some(DisplayValue::Text(text)) => text.clone(),
        Some(DisplayValue::Selected(selected)) => selected
            .iter()
            .map(|(_, label)| label)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Choices of `field` in dictionary order.
pub fn field_choices(project: &StaticMetadata, field: &str) -> Result<ChoiceDictionary> {
    if project.metadata.field(field).is_none() {
        return Err(anyhow!("unknown field: {field}"));
    }
    let ctx = RenderContext::new(project);
    Ok(ctx.choices_for(field).as_ref().clone())
}
