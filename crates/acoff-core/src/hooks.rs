//! Host hook entry points.
//!
//! The host calls one hook at the top of every data entry form and one at
//! the top of every survey page. Both render the same fragment: the
//! autocomplete script, or an alert banner when the instrument cannot be
//! inspected.

use acoff_model::{EventId, FieldConfig, ModuleSettings};
use tracing::{debug, info_span, warn};

use crate::context::RenderContext;
use crate::error::Result;
use crate::render::{AlertKind, alert, render_autocomplete_script};
use crate::selector::select_fields_to_disable;

/// Lead-in shown on alert banners.
pub const MODULE_PREFIX: &str = "autocomplete_off";

/// Arguments the host passes to page hooks.
#[derive(Debug, Clone, Default)]
pub struct HookContext {
    pub project_id: u64,
    pub record: Option<String>,
    pub instrument: String,
    pub event_id: Option<EventId>,
    pub group_id: Option<u64>,
    pub repeat_instance: u32,
}

impl HookContext {
    pub fn for_instrument(project_id: u64, instrument: impl Into<String>) -> Self {
        Self {
            project_id,
            instrument: instrument.into(),
            repeat_instance: 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutocompleteOff {
    fields: FieldConfig,
    prefix: String,
}

impl AutocompleteOff {
    pub fn new(settings: &ModuleSettings) -> Self {
        Self {
            fields: settings.field_config(),
            prefix: MODULE_PREFIX.to_string(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn configured_fields(&self) -> &FieldConfig {
        &self.fields
    }

    pub fn data_entry_form_top(
        &self,
        ctx: &RenderContext<'_>,
        hook: &HookContext,
    ) -> Option<String> {
        let _span = info_span!(
            "data_entry_form_top",
            project_id = hook.project_id,
            instrument = %hook.instrument,
            repeat_instance = hook.repeat_instance
        )
        .entered();
        self.render_page_top(ctx, &hook.instrument)
    }

    pub fn survey_page_top(&self, ctx: &RenderContext<'_>, hook: &HookContext) -> Option<String> {
        let _span = info_span!(
            "survey_page_top",
            project_id = hook.project_id,
            instrument = %hook.instrument,
            repeat_instance = hook.repeat_instance
        )
        .entered();
        self.render_page_top(ctx, &hook.instrument)
    }

    fn render_page_top(&self, ctx: &RenderContext<'_>, instrument: &str) -> Option<String> {
        match self.autocomplete_off(ctx, instrument) {
            Ok(script) => script,
            Err(error) => {
                warn!(%error, "autocomplete script not rendered");
                Some(alert(&error.to_string(), AlertKind::Danger, &self.prefix))
            }
        }
    }

    /// The script for `instrument`, or `None` when no configured field is on it.
    pub fn autocomplete_off(
        &self,
        ctx: &RenderContext<'_>,
        instrument: &str,
    ) -> Result<Option<String>> {
        if self.fields.is_empty() {
            debug!("no fields configured");
            return Ok(None);
        }
        let instrument_fields = ctx.instrument_fields(instrument)?;
        let selectors = select_fields_to_disable(&self.fields, instrument_fields);
        debug!(selected = selectors.len(), "fields with autocomplete off");
        Ok(render_autocomplete_script(&selectors))
    }
}
