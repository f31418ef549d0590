//! Page fragments handed back to the host for output.

use std::fmt;

use crate::selector::FieldSelector;

/// Banner style of an alert fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertKind {
    Danger,
    Warning,
    #[default]
    Info,
}

impl AlertKind {
    /// Parses a banner style; unknown styles fall back to [`AlertKind::Info`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "danger" => Self::Danger,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Script that turns autocomplete off on every selected input.
///
/// Returns `None` when there is nothing to select.
pub fn render_autocomplete_script(selectors: &[FieldSelector]) -> Option<String> {
    if selectors.is_empty() {
        return None;
    }
    let joined = selectors
        .iter()
        .map(FieldSelector::as_str)
        .collect::<Vec<_>>()
        .join(",");
    Some(format!(
        "<script type='text/javascript'>\n\
         \x20   $(function () {{\n\
         \x20       $({}).prop(\"autocomplete\", \"off\");\n\
         \x20   }});\n\
         </script>\n",
        js_string(&joined)
    ))
}

/// Bootstrap alert banner, with an optional bold lead-in.
pub fn alert(contents: &str, kind: AlertKind, lead: &str) -> String {
    let lead = if lead.is_empty() {
        String::new()
    } else {
        format!("<b>{}:</b> ", escape_html(lead))
    };
    format!(
        "<div class='alert alert-{kind} mb-4'>{lead}{}</div>",
        escape_html(contents)
    )
}

/// Double-quoted JavaScript string literal that is safe inside a script tag.
fn js_string(value: &str) -> String {
    let quoted = serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""));
    quoted.replace("</", "<\\/")
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
