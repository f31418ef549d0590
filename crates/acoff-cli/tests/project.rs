//! Integration tests for the subcommand operations.

use std::io::Write;
use std::path::PathBuf;

use acoff_cli::project::{
    ProjectPaths, display_text, field_choices, field_values, load_project, load_records,
    load_settings, render_script, resolve, selectors,
};
use acoff_core::SortKey;
use tempfile::TempDir;

const DICTIONARY: &str = "field_name,form_name,field_type,field_label,select_choices_or_calculations,text_validation_type_or_show_slider_number
record_id,enrollment,text,Record ID,,
phone,enrollment,text,Phone,,
enrolled_on,enrollment,text,Enrolled on,,date_mdy
arms,enrollment,checkbox,Arms,\"1, Placebo | 2, Low dose | 3, High dose\",
symptom_at,diary,text,Symptom time,,datetime_mdy
severity,diary,radio,Severity,\"0, None | 1, Mild | 2, Severe\",
";

const RECORDS: &str = r#"[
    {"record_id": "10-2", "phone": "555-0100", "enrolled_on": "2024-01-15",
     "arms___1": "0", "arms___2": "1", "arms___3": "1", "enrollment_complete": "2"},
    {"record_id": "10-2", "redcap_repeat_instrument": "diary", "redcap_repeat_instance": "1",
     "symptom_at": "2024-01-20 08:30", "severity": "1"},
    {"record_id": "10-2", "redcap_repeat_instrument": "diary", "redcap_repeat_instance": "2",
     "symptom_at": "2024-01-22 21:05", "severity": "2"},
    {"record_id": "10-11", "phone": "", "enrolled_on": "2023-11-02", "enrollment_complete": "0"},
    {"record_id": "9-1", "enrolled_on": "not a date"}
]"#;

const SETTINGS: &str = r#"{"autocomplete_off_fields": [
    {"autocomplete_off_field_name": ["symptom_at"]},
    {"autocomplete_off_field_name": ["phone", "enrolled_on"]}
]}"#;

struct Fixture {
    _dir: TempDir,
    dictionary: PathBuf,
    records: PathBuf,
    settings: PathBuf,
    repeating: Vec<String>,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            write!(file, "{content}").unwrap();
            path
        };
        let dictionary = write("dictionary.csv", DICTIONARY);
        let records = write("records.json", RECORDS);
        let settings = write("settings.json", SETTINGS);
        Self {
            _dir: dir,
            dictionary,
            records,
            settings,
            repeating: vec!["diary".to_string()],
        }
    }

    fn paths(&self) -> ProjectPaths<'_> {
        ProjectPaths {
            dictionary: &self.dictionary,
            mapping: None,
            repeating: &self.repeating,
        }
    }
}

#[test]
fn test_script_for_enrollment_form() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();
    let settings = load_settings(&fixture.settings).unwrap();

    let script = render_script(&project, &settings, "enrollment", false).unwrap();
    insta::assert_snapshot!(script, @r#"
    <script type='text/javascript'>
        $(function () {
            $("input[name='phone'],input[name='enrolled_on']").prop("autocomplete", "off");
        });
    </script>
    "#);
    assert_eq!(
        render_script(&project, &settings, "enrollment", true),
        Some(script)
    );
}

#[test]
fn test_unknown_instrument() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();
    let settings = load_settings(&fixture.settings).unwrap();

    let alert = render_script(&project, &settings, "labs", false).unwrap();
    assert!(alert.contains("alert-danger"));
    let error = selectors(&project, &settings, "labs").unwrap_err();
    assert_eq!(error.to_string(), "unknown instrument: labs");
}

#[test]
fn test_selectors_for_diary() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();
    let settings = load_settings(&fixture.settings).unwrap();

    let selected = selectors(&project, &settings, "diary").unwrap();
    let selected: Vec<_> = selected.iter().map(ToString::to_string).collect();
    assert_eq!(selected, vec!["input[name='symptom_at']"]);
}

#[test]
fn test_resolve_repeating_datetime() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();
    let records = load_records(&fixture.records, &project).unwrap();

    let resolved = resolve(&project, &records, "10-2", "symptom_at", false).unwrap();
    assert_eq!(display_text(&resolved), "01/22/2024 21:05");
    assert_eq!(resolved.instance, Some(2));

    let severity = resolve(&project, &records, "10-2", "severity", false).unwrap();
    assert_eq!(display_text(&severity), "Severe");
    let raw = resolve(&project, &records, "10-2", "severity", true).unwrap();
    assert_eq!(display_text(&raw), "2");
}

#[test]
fn test_resolve_serializes_checkbox_selection() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();
    let records = load_records(&fixture.records, &project).unwrap();

    let resolved = resolve(&project, &records, "10-2", "arms", false).unwrap();
    assert_eq!(display_text(&resolved), "Low dose, High dose");
    let json = serde_json::to_value(&resolved).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"value": [
            {"code": "2", "label": "Low dose"},
            {"code": "3", "label": "High dose"}
        ]})
    );
}

#[test]
fn test_resolve_record_id_sort_key() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();
    let records = load_records(&fixture.records, &project).unwrap();

    let resolved = resolve(&project, &records, "10-2", "record_id", false).unwrap();
    assert_eq!(
        resolved.sort_key,
        Some(SortKey::Text("10.0000000002".to_string()))
    );
}

#[test]
fn test_resolve_errors() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();
    let records = load_records(&fixture.records, &project).unwrap();

    let missing = resolve(&project, &records, "404", "phone", false).unwrap_err();
    assert_eq!(missing.to_string(), "record [REDACTED] not in export");
    let unknown = resolve(&project, &records, "10-2", "height", false).unwrap_err();
    assert_eq!(unknown.to_string(), "unknown field: height");
}

#[test]
fn test_values_by_date() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();
    let records = load_records(&fixture.records, &project).unwrap();

    let rows = field_values(&project, &records, "enrolled_on", true, false).unwrap();
    let listed: Vec<(&str, &str)> = rows
        .iter()
        .map(|row| (row.record.as_str(), row.value.as_str()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("9-1", "not a date"),
            ("10-11", "11/02/2023"),
            ("10-2", "01/15/2024"),
        ]
    );

    let newest_first = field_values(&project, &records, "enrolled_on", true, true).unwrap();
    assert_eq!(newest_first[0].record, "10-2");
}

#[test]
fn test_choices_table_source() {
    let fixture = Fixture::new();
    let project = load_project(fixture.paths()).unwrap();

    let choices = field_choices(&project, "severity").unwrap();
    let listed: Vec<_> = choices.iter().collect();
    assert_eq!(listed, vec![("0", "None"), ("1", "Mild"), ("2", "Severe")]);
    assert!(field_choices(&project, "phone").unwrap().is_empty());
}
