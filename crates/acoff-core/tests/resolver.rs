//! Tests for display value resolution.

use acoff_core::{
    DisplayValue, RenderContext, ResolvedField, SortKey, StaticMetadata, resolve_field_value,
};
use acoff_model::{
    ChoiceDictionary, DataDictionary, DictionaryEntry, EventId, ProjectMetadata, Record,
};

fn entry(
    name: &str,
    form: &str,
    field_type: &str,
    choices: &str,
    validation: &str,
) -> DictionaryEntry {
    DictionaryEntry {
        field_name: name.to_string(),
        form_name: form.to_string(),
        field_type: field_type.to_string(),
        field_label: name.replace('_', " "),
        select_choices_or_calculations: choices.to_string(),
        text_validation_type_or_show_slider_number: validation.to_string(),
        required_field: String::new(),
    }
}

fn baseline() -> EventId {
    EventId::new("baseline_arm_1").unwrap()
}

fn provider() -> StaticMetadata {
    let dictionary: DataDictionary = [
        entry("record_id", "enrollment", "text", "", ""),
        entry("dob", "enrollment", "text", "", "date_mdy"),
        entry("colors", "enrollment", "checkbox", "1, Red|2, Blue|3, Green", ""),
        entry("smoker", "enrollment", "radio", "1, Current|0, Never", ""),
        entry("consent", "enrollment", "yesno", "", ""),
        entry("verified", "enrollment", "truefalse", "", ""),
        entry("site", "enrollment", "sql", "", ""),
        entry("comments", "enrollment", "notes", "", ""),
        entry("bmi", "enrollment", "calc", "[weight]/2", ""),
        entry("visit_at", "visits", "text", "", "datetime_mdy"),
        entry("weight", "visits", "text", "", "number"),
    ]
    .into_iter()
    .collect();

    let mut builder = ProjectMetadata::builder();
    for entry in dictionary.entries() {
        builder = builder.field(entry.to_field_metadata());
    }
    let metadata = builder
        .attach("enrollment", baseline())
        .attach("visits", baseline())
        .repeating(baseline(), "visits")
        .build()
        .unwrap();
    StaticMetadata::new(metadata, dictionary)
}

fn record() -> Record {
    serde_json::from_str(
        r#"{
            "baseline_arm_1": {
                "record_id": "100-7",
                "dob": "2024-03-05",
                "colors": {"1": "1", "2": "0", "3": "1"},
                "smoker": "0",
                "consent": "1",
                "verified": "0",
                "site": "17",
                "comments": "Prefers, phone",
                "bmi": "24.5",
                "enrollment_complete": "2"
            },
            "repeat_instances": {
                "baseline_arm_1": {
                    "visits": {
                        "1": {"visit_at": "2024-01-02 10:00", "weight": "80"},
                        "2": {"visit_at": "2024-03-05 07:04", "weight": "78"}
                    }
                }
            }
        }"#,
    )
    .unwrap()
}

fn resolve(ctx: &RenderContext<'_>, field: &str) -> ResolvedField {
    resolve_field_value(ctx, field, &record(), false)
}

fn text(value: &str) -> Option<DisplayValue> {
    Some(DisplayValue::Text(value.to_string()))
}

#[test]
fn unknown_field_is_empty() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    assert!(resolve(&ctx, "not_a_field").is_empty());
}

#[test]
fn checkbox_keeps_checked_labels() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let resolved = resolve(&ctx, "colors");
    let expected: ChoiceDictionary = [("1", "Red"), ("3", "Green")].into_iter().collect();
    assert_eq!(resolved.value, Some(DisplayValue::Selected(expected)));
}

#[test]
fn checkbox_example_from_two_choices() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let mut record = Record::new();
    record.set(
        baseline(),
        "colors",
        acoff_model::RawValue::Checkbox([("1", "1"), ("2", "0")].into_iter().collect()),
    );
    let resolved = resolve_field_value(&ctx, "colors", &record, false);
    let expected: ChoiceDictionary = [("1", "Red")].into_iter().collect();
    assert_eq!(resolved.value, Some(DisplayValue::Selected(expected)));
}

#[test]
fn radio_decodes_unless_raw_requested() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    assert_eq!(resolve(&ctx, "smoker").value, text("Never"));
    let raw = resolve_field_value(&ctx, "smoker", &record(), true);
    assert_eq!(raw.value, text("0"));
}

#[test]
fn unknown_choice_code_has_no_value() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let mut record = Record::new();
    record.set(baseline(), "smoker", "9".into());
    assert_eq!(resolve_field_value(&ctx, "smoker", &record, false).value, None);
}

#[test]
fn fixed_tables_for_yes_no_and_true_false() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    assert_eq!(resolve(&ctx, "consent").value, text("Yes"));
    assert_eq!(resolve(&ctx, "verified").value, text("False"));
}

#[test]
fn form_status_maps_codes() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    assert_eq!(resolve(&ctx, "enrollment_complete").value, text("Complete"));
}

#[test]
fn sql_without_custom_dictionary_hides_value() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    assert_eq!(resolve(&ctx, "site").value, text(""));

    let ctx = RenderContext::new(&provider)
        .with_custom_dictionary("site", ChoiceDictionary::parse("17, Boston|18, Denver"));
    assert_eq!(resolve(&ctx, "site").value, text("Boston"));
}

#[test]
fn unstructured_and_other_types_pass_through() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    assert_eq!(resolve(&ctx, "comments").value, text("Prefers, phone"));
    assert_eq!(resolve(&ctx, "bmi").value, text("24.5"));
}

#[test]
fn primary_key_sort_key_is_padded() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let resolved = resolve(&ctx, "record_id");
    assert_eq!(resolved.value, text("100-7"));
    assert_eq!(
        resolved.sort_key,
        Some(SortKey::Text("100.0000000007".to_string()))
    );

    let mut record = Record::new();
    record.set(baseline(), "record_id", "100".into());
    let resolved = resolve_field_value(&ctx, "record_id", &record, false);
    assert_eq!(resolved.sort_key, Some(SortKey::Text("100".to_string())));
}

#[test]
fn date_is_reformatted_and_keyed_by_timestamp() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let resolved = resolve(&ctx, "dob");
    assert_eq!(resolved.value, text("03/05/2024"));
    assert_eq!(resolved.sort_key, Some(SortKey::Timestamp(1_709_596_800)));
}

#[test]
fn unparseable_date_is_shown_as_stored() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let mut record = Record::new();
    record.set(baseline(), "dob", "last spring".into());
    let resolved = resolve_field_value(&ctx, "dob", &record, false);
    assert_eq!(resolved.value, text("last spring"));
    assert_eq!(resolved.sort_key, None);
}

#[test]
fn repeating_form_reads_last_instance() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let resolved = resolve(&ctx, "weight");
    assert_eq!(resolved.value, text("78"));
    assert_eq!(resolved.instance, Some(2));

    let visit = resolve(&ctx, "visit_at");
    assert_eq!(visit.value, text("03/05/2024 7:04"));
    assert_eq!(visit.sort_key, Some(SortKey::Timestamp(1_709_622_240)));
    assert_eq!(visit.instance, Some(2));
}

#[test]
fn missing_value_on_known_field_is_not_an_error() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let resolved = resolve_field_value(&ctx, "dob", &Record::new(), false);
    assert_eq!(resolved.value, None);
    assert_eq!(resolved.sort_key, None);
}

#[test]
fn resolution_is_idempotent() {
    let provider = provider();
    let ctx = RenderContext::new(&provider);
    let record = record();
    for field in ["record_id", "dob", "colors", "smoker", "weight", "site"] {
        let first = resolve_field_value(&ctx, field, &record, false);
        let second = resolve_field_value(&ctx, field, &record, false);
        assert_eq!(first, second, "field {field}");
    }
}
