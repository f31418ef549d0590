use acoff_model::{ChoiceDictionary, ElementType, EventId, RawValue, Record, flatten_choice_string};

#[test]
fn flatten_yes_no() {
    let dictionary = flatten_choice_string("1, Yes|0, No");
    let pairs: Vec<_> = dictionary.iter().collect();
    assert_eq!(pairs, vec![("1", "Yes"), ("0", "No")]);
}

#[test]
fn flatten_keeps_commas_in_labels() {
    let dictionary = flatten_choice_string("1, Red, White, Blue|2, Green");
    assert_eq!(dictionary.label("1"), Some("Red, White, Blue"));
    assert_eq!(dictionary.label("2"), Some("Green"));
    assert_eq!(dictionary.len(), 2);
}

#[test]
fn choice_dictionary_serializes_in_order() {
    let dictionary = ChoiceDictionary::parse("2, Two|1, One");
    let json = serde_json::to_string(&dictionary).unwrap();
    assert_eq!(
        json,
        r#"[{"code":"2","label":"Two"},{"code":"1","label":"One"}]"#
    );
    let round: ChoiceDictionary = serde_json::from_str(&json).unwrap();
    assert_eq!(round, dictionary);
}

#[test]
fn record_deserializes_host_layout() {
    let record: Record = serde_json::from_str(
        r#"{
            "baseline_arm_1": {
                "record_id": "100-7",
                "age": 42,
                "colors": {"1": "1", "2": "0"}
            },
            "repeat_instances": {
                "baseline_arm_1": {
                    "visits": {
                        "1": {"visit_date": "2024-01-02"},
                        "3": {"visit_date": "2024-03-05"}
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let event = EventId::new("baseline_arm_1").unwrap();
    let values = record.event_values(&event).unwrap();
    assert_eq!(values.get("record_id"), Some(&RawValue::text("100-7")));
    assert_eq!(values.get("age"), Some(&RawValue::text("42")));
    match values.get("colors") {
        Some(RawValue::Checkbox(states)) => {
            assert_eq!(states.get("1"), Some("1"));
            assert_eq!(states.get("2"), Some("0"));
        }
        other => panic!("expected checkbox states, got {other:?}"),
    }

    let (instance, visit) = record.last_instance(&event, "visits").unwrap();
    assert_eq!(instance, 3);
    assert_eq!(visit.get("visit_date"), Some(&RawValue::text("2024-03-05")));
}

#[test]
fn element_type_round_trips_through_serde() {
    let json = serde_json::to_string(&ElementType::YesNo).unwrap();
    assert_eq!(json, r#""yesno""#);
    let parsed: ElementType = serde_json::from_str(r#""notes""#).unwrap();
    assert_eq!(parsed, ElementType::Textarea);
}
