use super::*;

#[test]
fn test_function_all_is_in_table_order() {
    for (i, function) in Function::ALL.iter().enumerate() {
        assert_eq!(function.index(), i);
    }
    assert_eq!(Function::COUNT, 7);
}

#[test]
fn test_function_parse_accepts_name_and_code() {
    assert_eq!(
        "Maintenance Planning".parse::<Function>(),
        Ok(Function::MaintenancePlanning)
    );
    assert_eq!("moc".parse::<Function>(), Ok(Function::MaintenanceOperationsCenter));
    assert_eq!(
        "  director of maintenance ".parse::<Function>(),
        Ok(Function::DirectorOfMaintenance)
    );
    assert_eq!("RECORDS".parse::<Function>(), Ok(Function::AircraftRecords));
}

#[test]
fn test_function_parse_rejects_unknown() {
    let err = "Flight Operations".parse::<Function>().unwrap_err();
    assert_eq!(err.value, "Flight Operations");
    assert!(err.to_string().contains("Flight Operations"));
}

#[test]
fn test_function_serde_uses_display_name() {
    let json = serde_json::to_string(&Function::AircraftRecords).unwrap();
    assert_eq!(json, "\"Aircraft Records\"");

    let parsed: Function = serde_json::from_str("\"SAFETY\"").unwrap();
    assert_eq!(parsed, Function::Safety);

    assert!(serde_json::from_str::<Function>("\"Finance\"").is_err());
}

#[test]
fn test_question_missing_fields_deserialize_empty() {
    let question: Question = serde_json::from_str(r#"{"qid": "1.1.1"}"#).unwrap();
    assert_eq!(question.qid, "1.1.1");
    assert!(question.text_full.is_empty());
    assert!(question.citations.is_empty());
    assert!(question.notes.is_empty());
}

#[test]
fn test_question_reference_string() {
    let question = Question::new("q", "text").with_citations(["121.369", "121.373"]);
    assert_eq!(question.reference_string(), "121.369, 121.373");
}

#[test]
fn test_section_builder() {
    let section = ManualSection::new("s1", "m1", "GMM")
        .with_number("6.4")
        .with_title("Deferred Items")
        .with_page(12);
    assert_eq!(section.section_number.as_deref(), Some("6.4"));
    assert_eq!(section.page_number, Some(12));
    assert!(section.text.is_empty());
}
