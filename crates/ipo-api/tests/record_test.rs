use ipo_api::{FieldValue, IpoRecord, client::decode_ipo_list, IpoError};

// ============================================================================
// Unit Tests (no network required)
// ============================================================================

#[test]
fn test_record_deserialization_full() {
    let json = r#"{
        "ipo_name": "Alpha Industries",
        "status": "Active",
        "subscription_percent": 72.5,
        "ipo_price": 120,
        "ipo_gmp": 18.5,
        "ipo_size": 1500.0,
        "lot_size": 125,
        "open_date": "2024-12-10",
        "close_date": "2024-12-12",
        "gmp_updated_date": "2024-12-11"
    }"#;

    let record: IpoRecord = serde_json::from_str(json).expect("Should deserialize");
    assert_eq!(record.name(), "Alpha Industries");
    assert_eq!(record.status_text(), Some("Active"));
    assert_eq!(record.subscription_percent, FieldValue::Number(72.5));
    assert_eq!(record.ipo_price.as_f64(), Some(120.0));
    assert_eq!(record.ipo_size.as_f64(), Some(1500.0));
    assert_eq!(record.lot_size.as_f64(), Some(125.0));
    assert_eq!(record.open_date.as_str(), Some("2024-12-10"));
    assert!(record.extra.is_empty());
}

#[test]
fn test_record_deserialization_nulls_and_missing() {
    let json = r#"{"ipo_name": "Beta", "ipo_price": null}"#;
    let record: IpoRecord = serde_json::from_str(json).expect("Should deserialize");
    assert_eq!(record.name(), "Beta");
    assert!(record.ipo_price.is_absent());
    assert!(record.ipo_gmp.is_absent());
    assert!(record.status_text().is_none());
}

#[test]
fn test_record_tolerates_schema_drift() {
    // A price delivered as text and an unknown column must not fail the row
    let json = r#"{
        "ipo_name": "Gamma",
        "ipo_price": "120-126",
        "listing_gain": 12.5,
        "exchange": "NSE"
    }"#;

    let record: IpoRecord = serde_json::from_str(json).expect("Should deserialize");
    assert_eq!(record.ipo_price, FieldValue::Text("120-126".to_string()));
    assert_eq!(record.extra.len(), 2);
    assert_eq!(record.extra.get("listing_gain"), Some(&FieldValue::Number(12.5)));
    assert_eq!(
        record.extra.get("exchange"),
        Some(&FieldValue::Text("NSE".to_string()))
    );
}

#[test]
fn test_detail_fields_skip_name_and_status() {
    let json = r#"{"ipo_name": "Delta", "status": "close", "zeta": 1, "alpha_extra": 2}"#;
    let record: IpoRecord = serde_json::from_str(json).expect("Should deserialize");

    let keys: Vec<&str> = record.detail_fields().into_iter().map(|(k, _)| k).collect();
    assert!(!keys.contains(&"ipo_name"));
    assert!(!keys.contains(&"status"));
    assert_eq!(keys, vec![
        "subscription_percent",
        "ipo_price",
        "ipo_gmp",
        "ipo_size",
        "lot_size",
        "open_date",
        "close_date",
        "gmp_updated_date",
        "alpha_extra",
        "zeta",
    ]);
}

#[test]
fn test_decode_list_preserves_order() {
    let body = serde_json::json!([
        {"ipo_name": "Zulu"},
        {"ipo_name": "Alpha"},
        {"ipo_name": "Mike"}
    ]);
    let records = decode_ipo_list(body).expect("Should decode");
    let names: Vec<String> = records.iter().map(IpoRecord::name).collect();
    assert_eq!(names, vec!["Zulu", "Alpha", "Mike"]);
}

#[test]
fn test_decode_list_empty() {
    let records = decode_ipo_list(serde_json::json!([])).expect("Should decode");
    assert!(records.is_empty());
}

#[test]
fn test_decode_list_error_object() {
    let body = serde_json::json!({"error": "[Errno 2] No such file or directory: '../ipo_data.csv'"});
    match decode_ipo_list(body) {
        Err(IpoError::Api(message)) => assert!(message.contains("No such file")),
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[test]
fn test_decode_list_unexpected_shape() {
    let result = decode_ipo_list(serde_json::json!({"message": "IPO Data API"}));
    assert!(matches!(result, Err(IpoError::InvalidData(_))));
}

#[test]
fn test_record_serialization_keeps_extra_fields() {
    let json = r#"{"ipo_name": "Echo", "exchange": "BSE"}"#;
    let record: IpoRecord = serde_json::from_str(json).expect("Should deserialize");
    let value = serde_json::to_value(&record).expect("Should serialize");
    assert_eq!(value["ipo_name"], "Echo");
    assert_eq!(value["exchange"], "BSE");
    assert!(value["ipo_price"].is_null());
}
