use cypher_middleware::prelude::*;
use serde_json::json;

#[test]
fn statement_payload_serializes_as_a_single_field_object() {
    let statement = CypherStatement::new("MATCH (n) RETURN COUNT(n)");
    assert_eq!(
        serde_json::to_value(&statement).expect("serialize"),
        json!({"statement": "MATCH (n) RETURN COUNT(n)"})
    );
}

#[test]
fn statement_payload_round_trips() {
    let payload = r#"{"statement":"CREATE (n:Bolt) RETURN n.name"}"#;
    let statement: CypherStatement = serde_json::from_str(payload).expect("deserialize");
    assert_eq!(statement.statement(), "CREATE (n:Bolt) RETURN n.name");
    assert_eq!(
        serde_json::to_string(&statement).expect("serialize"),
        payload
    );
}

#[test]
fn statement_payloads_compare_by_value() {
    assert_eq!(
        CypherStatement::new("RETURN 1"),
        CypherStatement::from("RETURN 1")
    );
    assert_ne!(
        CypherStatement::new("RETURN 1"),
        CypherStatement::new("RETURN 2")
    );
    assert_eq!(
        CypherStatement::from("RETURN 1".to_owned()).into_statement(),
        "RETURN 1"
    );
}

#[test]
fn result_data_serializes_rows_as_column_maps() {
    let data = ResultData::from_rows(
        vec!["name".to_owned(), "medals".to_owned()],
        vec![
            vec![CypherValue::Text("Usain".into()), CypherValue::Int(8)],
            vec![CypherValue::Text("Florence".into()), CypherValue::Null],
        ],
    );
    assert_eq!(
        serde_json::to_value(&data).expect("serialize"),
        json!({
            "columns": ["name", "medals"],
            "data": [
                {"name": "Usain", "medals": 8},
                {"name": "Florence", "medals": null},
            ]
        })
    );
}

#[test]
fn error_records_round_trip_and_display() {
    let error = ResultError::new("X.ClientError.Statement.SyntaxError", "boom");
    let encoded = serde_json::to_string(&error).expect("serialize");
    let decoded: ResultError = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, error);
    assert_eq!(
        error.to_string(),
        "X.ClientError.Statement.SyntaxError: boom"
    );
}

#[test]
fn rows_look_up_values_by_name_or_index() {
    let data = ResultData::from_rows(
        vec!["x".to_owned(), "y".to_owned()],
        vec![vec![CypherValue::Int(1), CypherValue::Bool(true)]],
    );
    let row = &data.rows[0];
    assert_eq!(row.get("x"), Some(&CypherValue::Int(1)));
    assert_eq!(row.get_by_index(1), Some(&CypherValue::Bool(true)));
    assert_eq!(row.get("missing"), None);
    assert_eq!(row.get_column_index("y"), Some(1));
}

#[test]
fn values_expose_typed_accessors() {
    assert!(CypherValue::Null.is_null());
    assert_eq!(CypherValue::Text("a".into()).as_text(), Some("a"));
    assert_eq!(CypherValue::Float(1.5).as_float(), Some(1.5));
    assert_eq!(CypherValue::Bool(false).as_bool(), Some(false));
    assert_eq!(CypherValue::Int(7).as_int(), Some(&7));
    assert_eq!(
        CypherValue::List(vec![CypherValue::Int(1)]).as_list(),
        Some(&[CypherValue::Int(1)][..])
    );
    assert_eq!(CypherValue::Text("a".into()).as_int(), None);
}

#[test]
fn values_deserialize_from_natural_json() {
    let values: Vec<CypherValue> =
        serde_json::from_str(r#"[null, true, 3, 2.5, "hi", [1, 2]]"#).expect("deserialize");
    assert_eq!(
        values,
        vec![
            CypherValue::Null,
            CypherValue::Bool(true),
            CypherValue::Int(3),
            CypherValue::Float(2.5),
            CypherValue::Text("hi".into()),
            CypherValue::List(vec![CypherValue::Int(1), CypherValue::Int(2)]),
        ]
    );
}
