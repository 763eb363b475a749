use super::*;

fn endpoint() -> FirestoreEndpoint {
    FirestoreEndpoint::new("pocketbook-dev", "(default)")
}

// =============================================================
// URLs
// =============================================================

#[test]
fn base_url_names_project_and_database() {
    assert_eq!(
        endpoint().base(),
        "https://firestore.googleapis.com/v1/projects/pocketbook-dev/databases/(default)/documents"
    );
}

#[test]
fn document_url_appends_path() {
    assert_eq!(
        endpoint().document_url(&DocPath::user("u1")),
        format!("{}/users/u1", endpoint().base())
    );
}

#[test]
fn document_url_escapes_segments() {
    let url = endpoint().document_url(&DocPath::user("a b/c"));
    assert!(url.ends_with("/users/a%20b%2Fc"));
}

#[test]
fn merge_write_lists_every_field_in_mask() {
    let mut fields = Fields::new();
    fields.insert("theme".into(), "dracula".into());
    fields.insert("email".into(), "a@example.com".into());

    let url = endpoint().write_url(&DocPath::user("u1"), &fields, WriteMode::Merge);
    assert!(url.ends_with("/users/u1?updateMask.fieldPaths=email&updateMask.fieldPaths=theme"));
}

#[test]
fn merge_mask_quotes_non_identifier_fields() {
    let mut fields = Fields::new();
    fields.insert("created at".into(), FieldValue::Null);
    let url = endpoint().write_url(&DocPath::user("u1"), &fields, WriteMode::Merge);
    assert!(url.ends_with("?updateMask.fieldPaths=%60created%20at%60"));
}

#[test]
fn create_only_write_sets_precondition() {
    let url = endpoint().write_url(&DocPath::user("u1"), &Fields::new(), WriteMode::CreateOnly);
    assert!(url.ends_with("/users/u1?currentDocument.exists=false"));
}

#[test]
fn overwrite_write_has_no_query_string() {
    let url = endpoint().write_url(&DocPath::user("u1"), &Fields::new(), WriteMode::Overwrite);
    assert!(!url.contains('?'));
}

#[test]
fn run_query_url_targets_parent_document() {
    assert_eq!(
        endpoint().run_query_url(&CollectionPath::categories("u1")),
        format!("{}/users/u1:runQuery", endpoint().base())
    );
    assert_eq!(
        endpoint().run_query_url(&CollectionPath::root("users")),
        format!("{}:runQuery", endpoint().base())
    );
}

// =============================================================
// values
// =============================================================

#[test]
fn scalar_values_use_typed_wrappers() {
    assert_eq!(encode_value(&FieldValue::Null).unwrap(), json!({ "nullValue": null }));
    assert_eq!(encode_value(&FieldValue::Bool(true)).unwrap(), json!({ "booleanValue": true }));
    assert_eq!(encode_value(&FieldValue::Integer(42)).unwrap(), json!({ "integerValue": "42" }));
    assert_eq!(encode_value(&FieldValue::Double(1.5)).unwrap(), json!({ "doubleValue": 1.5 }));
    assert_eq!(encode_value(&"x".into()).unwrap(), json!({ "stringValue": "x" }));
}

#[test]
fn timestamps_encode_as_rfc3339() {
    let ts = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    assert_eq!(
        encode_value(&FieldValue::Timestamp(ts)).unwrap(),
        json!({ "timestampValue": "2023-11-14T22:13:20Z" })
    );
}

#[test]
fn nested_values_decode_back() {
    let mut inner = Fields::new();
    inner.insert("limit".into(), FieldValue::Integer(12_000));
    let value = FieldValue::Array(vec![FieldValue::Map(inner), FieldValue::String("tag".into())]);

    let wire = encode_value(&value).unwrap();
    assert_eq!(decode_value(&wire).unwrap(), value);
}

#[test]
fn empty_array_without_values_key_decodes() {
    assert_eq!(decode_value(&json!({ "arrayValue": {} })).unwrap(), FieldValue::Array(Vec::new()));
}

#[test]
fn integer_accepts_numeric_json() {
    assert_eq!(decode_value(&json!({ "integerValue": 7 })).unwrap(), FieldValue::Integer(7));
}

#[test]
fn timestamp_with_fraction_decodes() {
    let decoded = decode_value(&json!({ "timestampValue": "2023-11-14T22:13:20.123456Z" })).unwrap();
    let FieldValue::Timestamp(ts) = decoded else {
        panic!("expected timestamp, got {decoded:?}");
    };
    assert_eq!(ts.unix_timestamp(), 1_700_000_000);
}

#[test]
fn unknown_value_type_is_malformed() {
    let err = decode_value(&json!({ "vectorValue": [] })).unwrap_err();
    assert!(matches!(err, StoreError::Malformed(_)));
}

#[test]
fn ill_typed_integer_is_malformed() {
    assert!(decode_value(&json!({ "integerValue": "abc" })).is_err());
    assert!(decode_value(&json!("plain")).is_err());
}

// =============================================================
// documents and queries
// =============================================================

#[test]
fn decode_document_takes_id_from_name() {
    let wire = json!({
        "name": "projects/p/databases/(default)/documents/users/u1",
        "fields": {
            "email": { "stringValue": "a@example.com" },
            "theme": { "stringValue": "dark" }
        },
        "createTime": "2023-11-14T22:13:20Z"
    });

    let doc = decode_document(&wire).unwrap();
    assert_eq!(doc.id, "u1");
    assert_eq!(doc.get_str("theme"), Some("dark"));
    assert_eq!(doc.get_str("email"), Some("a@example.com"));
}

#[test]
fn document_without_fields_is_empty() {
    let doc = decode_document(&json!({ "name": "projects/p/databases/d/documents/users/u1" })).unwrap();
    assert!(doc.fields.is_empty());
}

#[test]
fn encode_document_wraps_fields() {
    let mut fields = Fields::new();
    fields.insert("theme".into(), "lofi".into());
    assert_eq!(
        encode_document(&fields).unwrap(),
        json!({ "fields": { "theme": { "stringValue": "lofi" } } })
    );
}

#[test]
fn run_query_body_ands_multiple_filters() {
    let filters = [Filter::equals("name", "Rent"), Filter::equals("type", "expense")];
    let body = run_query_body(&CollectionPath::categories("u1"), &filters, None).unwrap();

    assert_eq!(body["structuredQuery"]["from"], json!([{ "collectionId": "categories" }]));
    let composite = &body["structuredQuery"]["where"]["compositeFilter"];
    assert_eq!(composite["op"], "AND");
    assert_eq!(composite["filters"][0]["fieldFilter"]["field"]["fieldPath"], "name");
    assert_eq!(composite["filters"][1]["fieldFilter"]["value"], json!({ "stringValue": "expense" }));
}

#[test]
fn run_query_body_single_filter_is_not_composite() {
    let body = run_query_body(&CollectionPath::budgets("u1"), &[Filter::equals("categoryId", "c1")], None).unwrap();
    let condition = &body["structuredQuery"]["where"];
    assert_eq!(condition["fieldFilter"]["op"], "EQUAL");
    assert!(condition.get("compositeFilter").is_none());
}

#[test]
fn run_query_body_without_filters_has_no_where() {
    let body = run_query_body(&CollectionPath::budgets("u1"), &[], None).unwrap();
    assert!(body["structuredQuery"].get("where").is_none());
    assert!(body["structuredQuery"].get("limit").is_none());
}

#[test]
fn run_query_body_carries_row_limit() {
    let filters = [Filter::equals("categoryId", "c1")];
    let body = run_query_body(&CollectionPath::budgets("u1"), &filters, Some(1)).unwrap();
    assert_eq!(body["structuredQuery"]["limit"], json!(1));
    assert_eq!(body["structuredQuery"]["where"]["fieldFilter"]["field"]["fieldPath"], "categoryId");
}

#[test]
fn query_response_skips_rows_without_documents() {
    let wire = json!([
        { "readTime": "2023-11-14T22:13:20Z" },
        { "document": { "name": "projects/p/databases/d/documents/users/u1/categories/c1",
                        "fields": { "name": { "stringValue": "Rent" } } },
          "readTime": "2023-11-14T22:13:20Z" }
    ]);
    let docs = decode_query_response(&wire).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "c1");
}

#[test]
fn query_response_must_be_an_array() {
    assert!(decode_query_response(&json!({})).is_err());
}

// =============================================================
// status mapping
// =============================================================

#[test]
fn conflict_statuses_map_to_conflict() {
    let body = r#"{"error":{"code":409,"message":"Document already exists","status":"ALREADY_EXISTS"}}"#;
    assert_eq!(status_error(409, body), StoreError::Conflict("Document already exists".into()));
    assert!(matches!(status_error(412, "precondition"), StoreError::Conflict(_)));
}

#[test]
fn other_statuses_are_rejections() {
    assert_eq!(
        status_error(403, " denied "),
        StoreError::Rejected { status: 403, message: "denied".into() }
    );
    assert!(matches!(status_error(0, "network"), StoreError::Unreachable(_)));
}
