//! Config-loaded schemas applied to JSON documents.

#![cfg(all(feature = "json", feature = "toml"))]

use pretty_assertions::assert_eq;
use rstest::rstest;
use sentinel_validator::prelude::*;
use serde_json::{Value, json};

const ORDER_SCHEMA_JSON: &str = r#"{
    "type_name": "OrderForm",
    "fields": [
        { "name": "email", "rules": [{ "kind": "email", "message": "email" }] },
        { "name": "phone", "rules": [{ "kind": "phone", "message": "phone" }] },
        {
            "name": "qty",
            "rules": [{ "kind": "quantity", "min": 1, "max": 100, "message": "qty" }]
        },
        {
            "name": "price",
            "rules": [
                { "kind": "price", "min": "0.01", "max": "999999.99", "message": "price range" },
                { "kind": "decimal", "integer_part": 6, "fraction_part": 2, "message": "price precision" }
            ]
        },
        {
            "name": "deliver_on",
            "rules": [{
                "kind": "date_time_range",
                "pattern": "yyyy-MM-dd",
                "min": "2020-01-01",
                "max": "2030-12-31",
                "message": "delivery date"
            }]
        },
        {
            "name": "status",
            "rules": [{ "kind": "enum_membership", "members": ["NEW", "PAID"], "message": "status" }]
        },
        { "name": "remark" }
    ]
}"#;

const ORDER_SCHEMA_TOML: &str = r#"
type_name = "OrderForm"

[[fields]]
name = "email"
rules = [{ kind = "email", message = "email" }]

[[fields]]
name = "phone"
rules = [{ kind = "phone", message = "phone" }]

[[fields]]
name = "qty"
rules = [{ kind = "quantity", min = 1, max = 100, message = "qty" }]

[[fields]]
name = "price"

[[fields.rules]]
kind = "price"
min = "0.01"
max = "999999.99"
message = "price range"

[[fields.rules]]
kind = "decimal"
integer_part = 6
fraction_part = 2
message = "price precision"

[[fields]]
name = "deliver_on"
rules = [{ kind = "date_time_range", pattern = "yyyy-MM-dd", min = "2020-01-01", max = "2030-12-31", message = "delivery date" }]

[[fields]]
name = "status"
rules = [{ kind = "enum_membership", members = ["NEW", "PAID"], message = "status" }]

[[fields]]
name = "remark"
"#;

fn valid_order() -> Value {
    json!({
        "email": "163adb@163.com",
        "phone": "13433334555",
        "qty": 80,
        "price": 19.9,
        "deliver_on": "2025-01-01",
        "status": "PAID",
        "remark": null
    })
}

fn load(format: &str) -> Schema {
    match format {
        "json" => Schema::from_json_str(ORDER_SCHEMA_JSON).unwrap(),
        "toml" => Schema::from_toml_str(ORDER_SCHEMA_TOML).unwrap(),
        other => panic!("unknown format {other}"),
    }
}

#[rstest]
#[case("json")]
#[case("toml")]
fn json_and_toml_describe_the_same_schema(#[case] format: &str) {
    assert_eq!(load(format), load("json"));
}

#[rstest]
#[case("json")]
#[case("toml")]
fn valid_document_passes(#[case] format: &str) {
    assert!(validate_with(&load(format), &valid_order()).is_ok());
}

#[test]
fn every_violation_is_reported_in_field_order() {
    let schema = load("json");
    let doc = json!({
        "email": "not-an-email",
        "phone": "12345",
        "qty": 200,
        "price": 1000000.001,
        "deliver_on": "2025-13-40",
        "status": "paid",
        "remark": "anything"
    });

    let errors = validate_with(&schema, &doc).unwrap_err();
    assert_eq!(
        errors.messages(),
        vec![
            "email",
            "phone",
            "qty",
            "price range",
            "price precision",
            "delivery date",
            "status",
        ]
    );
}

#[test]
fn missing_and_null_fields_are_absent() {
    let schema = load("toml");
    let doc = json!({ "email": null });
    let outcome = collect_with(&schema, &doc);
    assert_eq!(outcome.len(), 7);
}

#[test]
fn shape_mismatch_is_a_rule_violation() {
    let schema = load("json");
    let mut doc = valid_order();
    doc["qty"] = json!("80");
    doc["price"] = json!({ "amount": 19.9 });

    let errors = validate_with(&schema, &doc).unwrap_err();
    assert_eq!(errors.messages(), vec!["qty", "price range", "price precision"]);
    assert_eq!(errors.errors()[0].param("reason"), Some("type_mismatch"));
}

#[test]
fn non_object_documents_have_no_readable_fields() {
    let schema = load("json");
    assert!(validate_with(&schema, &json!([1, 2, 3])).is_ok());
    assert!(validate_with(&schema, &json!("text")).is_ok());
}

#[test]
fn whole_number_price_is_accepted() {
    let schema = load("json");
    let mut doc = valid_order();
    doc["price"] = json!(20);
    assert!(validate_with(&schema, &doc).is_ok());
}

#[test]
fn loading_rejects_duplicate_fields() {
    let err = Schema::from_json_str(
        r#"{ "type_name": "X", "fields": [{ "name": "a" }, { "name": "a" }] }"#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "field `a` is declared more than once in `X`");
}

#[test]
fn loading_rejects_malformed_toml() {
    let err = Schema::from_toml_str("type_name = ").unwrap_err();
    assert!(matches!(err, SchemaError::Toml(_)));
}
