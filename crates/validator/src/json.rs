//! JSON documents as field sources.
//!
//! Lets a config-loaded [`Schema`](crate::schema::Schema) validate a
//! `serde_json` object without declaring a Rust type for it.
//!
//! | JSON                     | Field value                    |
//! |--------------------------|--------------------------------|
//! | missing key, `null`      | [`FieldValue::Absent`]         |
//! | string                   | [`FieldValue::Text`]           |
//! | integer fitting `i64`    | [`FieldValue::Integer`]        |
//! | other number             | [`FieldValue::Decimal`]        |
//! | `true` / `false`         | [`FieldValue::Bool`]           |
//! | array, object            | [`FieldValue::Opaque`]         |
//!
//! A `Value` that is not an object has no readable fields.
//!
//! # Examples
//!
//! ```
//! use sentinel_validator::schema::{RuleAttachment, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::builder("Order")
//!     .field("qty", [RuleAttachment::quantity(1, 100)])
//!     .build();
//!
//! assert!(sentinel_validator::validate_with(&schema, &json!({ "qty": 80 })).is_ok());
//! assert!(sentinel_validator::validate_with(&schema, &json!({ "qty": 200 })).is_err());
//! assert!(sentinel_validator::validate_with(&schema, &json!({})).is_err());
//! assert!(sentinel_validator::validate_with(&schema, &json!([1, 2])).is_ok());
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use crate::inspect::FieldSource;
use crate::value::{AsFieldValue, FieldValue};

fn number_value(number: &Number) -> FieldValue<'static> {
    if let Some(n) = number.as_i64() {
        return FieldValue::Integer(n);
    }
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_or(FieldValue::Opaque("number"), FieldValue::Decimal)
}

impl AsFieldValue for Value {
    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Value::Null => FieldValue::Absent,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(number) => number_value(number),
            Value::String(text) => FieldValue::Text(text),
            Value::Array(_) => FieldValue::Opaque("array"),
            Value::Object(_) => FieldValue::Opaque("object"),
        }
    }
}

impl FieldSource for Map<String, Value> {
    fn read_field(&self, field: &str) -> Option<FieldValue<'_>> {
        Some(self.get(field).map_or(FieldValue::Absent, Value::as_field_value))
    }
}

impl FieldSource for Value {
    fn read_field(&self, field: &str) -> Option<FieldValue<'_>> {
        self.as_object()?.read_field(field)
    }
}

// ============================================================================
// TESTS
// ============================================================================
