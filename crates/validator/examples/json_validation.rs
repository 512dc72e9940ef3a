//! Loading a schema from TOML and validating JSON documents with it.

use sentinel_validator::prelude::*;
use serde_json::json;

const SCHEMA: &str = r#"
type_name = "Signup"

[[fields]]
name = "email"
rules = [{ kind = "email", message = "email is not valid" }]

[[fields]]
name = "website"
rules = [{ kind = "url", message = "website must be http, https or ftp" }]

[[fields]]
name = "nickname"
rules = [{ kind = "name", min_length = 2, max_length = 16, message = "nickname must be 2-16 chars" }]

[[fields]]
name = "password"

[[fields.rules]]
kind = "password"
min_length = 10
require_special = false
message = "password is too weak"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let schema = Schema::from_toml_str(SCHEMA)?;
    println!(
        "loaded {} with {} field(s) and {} rule(s)",
        schema.type_name(),
        schema.len(),
        schema.rule_count()
    );

    let documents = [
        json!({
            "email": "ann@example.com",
            "website": "https://example.com",
            "nickname": "ann",
            "password": "Correct1Horse",
        }),
        json!({
            "email": "ann",
            "website": "example.com",
            "nickname": "a",
            "password": "short",
        }),
        json!({}),
    ];

    for (i, doc) in documents.iter().enumerate() {
        let outcome = collect_with(&schema, doc);
        if outcome.is_valid() {
            println!("document {i}: valid");
        } else {
            println!("document {i}: {:?}", outcome.messages());
        }
    }

    Ok(())
}
