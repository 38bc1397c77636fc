//! Schema example - validating whole records
//!
//! Schemas can be built in code or read from JSON, and registered either in
//! a shared registry (visible to every validator built on it) or on a single
//! validator.

use serde_json::{json, Map, Value};
use sluice::prelude::*;

fn print_outcome(label: &str, v: &Validator) {
    println!("{}", label);
    match v.valid() {
        Some(valid) => println!("  ✓ valid: {:?}", valid),
        None => println!("  ✗ errors: {:?}", v.errors()),
    }
}

fn as_record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn main() -> Result<(), ConfigError> {
    println!("=== Schemas ===\n");

    let registry = Registry::with_builtins();

    // Built in code
    let product = Schema::new()
        .field("sku", "str", Options::new().set("regExp", "^[A-Z]{3}-\\d{4}$").set("upperCase", true))
        .field("price", "num", Options::new().set("rangeMin", 0))
        .field("tags", "strArray", Options::new().optional(true).default_value(json!([])));
    registry.add_schema("product", product, Options::new())?;

    // Read from JSON
    let order = Schema::from_json(&json!({
        "id": { "validator": "positiveInt" },
        "status": {
            "validator": "enumeratedKeyValue",
            "options": { "enumerated": { "new": 0, "paid": 1, "shipped": 2 } }
        },
        "items": { "validator": "jsonArray" }
    }))?;
    registry.add_schema("order", order, Options::new())?;

    let mut v = Validator::with_registry(registry, Options::new())?;

    v.schema(
        "product",
        &as_record(json!({ "sku": "abc-1234", "price": "9.99", "internal": true })),
    )?;
    print_outcome("Product record:", &v);

    v.schema(
        "order",
        &as_record(json!({ "id": "17", "status": "paid", "items": ["{\"sku\": \"ABC-1234\"}"] })),
    )?;
    print_outcome("Order record:", &v);

    v.schema("order", &as_record(json!({ "id": 0, "status": "lost" })))?;
    print_outcome("Broken order:", &v);

    // Merge accepted values over an existing record
    let stored = json!({ "sku": "ABC-0000", "price": 1, "stock": 12 });
    v.schema("product", &as_record(json!({ "sku": "xyz-9876", "price": 4 })))?;
    if let Some(updated) = v.valid_into(stored)? {
        println!("\nUpdated record: {}", updated);
    }

    Ok(())
}
