//! Form sanitizing example - cleaning up raw web form input
//!
//! Every form field arrives as a string. Validators check it and hand back
//! the canonical value, while rejected fields keep exactly what the user
//! typed so the form can be redisplayed.

use serde_json::{json, Value};
use sluice::prelude::*;

fn trim() -> Transform {
    Transform::map(|v| match v {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    })
}

fn sanitize(form: &Value) -> Result<(), ConfigError> {
    let mut v = Validator::with_registry(
        Registry::with_builtins(),
        Options::new().pre_transform(trim()),
    )?;

    v.call("notEmptyStr", "name", form.get("name").cloned(), Options::new())?
        .call(
            "str",
            "email",
            form.get("email").cloned(),
            Options::new()
                .set("regExp", "^[^@\\s]+@[^@\\s]+\\.[a-z]+$")
                .set("lowerCase", true),
        )?
        .call(
            "positiveInt",
            "age",
            form.get("age").cloned(),
            Options::new().set("max", 130),
        )?
        .call(
            "bool",
            "newsletter",
            form.get("newsletter").cloned(),
            Options::new().optional(true).default_value(false),
        )?
        .call(
            "str",
            "bio",
            form.get("bio").cloned(),
            Options::new()
                .optional(true)
                .set("maxLength", 20)
                .set("truncate", true)
                .set("append", "..."),
        )?;

    match v.valid() {
        Some(clean) => {
            println!("✓ Clean record:");
            for (field, value) in clean {
                println!("  {} = {:?}", field, value);
            }
        }
        None => {
            println!("✗ Rejected fields:");
            for (field, raw) in v.errors().into_iter().flatten() {
                println!("  {} (was {:?})", field, raw);
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), ConfigError> {
    println!("=== Form Sanitizing ===\n");

    println!("Test 1: Valid form");
    sanitize(&json!({
        "name": "  Ada Lovelace ",
        "email": " ADA@Example.ORG ",
        "age": "36",
        "newsletter": "1",
        "bio": "Wrote the first published algorithm for a machine"
    }))?;

    println!("\n---\n");

    println!("Test 2: Invalid fields keep the raw input");
    sanitize(&json!({
        "name": "   ",
        "email": "not-an-email",
        "age": "-4"
    }))?;

    Ok(())
}
