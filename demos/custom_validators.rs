//! Custom validators example - definitions, aliases and scopes
//!
//! Logs at DEBUG level, so registrations and swallowed transform failures
//! show up in the output.

use serde_json::{json, Value};
use sluice::prelude::*;

/// ISO-like dates `YYYY-MM-DD`, canonized to `{ year, month, day }`.
fn date() -> Definition {
    Definition::new(|value, options| {
        let Some(text) = value.and_then(Value::as_str) else {
            return Outcome::reject(value.cloned());
        };
        let parts: Vec<_> = text.split('-').map(str::parse::<u32>).collect();
        match parts.as_slice() {
            [Ok(year), Ok(month), Ok(day)] if (1..=12).contains(month) && (1..=31).contains(day) => {
                let min_year = options.get_f64("minYear").unwrap_or(0.0);
                if f64::from(*year) < min_year {
                    return Outcome::reject(value.cloned());
                }
                Outcome::accept(json!({ "year": year, "month": month, "day": day }))
            }
            _ => Outcome::reject(value.cloned()),
        }
    })
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Custom Validators ===\n");

    // Shared scope: every validator on this registry sees `date`
    let registry = Registry::with_builtins();
    registry
        .add_validator("date", date())?
        .add_alias("modernDate", "date", Options::new().set("minYear", 2000))?;

    // Local scope: only `v` sees `slug`
    let slug = Definition::new(|value, _| match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Outcome::accept(
            s.to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-"),
        ),
        _ => Outcome::reject(value.cloned()),
    });
    let mut v = Validator::with_registry(
        registry.clone(),
        Options::new().validator("slug", slug).return_null_on_errors(false),
    )?;

    v.validate("date", "born", "1815-12-10")?
        .validate("modernDate", "joined", "1999-01-01")?
        .validate("dateArray", "holidays", json!(["2024-12-25", "2025-01-01"]))?
        .validate("slugObject", "titles", json!({ "en": "Hello World", "es": "Hola Mundo" }))?;

    // A failing transform rejects the field and is logged at DEBUG
    let explode = Transform::try_map(|_| Err(TransformError::new("lookup service down")));
    v.validate_with("slug", "title", "Fine Title", Options::new().post_transform(explode))?;

    println!("\nvalid:  {:?}", v.valid());
    println!("errors: {:?}", v.errors());

    let mut other = Validator::with_registry(registry, Options::new())?;
    match other.validate("slug", "x", "a b") {
        Ok(_) => println!("\nunexpected: slug visible outside its validator"),
        Err(e) => println!("\nother validator: {}", e),
    }

    Ok(())
}
