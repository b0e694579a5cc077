//! Backend id normalization.
//!
//! The backend stores records in MongoDB and returns them with an `_id`
//! key. Application code only ever sees `id`, so every response body is
//! rewritten before it is deserialized, including records nested inside
//! recommendation entries.

use serde_json::Value;

const BACKEND_ID: &str = "_id";

/// Rename `_id` to `id` in every object of `value`, recursively.
///
/// An object that already has an `id` keeps it and just loses `_id`.
/// Non-string ids are stringified.
pub fn normalize_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(raw) = map.remove(BACKEND_ID) {
                if !map.contains_key("id") {
                    let id = match raw {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    map.insert("id".to_string(), Value::String(id));
                }
            }
            for child in map.values_mut() {
                normalize_ids(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_ids(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
