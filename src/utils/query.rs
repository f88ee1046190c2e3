//! Query-string serialization.
//!
//! Parameters are a JSON object and serialize deterministically:
//!
//! - keys in lexicographic order
//! - strings verbatim, numbers and booleans as their JSON text
//! - `null` as an empty value (`key=`)
//! - arrays comma-joined into a single value (`ids=1,2,3`); empty arrays are skipped
//! - nested objects with bracket keys (`filter[name]=x`)
//!
//! Output is `application/x-www-form-urlencoded`, so the comma in a joined
//! array is sent as `%2C`.
//!
//! ```rust
//! use interpose::utils::serialize_params;
//! use serde_json::json;
//!
//! let query = serialize_params(&json!({ "ids": [1, 2], "q": "rust" }));
//! assert_eq!(query, "ids=1%2C2&q=rust");
//! ```

use serde_json::Value;

/// Serializes `params` into a query string without the leading `?`.
///
/// A non-object value serializes to an empty string.
pub fn serialize_params(params: &Value) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Value::Object(map) = params {
        for (key, value) in sorted(map) {
            append_pair(&mut serializer, key, value);
        }
    }
    serializer.finish()
}

fn append_pair(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    value: &Value,
) {
    match value {
        Value::Object(map) => {
            for (child, value) in sorted(map) {
                append_pair(serializer, &format!("{key}[{child}]"), value);
            }
        }
        Value::Array(items) if items.is_empty() => {}
        Value::Array(items) => {
            let joined = items.iter().map(scalar).collect::<Vec<_>>().join(",");
            serializer.append_pair(key, &joined);
        }
        other => {
            serializer.append_pair(key, &scalar(other));
        }
    }
}

fn sorted(map: &serde_json::Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        // Nested containers inside an array have no flat form, keep their JSON
        other => other.to_string(),
    }
}
