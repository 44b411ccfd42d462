//! JSON Schema normalization for strict structured output.

use serde_json::Value;

/// Recursively force `additionalProperties: false` and a `required` list
/// on every object node of a JSON Schema.
///
/// The provider's strict structured-output mode rejects schemas that
/// leave object nodes open, so every schema is normalized before it is
/// sent.
pub fn enforce_no_additional_properties(schema: &Value) -> Value {
    enforce_node(schema.clone())
}

fn enforce_node(node: Value) -> Value {
    match node {
        Value::Array(items) => Value::Array(items.into_iter().map(enforce_node).collect()),
        Value::Object(mut map) => {
            let node_type = map.get("type").and_then(Value::as_str).map(str::to_string);

            let keys: Vec<String> = map.keys().cloned().collect();
            for key in keys {
                if let Some(value) = map.remove(&key) {
                    map.insert(key, enforce_node(value));
                }
            }

            if node_type.as_deref() == Some("object") {
                if !map.get("properties").is_some_and(Value::is_object) {
                    map.insert("properties".to_string(), Value::Object(Default::default()));
                }
                map.entry("required".to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            Value::Object(map)
        }
        other => other,
    }
}
