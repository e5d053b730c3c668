//! JSON Schema generation and lightweight runtime validation used to
//! check tool call arguments against a tool's declared input schema.

use schemars::{schema_for, JsonSchema};
use serde_json::Value;

/// Types that can describe themselves as a JSON Schema, used when a
/// tool's input/output schema is generated from a Rust type rather than
/// built by hand.
pub trait McpSchema {
    fn schema() -> Value;
    fn schema_name() -> String;
}

/// Generate a JSON Schema document for `T` via `schemars`.
pub fn generate_schema_for<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null)
}

/// Validate `data` against `schema`, covering the subset of JSON Schema
/// the protocol actually needs for tool arguments: `type`, `required`,
/// and per-property `properties` checks. Not a general-purpose
/// validator — nested `$ref`/`oneOf`/etc. are not resolved.
pub fn validate_against_schema(data: &Value, schema: &Value) -> Result<(), String> {
    let Some(schema_obj) = schema.as_object() else {
        return Ok(());
    };

    if let Some(expected_type) = schema_obj.get("type").and_then(Value::as_str) {
        if !matches_type(data, expected_type) {
            return Err(format!(
                "expected type '{expected_type}', got {}",
                type_name(data)
            ));
        }
    }

    if expected_type_is_object(schema_obj) {
        let Some(data_obj) = data.as_object() else {
            return Err(format!("expected an object, got {}", type_name(data)));
        };

        if let Some(required) = schema_obj.get("required").and_then(Value::as_array) {
            for field in required {
                let Some(field_name) = field.as_str() else {
                    continue;
                };
                if !data_obj.contains_key(field_name) {
                    return Err(format!("missing required field '{field_name}'"));
                }
            }
        }

        if let Some(properties) = schema_obj.get("properties").and_then(Value::as_object) {
            for (key, value) in data_obj {
                if let Some(property_schema) = properties.get(key) {
                    validate_against_schema(value, property_schema)?;
                }
            }
        }
    }

    Ok(())
}

fn expected_type_is_object(schema_obj: &serde_json::Map<String, Value>) -> bool {
    match schema_obj.get("type").and_then(Value::as_str) {
        Some(t) => t == "object",
        None => schema_obj.contains_key("properties") || schema_obj.contains_key("required"),
    }
}

fn matches_type(data: &Value, expected: &str) -> bool {
    match expected {
        "object" => data.is_object(),
        "array" => data.is_array(),
        "string" => data.is_string(),
        "number" => data.is_number(),
        "integer" => data.is_i64() || data.is_u64(),
        "boolean" => data.is_boolean(),
        "null" => data.is_null(),
        _ => true,
    }
}

fn type_name(data: &Value) -> &'static str {
    match data {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validates_required_fields_present() {
        let schema = json!({
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" } }
        });
        assert!(validate_against_schema(&json!({"name": "a"}), &schema).is_ok());
        assert!(validate_against_schema(&json!({}), &schema).is_err());
    }

    #[test]
    fn validates_property_types() {
        let schema = json!({
            "type": "object",
            "properties": { "age": { "type": "integer" } }
        });
        assert!(validate_against_schema(&json!({"age": 5}), &schema).is_ok());
        assert!(validate_against_schema(&json!({"age": "five"}), &schema).is_err());
    }

    #[test]
    fn schema_without_type_constraint_passes() {
        let schema = json!({});
        assert!(validate_against_schema(&json!("anything"), &schema).is_ok());
    }
}
