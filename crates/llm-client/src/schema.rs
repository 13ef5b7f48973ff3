//! Type-safe schema generation for structured outputs.
//!
//! Uses the `schemars` crate to generate JSON schemas from Rust types and
//! reshapes them for strict structured-output mode.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for types that can be requested as a structured model response.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait ResponseSchema: JsonSchema + DeserializeOwned {
    /// Generate a strict-mode JSON schema for this type.
    ///
    /// Strict mode requires:
    /// 1. `additionalProperties: false` on all object schemas
    /// 2. ALL properties listed in `required`
    /// 3. Fully inlined schemas (no `$ref` references)
    fn response_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        fix_object_schemas(&mut value);
        inline_refs(&mut value);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Schema name sent alongside the schema
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> ResponseSchema for T {}

/// Add `additionalProperties: false`, mark every property required and drop
/// numeric `format` hints (`double`, `uint8`) that strict mode rejects.
fn fix_object_schemas(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if is_numeric_type(map.get("type")) {
                map.remove("format");
            }

            if map.get("type") == Some(&Value::String("object".to_string())) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                if let Some(Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<Value> =
                        props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".to_string(), Value::Array(all_keys));
                }
            }

            for (_, v) in map.iter_mut() {
                fix_object_schemas(v);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                fix_object_schemas(item);
            }
        }
        _ => {}
    }
}

fn is_numeric_type(ty: Option<&Value>) -> bool {
    let numeric = |v: &Value| matches!(v.as_str(), Some("number" | "integer"));
    match ty {
        Some(Value::Array(types)) => types.iter().any(numeric),
        Some(v) => numeric(v),
        None => false,
    }
}

fn inline_refs(value: &mut Value) {
    let definitions = match value {
        Value::Object(map) => map.get("definitions").cloned(),
        _ => None,
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Check {
        rule_id: String,
        confidence: u8,
        note: Option<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Checks {
        checks: Vec<Check>,
    }

    #[test]
    fn test_all_properties_required() {
        let schema = Check::response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        assert!(required.contains(&"rule_id"));
        assert!(required.contains(&"confidence"));
        assert!(required.contains(&"note"), "Option fields are still required");
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn test_nested_struct_inlined() {
        let schema = Checks::response_schema();
        let schema_str = serde_json::to_string(&schema).unwrap();

        assert!(!schema_str.contains("$ref"), "refs should be inlined: {}", schema_str);
        assert!(schema.get("definitions").is_none());
        assert!(schema.get("$schema").is_none());

        let item = &schema["properties"]["checks"]["items"];
        assert_eq!(item["type"], "object");
        assert_eq!(item["additionalProperties"], false);
        assert!(item["properties"]["rule_id"].is_object());
    }

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Scored {
        confidence: f64,
        weight: Option<u32>,
        label: String,
    }

    #[test]
    fn test_numeric_formats_removed() {
        let schema = Scored::response_schema();
        let props = &schema["properties"];

        assert_eq!(props["confidence"]["type"], "number");
        assert!(props["confidence"].get("format").is_none());
        assert!(props["weight"].get("format").is_none());
        assert!(!serde_json::to_string(&schema).unwrap().contains("double"));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Checks::type_name(), "Checks");
    }
}
