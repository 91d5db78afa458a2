//! Schema generation for OpenAI structured outputs.
//!
//! `schemars` produces draft-07 schemas; OpenAI's strict mode wants a
//! narrower dialect:
//!
//! 1. `additionalProperties: false` on every object schema
//! 2. every property listed in `required`, including nullable ones
//! 3. no `$ref` / `definitions` (schemas fully inlined)
//! 4. no `format` annotations (strict mode rejects them)
//!
//! [`StructuredOutput::openai_schema`] performs that transformation in a
//! single recursive pass.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Nesting limit for the schema walker. HSDS-style schemas are shallow;
/// this only exists to stop a recursive type definition from looping.
const MAX_DEPTH: usize = 64;

/// Trait for types that can be used as OpenAI structured output.
///
/// Automatically implemented for any type that is `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate an OpenAI strict-mode compatible JSON schema for this type.
    fn openai_schema() -> Value {
        let mut root = serde_json::to_value(schema_for!(Self)).unwrap_or_default();

        let definitions = match &mut root {
            Value::Object(map) => {
                map.remove("$schema");
                map.remove("definitions").unwrap_or(Value::Null)
            }
            _ => Value::Null,
        };

        strictify(&mut root, &definitions, 0);
        root
    }

    /// The schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Rewrite a schema node (and everything under it) into the strict dialect.
fn strictify(value: &mut Value, definitions: &Value, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }

    match value {
        Value::Object(map) => {
            // Inline `$ref` nodes first, then process the inlined schema.
            if let Some(Value::String(ref_path)) = map.get("$ref") {
                if let Some(name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(definition) = definitions.get(name) {
                        *value = definition.clone();
                        strictify(value, definitions, depth + 1);
                        return;
                    }
                }
            }

            // Only touch nodes that are themselves schemas; a property
            // could legitimately be named "format".
            if map.contains_key("type") {
                map.remove("format");
            }

            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                if let Some(Value::Object(properties)) = map.get("properties") {
                    let all_keys: Vec<Value> = properties
                        .keys()
                        .map(|key| Value::String(key.clone()))
                        .collect();
                    map.insert("required".to_string(), Value::Array(all_keys));
                }
            }

            for child in map.values_mut() {
                strictify(child, definitions, depth + 1);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                strictify(item, definitions, depth + 1);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct Contact {
        name: String,
        phone: Option<String>,
        email: Option<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Listing {
        title: String,
        url: Option<String>,
        contacts: Vec<Contact>,
    }

    fn required_keys(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .map(|arr| arr.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn optional_fields_are_still_required() {
        // Strict mode wants every property in `required`, even Option<T>.
        let schema = Contact::openai_schema();
        let required = required_keys(&schema);

        assert!(required.contains(&"name"));
        assert!(required.contains(&"phone"));
        assert!(required.contains(&"email"));
    }

    #[test]
    fn objects_forbid_additional_properties() {
        let schema = Contact::openai_schema();
        assert_eq!(schema["additionalProperties"], Value::Bool(false));
    }

    #[test]
    fn refs_are_inlined() {
        let schema = Listing::openai_schema();
        let rendered = serde_json::to_string(&schema).unwrap();

        assert!(!rendered.contains("$ref"), "refs must be inlined: {rendered}");
        assert!(schema.get("definitions").is_none());
        assert!(schema.get("$schema").is_none());

        // The nested Contact schema lands inside the array items, fully
        // strictified.
        let items = &schema["properties"]["contacts"]["items"];
        assert_eq!(items["type"], "object");
        assert_eq!(items["additionalProperties"], Value::Bool(false));
        assert!(required_keys(items).contains(&"phone"));
    }

    #[test]
    fn format_annotations_are_stripped() {
        #[derive(Deserialize, JsonSchema)]
        struct Coordinates {
            latitude: f64,
            longitude: f64,
        }

        let schema = Coordinates::openai_schema();
        let rendered = serde_json::to_string(&schema).unwrap();
        assert!(!rendered.contains("\"format\""), "got: {rendered}");
    }

    #[test]
    fn type_name_matches_schemars() {
        assert_eq!(<Contact as StructuredOutput>::type_name(), "Contact");
    }
}
