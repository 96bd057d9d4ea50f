//! Generated tool input schemas and payload validation.
//!
//! Every tool input is one plain struct deriving `Deserialize` and
//! `JsonSchema`. The advertised schema is generated from that struct, and
//! [`ToolSchema::validate`] walks the generated `properties`, `required` and
//! `default` keywords to turn an untyped JSON payload into a normalized object
//! (defaults filled in, unknown keys dropped) that the struct deserializes from.

use schemars::{schema_for, JsonSchema};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};

use crate::lib::errors::ValidationError;

/// Top-level keywords produced by the generator that clients have no use for.
const STRIPPED_KEYWORDS: [&str; 3] = ["$schema", "title", "description"];

/// Object schema a tool accepts, as advertised to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    schema: Map<String, Value>,
}

impl ToolSchema {
    /// Schema generated from the input struct `T`.
    pub fn for_type<T: JsonSchema>() -> Self {
        let generated = schema_for!(T);
        Self::from_object(generated.as_object().cloned().unwrap_or_default())
    }

    /// Wrap an already built JSON Schema object.
    pub fn from_object(mut schema: Map<String, Value>) -> Self {
        for keyword in STRIPPED_KEYWORDS {
            schema.remove(keyword);
        }
        schema.insert("type".into(), Value::String("object".into()));
        schema
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        if schema
            .get("required")
            .and_then(Value::as_array)
            .is_some_and(Vec::is_empty)
        {
            schema.remove("required");
        }
        Self { schema }
    }

    /// Schema for tools that take no input.
    pub fn empty() -> Self {
        Self::from_object(Map::new())
    }

    /// Declared properties, in the order the schema lists them.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .get("properties")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .map(|(name, property)| (name.as_str(), property))
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties()
            .find(|(declared, _)| *declared == name)
            .map(|(_, property)| property)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.schema
            .get("required")
            .and_then(Value::as_array)
            .is_some_and(|required| required.iter().any(|entry| entry.as_str() == Some(name)))
    }

    /// Validate `payload` and return the normalized argument object.
    ///
    /// Properties are checked in schema order, so the first offending property
    /// is the one reported. Keys the schema does not declare are dropped.
    pub fn validate(&self, payload: &Value) -> Result<Map<String, Value>, ValidationError> {
        let object = match payload {
            Value::Object(object) => object,
            other => {
                return Err(ValidationError::InvalidPayload {
                    found: json_type_name(other),
                })
            }
        };

        let mut normalized = Map::new();
        for (name, property) in self.properties() {
            let value = match object.get(name) {
                Some(value) => {
                    check_type(name, property, value)?;
                    value.clone()
                }
                None => match property.get("default") {
                    Some(default) => default.clone(),
                    None if self.is_required(name) => {
                        return Err(ValidationError::MissingField {
                            field: name.to_string(),
                        })
                    }
                    None => continue,
                },
            };
            normalized.insert(name.to_string(), value);
        }

        for key in object.keys().filter(|key| self.property(key).is_none()) {
            tracing::debug!(
                target: "hello_mcp::tools",
                field = %key,
                "Ignoring undeclared argument"
            );
        }

        Ok(normalized)
    }

    /// JSON Schema object advertised to clients.
    pub fn to_json_schema(&self) -> Map<String, Value> {
        self.schema.clone()
    }
}

/// Strict `type` check: no coercion, and `null` only where the schema lists it.
fn check_type(name: &str, property: &Value, value: &Value) -> Result<(), ValidationError> {
    let declared: Vec<&str> = match property.get("type") {
        Some(Value::String(single)) => vec![single.as_str()],
        Some(Value::Array(many)) => many.iter().filter_map(Value::as_str).collect(),
        // No type keyword (references, combinators): leave it to deserialization.
        _ => return Ok(()),
    };
    if declared.iter().any(|expected| type_accepts(expected, value)) {
        return Ok(());
    }
    Err(ValidationError::TypeMismatch {
        field: name.to_string(),
        expected: declared
            .iter()
            .find(|expected| **expected != "null")
            .map_or("value", |expected| static_type_name(expected)),
        found: json_type_name(value),
    })
}

fn type_accepts(expected: &str, value: &Value) -> bool {
    match expected {
        "integer" => value.is_i64() || value.is_u64(),
        other => static_type_name(other) == json_type_name(value),
    }
}

fn static_type_name(name: &str) -> &'static str {
    match name {
        "null" => "null",
        "boolean" => "boolean",
        "integer" => "integer",
        "number" => "number",
        "string" => "string",
        "array" => "array",
        "object" => "object",
        _ => "value",
    }
}

/// Input struct whose advertised schema is generated from its own fields.
pub trait ToolInput: DeserializeOwned + JsonSchema {
    fn schema() -> ToolSchema {
        ToolSchema::for_type::<Self>()
    }

    /// Build the struct from an object already accepted by [`ToolSchema::validate`].
    fn from_validated(arguments: Map<String, Value>) -> Result<Self, ValidationError> {
        serde_json::from_value(Value::Object(arguments)).map_err(|err| {
            ValidationError::Undeserializable {
                message: err.to_string(),
            }
        })
    }
}

/// Input for tools without parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
pub struct NoInput {}

impl ToolInput for NoInput {}

/// JSON type name used in validation messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
