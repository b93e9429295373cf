use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Expected shape of an untyped json document. Fields not listed in an `Object` are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Boolean,
    Number,
    String,
    ArrayOf(Box<Schema>),
    /// an object used as a map with arbitrary keys
    MapOf(Box<Schema>),
    Object(Vec<(&'static str, Schema)>),
}

impl Schema {
    fn describe(&self) -> &'static str {
        match self {
            Schema::Boolean => "a boolean",
            Schema::Number => "a number",
            Schema::String => "a string",
            Schema::ArrayOf(_) => "an array",
            Schema::MapOf(_) | Schema::Object(_) => "an object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "(root)" } else { self.path.as_str() };
        write!(f, "{path} {}", self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation: {}", .violations.len(), .violations.iter().join("; "))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

pub fn marketplace_response_schema() -> Schema {
    Schema::Object(vec![
        ("success", Schema::Boolean),
        ("lastUpdated", Schema::Number),
        ("products", Schema::MapOf(Box::new(Schema::Object(vec![("product_id", Schema::String)])))),
    ])
}

pub fn item_catalog_response_schema() -> Schema {
    Schema::Object(vec![
        ("success", Schema::Boolean),
        ("lastUpdated", Schema::Number),
        (
            "items",
            Schema::ArrayOf(Box::new(Schema::Object(vec![("id", Schema::String), ("name", Schema::String)]))),
        ),
    ])
}

/// Checks `value` against `schema` and reports every violation, not just the first one.
pub fn validate(value: &Value, schema: &Schema) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    collect_violations(value, schema, "", &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

/// Validates `value` and deserializes it into `T` afterwards.
pub fn decode_validated<T: DeserializeOwned>(value: Value, schema: &Schema) -> Result<T, ValidationError> {
    validate(&value, schema)?;

    serde_path_to_error::deserialize(value).map_err(|err| ValidationError {
        violations: vec![Violation {
            path: err.path().to_string().trim_start_matches('.').to_string(),
            reason: err.inner().to_string(),
        }],
    })
}

fn collect_violations(value: &Value, schema: &Schema, path: &str, violations: &mut Vec<Violation>) {
    match (schema, value) {
        (Schema::Boolean, Value::Bool(_)) | (Schema::Number, Value::Number(_)) | (Schema::String, Value::String(_)) => {}
        (Schema::ArrayOf(element_schema), Value::Array(elements)) => {
            for (idx, element) in elements.iter().enumerate() {
                collect_violations(element, element_schema, &format!("{path}[{idx}]"), violations);
            }
        }
        (Schema::MapOf(value_schema), Value::Object(entries)) => {
            for (key, entry) in entries {
                collect_violations(entry, value_schema, &join_path(path, key), violations);
            }
        }
        (Schema::Object(fields), Value::Object(entries)) => {
            for (field, field_schema) in fields {
                let field_path = join_path(path, field);
                match entries.get(*field) {
                    Some(field_value) => collect_violations(field_value, field_schema, &field_path, violations),
                    None => violations.push(Violation {
                        path: field_path,
                        reason: format!("must be {} (was missing)", field_schema.describe()),
                    }),
                }
            }
        }
        (expected, actual) => violations.push(Violation {
            path: path.to_string(),
            reason: format!("must be {} (was {})", expected.describe(), describe_value(actual)),
        }),
    }
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
