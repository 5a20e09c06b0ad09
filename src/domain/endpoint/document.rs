//! JSON:API write documents

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::domain::AscError;

/// `{ "data": { "type": .., "id": .. } }`, a to-one relationship
pub fn to_one(resource_type: &str, id: &str) -> Value {
    json!({ "data": { "type": resource_type, "id": id } })
}

/// `{ "data": [{ "type": .., "id": .. }, ..] }`, a to-many relationship
pub fn to_many<'a>(resource_type: &str, ids: impl IntoIterator<Item = &'a str>) -> Value {
    let data: Vec<Value> = ids
        .into_iter()
        .map(|id| json!({ "type": resource_type, "id": id }))
        .collect();
    json!({ "data": data })
}

/// Build `{ "data": { type, id?, attributes?, relationships? } }`.
///
/// Null attributes are dropped so absent optionals never reach the server.
pub fn resource_document(
    resource_type: &str,
    id: Option<&str>,
    attributes: Option<Map<String, Value>>,
    relationships: Option<Map<String, Value>>,
) -> Value {
    let mut data = Map::new();
    data.insert("type".to_string(), Value::from(resource_type));

    if let Some(id) = id {
        data.insert("id".to_string(), Value::from(id));
    }

    if let Some(mut attributes) = attributes {
        attributes.retain(|_, value| !value.is_null());
        data.insert("attributes".to_string(), Value::Object(attributes));
    }

    if let Some(relationships) = relationships.filter(|r| !r.is_empty()) {
        data.insert("relationships".to_string(), Value::Object(relationships));
    }

    json!({ "data": data })
}

/// Serialize `value` into an attribute object
pub fn attributes_of<A: Serialize + ?Sized>(value: &A) -> Result<Map<String, Value>, AscError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AscError::invalid_input(format!(
            "Attributes must be a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(AscError::invalid_input(format!(
            "Attributes cannot be serialized: {}",
            e
        ))),
    }
}

/// Parse a JSON parameter string that must hold an object
pub fn parse_parameters(parameters: &str) -> Result<Map<String, Value>, AscError> {
    let value: Value = serde_json::from_str(parameters)
        .map_err(|e| AscError::invalid_input(format!("Parameters are not valid JSON: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AscError::invalid_input(format!(
            "Expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
