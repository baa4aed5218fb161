//! Tool metadata derived from endpoint descriptors.
//!
//! A [`ToolInfo`] is what an external tool-calling framework sees: a unique
//! name, a description, and JSON Schemas for the input arguments and the
//! response.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::descriptor::{EndpointDescriptor, HttpMethod, ResponseShape, ValueKind};

/// Capability advertised by tools that only read state.
pub const CAPABILITY_READ: &str = "read";

/// Capability advertised by tools that create, modify, or delete state.
pub const CAPABILITY_WRITE: &str = "write";

/// Immutable metadata describing one endpoint as a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInfo {
    /// Unique tool name (e.g. `user_calendar_get_event`).
    pub name: String,
    pub description: String,
    pub method: HttpMethod,
    /// Path template with placeholders.
    pub path: String,
    /// `read` for GET, `write` otherwise.
    pub capabilities: Vec<String>,
    pub tags: Vec<String>,
    /// JSON Schema of the arguments object.
    pub input_schema: Value,
    /// JSON Schema sketch of a successful response.
    pub output_schema: Value,
}

impl ToolInfo {
    pub fn from_descriptor(descriptor: &EndpointDescriptor) -> Self {
        let capability = if descriptor.method.is_read() {
            CAPABILITY_READ
        } else {
            CAPABILITY_WRITE
        };

        Self {
            name: descriptor.name.clone(),
            description: descriptor.summary.clone(),
            method: descriptor.method,
            path: descriptor.path.as_str().to_string(),
            capabilities: vec![capability.to_string()],
            tags: descriptor.tags.clone(),
            input_schema: input_schema(descriptor),
            output_schema: output_schema(descriptor.response),
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.capabilities.iter().all(|c| c == CAPABILITY_READ)
    }
}

impl From<&EndpointDescriptor> for ToolInfo {
    fn from(descriptor: &EndpointDescriptor) -> Self {
        Self::from_descriptor(descriptor)
    }
}

fn described(kind: ValueKind, description: String) -> Value {
    let mut schema = kind.json_schema();
    if let Value::Object(map) = &mut schema
        && !description.is_empty()
    {
        map.insert("description".to_string(), Value::String(description));
    }
    schema
}

/// Object schema with every path parameter and required query parameter
/// listed in `required`. Undeclared arguments are rejected.
pub fn input_schema(descriptor: &EndpointDescriptor) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in descriptor.path_params() {
        properties.insert(
            param.arg.clone(),
            described(
                ValueKind::String,
                format!("Path parameter `{}`", param.wire),
            ),
        );
        required.push(Value::String(param.arg.clone()));
    }

    for param in &descriptor.query {
        let description = if param.description.is_empty() {
            format!("Query parameter `{}`", param.wire)
        } else {
            format!("{} (`{}`)", param.description, param.wire)
        };
        properties.insert(param.arg.clone(), described(param.kind, description));
        if param.required {
            required.push(Value::String(param.arg.clone()));
        }
    }

    for field in descriptor.body.fields() {
        properties.insert(
            field.arg.clone(),
            described(field.kind, field.description.clone()),
        );
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

pub fn output_schema(shape: ResponseShape) -> Value {
    match shape {
        ResponseShape::Resource => json!({ "type": "object" }),
        ResponseShape::Collection => json!({
            "type": "object",
            "properties": {
                "value": { "type": "array", "items": { "type": "object" } },
                "@odata.count": { "type": "integer" },
                "@odata.nextLink": { "type": "string" },
            },
        }),
        ResponseShape::Count => json!({ "type": "integer" }),
        ResponseShape::Empty => json!({ "type": "null" }),
    }
}
