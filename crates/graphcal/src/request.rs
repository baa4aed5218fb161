//! Turns a descriptor and caller arguments into a concrete request.
//!
//! This is the validation half of the endpoint method: every check here runs
//! before the transport is touched, so a [`Error::MissingParameter`] never
//! costs a network round-trip.

use serde_json::{Map, Value};

use crate::{
    args::{Arguments, Field},
    descriptor::{BodyField, BodyMode, EndpointDescriptor, HttpMethod, ValueKind},
    error::{Error, Result},
};

/// Content type sent with every POST and PATCH.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A single query value. Lists are kept unjoined; the transport decides how
/// to encode them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    List(Vec<String>),
}

impl QueryValue {
    /// Wire encoding used by OData: lists are comma-joined.
    pub fn encode(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Boolean(b) => b.to_string(),
            Self::Integer(n) => n.to_string(),
            Self::List(items) => items.join(","),
        }
    }
}

/// Ordered query pairs (wire key, value).
pub type Query = Vec<(String, QueryValue)>;

/// A fully validated request, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Query,
    /// `None` for GET/DELETE and for bodyless actions.
    pub body: Option<Value>,
    pub content_type: Option<&'static str>,
}

/// Validates `args` against `descriptor` and assembles the request.
///
/// # Errors
///
/// - [`Error::UnknownArgument`] if `args` names something the endpoint does
///   not declare.
/// - [`Error::MissingParameter`] if a path placeholder or required query
///   parameter is absent. Path parameters are checked first, in template
///   order.
/// - [`Error::InvalidArgument`] if a path or query value has the wrong kind,
///   or a flattened body field is not an object or repeats the key of a
///   declared body field.
pub fn prepare(
    descriptor: &EndpointDescriptor,
    base_url: &str,
    args: &Arguments,
) -> Result<PreparedRequest> {
    if let Some(unknown) = args.names().find(|name| !descriptor.accepts(name)) {
        return Err(Error::UnknownArgument {
            endpoint: descriptor.name.clone(),
            argument: unknown.to_string(),
        });
    }

    let path = descriptor.path.render(|param| match args.value(&param.arg) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(Error::InvalidArgument {
            argument: param.arg.clone(),
            expected: ValueKind::String.expected(),
        }),
        None => Err(Error::MissingParameter(param.wire.clone())),
    })?;
    let url = format!("{}{path}", base_url.trim_end_matches('/'));

    let mut query = Query::new();
    for param in &descriptor.query {
        match args.value(&param.arg) {
            Some(value) => {
                query.push((param.wire.clone(), query_value(&param.arg, param.kind, value)?));
            }
            None if param.required => return Err(Error::MissingParameter(param.wire.clone())),
            None => {}
        }
    }

    let body = match &descriptor.body {
        BodyMode::None => None,
        BodyMode::Json(fields) => {
            let mut body = Map::new();
            for field in fields {
                match args.field(&field.arg) {
                    None => {}
                    Some(Field::Clear) if field.flatten => {}
                    Some(Field::Clear) => {
                        body.insert(field.wire.clone(), Value::Null);
                    }
                    Some(Field::Value(Value::Object(entries))) if field.flatten => {
                        if entries.keys().any(|key| declares_wire(fields, key)) {
                            return Err(Error::InvalidArgument {
                                argument: field.arg.clone(),
                                expected: "an object without keys of declared body fields",
                            });
                        }
                        body.extend(entries.clone());
                    }
                    Some(Field::Value(_)) if field.flatten => {
                        return Err(Error::InvalidArgument {
                            argument: field.arg.clone(),
                            expected: ValueKind::Object.expected(),
                        });
                    }
                    Some(Field::Value(value)) => {
                        body.insert(field.wire.clone(), value.clone());
                    }
                }
            }
            Some(Value::Object(body))
        }
    };

    let content_type = match descriptor.method {
        HttpMethod::Post | HttpMethod::Patch => Some(JSON_CONTENT_TYPE),
        HttpMethod::Get | HttpMethod::Delete => None,
    };

    Ok(PreparedRequest {
        method: descriptor.method,
        url,
        query,
        body,
        content_type,
    })
}

/// Whether a non-flattened field already owns the JSON key `wire`.
fn declares_wire(fields: &[BodyField], wire: &str) -> bool {
    fields.iter().any(|field| !field.flatten && field.wire == wire)
}

fn query_value(arg: &str, kind: ValueKind, value: &Value) -> Result<QueryValue> {
    let invalid = || Error::InvalidArgument {
        argument: arg.to_string(),
        expected: kind.expected(),
    };

    match (kind, value) {
        (ValueKind::String, Value::String(s)) => Ok(QueryValue::String(s.clone())),
        (ValueKind::Boolean, Value::Bool(b)) => Ok(QueryValue::Boolean(*b)),
        (ValueKind::Integer, Value::Number(n)) => n.as_i64().map(QueryValue::Integer).ok_or_else(invalid),
        (ValueKind::StringList, Value::String(s)) => Ok(QueryValue::List(vec![s.clone()])),
        (ValueKind::StringList, Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect::<Result<Vec<_>>>()
            .map(QueryValue::List),
        _ => Err(invalid()),
    }
}
