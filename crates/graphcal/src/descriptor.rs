//! Declarative description of a single Graph REST operation.
//!
//! An [`EndpointDescriptor`] holds everything the request builder needs: the
//! HTTP method, a [`PathTemplate`] with named placeholders, the optional
//! query parameters with their OData wire keys, and how the request body is
//! assembled. Descriptors are plain data; the [`catalog`](crate::catalog)
//! module composes several hundred of them from resource families.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{Error, Result};

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether the method only reads state.
    pub fn is_read(self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON kind accepted for a query parameter or body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Boolean,
    Integer,
    /// Ordered list of strings (`$select`, `$orderby`, `$expand`). A single
    /// string is also accepted.
    StringList,
    Object,
    ObjectList,
}

impl ValueKind {
    /// JSON Schema fragment for this kind.
    pub fn json_schema(self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::StringList => json!({
                "anyOf": [
                    { "type": "string" },
                    { "type": "array", "items": { "type": "string" } },
                ],
            }),
            Self::Object => json!({ "type": "object" }),
            Self::ObjectList => json!({ "type": "array", "items": { "type": "object" } }),
        }
    }

    /// Human label used in [`Error::InvalidArgument`].
    pub fn expected(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Boolean => "a boolean",
            Self::Integer => "an integer",
            Self::StringList => "a string or an array of strings",
            Self::Object => "an object",
            Self::ObjectList => "an array of objects",
        }
    }
}

/// A named placeholder in a [`PathTemplate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    /// Name as written in the template (`user-id`).
    pub wire: String,
    /// Logical argument name (`user_id`).
    pub arg: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Param(PathParam),
}

/// A URL path with `{name}` placeholders.
///
/// Placeholders may stand for a whole segment (`/events/{event-id}`) or sit
/// inside one (`allowedCalendarSharingRoles(User='{User}')`). Every
/// placeholder is a required parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    pieces: Vec<Piece>,
}

impl PathTemplate {
    /// Parses a template such as `/users/{user-id}/calendar/events/{event-id}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTemplate`] if the template does not start with
    /// `/`, contains an empty or unterminated placeholder, or has a stray `}`.
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidTemplate {
            template: template.to_string(),
            reason,
        };

        if !template.starts_with('/') {
            return Err(invalid("must start with `/`"));
        }

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' | '/' => return Err(invalid("placeholder is not terminated")),
                            _ => name.push(c),
                        }
                    }
                    if !closed {
                        return Err(invalid("placeholder is not terminated"));
                    }
                    if name.is_empty() {
                        return Err(invalid("placeholder name is empty"));
                    }
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    let arg = to_snake_case(&name);
                    pieces.push(Piece::Param(PathParam { wire: name, arg }));
                }
                '}' => return Err(invalid("unmatched `}`")),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self {
            raw: template.to_string(),
            pieces,
        })
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholders in template order.
    pub fn params(&self) -> impl Iterator<Item = &PathParam> {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Param(param) => Some(param),
            Piece::Literal(_) => None,
        })
    }

    /// Substitutes every placeholder with the value returned by `lookup`.
    ///
    /// Values are interpolated verbatim; no percent-encoding is applied.
    pub(crate) fn render<F>(&self, mut lookup: F) -> Result<String>
    where
        F: FnMut(&PathParam) -> Result<String>,
    {
        let mut path = String::with_capacity(self.raw.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => path.push_str(text),
                Piece::Param(param) => path.push_str(&lookup(param)?),
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An optional (or, for calendar views, required) query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    /// Logical argument name (`select`).
    pub arg: String,
    /// Wire key (`$select`).
    pub wire: String,
    pub kind: ValueKind,
    pub required: bool,
    pub description: String,
}

impl QueryParam {
    /// Creates a query parameter whose argument name is derived from the wire
    /// key: `$select` becomes `select`, `startDateTime` becomes
    /// `start_date_time`.
    pub fn new(wire: &str, kind: ValueKind, description: &str) -> Self {
        Self {
            arg: to_snake_case(wire.trim_start_matches('$')),
            wire: wire.to_string(),
            kind,
            required: false,
            description: description.to_string(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A field of a JSON request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyField {
    /// Logical argument name (`is_all_day`).
    pub arg: String,
    /// JSON key in the body (`isAllDay`).
    pub wire: String,
    pub kind: ValueKind,
    /// Merge the entries of an object value into the body instead of nesting
    /// it under `wire`. Used for open-extension custom properties.
    pub flatten: bool,
    pub description: String,
}

impl BodyField {
    /// Creates a body field whose wire name is the camelCase form of `arg`.
    pub fn new(arg: &str, kind: ValueKind, description: &str) -> Self {
        Self {
            arg: arg.to_string(),
            wire: to_camel_case(arg),
            kind,
            flatten: false,
            description: description.to_string(),
        }
    }

    /// Overrides the wire name.
    #[must_use]
    pub fn wire(mut self, wire: &str) -> Self {
        self.wire = wire.to_string();
        self
    }

    #[must_use]
    pub fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }
}

/// How the request body is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyMode {
    /// No body is sent, not even an empty object.
    None,
    /// A JSON object built from the present fields; `{}` when none are.
    Json(Vec<BodyField>),
}

impl BodyMode {
    pub fn fields(&self) -> &[BodyField] {
        match self {
            Self::None => &[],
            Self::Json(fields) => fields,
        }
    }
}

/// Shape of a successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// A single resource object.
    Resource,
    /// An object with `value` items and optional `@odata.count` /
    /// `@odata.nextLink`.
    Collection,
    /// A bare integer (`/$count`).
    Count,
    /// No content (`204` / `202`).
    Empty,
}

/// One REST operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: String,
    pub summary: String,
    pub method: HttpMethod,
    pub path: PathTemplate,
    pub query: Vec<QueryParam>,
    pub body: BodyMode,
    pub response: ResponseShape,
    pub tags: Vec<String>,
}

impl EndpointDescriptor {
    /// Starts a descriptor with no query parameters, no body, and a
    /// [`ResponseShape::Resource`] response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTemplate`] if `path` does not parse.
    pub fn new(name: impl Into<String>, method: HttpMethod, path: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            summary: String::new(),
            method,
            path: PathTemplate::parse(path)?,
            query: Vec::new(),
            body: BodyMode::None,
            response: ResponseShape::Resource,
            tags: Vec::new(),
        })
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn query(mut self, params: Vec<QueryParam>) -> Self {
        self.query = params;
        self
    }

    #[must_use]
    pub fn body(mut self, body: BodyMode) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn response(mut self, shape: ResponseShape) -> Self {
        self.response = shape;
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// Path placeholders, all of which are required.
    pub fn path_params(&self) -> impl Iterator<Item = &PathParam> {
        self.path.params()
    }

    /// Whether `arg` names a path, query, or body argument of this endpoint.
    pub fn accepts(&self, arg: &str) -> bool {
        self.path_params().any(|p| p.arg == arg)
            || self.query.iter().any(|q| q.arg == arg)
            || self.body.fields().iter().any(|f| f.arg == arg)
    }
}

/// Converts `calendarGroup-id` to `calendar_group_id` and `User` to `user`.
pub(crate) fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c == '-' {
            out.push('_');
        } else if c.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts `is_all_day` to `isAllDay`.
pub(crate) fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collects_placeholders_in_order() {
        let template = PathTemplate::parse("/users/{user-id}/calendar/events/{event-id}").unwrap();
        let params: Vec<_> = template.params().map(|p| p.wire.as_str()).collect();
        assert_eq!(params, ["user-id", "event-id"]);
        let args: Vec<_> = template.params().map(|p| p.arg.as_str()).collect();
        assert_eq!(args, ["user_id", "event_id"]);
    }

    #[test]
    fn test_parse_placeholder_inside_segment() {
        let template = PathTemplate::parse(
            "/users/{user-id}/calendar/microsoft.graph.allowedCalendarSharingRoles(User='{User}')",
        )
        .unwrap();
        let rendered = template
            .render(|p| Ok(format!("<{}>", p.arg)))
            .unwrap();
        assert_eq!(
            rendered,
            "/users/<user_id>/calendar/microsoft.graph.allowedCalendarSharingRoles(User='<user>')"
        );
    }

    #[test]
    fn test_parse_rejects_malformed_templates() {
        for template in [
            "users/{user-id}",
            "/users/{user-id",
            "/users/{}/events",
            "/users/user-id}",
            "/users/{user/id}",
        ] {
            let err = PathTemplate::parse(template).unwrap_err();
            assert!(
                matches!(err, Error::InvalidTemplate { .. }),
                "expected InvalidTemplate for {template}"
            );
        }
    }

    #[test]
    fn test_render_interpolates_without_escaping() {
        let template = PathTemplate::parse("/users/{user-id}/events").unwrap();
        let rendered = template.render(|_| Ok("a b/c".to_string())).unwrap();
        assert_eq!(rendered, "/users/a b/c/events");
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_snake_case("calendarGroup-id"), "calendar_group_id");
        assert_eq!(to_snake_case("User"), "user");
        assert_eq!(to_snake_case("startDateTime"), "start_date_time");
        assert_eq!(to_camel_case("is_all_day"), "isAllDay");
        assert_eq!(to_camel_case("subject"), "subject");
    }

    #[test]
    fn test_query_param_derives_argument_name() {
        let param = QueryParam::new("$select", ValueKind::StringList, "");
        assert_eq!(param.arg, "select");
        assert!(!param.required);
        let param = QueryParam::new("endDateTime", ValueKind::String, "").required();
        assert_eq!(param.arg, "end_date_time");
        assert!(param.required);
    }

    #[test]
    fn test_accepts_covers_path_query_and_body() {
        let descriptor = EndpointDescriptor::new(
            "user_update_event",
            HttpMethod::Patch,
            "/users/{user-id}/events/{event-id}",
        )
        .unwrap()
        .query(vec![QueryParam::new("$select", ValueKind::StringList, "")])
        .body(BodyMode::Json(vec![BodyField::new(
            "subject",
            ValueKind::String,
            "",
        )]));

        assert!(descriptor.accepts("user_id"));
        assert!(descriptor.accepts("select"));
        assert!(descriptor.accepts("subject"));
        assert!(!descriptor.accepts("top"));
    }
}
