//! The HTTP seam between endpoint methods and the network.
//!
//! [`Transport`] mirrors the four primitives an endpoint method may call plus
//! the single decode step applied to every response. [`GraphClient`] is the
//! reqwest-backed implementation; tests substitute recording fakes.
//!
//! [`GraphClient`]: crate::GraphClient

use async_trait::async_trait;
use serde_json::Value;

use crate::{error::Result, request::Query};

/// An undecoded HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }
}

/// HTTP primitives consumed by endpoint methods.
///
/// Implementations own authentication, connection handling, query encoding,
/// and error statuses. Endpoint methods never retry or reinterpret errors
/// returned from here.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Prefix prepended to every rendered path, e.g.
    /// `https://graph.microsoft.com/v1.0`.
    fn base_url(&self) -> &str;

    async fn get(&self, url: &str, query: &Query) -> Result<RawResponse>;

    async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        query: &Query,
        content_type: &str,
    ) -> Result<RawResponse>;

    async fn patch(&self, url: &str, body: Option<&Value>, query: &Query) -> Result<RawResponse>;

    async fn delete(&self, url: &str, query: &Query) -> Result<RawResponse>;

    /// Decodes a successful response. Defaults to [`decode_body`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::Error::Decode) if a JSON response
    /// body is malformed.
    fn handle_response(&self, response: RawResponse) -> Result<Value> {
        decode_body(&response)
    }
}

/// Passthrough decoding of a Graph response.
///
/// - An empty body (`204 No Content`, `202 Accepted`) decodes to `null`.
/// - A JSON content type is parsed as JSON.
/// - Anything else (e.g. the `text/plain` body of `/$count`) is parsed as
///   JSON when possible and returned as a string otherwise.
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) if a body declared as
/// JSON does not parse.
pub fn decode_body(response: &RawResponse) -> Result<Value> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let declared_json = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("json"));
    if declared_json {
        return Ok(serde_json::from_slice(&response.body)?);
    }

    match serde_json::from_slice(&response.body) {
        Ok(value) => Ok(value),
        Err(_) => Ok(Value::String(
            String::from_utf8_lossy(&response.body).into_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Error;

    #[test]
    fn test_decode_empty_body_is_null() {
        assert_eq!(decode_body(&RawResponse::empty(204)).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_json_body() {
        let response = RawResponse::json(200, &json!({ "id": "e1" }));
        assert_eq!(decode_body(&response).unwrap(), json!({ "id": "e1" }));
    }

    #[test]
    fn test_decode_plain_text_count_as_number() {
        let response = RawResponse {
            status: 200,
            content_type: Some("text/plain".to_string()),
            body: b"42".to_vec(),
        };
        assert_eq!(decode_body(&response).unwrap(), json!(42));
    }

    #[test]
    fn test_decode_plain_text_falls_back_to_string() {
        let response = RawResponse {
            status: 200,
            content_type: Some("text/plain".to_string()),
            body: b"accepted".to_vec(),
        };
        assert_eq!(decode_body(&response).unwrap(), json!("accepted"));
    }

    #[test]
    fn test_decode_malformed_json_is_an_error() {
        let response = RawResponse {
            status: 200,
            content_type: Some("application/json; odata.metadata=minimal".to_string()),
            body: b"{ not json".to_vec(),
        };
        assert!(matches!(decode_body(&response), Err(Error::Decode(_))));
    }
}
