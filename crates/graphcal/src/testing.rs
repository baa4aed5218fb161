//! In-memory transport that records calls and replays a fixed response.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    descriptor::HttpMethod,
    error::{Error, Result},
    request::Query,
    transport::{RawResponse, Transport},
};

pub(crate) const TEST_BASE_URL: &str = "https://graph.example.test/v1.0";

/// One primitive invocation as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub query: Query,
    pub body: Option<Value>,
    pub content_type: Option<String>,
}

pub(crate) struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    response: RawResponse,
    fail_with: Option<(u16, String)>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::responding(RawResponse::empty(204))
    }

    pub(crate) fn responding(response: RawResponse) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response,
            fail_with: None,
        }
    }

    /// Every call fails with [`Error::Http`].
    pub(crate) fn failing(status: u16, body: &str) -> Self {
        Self {
            fail_with: Some((status, body.to_string())),
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: HttpMethod,
        url: &str,
        query: &Query,
        body: Option<&Value>,
        content_type: Option<&str>,
    ) -> Result<RawResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            query: query.clone(),
            body: body.cloned(),
            content_type: content_type.map(str::to_string),
        });
        match &self.fail_with {
            Some((status, body)) => Err(Error::Http {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(self.response.clone()),
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn base_url(&self) -> &str {
        TEST_BASE_URL
    }

    async fn get(&self, url: &str, query: &Query) -> Result<RawResponse> {
        self.record(HttpMethod::Get, url, query, None, None)
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        query: &Query,
        content_type: &str,
    ) -> Result<RawResponse> {
        self.record(HttpMethod::Post, url, query, body, Some(content_type))
    }

    async fn patch(&self, url: &str, body: Option<&Value>, query: &Query) -> Result<RawResponse> {
        self.record(
            HttpMethod::Patch,
            url,
            query,
            body,
            Some(crate::request::JSON_CONTENT_TYPE),
        )
    }

    async fn delete(&self, url: &str, query: &Query) -> Result<RawResponse> {
        self.record(HttpMethod::Delete, url, query, None, None)
    }
}
