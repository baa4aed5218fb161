//! The reqwest-backed [`Transport`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::{ConfigError, GraphConfig},
    error::{Error, Result},
    request::{JSON_CONTENT_TYPE, Query},
    transport::{RawResponse, Transport},
};

/// Authenticated HTTP client for Microsoft Graph.
///
/// Every request carries `Authorization: Bearer <token>` and
/// `Accept: application/json`. List-valued query parameters are comma-joined
/// the way OData expects (`$select=subject,start`). Any non-2xx status is
/// returned as [`Error::Http`] with the raw response body.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GraphClient {
    /// Creates a client for `endpoint` (e.g. `https://graph.microsoft.com/v1.0`).
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is blank or not an absolute URL, or if
    /// `access_token` is blank.
    pub fn new(endpoint: &str, access_token: impl Into<String>) -> Result<Self> {
        Self::build(endpoint, access_token.into(), reqwest::Client::new())
    }

    /// Creates a client from a resolved [`GraphConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no access token is configured or the
    /// endpoint is blank, and [`Error::Transport`] if the HTTP client cannot
    /// be built.
    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        let token = config.access_token()?.to_string();
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Self::build(config.endpoint(), token, builder.build()?)
    }

    fn build(endpoint: &str, access_token: String, http: reqwest::Client) -> Result<Self> {
        if access_token.trim().is_empty() {
            return Err(ConfigError::MissingAccessToken.into());
        }
        let base_url = normalize_base_url(endpoint)?;
        reqwest::Url::parse(&base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http,
            base_url,
            access_token,
        })
    }

    fn parse_url(url: &str) -> Result<reqwest::Url> {
        reqwest::Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))
    }

    async fn send_request(
        &self,
        request: reqwest::RequestBuilder,
        query: &Query,
    ) -> Result<RawResponse> {
        let pairs: Vec<(&str, String)> = query
            .iter()
            .map(|(key, value)| (key.as_str(), value.encode()))
            .collect();

        let response = request
            .query(&pairs)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status.as_u16(), response.text().await));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }

    fn with_body(
        request: reqwest::RequestBuilder,
        body: Option<&Value>,
        content_type: &str,
    ) -> Result<reqwest::RequestBuilder> {
        let request = request.header(CONTENT_TYPE, content_type);
        Ok(match body {
            Some(body) => request.body(serde_json::to_vec(body)?),
            None => request,
        })
    }
}

#[async_trait]
impl Transport for GraphClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str, query: &Query) -> Result<RawResponse> {
        debug!(method = "GET", url, "Sending Graph request");
        let request = self.http.get(Self::parse_url(url)?);
        self.send_request(request, query).await
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        query: &Query,
        content_type: &str,
    ) -> Result<RawResponse> {
        debug!(method = "POST", url, has_body = body.is_some(), "Sending Graph request");
        let request = Self::with_body(self.http.post(Self::parse_url(url)?), body, content_type)?;
        self.send_request(request, query).await
    }

    async fn patch(&self, url: &str, body: Option<&Value>, query: &Query) -> Result<RawResponse> {
        debug!(method = "PATCH", url, "Sending Graph request");
        let request = Self::with_body(
            self.http.patch(Self::parse_url(url)?),
            body,
            JSON_CONTENT_TYPE,
        )?;
        self.send_request(request, query).await
    }

    async fn delete(&self, url: &str, query: &Query) -> Result<RawResponse> {
        debug!(method = "DELETE", url, "Sending Graph request");
        let request = self.http.delete(Self::parse_url(url)?);
        self.send_request(request, query).await
    }
}

/// Builds [`Error::Http`] for a non-2xx response. The status is kept even
/// when the error body cannot be read.
fn http_error(status: u16, body: reqwest::Result<String>) -> Error {
    let body = body.unwrap_or_else(|err| {
        warn!(status, error = %err, "Failed to read Graph error body");
        String::new()
    });
    Error::Http { status, body }
}

/// Trims whitespace and trailing slashes from an endpoint.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyEndpoint`] if nothing is left.
pub fn normalize_base_url(endpoint: &str) -> Result<String> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyEndpoint.into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
