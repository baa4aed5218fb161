//! The generic endpoint method and tool enumerator.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    args::Arguments,
    catalog::Catalog,
    descriptor::{EndpointDescriptor, HttpMethod},
    error::{Error, Result},
    request::{JSON_CONTENT_TYPE, PreparedRequest, prepare},
    tool::ToolInfo,
    transport::Transport,
};

/// Every endpoint of a [`Catalog`], bound to a [`Transport`].
///
/// Each call validates its arguments, performs exactly one transport
/// primitive, and returns the decoded response. Calls share nothing but the
/// transport and the catalog, both read-only.
///
/// ```no_run
/// # async fn demo() -> graphcal::Result<()> {
/// use graphcal::{Arguments, CalendarApi, GraphClient};
///
/// let client = GraphClient::new("https://graph.microsoft.com/v1.0", "token")?;
/// let api = CalendarApi::new(client);
/// let _event = api
///     .call(
///         "user_calendar_get_event",
///         Arguments::new()
///             .with("user_id", "u1")
///             .with("event_id", "e1")
///             .with("select", ["subject", "start"].as_slice()),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CalendarApi<T> {
    transport: T,
    catalog: &'static Catalog,
}

impl<T: Transport> CalendarApi<T> {
    /// Binds the [standard catalog](Catalog::standard) to `transport`.
    pub fn new(transport: T) -> Self {
        Self::with_catalog(transport, Catalog::standard())
    }

    pub fn with_catalog(transport: T, catalog: &'static Catalog) -> Self {
        Self { transport, catalog }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// One [`ToolInfo`] per endpoint, in catalog order.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.catalog.iter().map(ToolInfo::from_descriptor).collect()
    }

    /// Looks up an endpoint by tool name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEndpoint`] if no endpoint has that name.
    pub fn endpoint(&self, name: &str) -> Result<&'static EndpointDescriptor> {
        self.catalog.endpoint(name)
    }

    /// Builds the request `call` would send, without sending it.
    ///
    /// # Errors
    ///
    /// Returns the same local errors as [`CalendarApi::call`].
    pub fn prepare(&self, name: &str, args: &Arguments) -> Result<PreparedRequest> {
        self.catalog.prepare(name, self.transport.base_url(), args)
    }

    /// Validates `args`, performs one request, and decodes the response.
    ///
    /// # Errors
    ///
    /// Argument errors ([`Error::MissingParameter`],
    /// [`Error::UnknownArgument`], [`Error::InvalidArgument`]) are returned
    /// before the transport is called. Anything the transport returns is
    /// passed through unchanged.
    #[instrument(skip_all, fields(endpoint = %descriptor.name))]
    pub async fn invoke(&self, descriptor: &EndpointDescriptor, args: &Arguments) -> Result<Value> {
        let request = prepare(descriptor, self.transport.base_url(), args)?;
        debug!(
            method = %request.method,
            url = %request.url,
            query_params = request.query.len(),
            has_body = request.body.is_some(),
            "Prepared request"
        );

        let PreparedRequest {
            method,
            url,
            query,
            body,
            content_type,
        } = request;
        let response = match method {
            HttpMethod::Get => self.transport.get(&url, &query).await?,
            HttpMethod::Post => {
                self.transport
                    .post(
                        &url,
                        body.as_ref(),
                        &query,
                        content_type.unwrap_or(JSON_CONTENT_TYPE),
                    )
                    .await?
            }
            HttpMethod::Patch => self.transport.patch(&url, body.as_ref(), &query).await?,
            HttpMethod::Delete => self.transport.delete(&url, &query).await?,
        };
        debug!(status = response.status, "Received response");

        self.transport.handle_response(response)
    }

    /// Invokes the endpoint named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEndpoint`] for an unknown name, otherwise as
    /// [`CalendarApi::invoke`].
    pub async fn call(&self, name: &str, args: Arguments) -> Result<Value> {
        let descriptor = self.endpoint(name)?;
        self.invoke(descriptor, &args).await
    }

    /// Invokes `name` with a JSON object of arguments, as sent by a
    /// tool-calling framework.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `input` is not an object or
    /// `null`, otherwise as [`CalendarApi::call`].
    pub async fn call_json(&self, name: &str, input: Value) -> Result<Value> {
        let descriptor = self.endpoint(name)?;
        let args = Arguments::from_json(input)?;
        self.invoke(descriptor, &args).await
    }

    /// Invokes `name` and decodes the response into `R`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the response does not match `R`,
    /// otherwise as [`CalendarApi::call`].
    pub async fn call_as<R: DeserializeOwned>(&self, name: &str, args: Arguments) -> Result<R> {
        let value = self.call(name, args).await?;
        Ok(serde_json::from_value(value)?)
    }
}
