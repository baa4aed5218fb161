//! Descriptor-driven client for the Outlook calendar surface of Microsoft
//! Graph.
//!
//! Every Graph operation (calendars, calendar groups, calendar views, events,
//! instances, attachments, open extensions, calendar permissions, and the
//! Graph actions and functions on them) is a row in a [`Catalog`] of
//! [`EndpointDescriptor`]s. One generic method turns a descriptor plus
//! [`Arguments`] into exactly one HTTP request:
//!
//! 1. validate: every path placeholder and required query parameter must be
//!    present, and no undeclared argument may be passed
//! 2. render the URL from the path template and the transport's base URL
//! 3. collect the OData query parameters that were supplied
//! 4. assemble the JSON body from the supplied fields (none for bodyless
//!    actions)
//! 5. dispatch to one [`Transport`] primitive and decode the response
//!
//! Validation failures are raised before any I/O. Everything the transport
//! reports is returned unmodified.
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> graphcal::Result<()> {
//! use graphcal::{Arguments, CalendarApi, GraphClient, GraphConfig};
//!
//! let config = GraphConfig::resolve()?.unwrap_or_default().with_env_overrides();
//! let api = CalendarApi::new(GraphClient::from_config(&config)?);
//!
//! api.call(
//!     "user_event_dismiss_reminder",
//!     Arguments::new().with("user_id", "me").with("event_id", "AAMkAG..."),
//! )
//! .await?;
//!
//! for tool in api.list_tools().iter().take(3) {
//!     println!("{}: {}", tool.name, tool.description);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `mcp`: [`McpService`], an `rmcp` server handler exposing every endpoint
//!   as an MCP tool.

pub mod api;
pub mod args;
pub mod catalog;
pub mod client;
pub mod config;
pub mod descriptor;
pub mod error;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod request;
pub mod tool;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::CalendarApi;
pub use args::{Arguments, Field};
pub use catalog::Catalog;
pub use client::GraphClient;
pub use config::{ConfigError, DEFAULT_GRAPH_ENDPOINT, GraphConfig};
pub use descriptor::{
    BodyField, BodyMode, EndpointDescriptor, HttpMethod, PathTemplate, QueryParam, ResponseShape,
    ValueKind,
};
pub use error::{Error, Result};
#[cfg(feature = "mcp")]
pub use mcp::McpService;
pub use request::{PreparedRequest, QueryValue};
pub use tool::ToolInfo;
pub use transport::{RawResponse, Transport};
