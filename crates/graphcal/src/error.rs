//! Error types for endpoint invocation.

use crate::config::ConfigError;

/// Errors produced while building, dispatching, or decoding a Graph request.
///
/// Variants fall in two groups. Argument and catalog errors
/// ([`Error::MissingParameter`], [`Error::UnknownArgument`],
/// [`Error::InvalidArgument`], [`Error::UnknownEndpoint`]) are raised locally
/// before any network I/O. Transport errors ([`Error::Http`],
/// [`Error::Transport`], [`Error::Decode`]) come from the transport and are
/// passed through without retry or translation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required path or query parameter was not supplied. Carries the wire
    /// name of the parameter (e.g. `user-id`).
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    /// The caller supplied an argument the endpoint does not declare.
    #[error("unknown argument `{argument}` for endpoint {endpoint}")]
    UnknownArgument { endpoint: String, argument: String },

    /// A path or query argument had the wrong JSON kind.
    #[error("invalid value for `{argument}`: expected {expected}")]
    InvalidArgument {
        argument: String,
        expected: &'static str,
    },

    /// No endpoint with the given name exists in the catalog.
    #[error("endpoint not found: {0}")]
    UnknownEndpoint(String),

    /// Two descriptors share a name.
    #[error("duplicate endpoint name: {0}")]
    DuplicateEndpoint(String),

    /// A path template could not be parsed.
    #[error("invalid path template `{template}`: {reason}")]
    InvalidTemplate {
        template: String,
        reason: &'static str,
    },

    /// Microsoft Graph answered with a non-success status.
    #[error("Microsoft Graph request failed ({status}): {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The base URL or an assembled request URL is not a valid absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client configuration could not be loaded or is incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Returns `true` for errors raised before any request left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_)
                | Self::UnknownArgument { .. }
                | Self::InvalidArgument { .. }
                | Self::UnknownEndpoint(_)
        )
    }
}
