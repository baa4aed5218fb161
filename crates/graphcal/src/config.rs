//! Client configuration.
//!
//! A [`GraphConfig`] carries the Graph endpoint, the bearer token, and an
//! optional request timeout. It is read from a TOML file:
//!
//! ```toml
//! endpoint = "https://graph.microsoft.com/v1.0"
//! access_token = "eyJ0eXAi..."
//! timeout_secs = 30
//! ```
//!
//! # Resolution Algorithm
//!
//! [`GraphConfig::resolve`] returns the first file found in this order:
//!
//! 1. The path in `GRAPHCAL_CONFIG`
//! 2. `graphcal.toml` in the current directory
//! 3. `graphcal.toml` in each parent directory, walking up to the root
//! 4. `~/.config/graphcal/config.toml` (platform config dir)
//!
//! Missing files are not errors. Environment overrides
//! (`GRAPHCAL_ACCESS_TOKEN`, `GRAPHCAL_ENDPOINT`) are applied on top by
//! [`GraphConfig::with_env_overrides`].

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Default Microsoft Graph endpoint.
pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com/v1.0";

/// File name searched for in the current and parent directories.
pub const CONFIG_FILE_NAME: &str = "graphcal.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "GRAPHCAL_CONFIG";

/// Environment variable overriding `access_token`.
pub const ACCESS_TOKEN_ENV: &str = "GRAPHCAL_ACCESS_TOKEN";

/// Environment variable overriding `endpoint`.
pub const ENDPOINT_ENV: &str = "GRAPHCAL_ENDPOINT";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// I/O error when reading a config file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error when a config file is malformed.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// No access token was configured.
    #[error("access_token must not be empty (set it in {CONFIG_FILE_NAME} or {ACCESS_TOKEN_ENV})")]
    MissingAccessToken,

    /// The configured endpoint is blank.
    #[error("endpoint must not be empty")]
    EmptyEndpoint,
}

/// Settings for [`GraphClient`](crate::GraphClient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Graph base URL. Defaults to [`DEFAULT_GRAPH_ENDPOINT`].
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token sent with every request.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Per-request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl GraphConfig {
    /// Loads a config file from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Finds and loads the config file using the resolution algorithm.
    ///
    /// # Errors
    ///
    /// Returns an error if a file was found but could not be read or parsed.
    pub fn resolve() -> Result<Option<Self>, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
            && path.exists()
        {
            return Self::load(&path).map(Some);
        }

        let current = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        if let Some(config) = Self::resolve_from(&current)? {
            return Ok(Some(config));
        }

        if let Some(path) = xdg_config_path()
            && path.exists()
        {
            return Self::load(&path).map(Some);
        }

        Ok(None)
    }

    /// Searches `start` and its ancestors for [`CONFIG_FILE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns an error if a file was found but could not be read or parsed.
    pub fn resolve_from(start: &Path) -> Result<Option<Self>, ConfigError> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// Applies `GRAPHCAL_ACCESS_TOKEN` and `GRAPHCAL_ENDPOINT` on top of the
    /// file values.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps an environment variable
    /// name to its value. Blank values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key| lookup(key).filter(|v: &String| !v.trim().is_empty());
        if let Some(token) = non_blank(ACCESS_TOKEN_ENV) {
            self.access_token = Some(token);
        }
        if let Some(endpoint) = non_blank(ENDPOINT_ENV) {
            self.endpoint = Some(endpoint);
        }
        self
    }

    /// The configured endpoint, or [`DEFAULT_GRAPH_ENDPOINT`].
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_GRAPH_ENDPOINT)
    }

    /// The configured access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAccessToken`] if no non-blank token is
    /// set.
    pub fn access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingAccessToken)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("graphcal").join("config.toml"))
}
