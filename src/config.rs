//! Process-wide default configuration.
//!
//! [`Defaults`] holds the values every request starts from: the authority,
//! the API base path and the default header set. It is immutable once built.
//! Operations only ever read it and clone its headers before merging.

use crate::{Error, Result};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::OnceLock;

/// Environment variable overriding the default authority.
pub const AUTHORITY_ENV: &str = "PIZZA_API_AUTHORITY";

/// Authority used when [`AUTHORITY_ENV`] is not set.
pub const DEFAULT_AUTHORITY: &str = "http://localhost:8061";

/// Base path used by every request unless overridden.
pub const DEFAULT_BASE_PATH: &str = "/api/v1";

static GLOBAL: OnceLock<Defaults> = OnceLock::new();

/// Base values applied to every request.
///
/// # Examples
///
/// ```
/// use pizza_request::Defaults;
///
/// let defaults = Defaults::builder()
///     .authority("http://pizzas.internal:9000")
///     .base_path("/api/v2")
///     .build();
///
/// assert_eq!(defaults.authority(), "http://pizzas.internal:9000");
/// assert_eq!(defaults.base_path(), "/api/v2");
/// assert_eq!(defaults.headers()["accept"], "application/json");
/// ```
#[derive(Debug, Clone)]
pub struct Defaults {
    authority: String,
    base_path: String,
    headers: HeaderMap,
}

impl Defaults {
    /// Creates a new `DefaultsBuilder` seeded with the built-in values.
    pub fn builder() -> DefaultsBuilder {
        DefaultsBuilder::new()
    }

    /// Builds defaults from the built-in values and the environment.
    ///
    /// The authority is taken from [`AUTHORITY_ENV`] when it is set and not
    /// empty, otherwise [`DEFAULT_AUTHORITY`] is used.
    pub fn from_env() -> Self {
        let builder = DefaultsBuilder::new();
        match std::env::var(AUTHORITY_ENV) {
            Ok(authority) if !authority.trim().is_empty() => {
                tracing::debug!(authority = %authority, "Using authority from environment");
                builder.authority(authority).build()
            }
            _ => builder.build(),
        }
    }

    /// Returns the process-wide defaults, reading the environment on first use.
    pub fn global() -> &'static Defaults {
        GLOBAL.get_or_init(Defaults::from_env)
    }

    /// The base URL requests are sent to.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The path prefix placed between the authority and the resource path.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The default header set.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl Default for Defaults {
    fn default() -> Self {
        DefaultsBuilder::new().build()
    }
}

/// Builder for [`Defaults`].
#[derive(Debug, Clone)]
pub struct DefaultsBuilder {
    authority: String,
    base_path: String,
    headers: HeaderMap,
}

impl DefaultsBuilder {
    /// Creates a builder with the built-in authority, base path and the
    /// `Accept` / `Content-Type` JSON headers.
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            authority: DEFAULT_AUTHORITY.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            headers,
        }
    }

    /// Sets the authority. A trailing `/` is dropped so paths concatenate cleanly.
    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        let mut authority = authority.into();
        while authority.ends_with('/') {
            authority.pop();
        }
        self.authority = authority;
        self
    }

    /// Sets the base path.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Adds or replaces a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Builds the immutable [`Defaults`].
    pub fn build(self) -> Defaults {
        Defaults {
            authority: self.authority,
            base_path: self.base_path,
            headers: self.headers,
        }
    }
}

impl Default for DefaultsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
