//! Per-call request configuration.

use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// Overrides for a single operation call.
///
/// Every field is optional. Anything left unset falls back to the
/// operation's own default and then to [`Defaults`](crate::Defaults).
/// Headers overlay the default header set key by key; they never replace it
/// wholesale.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// The base URL, e.g. `http://localhost:8061`.
    pub authority: Option<String>,

    /// The API prefix, e.g. `/api/v1`.
    pub base_path: Option<String>,

    /// The resource path appended after the base path, e.g. `/pizzas`.
    pub resource_path: Option<String>,

    /// Headers overlaid on the default header set.
    pub headers: HeaderMap,

    /// The HTTP verb. Operations with a fixed verb ignore it.
    pub verb: Option<Method>,

    /// The item name used by `create_item`.
    pub name: Option<String>,
}

impl RequestConfig {
    /// Creates an empty configuration; every value comes from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the authority.
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Overrides the base path.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Overrides the resource path.
    pub fn with_resource_path(mut self, resource_path: impl Into<String>) -> Self {
        self.resource_path = Some(resource_path.into());
        self
    }

    /// Overrides the HTTP verb.
    pub fn with_verb(mut self, verb: Method) -> Self {
        self.verb = Some(verb);
        self
    }

    /// Sets the item name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds every header from `headers`, later values winning.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        merge_headers(&mut self.headers, &headers);
        self
    }
}

/// Overlays `overrides` onto `base`. Same-named headers are replaced, others kept.
pub(crate) fn merge_headers(base: &mut HeaderMap, overrides: &HeaderMap) {
    for name in overrides.keys() {
        base.remove(name);
        for value in overrides.get_all(name) {
            base.append(name.clone(), value.clone());
        }
    }
}
