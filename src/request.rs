//! The deferred request descriptor.
//!
//! A [`PendingRequest`] is an inert description of a request: verb, URL,
//! headers and an optional body. Building one never touches the network.
//! It can be inspected and mutated freely until [`PendingRequest::execute`]
//! consumes it.

use crate::metadata::merge_headers;
use crate::transport::Transport;
use crate::{Error, Response, Result};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Structured fields, encoded according to the request's `Content-Type`
    /// whenever the body is read or sent.
    Fields(serde_json::Value),

    /// Text sent exactly as given.
    Raw(String),
}

impl Body {
    /// Encodes the body for the given `Content-Type` header value.
    ///
    /// `application/x-www-form-urlencoded` produces a URL-encoded form; any
    /// other or missing content type produces JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if the fields cannot be
    /// represented in the target encoding, such as nested objects in a form.
    pub fn encode(&self, content_type: Option<&HeaderValue>) -> Result<String> {
        match self {
            Body::Raw(text) => Ok(text.clone()),
            Body::Fields(fields) if is_form(content_type) => Ok(serde_urlencoded::to_string(fields)?),
            Body::Fields(fields) => Ok(serde_json::to_string(fields)?),
        }
    }
}

fn is_form(content_type: Option<&HeaderValue>) -> bool {
    content_type
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

/// A composed request that has not been sent yet.
///
/// # Examples
///
/// ```
/// use pizza_request::{create_item, RequestConfig};
///
/// let mut request = create_item(RequestConfig::new().with_name("margherita"))?;
/// assert_eq!(request.encoded_body()?.as_deref(), Some(r#"{"name":"margherita"}"#));
///
/// // The last body set before execution wins.
/// request.send(&serde_json::json!({ "name": "capricciosa" }))?;
/// assert_eq!(request.encoded_body()?.as_deref(), Some(r#"{"name":"capricciosa"}"#));
/// # Ok::<(), pizza_request::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PendingRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Body>,
}

impl PendingRequest {
    /// Creates a descriptor with the given verb, URL and headers and no body.
    pub fn new(method: Method, url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            body: None,
        }
    }

    /// The HTTP verb.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The full target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The path component of the target URL, including any query string.
    ///
    /// An empty path is reported as `/`, as it appears in the request line.
    pub fn path(&self) -> String {
        let target = match self.url.find("://") {
            Some(idx) => {
                let after_scheme = &self.url[idx + 3..];
                let start = after_scheme
                    .find(&['/', '?', '#'][..])
                    .unwrap_or(after_scheme.len());
                &after_scheme[start..]
            }
            None => self.url.as_str(),
        };
        let target = target.split('#').next().unwrap_or_default();
        if target.starts_with('/') {
            target.to_string()
        } else {
            format!("/{}", target)
        }
    }

    /// The merged header set.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// The current body, unencoded.
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// The body as it will be sent, encoded for the current `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if the body cannot be encoded.
    pub fn encoded_body(&self) -> Result<Option<String>> {
        self.body
            .as_ref()
            .map(|body| body.encode(self.headers.get(CONTENT_TYPE)))
            .transpose()
    }

    /// Merges `headers` into the request. Same-named headers are replaced.
    pub fn set(&mut self, headers: &HeaderMap) -> &mut Self {
        merge_headers(&mut self.headers, headers);
        self
    }

    /// Sets a single header, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<&mut Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Replaces the body with the given fields.
    ///
    /// Fields are not merged with a previous body; the last call wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if `fields` cannot be converted
    /// to a JSON value.
    pub fn send<T: Serialize + ?Sized>(&mut self, fields: &T) -> Result<&mut Self> {
        let fields = serde_json::to_value(fields)?;
        self.body = Some(Body::Fields(fields));
        Ok(self)
    }

    /// Replaces the body with raw text.
    pub fn send_raw(&mut self, text: impl Into<String>) -> &mut Self {
        self.body = Some(Body::Raw(text.into()));
        self
    }

    /// Sends the request through `transport` and waits for the response.
    ///
    /// Consumes the descriptor, so it cannot be changed once execution starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, the body cannot be
    /// encoded, the transport fails, or the server answers with a non-2xx
    /// status.
    pub async fn execute(self, transport: &Transport) -> Result<Response> {
        transport.execute(self).await
    }

    /// Splits the descriptor into its verb, URL, headers and encoded body.
    pub(crate) fn into_parts(self) -> Result<(Method, String, HeaderMap, Option<String>)> {
        let body = self.encoded_body()?;
        Ok((self.method, self.url, self.headers, body))
    }
}
