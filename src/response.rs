//! Response returned by an executed request.
//!
//! The body is kept as raw text. Against the echo server used in tests that
//! text is the full request exactly as the server received it.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful HTTP response.
///
/// # Examples
///
/// ```no_run
/// use pizza_request::{read_collection, RequestConfig, Transport};
///
/// # async fn example() -> Result<(), pizza_request::Error> {
/// let transport = Transport::new()?;
/// let response = read_collection(RequestConfig::default())
///     .execute(&transport)
///     .await?;
///
/// println!("Status: {}", response.status);
/// println!("Request took {:?}", response.latency);
/// println!("Body: {}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from starting execution until the body was read.
    pub latency: Duration,
}

impl Response {
    /// Creates a new `Response`.
    pub fn new(raw_body: String, status: StatusCode, headers: HeaderMap, latency: Duration) -> Self {
        Self {
            raw_body,
            status,
            headers,
            latency,
        }
    }

    /// The raw response body.
    pub fn text(&self) -> &str {
        &self.raw_body
    }

    /// Consumes the response and returns the raw body.
    pub fn into_text(self) -> String {
        self.raw_body
    }

    /// Returns a reference to a header value by name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pizza_request::Response;
    /// # use http::{HeaderMap, StatusCode, HeaderValue};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("text/plain"));
    ///
    /// let response = Response::new(
    ///     String::new(),
    ///     StatusCode::OK,
    ///     headers,
    ///     Duration::from_millis(100),
    /// );
    ///
    /// assert_eq!(response.header("content-type"), Some("text/plain"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl AsRef<str> for Response {
    fn as_ref(&self) -> &str {
        &self.raw_body
    }
}
