//! Error types for building and executing pizza API requests.
//!
//! Errors fall into two groups. Validation errors ([`Error::MissingName`]) are
//! returned synchronously by the operation that detected them, before any
//! request exists. Every other variant comes from configuration or from the
//! transport while a request is executing.

use http::{HeaderMap, StatusCode};

/// The main error type for this crate.
///
/// # Examples
///
/// ```
/// use pizza_request::{create_item, Error, RequestConfig};
///
/// match create_item(RequestConfig::default()) {
///     Err(Error::MissingName) => println!("caller forgot the name"),
///     Err(e) => eprintln!("unexpected: {}", e),
///     Ok(_) => unreachable!("a name is required"),
/// }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// `create_item` was called without a usable `name`.
    ///
    /// Raised before a request is built, so nothing reaches the network.
    #[error("missing name")]
    MissingName,

    /// Invalid configuration was provided.
    ///
    /// Covers invalid header names or values, an unusable authority and
    /// failures while building the underlying HTTP client.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The composed request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request body could not be encoded for its content type.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// A network-level error occurred (connection refused, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The server returned a non-2xx HTTP status code.
    ///
    /// # Fields
    ///
    /// * `status` - The HTTP status code
    /// * `raw_response` - The raw response body
    /// * `headers` - The response headers
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationFailed(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::SerializationFailed(err.to_string())
    }
}

impl Error {
    /// Returns `true` if this error was raised by local validation.
    ///
    /// Validation errors are a contract violation by the caller and are never
    /// produced by the transport.
    ///
    /// # Examples
    ///
    /// ```
    /// use pizza_request::Error;
    ///
    /// assert!(Error::MissingName.is_validation());
    /// assert!(!Error::Timeout.is_validation());
    /// ```
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingName)
    }

    /// Returns `true` if this error happened while the request was in flight.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Timeout | Error::HttpError { .. }
        )
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
