//! HTTP transport that executes [`PendingRequest`]s.
//!
//! The transport is a thin layer over `reqwest`. It performs no retries and
//! does not interpret response bodies; non-2xx statuses are surfaced as
//! [`Error::HttpError`] with the raw text preserved.

use crate::{Error, PendingRequest, Response, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Executes requests over HTTP.
///
/// Cheap to clone; clones share the underlying connection pool.
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
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

struct TransportInner {
    http_client: reqwest::Client,
    timeout: Option<Duration>,
}

impl Transport {
    /// Creates a transport with no timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        TransportBuilder::new().build()
    }

    /// Creates a new `TransportBuilder`.
    pub fn builder() -> TransportBuilder {
        TransportBuilder::new()
    }

    /// Sends `request` and waits for the response.
    pub(crate) async fn execute(&self, request: PendingRequest) -> Result<Response> {
        let start_time = Instant::now();
        let (method, url, headers, body) = request.into_parts()?;
        let parsed = Url::parse(&url)?;

        tracing::debug!(
            method = %method,
            url = %parsed,
            "Executing HTTP request"
        );

        let mut builder = self
            .inner
            .http_client
            .request(method.clone(), parsed)
            .headers(headers);

        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = Error::from(e);
                tracing::warn!(
                    error = %err,
                    method = %method,
                    url = %url,
                    "Request failed"
                );
                return Err(err);
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        if !status.is_success() {
            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_body,
                    "Client error (4xx)"
                );
            } else if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_body,
                    "Server error (5xx)"
                );
            } else {
                tracing::warn!(
                    status = status.as_u16(),
                    "Unexpected non-success status"
                );
            }

            return Err(Error::HttpError {
                status,
                raw_response: raw_body,
                headers,
            });
        }

        Ok(Response::new(raw_body, status, headers, latency))
    }
}

/// Builder for configuring and creating a [`Transport`].
#[derive(Debug, Default)]
pub struct TransportBuilder {
    timeout: Option<Duration>,
}

impl TransportBuilder {
    /// Creates a new `TransportBuilder` with default settings.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn build(self) -> Result<Transport> {
        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Transport {
            inner: Arc::new(TransportInner {
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
