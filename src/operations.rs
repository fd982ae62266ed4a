//! Resource operations on the pizza collection.
//!
//! Every operation returns a [`PendingRequest`] without sending it. The
//! caller decides when to call [`PendingRequest::execute`].

use crate::builder::{build_request, Fallback, COLLECTION_PATH};
use crate::{Defaults, Error, PendingRequest, RequestConfig, Result};
use http::Method;
use serde::Serialize;

/// Header carrying the API key on write operations.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// API key sent with every `create_item` request.
pub const API_KEY: &str = "foobar";

#[derive(Serialize)]
struct NewPizza<'a> {
    name: &'a str,
}

/// Operations bound to a set of [`Defaults`].
///
/// # Examples
///
/// ```
/// use pizza_request::{Defaults, PizzaApi, RequestConfig};
///
/// let defaults = Defaults::builder().base_path("/api/v2").build();
/// let api = PizzaApi::new(&defaults);
///
/// let request = api.read_collection(RequestConfig::default());
/// assert_eq!(request.path(), "/api/v2/pizzas");
///
/// let request = api.create_item(RequestConfig::new().with_name("margherita"))?;
/// assert_eq!(request.header("x-api-key"), Some("foobar"));
/// # Ok::<(), pizza_request::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PizzaApi<'a> {
    defaults: &'a Defaults,
}

impl PizzaApi<'static> {
    /// Operations bound to the process-wide [`Defaults::global`].
    pub fn global() -> Self {
        Self::new(Defaults::global())
    }
}

impl<'a> PizzaApi<'a> {
    /// Creates operations reading from `defaults`.
    pub fn new(defaults: &'a Defaults) -> Self {
        Self { defaults }
    }

    /// The defaults these operations read from.
    pub fn defaults(&self) -> &'a Defaults {
        self.defaults
    }

    /// Builds a generic request. `config.verb` is honoured and defaults to GET;
    /// the resource path defaults to the collection.
    pub fn request(&self, config: RequestConfig) -> PendingRequest {
        build_request(self.defaults, &config, &Fallback::default())
    }

    /// Builds a GET request for the collection.
    ///
    /// Needs no input; `config.verb` is ignored.
    pub fn read_collection(&self, config: RequestConfig) -> PendingRequest {
        let fallback = Fallback {
            resource_path: COLLECTION_PATH,
            verb: Method::GET,
        };
        let config = RequestConfig { verb: None, ..config };
        build_request(self.defaults, &config, &fallback)
    }

    /// Builds a POST request creating a new item called `config.name`.
    ///
    /// The `X-API-Key` header is applied after the caller's headers, so it is
    /// always present with the fixed key. The caller may still override
    /// `Content-Type`, which selects how the `{ name }` body is encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingName`] immediately if `config.name` is absent
    /// or empty. No request is built in that case.
    pub fn create_item(&self, config: RequestConfig) -> Result<PendingRequest> {
        let name = match config.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                tracing::warn!("create_item called without a name");
                return Err(Error::MissingName);
            }
        };

        let fallback = Fallback {
            resource_path: COLLECTION_PATH,
            verb: Method::POST,
        };
        let config = RequestConfig { verb: None, ..config };

        let mut request = build_request(self.defaults, &config, &fallback);
        request.set_header(API_KEY_HEADER, API_KEY)?;
        request.send(&NewPizza { name: &name })?;

        Ok(request)
    }
}

/// [`PizzaApi::read_collection`] against [`Defaults::global`].
pub fn read_collection(config: RequestConfig) -> PendingRequest {
    PizzaApi::global().read_collection(config)
}

/// [`PizzaApi::create_item`] against [`Defaults::global`].
///
/// # Errors
///
/// Returns [`Error::MissingName`] immediately if `config.name` is absent or empty.
pub fn create_item(config: RequestConfig) -> Result<PendingRequest> {
    PizzaApi::global().create_item(config)
}
