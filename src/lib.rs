//! # pizza-request - request construction for the pizza API
//!
//! Builds requests against the pizza API by merging per-call overrides onto a
//! fixed set of defaults. Building a request never performs I/O: operations
//! return a [`PendingRequest`] that can be inspected and changed, and only
//! [`PendingRequest::execute`] sends it through a [`Transport`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use pizza_request::{create_item, read_collection, RequestConfig, Transport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pizza_request::Error> {
//!     let transport = Transport::new()?;
//!
//!     // GET {authority}/api/v1/pizzas
//!     let response = read_collection(RequestConfig::default())
//!         .execute(&transport)
//!         .await?;
//!     println!("{}", response.text());
//!
//!     // POST {authority}/api/v1/pizzas with {"name":"margherita"}
//!     let response = create_item(RequestConfig::new().with_name("margherita"))?
//!         .execute(&transport)
//!         .await?;
//!     println!("{}", response.text());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Defaults and overrides
//!
//! Each field of a [`RequestConfig`] falls back to the operation's default and
//! then to [`Defaults`]. Headers overlay the defaults key by key:
//!
//! ```
//! use pizza_request::{read_collection, RequestConfig};
//!
//! let request = read_collection(
//!     RequestConfig::new()
//!         .with_base_path("/api/v2")
//!         .with_header("Accept", "application/xml")?,
//! );
//!
//! assert_eq!(request.path(), "/api/v2/pizzas");
//! assert_eq!(request.header("accept"), Some("application/xml"));
//! assert_eq!(request.header("content-type"), Some("application/json"));
//! # Ok::<(), pizza_request::Error>(())
//! ```
//!
//! ## Validation
//!
//! [`create_item`] checks its input before building anything. A missing name
//! is reported synchronously, without entering an async context:
//!
//! ```
//! use pizza_request::{create_item, Error, RequestConfig};
//!
//! let err = create_item(RequestConfig::default()).unwrap_err();
//! assert!(matches!(err, Error::MissingName));
//! assert!(err.is_validation());
//! ```
//!
//! ## Configuration
//!
//! The process-wide defaults read the authority from the
//! `PIZZA_API_AUTHORITY` environment variable once, falling back to
//! `http://localhost:8061`. Use [`Defaults::builder`] and [`PizzaApi`] to
//! work with a different set.

pub mod builder;
mod config;
mod error;
pub mod metadata;
mod operations;
mod request;
mod response;
mod transport;

pub use config::{Defaults, DefaultsBuilder, AUTHORITY_ENV, DEFAULT_AUTHORITY, DEFAULT_BASE_PATH};
pub use error::{Error, Result};
pub use metadata::RequestConfig;
pub use operations::{create_item, read_collection, PizzaApi, API_KEY, API_KEY_HEADER};
pub use request::{Body, PendingRequest};
pub use response::Response;
pub use transport::{Transport, TransportBuilder};
