//! Request composition.
//!
//! Precedence for every field is: explicit value in the [`RequestConfig`],
//! then the operation's fallback, then [`Defaults`]. Headers are the
//! defaults overlaid by the config headers.

use crate::metadata::merge_headers;
use crate::{Defaults, PendingRequest, RequestConfig};
use http::Method;

/// Collection path used when no resource path is given.
pub const COLLECTION_PATH: &str = "/pizzas";

/// Operation-specific values used when the config leaves a field unset.
#[derive(Debug, Clone)]
pub struct Fallback {
    /// Resource path appended after the base path.
    pub resource_path: &'static str,
    /// HTTP verb.
    pub verb: Method,
}

impl Default for Fallback {
    fn default() -> Self {
        Self {
            resource_path: COLLECTION_PATH,
            verb: Method::GET,
        }
    }
}

/// Composes a [`PendingRequest`] from `defaults` and `config`.
///
/// Never fails and never performs I/O. The default header map is cloned
/// before merging, so `defaults` is left untouched.
pub fn build_request(defaults: &Defaults, config: &RequestConfig, fallback: &Fallback) -> PendingRequest {
    let authority = config.authority.as_deref().unwrap_or(defaults.authority());
    let base_path = config.base_path.as_deref().unwrap_or(defaults.base_path());
    let resource_path = config.resource_path.as_deref().unwrap_or(fallback.resource_path);
    let verb = config.verb.clone().unwrap_or_else(|| fallback.verb.clone());

    let url = format!("{}{}{}", authority, base_path, resource_path);

    let mut headers = defaults.headers().clone();
    merge_headers(&mut headers, &config.headers);

    tracing::debug!(method = %verb, url = %url, "Built request");

    PendingRequest::new(verb, url, headers)
}
