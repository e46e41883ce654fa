//! The transport seam.
//!
//! The entity layer never talks to the network itself. Every request goes
//! through a [`Transport`], which turns a [`RawRequest`] into a JSON payload
//! or an [`HttpError`].

use serde_json::Value;

use crate::clients::{HttpError, RawRequest};

/// A client able to execute resource requests.
///
/// [`HttpTransport`](crate::clients::HttpTransport) is the production
/// implementation. Tests and alternative stacks can provide their own.
///
/// Implementations report non-2xx responses as
/// [`HttpError::Response`] so callers can branch on status codes, and must
/// not retry on their own unless that is an explicit transport feature.
///
/// # Example
///
/// ```rust
/// use rest_entity::clients::{HttpError, RawRequest, Transport};
/// use serde_json::{json, Value};
///
/// struct Echo;
///
/// impl Transport for Echo {
///     async fn send(&self, request: &RawRequest) -> Result<Value, HttpError> {
///         Ok(request.body.clone().unwrap_or_else(|| json!({})))
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Executes the request and returns the decoded response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for invalid requests, network failures and
    /// non-2xx responses.
    async fn send(&self, request: &RawRequest) -> Result<Value, HttpError>;
}
