//! HTTP-specific error types.
//!
//! This module contains the error type reported by [`Transport`]
//! implementations. The entity layer never translates these errors; they reach
//! callers unchanged through [`EntityError::Http`](crate::EntityError::Http).
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: A request that failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_entity::{EntityError, HttpError};
//!
//! match car.retrieve().await {
//!     Ok(car) => println!("Car: {:?}", car.data()),
//!     Err(EntityError::Http(HttpError::Response(e))) if e.code == 404 => {
//!         println!("Car is gone");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```
//!
//! [`Transport`]: crate::clients::Transport

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use rest_entity::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"error":"Not found"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), r#"{"error":"Not found"}"#);
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, serialized.
    pub message: String,
    /// Reference ID for error reporting (from the X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A request URL was not absolute.
    #[error("Invalid request URL '{url}'.")]
    InvalidUrl {
        /// The URL that was rejected.
        url: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// Custom transports report failures through this type as well, typically
/// via the `Response` variant so callers can branch on status codes.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidRequest(_) => None,
        }
    }
}
