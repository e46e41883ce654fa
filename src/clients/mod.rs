//! Transport client types.
//!
//! This module provides the transport layer the entity mapping sits on.
//! Resource handles build a [`RawRequest`], notify request listeners, and
//! hand the request to a [`Transport`].
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: The trait every transport client implements
//! - [`HttpTransport`]: The default `reqwest`-based transport
//! - [`RawRequest`]: A request as seen by listeners and transports
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`HttpError`]: Errors reported by transports
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_entity::clients::{HttpMethod, HttpTransport, RawRequest, Transport};
//!
//! let transport = HttpTransport::default();
//! let request = RawRequest::new(HttpMethod::Get, "https://api.example.com/cars");
//! let body = transport.send(&request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Transports in this crate never retry. Failed calls surface immediately.

mod errors;
mod http_request;
mod http_transport;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_request::{HttpMethod, RawRequest, RequestListener};
pub use http_transport::{HttpTransport, HEADERS_OPTION, SDK_VERSION, TIMEOUT_OPTION};
pub use transport::Transport;
