//! Outgoing request types.
//!
//! This module provides [`RawRequest`], the value every request listener
//! observes and every [`Transport`](crate::clients::Transport) receives.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by resource handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A listener notified once per outgoing request.
///
/// Listeners run synchronously, in registration order, before the transport
/// is invoked.
pub type RequestListener = Arc<dyn Fn(&RawRequest) + Send + Sync>;

/// A request about to be handed to the transport.
///
/// # Example
///
/// ```rust
/// use rest_entity::clients::{HttpMethod, RawRequest};
/// use serde_json::json;
///
/// let request = RawRequest::new(HttpMethod::Post, "https://api.example.com/cars")
///     .with_body(json!({"name": "Herbie"}));
///
/// assert!(request.verify().is_ok());
/// assert_eq!(request.body, Some(json!({"name": "Herbie"})));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RawRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute URL of the addressed resource.
    pub url: String,
    /// Query parameters to append to the URL.
    pub query: HashMap<String, String>,
    /// The JSON request body, if any.
    pub body: Option<Value>,
}

impl RawRequest {
    /// Creates a request without query parameters or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: HashMap::new(),
            body: None,
        }
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] for a POST or PATCH
    /// without body and [`InvalidHttpRequestError::InvalidUrl`] if the URL is
    /// not absolute.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.method.to_string(),
            });
        }

        if !self.url.contains("://") {
            return Err(InvalidHttpRequestError::InvalidUrl {
                url: self.url.clone(),
            });
        }

        Ok(())
    }
}
