//! HTTP transport built on `reqwest`.
//!
//! This module provides the [`HttpTransport`] type, the default
//! [`Transport`] used by entity types built with
//! [`build_type`](crate::EntityConfigBuilder::build_type).

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, RawRequest};
use crate::clients::Transport;
use crate::config::TransportOptions;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Transport option holding extra headers (object of string values).
pub const HEADERS_OPTION: &str = "headers";

/// Transport option holding a request timeout in seconds.
pub const TIMEOUT_OPTION: &str = "timeout_secs";

/// HTTP transport for resource requests.
///
/// The transport handles:
/// - Default headers including User-Agent and Accept
/// - Extra headers and timeout from transport options
/// - JSON request bodies
/// - Mapping non-2xx responses to [`HttpError::Response`]
///
/// It never retries.
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use rest_entity::clients::HttpTransport;
/// use rest_entity::TransportOptions;
/// use serde_json::json;
///
/// let mut options = TransportOptions::new();
/// options.insert("headers".to_string(), json!({"X-Api-Key": "secret"}));
///
/// let transport = HttpTransport::new(&options);
/// assert_eq!(
///     transport.default_headers().get("X-Api-Key"),
///     Some(&"secret".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Per-request timeout, if configured.
    timeout: Option<Duration>,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a new HTTP transport from transport options.
    ///
    /// Unknown options are ignored. Non-string header values are skipped, as
    /// are timeouts that are not positive or too large for a [`Duration`].
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(options: &TransportOptions) -> Self {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("rest-entity v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(Value::Object(headers)) = options.get(HEADERS_OPTION) {
            for (key, value) in headers {
                if let Some(value) = value.as_str() {
                    default_headers.insert(key.clone(), value.to_string());
                }
            }
        }

        let timeout = options
            .get(TIMEOUT_OPTION)
            .and_then(Value::as_f64)
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| match Duration::try_from_secs_f64(secs) {
                Ok(timeout) => Some(timeout),
                Err(_) => {
                    tracing::warn!("Ignoring out-of-range timeout of {} seconds", secs);
                    None
                }
            });

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            default_headers,
            timeout,
        }
    }

    /// Returns the default headers for this transport.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Decodes a response body. Empty bodies become `null`, non-JSON bodies
    /// become a string value.
    fn parse_body(body_text: &str) -> Value {
        if body_text.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(body_text).unwrap_or_else(|_| Value::String(body_text.to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&TransportOptions::new())
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &RawRequest) -> Result<Value, HttpError> {
        request.verify()?;

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        if let Some(timeout) = self.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let request_id = res
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_text = res.text().await.unwrap_or_default();

        if !(200..300).contains(&code) {
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: body_text,
                error_reference: request_id,
            }));
        }

        Ok(Self::parse_body(&body_text))
    }
}
