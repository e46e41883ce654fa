//! Resource binding.
//!
//! A [`ResourceHandle`] is a transport scoped to one path of an entity type:
//! the collection (`{base}/{resource}`), a single instance
//! (`{base}/{resource}/{identity}`), or a registered inner resource below
//! either of them.
//!
//! # Path Shapes
//!
//! | Handle | URL |
//! |---|---|
//! | collection | `https://api.example.com/cars` |
//! | instance | `https://api.example.com/cars/7` |
//! | collection inner | `https://api.example.com/cars/repair-all` |
//! | instance inner | `https://api.example.com/cars/7/repair-all` |
//!
//! Every call made through a handle notifies the configured request
//! listeners, in registration order, before the transport sees the request.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpMethod, RawRequest, Transport};
use crate::config::EntityConfig;
use crate::rest::{EntityError, Identity};

/// A transport handle scoped to a collection, instance, or inner resource path.
///
/// Handles are cheap to clone: the configuration and transport are shared.
pub struct ResourceHandle<T> {
    config: Arc<EntityConfig>,
    transport: Arc<T>,
    identity: Option<Identity>,
    inner: Option<String>,
}

impl<T: Transport> ResourceHandle<T> {
    /// Binds a handle to the collection (no identity) or to one instance.
    #[must_use]
    pub fn bind(
        config: Arc<EntityConfig>,
        transport: Arc<T>,
        identity: Option<Identity>,
    ) -> Self {
        Self {
            config,
            transport,
            identity,
            inner: None,
        }
    }

    /// Returns the absolute URL this handle addresses.
    #[must_use]
    pub fn url(&self) -> String {
        let mut url = format!(
            "{}/{}",
            self.config.base_address(),
            self.config.resource_name()
        );
        if let Some(identity) = &self.identity {
            url.push('/');
            url.push_str(&identity.to_path_segment());
        }
        if let Some(segment) = &self.inner {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Returns the identity this handle is bound to.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns `true` if the handle addresses a single instance.
    #[must_use]
    pub const fn is_singular(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the inner resource segment, if the handle was narrowed.
    #[must_use]
    pub fn inner_segment(&self) -> Option<&str> {
        self.inner.as_deref()
    }

    /// Returns the configuration this handle was bound from.
    #[must_use]
    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    /// Narrows the handle to a registered inner resource.
    ///
    /// Narrowing is relative to the collection or instance path, so calling
    /// it on an already narrowed handle addresses a sibling segment.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::UnknownInnerResource`] if `segment` was not
    /// registered on the entity type.
    pub fn inner(&self, segment: &str) -> Result<Self, EntityError> {
        if !self.config.has_inner_resource(segment) {
            return Err(EntityError::UnknownInnerResource {
                resource: self.config.resource_name().to_string(),
                segment: segment.to_string(),
            });
        }
        Ok(Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            identity: self.identity.clone(),
            inner: Some(segment.to_string()),
        })
    }

    /// Sends a GET request with `query` serialized to query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Serialization`] if the query cannot be
    /// serialized and [`EntityError::Http`] for transport failures.
    pub async fn get<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Value, EntityError> {
        let query = serialize_to_query(query)?;
        let request = RawRequest::new(HttpMethod::Get, self.url()).with_query(query);
        self.dispatch(request).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Http`] for transport failures.
    pub async fn post(&self, body: Value) -> Result<Value, EntityError> {
        let request = RawRequest::new(HttpMethod::Post, self.url()).with_body(body);
        self.dispatch(request).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Http`] for transport failures.
    pub async fn patch(&self, body: Value) -> Result<Value, EntityError> {
        let request = RawRequest::new(HttpMethod::Patch, self.url()).with_body(body);
        self.dispatch(request).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Http`] for transport failures.
    pub async fn delete(&self) -> Result<Value, EntityError> {
        let request = RawRequest::new(HttpMethod::Delete, self.url());
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: RawRequest) -> Result<Value, EntityError> {
        for listener in self.config.request_listeners() {
            listener(&request);
        }

        tracing::debug!("Sending {} request to {}", request.method, request.url);

        self.transport.send(&request).await.map_err(Into::into)
    }
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            identity: self.identity.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("resource", &self.config.resource_name())
            .field("identity", &self.identity)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Serializes query arguments to a query parameter map.
///
/// Nulls are skipped, arrays of scalars are comma-joined, and nested objects
/// are sent as JSON strings. Anything other than an object yields no
/// parameters.
pub(crate) fn serialize_to_query<Q: Serialize + ?Sized>(
    args: &Q,
) -> Result<HashMap<String, String>, serde_json::Error> {
    let value = serde_json::to_value(args)?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            Value::Bool(b) => Some(b.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
