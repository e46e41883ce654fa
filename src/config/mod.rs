//! Entity type configuration.
//!
//! This module provides the settings of one entity type and the builder that
//! assembles them.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EntityConfig`]: The immutable settings of one entity type
//! - [`EntityConfigBuilder`]: A fluent builder validated at `build()` time
//! - [`BaseAddress`]: A validated API root
//! - [`ResourceName`]: A validated primary path segment
//! - [`DateCoercion`]: The hydration policy for date-like strings
//!
//! # Example
//!
//! ```rust
//! use rest_entity::EntityConfig;
//!
//! let config = EntityConfig::builder()
//!     .base_address("https://api.example.com")
//!     .resource_name("cars")
//!     .add_action("repairAll")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.resource_name().as_ref(), "cars");
//! assert_eq!(config.inner_resources(), ["repair-all".to_string()]);
//! ```

mod newtypes;

pub use newtypes::{BaseAddress, ResourceName};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::{HttpTransport, RawRequest, RequestListener, Transport};
use crate::error::ConfigError;
use crate::rest::{to_hyphenated, DataBag, EntityType, HydrationHook, HydrationHooks};

/// Options handed unchanged to the transport client.
pub type TransportOptions = HashMap<String, Value>;

/// Default payload field carrying an entity's identity.
pub const DEFAULT_IDENTITY_KEY: &str = "id";

/// How hydration treats string values that look like timestamps.
///
/// Coercion is opt-in: identifiers and numeric strings are easy to
/// misclassify, so the default leaves every string untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateCoercion {
    /// Strings are stored exactly as received.
    #[default]
    Disabled,
    /// RFC 3339 strings are normalized to canonical UTC form.
    Rfc3339,
}

/// The immutable settings of one entity type.
///
/// Built through [`EntityConfig::builder`]. A value of this type always has a
/// base address and a resource name, so it can be bound to resource handles
/// without further checks.
#[derive(Clone)]
pub struct EntityConfig {
    base_address: BaseAddress,
    resource_name: ResourceName,
    inner_resources: Vec<String>,
    actions: Vec<String>,
    request_listeners: Vec<RequestListener>,
    transport_options: TransportOptions,
    identity_key: String,
    date_coercion: DateCoercion,
    hooks: HydrationHooks,
}

impl EntityConfig {
    /// Creates a new builder for constructing an `EntityConfig`.
    #[must_use]
    pub fn builder() -> EntityConfigBuilder {
        EntityConfigBuilder::new()
    }

    /// Returns the base address.
    #[must_use]
    pub const fn base_address(&self) -> &BaseAddress {
        &self.base_address
    }

    /// Returns the primary resource name.
    #[must_use]
    pub const fn resource_name(&self) -> &ResourceName {
        &self.resource_name
    }

    /// Returns the registered inner resource segments.
    #[must_use]
    pub fn inner_resources(&self) -> &[String] {
        &self.inner_resources
    }

    /// Returns the declared custom operation names.
    #[must_use]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Returns the request listeners in registration order.
    #[must_use]
    pub fn request_listeners(&self) -> &[RequestListener] {
        &self.request_listeners
    }

    /// Returns the transport options.
    #[must_use]
    pub const fn transport_options(&self) -> &TransportOptions {
        &self.transport_options
    }

    /// Returns the payload field that carries the identity.
    #[must_use]
    pub fn identity_key(&self) -> &str {
        &self.identity_key
    }

    /// Returns the date coercion policy.
    #[must_use]
    pub const fn date_coercion(&self) -> DateCoercion {
        self.date_coercion
    }

    /// Returns the hydration hooks.
    #[must_use]
    pub const fn hooks(&self) -> &HydrationHooks {
        &self.hooks
    }

    /// Returns `true` if `segment` is a registered inner resource.
    #[must_use]
    pub fn has_inner_resource(&self, segment: &str) -> bool {
        self.inner_resources.iter().any(|s| s == segment)
    }
}

impl fmt::Debug for EntityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityConfig")
            .field("base_address", &self.base_address)
            .field("resource_name", &self.resource_name)
            .field("inner_resources", &self.inner_resources)
            .field("actions", &self.actions)
            .field("request_listeners", &self.request_listeners.len())
            .field("transport_options", &self.transport_options)
            .field("identity_key", &self.identity_key)
            .field("date_coercion", &self.date_coercion)
            .field("hooks", &self.hooks)
            .finish()
    }
}

// Verify EntityConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EntityConfig>();
};

/// Builder for constructing [`EntityConfig`] instances.
///
/// Required fields are `base_address` and `resource_name`; they are checked
/// by [`build`](Self::build), not by the setters. The builder is `Clone` and
/// `build` borrows it, so one builder can produce several independent
/// configurations.
///
/// # Defaults
///
/// - `inner_resources`, `actions`, `request_listeners`: empty
/// - `transport_options`: empty
/// - `identity_key`: `"id"`
/// - `date_coercion`: [`DateCoercion::Disabled`]
/// - hooks: none
///
/// # Example
///
/// ```rust
/// use rest_entity::{ConfigError, EntityConfig};
///
/// let builder = EntityConfig::builder().resource_name("cars");
/// assert!(matches!(builder.build(), Err(ConfigError::MissingBaseAddress)));
///
/// let builder = builder.base_address("https://api.example.com");
/// assert!(builder.build().is_ok());
/// ```
#[derive(Clone, Default)]
pub struct EntityConfigBuilder {
    base_address: Option<String>,
    resource_name: Option<String>,
    inner_resources: Vec<String>,
    actions: Vec<String>,
    request_listeners: Vec<RequestListener>,
    transport_options: TransportOptions,
    identity_key: Option<String>,
    date_coercion: DateCoercion,
    hooks: HydrationHooks,
}

impl EntityConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base address.
    #[must_use]
    pub fn base_address(mut self, url: impl Into<String>) -> Self {
        self.base_address = Some(url.into());
        self
    }

    /// Sets the primary resource name.
    #[must_use]
    pub fn resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    /// Registers one inner resource segment.
    #[must_use]
    pub fn add_inner_resource(mut self, segment: impl Into<String>) -> Self {
        self.inner_resources.push(segment.into());
        self
    }

    /// Replaces the list of inner resource segments.
    ///
    /// Segments registered through [`add_action`](Self::add_action) are kept.
    #[must_use]
    pub fn inner_resources<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner_resources = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Declares a custom operation.
    ///
    /// The operation name is reserved (hydration never writes a field with
    /// this name) and its hyphenated form is registered as an inner resource.
    #[must_use]
    pub fn add_action(mut self, name: impl Into<String>) -> Self {
        self.actions.push(name.into());
        self
    }

    /// Adds a listener notified once per outgoing request.
    #[must_use]
    pub fn add_request_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&RawRequest) + Send + Sync + 'static,
    {
        self.request_listeners.push(Arc::new(listener));
        self
    }

    /// Sets one transport option.
    #[must_use]
    pub fn transport_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.transport_options.insert(key.into(), value.into());
        self
    }

    /// Sets the payload field carrying the identity (default `"id"`).
    #[must_use]
    pub fn identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = Some(key.into());
        self
    }

    /// Sets the date coercion policy used during hydration.
    #[must_use]
    pub const fn date_coercion(mut self, policy: DateCoercion) -> Self {
        self.date_coercion = policy;
        self
    }

    /// Sets the hook invoked before a payload is merged.
    #[must_use]
    pub fn before_fill<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut DataBag, &Value) + Send + Sync + 'static,
    {
        self.hooks.before_fill = Some(Arc::new(hook) as HydrationHook);
        self
    }

    /// Sets the hook invoked after a payload is merged.
    #[must_use]
    pub fn after_fill<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut DataBag, &Value) + Send + Sync + 'static,
    {
        self.hooks.after_fill = Some(Arc::new(hook) as HydrationHook);
        self
    }

    /// Builds the configuration from a snapshot of the builder's state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingResource`] if no resource name is set,
    /// then [`ConfigError::MissingBaseAddress`] if no base address is set.
    /// Returns [`ConfigError::InvalidBaseAddress`] for an address without
    /// scheme or host and [`ConfigError::EmptyInnerResource`] for an empty
    /// inner segment.
    pub fn build(&self) -> Result<EntityConfig, ConfigError> {
        let resource_name = ResourceName::new(
            self.resource_name
                .clone()
                .ok_or(ConfigError::MissingResource)?,
        )?;
        let base_address = BaseAddress::new(
            self.base_address
                .clone()
                .ok_or(ConfigError::MissingBaseAddress)?,
        )?;

        let mut inner_resources: Vec<String> = Vec::new();
        let explicit = self.inner_resources.iter().cloned();
        let derived = self.actions.iter().map(|action| to_hyphenated(action));
        for segment in explicit.chain(derived) {
            let segment = segment.trim().trim_matches('/').to_string();
            if segment.is_empty() {
                return Err(ConfigError::EmptyInnerResource);
            }
            if !inner_resources.contains(&segment) {
                inner_resources.push(segment);
            }
        }

        let mut actions: Vec<String> = Vec::new();
        for action in &self.actions {
            if !actions.contains(action) {
                actions.push(action.clone());
            }
        }

        tracing::debug!(
            "Built entity configuration for {} at {}",
            resource_name,
            base_address
        );

        Ok(EntityConfig {
            base_address,
            resource_name,
            inner_resources,
            actions,
            request_listeners: self.request_listeners.clone(),
            transport_options: self.transport_options.clone(),
            identity_key: self
                .identity_key
                .clone()
                .unwrap_or_else(|| DEFAULT_IDENTITY_KEY.to_string()),
            date_coercion: self.date_coercion,
            hooks: self.hooks.clone(),
        })
    }

    /// Builds an entity type backed by an [`HttpTransport`].
    ///
    /// The transport is created from the configured transport options.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`build`](Self::build).
    pub fn build_type(&self) -> Result<EntityType<HttpTransport>, ConfigError> {
        let config = self.build()?;
        let transport = HttpTransport::new(config.transport_options());
        Ok(EntityType::new(config, transport))
    }

    /// Builds an entity type backed by the given transport.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`build`](Self::build).
    pub fn build_with_transport<T: Transport>(
        &self,
        transport: T,
    ) -> Result<EntityType<T>, ConfigError> {
        Ok(EntityType::new(self.build()?, transport))
    }
}

impl fmt::Debug for EntityConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityConfigBuilder")
            .field("base_address", &self.base_address)
            .field("resource_name", &self.resource_name)
            .field("inner_resources", &self.inner_resources)
            .field("actions", &self.actions)
            .field("request_listeners", &self.request_listeners.len())
            .finish_non_exhaustive()
    }
}
