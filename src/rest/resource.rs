//! Entity types and their collection-level operations.
//!
//! An [`EntityType`] is produced by [`EntityConfigBuilder::build_type`] (or
//! [`EntityConfigBuilder::build_with_transport`]) and owns an immutable
//! [`EntityConfig`] snapshot plus the transport that every entity of the type
//! shares.
//!
//! # Collection Operations
//!
//! - [`EntityType::list`]: GET the collection, one entity per array element
//! - [`EntityType::create`]: POST to the collection, hydrate a fresh entity
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_entity::EntityConfig;
//! use serde_json::json;
//!
//! let cars = EntityConfig::builder()
//!     .base_address("https://api.example.com")
//!     .resource_name("cars")
//!     .build_type()?;
//!
//! for car in cars.list(&json!({"color": "red"})).await? {
//!     println!("{:?} {:?}", car.identity(), car.get("name"));
//! }
//!
//! let car = cars.create(&json!({"name": "Herbie"})).await?;
//! assert!(car.identity().is_some());
//! ```
//!
//! [`EntityConfigBuilder::build_type`]: crate::config::EntityConfigBuilder::build_type
//! [`EntityConfigBuilder::build_with_transport`]: crate::config::EntityConfigBuilder::build_with_transport

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpTransport, Transport};
use crate::config::EntityConfig;
use crate::rest::{Entity, EntityError, Identity, Operations, ResourceHandle};

/// A configured entity type.
///
/// Cloning is cheap; clones share the configuration and transport.
pub struct EntityType<T = HttpTransport> {
    config: Arc<EntityConfig>,
    transport: Arc<T>,
    operations: Arc<Operations>,
}

impl<T: Transport> EntityType<T> {
    /// Creates an entity type from a configuration and a transport.
    #[must_use]
    pub fn new(config: EntityConfig, transport: T) -> Self {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    /// Creates an entity type that shares an existing transport.
    #[must_use]
    pub fn with_shared_transport(config: EntityConfig, transport: Arc<T>) -> Self {
        let operations = Operations::of(&config);
        Self {
            config: Arc::new(config),
            transport,
            operations: Arc::new(operations),
        }
    }

    /// Returns the configuration snapshot.
    #[must_use]
    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    /// Returns the shared transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Returns the method inventory of this type.
    #[must_use]
    pub fn operations(&self) -> &Operations {
        &self.operations
    }

    /// Returns a handle bound to the collection path.
    #[must_use]
    pub fn collection(&self) -> ResourceHandle<T> {
        self.bind(None)
    }

    /// Creates an entity without identity.
    #[must_use]
    pub fn new_entity(&self) -> Entity<T> {
        Entity::new(self.clone(), None)
    }

    /// Creates an entity bound to `identity`, with no data.
    #[must_use]
    pub fn entity(&self, identity: impl Into<Identity>) -> Entity<T> {
        Entity::new(self.clone(), Some(identity.into()))
    }

    /// Creates an entity hydrated from a raw payload.
    #[must_use]
    pub fn from_data(&self, raw: &Value) -> Entity<T> {
        let mut entity = self.new_entity();
        entity.fill_in(raw);
        entity
    }

    /// Lists the collection.
    ///
    /// `args` is serialized into query parameters; pass `&()` for none. Each
    /// element of the response array becomes one entity, in server order. A
    /// null response is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::UnexpectedPayload`] if the response is neither
    /// an array nor null, [`EntityError::Serialization`] if `args` cannot be
    /// serialized, and [`EntityError::Http`] for transport failures.
    pub async fn list<Q: Serialize + ?Sized>(
        &self,
        args: &Q,
    ) -> Result<Vec<Entity<T>>, EntityError> {
        let raw = self.collection().get(args).await?;

        match raw {
            Value::Array(items) => Ok(items.iter().map(|item| self.from_data(item)).collect()),
            Value::Null => Ok(Vec::new()),
            _ => Err(EntityError::UnexpectedPayload {
                resource: self.config.resource_name().to_string(),
                expected: "an array of entities",
            }),
        }
    }

    /// Creates an entity on the server.
    ///
    /// Sends `data` to the collection and hydrates a fresh entity with the
    /// response, binding its identity when the response carries one.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Serialization`] if `data` cannot be serialized,
    /// and [`EntityError::Http`] for transport failures.
    pub async fn create<D: Serialize + ?Sized>(&self, data: &D) -> Result<Entity<T>, EntityError> {
        let body = serde_json::to_value(data)?;
        let mut entity = self.new_entity();
        let raw = entity.handle().post(body).await?;
        entity.fill_in(&raw);
        Ok(entity)
    }

    pub(crate) fn bind(&self, identity: Option<Identity>) -> ResourceHandle<T> {
        ResourceHandle::bind(Arc::clone(&self.config), Arc::clone(&self.transport), identity)
    }
}

impl<T> Clone for EntityType<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            operations: Arc::clone(&self.operations),
        }
    }
}

impl<T> fmt::Debug for EntityType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityType")
            .field("config", &self.config)
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

// Verify EntityType and Entity are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EntityType<HttpTransport>>();
    assert_send_sync::<Entity<HttpTransport>>();
};
