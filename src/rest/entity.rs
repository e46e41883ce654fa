//! Entity instances.
//!
//! An [`Entity`] carries an optional [`Identity`], a [`DataBag`] of
//! server-supplied fields, and a [`ResourceHandle`] derived from its entity
//! type and identity. State changes only through [`Entity::fill_in`].
//!
//! # Identity Binding
//!
//! An entity without identity addresses the collection. The first hydration
//! whose payload carries an identity binds it and rebinds the handle to the
//! instance path; from then on the identity never changes.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut car = cars.entity(7);
//! car.retrieve().await?;
//! println!("{:?}", car.get("name"));
//!
//! car.update(&json!({"name": "Herbie"})).await?;
//! car.action("repairAll")?.post(json!({})).await?;
//! car.delete().await?;
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::clients::Transport;
use crate::rest::hydration::{merge_fields, parse_datetime};
use crate::rest::{DataBag, EntityError, EntityType, Identity, ResourceHandle};

/// One instance of an entity type.
pub struct Entity<T> {
    entity_type: EntityType<T>,
    identity: Option<Identity>,
    data: DataBag,
    handle: ResourceHandle<T>,
}

impl<T: Transport> Entity<T> {
    pub(crate) fn new(entity_type: EntityType<T>, identity: Option<Identity>) -> Self {
        let handle = entity_type.bind(identity.clone());
        Self {
            entity_type,
            identity,
            data: DataBag::new(),
            handle,
        }
    }

    /// Returns the identity, if bound.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns the server-supplied fields.
    #[must_use]
    pub const fn data(&self) -> &DataBag {
        &self.data
    }

    /// Returns one server-supplied field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Reads a field as an RFC 3339 timestamp.
    ///
    /// Parsing happens on read, whatever the configured coercion policy.
    #[must_use]
    pub fn datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        self.data.get(key)?.as_str().and_then(parse_datetime)
    }

    /// Returns the resource handle currently bound to this entity.
    #[must_use]
    pub const fn handle(&self) -> &ResourceHandle<T> {
        &self.handle
    }

    /// Returns the entity type this entity belongs to.
    #[must_use]
    pub const fn entity_type(&self) -> &EntityType<T> {
        &self.entity_type
    }

    /// Merges a raw payload into this entity.
    ///
    /// Runs the `before_fill` hook, merges every field that does not name an
    /// operation, binds the identity found under the configured identity key
    /// if none is bound yet, then runs the `after_fill` hook.
    ///
    /// A bound identity never changes. If the payload carries a different
    /// one, the identity field of the data bag keeps the bound value.
    pub fn fill_in(&mut self, raw: &Value) -> &mut Self {
        let config = self.entity_type.config();

        if let Some(hook) = &config.hooks().before_fill {
            hook(&mut self.data, raw);
        }

        merge_fields(
            &mut self.data,
            raw,
            self.entity_type.operations(),
            config.date_coercion(),
        );

        let found = raw.get(config.identity_key()).and_then(Identity::from_value);
        if let Some(identity) = found {
            if let Some(bound) = &self.identity {
                if *bound != identity {
                    tracing::warn!(
                        "Ignoring identity {} for {} entity already bound to {}",
                        identity,
                        config.resource_name(),
                        bound
                    );
                    self.data.insert(config.identity_key().to_string(), bound.to_value());
                }
            } else {
                tracing::debug!(
                    "Binding {} entity to identity {}",
                    config.resource_name(),
                    identity
                );
                self.handle = self.entity_type.bind(Some(identity.clone()));
                self.identity = Some(identity);
            }
        }

        if let Some(hook) = &config.hooks().after_fill {
            hook(&mut self.data, raw);
        }

        self
    }

    /// Fetches the instance and hydrates this entity with the response.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NoIdentity`] without issuing a request if the
    /// entity has no identity, and [`EntityError::Http`] for transport
    /// failures.
    pub async fn retrieve(&mut self) -> Result<&mut Self, EntityError> {
        let raw = self.singular_handle("retrieve")?.get(&()).await?;
        Ok(self.fill_in(&raw))
    }

    /// Sends a partial update and hydrates this entity with the response.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NoIdentity`] without issuing a request if the
    /// entity has no identity, [`EntityError::Serialization`] if `data`
    /// cannot be serialized, and [`EntityError::Http`] for transport failures.
    pub async fn update<D: Serialize + ?Sized>(
        &mut self,
        data: &D,
    ) -> Result<&mut Self, EntityError> {
        let handle = self.singular_handle("update")?;
        let body = serde_json::to_value(data)?;
        let raw = handle.patch(body).await?;
        Ok(self.fill_in(&raw))
    }

    /// Deletes the instance.
    ///
    /// Returns whatever the transport reports. Data and identity are left
    /// untouched; discard the entity afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NoIdentity`] without issuing a request if the
    /// entity has no identity, and [`EntityError::Http`] for transport
    /// failures.
    pub async fn delete(&self) -> Result<Value, EntityError> {
        self.singular_handle("delete")?.delete().await
    }

    /// Returns the handle of a custom action or inner resource.
    ///
    /// `name` is either a declared action (e.g., `"repairAll"`) or a
    /// registered inner segment (e.g., `"repair-all"`). The handle sits below
    /// the instance path when an identity is bound, else below the collection.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::UnknownInnerResource`] if `name` resolves to no
    /// registered segment.
    pub fn action(&self, name: &str) -> Result<ResourceHandle<T>, EntityError> {
        let segment = self
            .entity_type
            .operations()
            .segment_for(name)
            .unwrap_or_else(|| name.to_string());
        self.handle.inner(&segment)
    }

    fn singular_handle(&self, operation: &'static str) -> Result<ResourceHandle<T>, EntityError> {
        if self.identity.is_none() {
            return Err(EntityError::NoIdentity {
                resource: self.entity_type.config().resource_name().to_string(),
                operation,
            });
        }
        Ok(self.handle.clone())
    }
}

impl<T> Clone for Entity<T> {
    fn clone(&self) -> Self {
        Self {
            entity_type: self.entity_type.clone(),
            identity: self.identity.clone(),
            data: self.data.clone(),
            handle: self.handle.clone(),
        }
    }
}

impl<T> fmt::Debug for Entity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("identity", &self.identity)
            .field("data", &self.data)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpMethod, HttpResponseError};
    use crate::config::{DateCoercion, EntityConfig, EntityConfigBuilder};
    use crate::rest::stub::StubTransport;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn builder() -> EntityConfigBuilder {
        EntityConfig::builder()
            .base_address("https://api.example.com")
            .resource_name("cars")
            .add_action("repairAll")
    }

    fn cars(transport: StubTransport) -> EntityType<StubTransport> {
        builder().build_with_transport(transport).unwrap()
    }

    #[test]
    fn test_new_entity_is_collection_scoped() {
        let car = cars(StubTransport::new()).new_entity();
        assert!(car.identity().is_none());
        assert!(car.data().is_empty());
        assert_eq!(car.handle().url(), "https://api.example.com/cars");
    }

    #[test]
    fn test_fill_in_binds_identity_and_rebinds_handle() {
        let mut car = cars(StubTransport::new()).new_entity();
        car.fill_in(&json!({"id": 7, "name": "x"}));

        assert_eq!(car.identity(), Some(&Identity::Number(7)));
        assert_eq!(car.get("name"), Some(&json!("x")));
        assert_eq!(car.get("id"), Some(&json!(7)));
        assert_eq!(car.handle().url(), "https://api.example.com/cars/7");
    }

    #[test]
    fn test_fill_in_is_idempotent() {
        let raw = json!({"id": 1, "name": "a", "specs": {"doors": 2}});
        let mut car = cars(StubTransport::new()).new_entity();

        car.fill_in(&raw);
        let once = car.data().clone();
        car.fill_in(&raw);

        assert_eq!(car.data(), &once);
    }

    #[test]
    fn test_fill_in_keeps_bound_identity() {
        let mut car = cars(StubTransport::new()).entity(1);
        car.fill_in(&json!({"id": 2, "name": "b"}));

        assert_eq!(car.identity(), Some(&Identity::Number(1)));
        assert_eq!(car.handle().url(), "https://api.example.com/cars/1");
        assert_eq!(car.get("id"), Some(&json!(1)));
        assert_eq!(car.get("name"), Some(&json!("b")));
    }

    #[test]
    fn test_fill_in_keeps_text_identity_field_in_sync() {
        let mut car = cars(StubTransport::new()).entity("k-1");
        car.fill_in(&json!({"id": "k-2"}));

        assert_eq!(car.identity(), Some(&Identity::Text("k-1".to_string())));
        assert_eq!(car.get("id"), Some(&json!("k-1")));
    }

    #[test]
    fn test_fill_in_never_shadows_operations() {
        let mut car = cars(StubTransport::new()).new_entity();
        car.fill_in(&json!({"update": 1, "repairAll": 2, "fill_in": 3, "color": "red"}));

        assert_eq!(car.data().len(), 1);
        assert_eq!(car.get("color"), Some(&json!("red")));
    }

    #[test]
    fn test_fill_in_uses_configured_identity_key() {
        let cars = builder()
            .identity_key("uuid")
            .build_with_transport(StubTransport::new())
            .unwrap();
        let mut car = cars.new_entity();
        car.fill_in(&json!({"id": 5, "uuid": "c-1"}));

        assert_eq!(car.identity(), Some(&Identity::Text("c-1".to_string())));
    }

    #[test]
    fn test_hooks_run_around_the_merge() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let before = Arc::clone(&order);
        let after = Arc::clone(&order);

        let cars = builder()
            .before_fill(move |data, raw| {
                before.lock().unwrap().push(format!("before:{}", data.len()));
                assert!(raw.is_object());
            })
            .after_fill(move |data, _| {
                after.lock().unwrap().push(format!("after:{}", data.len()));
                data.insert("seen".to_string(), json!(true));
            })
            .build_with_transport(StubTransport::new())
            .unwrap();

        let mut car = cars.new_entity();
        car.fill_in(&json!({"id": 1, "name": "a"}));

        assert_eq!(*order.lock().unwrap(), vec!["before:0", "after:2"]);
        assert_eq!(car.get("seen"), Some(&json!(true)));
    }

    #[test]
    fn test_date_coercion_policy_applies_during_fill_in() {
        let cars = builder()
            .date_coercion(DateCoercion::Rfc3339)
            .build_with_transport(StubTransport::new())
            .unwrap();
        let mut car = cars.new_entity();
        car.fill_in(&json!({"built_at": "1963-05-01T10:00:00+01:00", "plate": "53"}));

        assert_eq!(car.get("built_at"), Some(&json!("1963-05-01T09:00:00Z")));
        assert_eq!(car.get("plate"), Some(&json!("53")));
    }

    #[test]
    fn test_datetime_reads_rfc3339_fields() {
        let mut car = cars(StubTransport::new()).new_entity();
        car.fill_in(&json!({"built_at": "1963-05-01T09:00:00Z", "name": "x"}));

        assert_eq!(car.datetime("built_at").unwrap().to_rfc3339(), "1963-05-01T09:00:00+00:00");
        assert!(car.datetime("name").is_none());
        assert!(car.datetime("missing").is_none());
    }

    #[test]
    fn test_retrieve_without_identity_fails_without_request() {
        let transport = StubTransport::new();
        let cars = cars(transport.clone());
        let mut car = cars.new_entity();

        let error = tokio_test::block_on(car.retrieve()).unwrap_err();

        assert!(matches!(
            error,
            EntityError::NoIdentity { operation: "retrieve", .. }
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_update_and_delete_without_identity_fail() {
        let transport = StubTransport::new();
        let cars = cars(transport.clone());
        let mut car = cars.new_entity();

        let update = tokio_test::block_on(car.update(&json!({"name": "x"})));
        assert!(matches!(update, Err(EntityError::NoIdentity { operation: "update", .. })));

        let delete = tokio_test::block_on(car.delete());
        assert!(matches!(delete, Err(EntityError::NoIdentity { operation: "delete", .. })));

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_hydrates_self() {
        let transport = StubTransport::new();
        transport.push_ok(json!({"id": 3, "name": "c"}));
        let mut car = cars(transport.clone()).entity(3);

        let car = car.retrieve().await.unwrap();

        assert_eq!(car.get("name"), Some(&json!("c")));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "https://api.example.com/cars/3");
    }

    #[tokio::test]
    async fn test_update_patches_and_hydrates() {
        let transport = StubTransport::new();
        transport.push_ok(json!({"id": 3, "name": "new", "updated": true}));
        let mut car = cars(transport.clone()).entity(3);

        car.update(&json!({"name": "new"})).await.unwrap();

        assert_eq!(car.get("updated"), Some(&json!(true)));
        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Patch);
        assert_eq!(requests[0].body, Some(json!({"name": "new"})));
    }

    #[tokio::test]
    async fn test_delete_returns_transport_result_and_keeps_state() {
        let transport = StubTransport::new();
        transport.push_ok(json!({"id": 4, "name": "d"}));
        transport.push_ok(json!({"deleted": true}));
        let mut car = cars(transport.clone()).entity(4);
        car.retrieve().await.unwrap();

        let result = car.delete().await.unwrap();

        assert_eq!(result, json!({"deleted": true}));
        assert_eq!(car.identity(), Some(&Identity::Number(4)));
        assert_eq!(car.get("name"), Some(&json!("d")));
        assert_eq!(transport.requests()[1].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_transport_errors_propagate_unchanged() {
        let transport = StubTransport::new();
        transport.push_err(HttpError::Response(HttpResponseError {
            code: 404,
            message: "gone".to_string(),
            error_reference: None,
        }));
        let mut car = cars(transport).entity(9);

        let error = car.retrieve().await.unwrap_err();

        assert_eq!(error.status(), Some(404));
        assert!(car.data().is_empty());
    }

    #[tokio::test]
    async fn test_action_targets_instance_inner_resource() {
        let transport = StubTransport::new();
        let car = cars(transport.clone()).entity(7);

        car.action("repairAll").unwrap().post(json!({})).await.unwrap();
        car.action("repair-all").unwrap().get(&()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://api.example.com/cars/7/repair-all");
        assert_eq!(requests[1].url, "https://api.example.com/cars/7/repair-all");
    }

    #[test]
    fn test_action_rejects_unknown_names() {
        let car = cars(StubTransport::new()).entity(7);
        assert!(matches!(
            car.action("fly"),
            Err(EntityError::UnknownInnerResource { .. })
        ));
    }

    #[test]
    fn test_entities_do_not_share_state() {
        let cars = cars(StubTransport::new());
        let mut first = cars.entity(1);
        let second = cars.entity(2);

        first.fill_in(&json!({"name": "a"}));

        assert!(second.data().is_empty());
        assert_ne!(first.handle().url(), second.handle().url());
    }
}
