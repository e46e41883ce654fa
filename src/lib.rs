//! # REST Entity
//!
//! A declarative mapping layer between typed local values and a remote REST
//! resource collection.
//!
//! ## Overview
//!
//! This crate provides:
//! - Validated entity configuration via [`EntityConfig`] and [`EntityConfigBuilder`]
//! - Entity types with collection operations (`list`, `create`) via [`EntityType`]
//! - Entity instances with identity-scoped operations (`retrieve`, `update`,
//!   `delete`) and custom actions via [`Entity`]
//! - Payload hydration with optional hooks and date coercion
//! - A pluggable [`Transport`] with a reqwest-backed default, [`HttpTransport`]
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_entity::{ConfigError, EntityConfig};
//!
//! // Configuration is validated at build time
//! let config = EntityConfig::builder()
//!     .base_address("https://api.example.com")
//!     .resource_name("cars")
//!     .add_action("repairAll")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.resource_name().as_ref(), "cars");
//! assert!(config.has_inner_resource("repair-all"));
//!
//! let missing = EntityConfig::builder().resource_name("cars").build();
//! assert_eq!(missing.unwrap_err(), ConfigError::MissingBaseAddress);
//! ```
//!
//! ## CRUD
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
//! // GET /cars?color=red
//! let red = cars.list(&json!({"color": "red"})).await?;
//!
//! // POST /cars, then GET and PATCH /cars/{id}
//! let mut car = cars.create(&json!({"name": "Herbie"})).await?;
//! car.retrieve().await?;
//! car.update(&json!({"number": 53})).await?;
//!
//! // DELETE /cars/{id}
//! car.delete().await?;
//! ```
//!
//! ## Custom Transports
//!
//! Any type implementing [`Transport`] can back an entity type:
//!
//! ```rust,ignore
//! let cars = EntityConfig::builder()
//!     .base_address("https://api.example.com")
//!     .resource_name("cars")
//!     .build_with_transport(MyTransport::new())?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Entity types own an immutable configuration snapshot
//! - **Fail-fast validation**: Missing base address or resource name fails at build
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Errors pass through**: Transport errors reach the caller unchanged

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    BaseAddress, DateCoercion, EntityConfig, EntityConfigBuilder, ResourceName, TransportOptions,
};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    HttpError, HttpMethod, HttpResponseError, HttpTransport, InvalidHttpRequestError, RawRequest,
    RequestListener, Transport,
};

// Re-export entity types
pub use rest::{DataBag, Entity, EntityError, EntityType, Identity, Operations, ResourceHandle};
