//! REST entity mapping.
//!
//! This module maps a remote REST collection onto typed local values:
//!
//! - **[`EntityType`]**: a configured resource with collection operations
//!   (`list`, `create`)
//! - **[`Entity`]**: one instance with identity-scoped operations
//!   (`retrieve`, `update`, `delete`) and custom actions
//! - **[`ResourceHandle`]**: a transport handle bound to a collection,
//!   instance, or inner resource path
//! - **Hydration**: [`Entity::fill_in`] merges payloads, guarded by the
//!   method inventory ([`Operations`]) and wrapped by [`HydrationHooks`]
//! - **[`EntityError`]**: errors for entity operations
//!
//! # Paths
//!
//! | Handle                   | URL                              |
//! |--------------------------|----------------------------------|
//! | collection               | `{base}/{resource}`              |
//! | instance                 | `{base}/{resource}/{id}`         |
//! | instance inner resource  | `{base}/{resource}/{id}/{inner}` |
//! | collection inner resource| `{base}/{resource}/{inner}`      |
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
//!     .add_action("repairAll")
//!     .build_type()?;
//!
//! let mut car = cars.create(&json!({"name": "Herbie"})).await?;
//! car.update(&json!({"color": "white"})).await?;
//! car.action("repairAll")?.post(json!({})).await?;
//! car.delete().await?;
//! ```

mod case;
mod entity;
mod errors;
mod handle;
mod hydration;
mod identity;
mod inventory;
mod resource;

#[cfg(test)]
mod stub;

pub use case::to_hyphenated;
pub use entity::Entity;
pub use errors::EntityError;
pub use handle::ResourceHandle;
pub use hydration::{coerce, parse_datetime, DataBag, HydrationHook, HydrationHooks};
pub use identity::Identity;
pub use inventory::{Operations, BUILTIN_OPERATIONS};
pub use resource::EntityType;
