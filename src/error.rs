//! Configuration error types.
//!
//! This module contains the errors raised while assembling an
//! [`EntityConfig`](crate::EntityConfig). Every check runs once, at
//! [`build()`](crate::EntityConfigBuilder::build) time, so a request is never
//! issued against an unresolvable path.
//!
//! # Example
//!
//! ```rust
//! use rest_entity::{ConfigError, EntityConfig};
//!
//! let result = EntityConfig::builder().resource_name("cars").build();
//! assert!(matches!(result, Err(ConfigError::MissingBaseAddress)));
//! ```

use thiserror::Error;

/// Errors that can occur while building an entity configuration.
///
/// The builder may be reconfigured and built again after any of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No base address was configured.
    #[error("Missing base address. Call `base_address(...)` before building the entity type.")]
    MissingBaseAddress,

    /// No resource name was configured.
    #[error("Missing resource name. Call `resource_name(...)` before building the entity type.")]
    MissingResource,

    /// The base address is not an absolute URL.
    #[error("Invalid base address '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com').")]
    InvalidBaseAddress {
        /// The invalid address that was provided.
        url: String,
    },

    /// An inner resource segment was empty after trimming slashes.
    #[error("Inner resource segments cannot be empty.")]
    EmptyInnerResource,
}
