//! Error types for entity operations.
//!
//! This module contains [`EntityError`], returned by every CRUD operation and
//! resource handle call.
//!
//! # Error Handling
//!
//! - [`EntityError::NoIdentity`]: `retrieve`, `update` or `delete` on an
//!   entity without identity. No request is issued.
//! - [`EntityError::UnknownInnerResource`]: narrowing a handle to a segment
//!   that was never registered. No request is issued.
//! - [`EntityError::UnexpectedPayload`]: `list` received something other than
//!   an array.
//! - [`EntityError::Http`]: the transport's error, unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_entity::EntityError;
//!
//! match car.retrieve().await {
//!     Ok(car) => println!("Car: {:?}", car.data()),
//!     Err(EntityError::NoIdentity { .. }) => println!("Save the car first"),
//!     Err(e) if e.status() == Some(404) => println!("Car is gone"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for entity operations.
#[derive(Debug, Error)]
pub enum EntityError {
    /// An instance-level operation was invoked on an entity without identity.
    #[error("Cannot {operation} {resource}: the entity has no identity")]
    NoIdentity {
        /// The resource name of the entity type.
        resource: String,
        /// The operation being attempted (e.g., "retrieve", "delete").
        operation: &'static str,
    },

    /// A handle was narrowed to a segment that is not a registered inner resource.
    #[error("Inner resource '{segment}' is not registered on {resource}")]
    UnknownInnerResource {
        /// The resource name of the entity type.
        resource: String,
        /// The requested segment.
        segment: String,
    },

    /// The server returned a payload of an unusable shape.
    #[error("Unexpected payload for {resource}: expected {expected}")]
    UnexpectedPayload {
        /// The resource name of the entity type.
        resource: String,
        /// A description of the expected shape.
        expected: &'static str,
    },

    /// Request data or query arguments could not be serialized.
    #[error("Failed to serialize request data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport reported an error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl EntityError {
    /// Returns the HTTP status code of a transport error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the request ID reported by the server, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

// Verify EntityError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EntityError>();
};
