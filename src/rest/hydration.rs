//! Hydration of entity state from raw payloads.
//!
//! Hydration merges the own properties of a server payload into an entity's
//! [`DataBag`]. Fields named like an operation of the entity type are never
//! written, so data cannot shadow behavior. Merging is last-write-wins per
//! key, which makes hydration idempotent on its own output.
//!
//! Hooks are typed closures supplied through the builder:
//!
//! ```rust
//! use rest_entity::EntityConfig;
//!
//! let config = EntityConfig::builder()
//!     .base_address("https://api.example.com")
//!     .resource_name("cars")
//!     .after_fill(|data, _raw| {
//!         data.remove("internal_notes");
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert!(config.hooks().after_fill.is_some());
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::config::DateCoercion;
use crate::rest::Operations;

/// Server-supplied fields of an entity.
pub type DataBag = Map<String, Value>;

/// A hook invoked with the entity's data and the raw payload.
pub type HydrationHook = Arc<dyn Fn(&mut DataBag, &Value) + Send + Sync>;

/// Optional hooks run around every hydration.
#[derive(Clone, Default)]
pub struct HydrationHooks {
    /// Runs before the payload is merged.
    pub before_fill: Option<HydrationHook>,
    /// Runs after the payload is merged and identity is bound.
    pub after_fill: Option<HydrationHook>,
}

impl fmt::Debug for HydrationHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HydrationHooks")
            .field("before_fill", &self.before_fill.is_some())
            .field("after_fill", &self.after_fill.is_some())
            .finish()
    }
}

/// Merges the own properties of `raw` into `data`.
///
/// Non-object payloads merge nothing.
pub(crate) fn merge_fields(
    data: &mut DataBag,
    raw: &Value,
    operations: &Operations,
    policy: DateCoercion,
) {
    let Value::Object(fields) = raw else {
        return;
    };

    for (key, value) in fields {
        if operations.contains(key) {
            tracing::trace!("Skipping payload field '{}': it names an operation", key);
            continue;
        }
        data.insert(key.clone(), coerce(value, policy));
    }
}

/// Applies the date coercion policy to one value.
///
/// With [`DateCoercion::Rfc3339`], strings that parse as RFC 3339 timestamps
/// are rewritten in canonical UTC form; everything else is returned as is.
#[must_use]
pub fn coerce(value: &Value, policy: DateCoercion) -> Value {
    match (policy, value) {
        (DateCoercion::Rfc3339, Value::String(s)) => parse_datetime(s).map_or_else(
            || value.clone(),
            |dt| Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        ),
        _ => value.clone(),
    }
}

/// Parses an RFC 3339 timestamp into UTC.
#[must_use]
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
