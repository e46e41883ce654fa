//! Operation inventory of an entity type.
//!
//! The inventory lists every operation name an entity type exposes: the
//! built-in CRUD operations plus the custom actions declared on its
//! configuration. Hydration consults it so a payload field never shadows an
//! operation, and each action maps to exactly one inner resource segment.

use crate::config::EntityConfig;
use crate::rest::to_hyphenated;

/// Operations every entity type provides.
pub const BUILTIN_OPERATIONS: &[&str] = &[
    "list", "create", "retrieve", "update", "delete", "fill_in",
];

/// The operation names exposed by one entity type.
///
/// # Example
///
/// ```rust
/// use rest_entity::EntityConfig;
/// use rest_entity::rest::Operations;
///
/// let config = EntityConfig::builder()
///     .base_address("https://api.example.com")
///     .resource_name("cars")
///     .add_action("repairAll")
///     .build()
///     .unwrap();
///
/// let operations = Operations::of(&config);
/// assert!(operations.contains("retrieve"));
/// assert!(operations.contains("repairAll"));
/// assert!(!operations.contains("name"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operations {
    names: Vec<String>,
    actions: Vec<String>,
}

impl Operations {
    /// Collects the operations of the given configuration.
    #[must_use]
    pub fn of(config: &EntityConfig) -> Self {
        let actions = config.actions().to_vec();
        let mut names: Vec<String> = BUILTIN_OPERATIONS.iter().map(ToString::to_string).collect();
        for action in &actions {
            if !names.contains(action) {
                names.push(action.clone());
            }
        }
        Self { names, actions }
    }

    /// Returns `true` if `name` is an operation of the entity type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns all operation names, built-ins first.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns each custom action paired with its inner resource segment.
    pub fn action_segments(&self) -> impl Iterator<Item = (&str, String)> {
        self.actions
            .iter()
            .map(|action| (action.as_str(), to_hyphenated(action)))
    }

    /// Returns the inner resource segment of a declared action.
    #[must_use]
    pub fn segment_for(&self, action: &str) -> Option<String> {
        self.actions
            .iter()
            .find(|a| *a == action)
            .map(|a| to_hyphenated(a))
    }
}
