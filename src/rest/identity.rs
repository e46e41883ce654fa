//! Entity identity values.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The key that narrows a resource handle to a single instance.
///
/// # Example
///
/// ```rust
/// use rest_entity::Identity;
/// use serde_json::json;
///
/// assert_eq!(Identity::from(7), Identity::Number(7));
/// assert_eq!(Identity::from_value(&json!("abc")), Some(Identity::Text("abc".to_string())));
/// assert_eq!(Identity::from_value(&json!(null)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    /// A numeric key.
    Number(i64),
    /// A string key.
    Text(String),
}

impl Identity {
    /// Extracts an identity from a payload value.
    ///
    /// Integers and non-empty strings are identities; anything else is not.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
                .map(Self::Number),
            Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Returns the identity URL-encoded for use as a path segment.
    #[must_use]
    pub fn to_path_segment(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => urlencoding::encode(s).into_owned(),
        }
    }

    /// Returns the identity as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Identity {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for Identity {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl PartialEq<i64> for Identity {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Self::Number(n) if n == other)
    }
}

impl PartialEq<&str> for Identity {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Text(s) if s == other)
    }
}
