//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around the two required settings of
//! an entity type. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated API base address.
///
/// The address must carry a scheme and a host. Surrounding whitespace and
/// trailing slashes are removed so paths can be joined with a single `/`.
///
/// # Example
///
/// ```rust
/// use rest_entity::BaseAddress;
///
/// let address = BaseAddress::new("https://api.example.com/v1/").unwrap();
/// assert_eq!(address.as_ref(), "https://api.example.com/v1");
/// assert_eq!(address.scheme(), "https");
/// assert_eq!(address.host_name(), "api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseAddress {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseAddress {
    /// Creates a new validated base address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseAddress`] if the address is empty and
    /// [`ConfigError::InvalidBaseAddress`] if it has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        if url.is_empty() {
            return Err(ConfigError::MissingBaseAddress);
        }

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseAddress { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseAddress { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseAddress { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the address.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for BaseAddress {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A validated primary resource name (e.g., `"cars"`).
///
/// Surrounding slashes are removed; the name may itself contain `/` for
/// resources living under a fixed prefix (e.g., `"garage/cars"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceName(String);

impl ResourceName {
    /// Creates a new validated resource name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingResource`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let name = name.trim().trim_matches('/');
        if name.is_empty() {
            return Err(ConfigError::MissingResource);
        }
        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
