// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Secrets
//!
//! Secret handling for configuration values.
//!
//! A configuration value prefixed with `!` is not the value itself but the name of an
//! entry in a [`SecretClient`]. With `!!` the fetched entry is additionally base64
//! decoded, which allows multi-line material to travel through a single variable.
//!
//! Resolved secrets are wrapped in [`Secret`] so they cannot end up in logs or debug
//! output by accident.

use std::{collections::HashMap, fmt};

/// A source of secret values keyed by name.
///
/// Implementations must be shareable across threads since the builder keeps the
/// client behind an `Arc`.
pub trait SecretClient: Send + Sync {
    /// Returns the secret stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a human readable description when the key is unknown or the backing
    /// store could not be reached.
    fn get_by_key(&self, key: &str) -> Result<String, String>;
}

/// In-memory [`SecretClient`], useful for local runs and tests.
#[derive(Default, Clone)]
pub struct MapSecretClient {
    secrets: HashMap<String, String>,
}

impl MapSecretClient {
    pub fn new() -> MapSecretClient {
        MapSecretClient::default()
    }

    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(key.into(), value.into());
        self
    }
}

impl SecretClient for MapSecretClient {
    fn get_by_key(&self, key: &str) -> Result<String, String> {
        self.secrets
            .get(key)
            .cloned()
            .ok_or_else(|| format!("secret `{key}` not found"))
    }
}

impl fmt::Debug for MapSecretClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSecretClient")
            .field("keys", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A secret configuration value.
///
/// `Debug` and `Display` are redacted; call [`Secret::expose`] at the point of use.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Secret {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_is_redacted() {
        let secret = Secret::new("sk-live-123");
        assert_eq!(format!("{secret:?}"), "Secret(***)");
        assert_eq!(secret.to_string(), "***");
        assert_eq!(secret.expose(), "sk-live-123");
    }

    #[test]
    fn map_client_lookup() {
        let client = MapSecretClient::new().with_secret("storage", "abc");
        assert_eq!(client.get_by_key("storage"), Ok("abc".to_owned()));
        assert!(client.get_by_key("other").is_err());
    }

    #[test]
    fn map_client_debug_hides_values() {
        let client = MapSecretClient::new().with_secret("storage", "abc");
        let out = format!("{client:?}");
        assert!(out.contains("storage"));
        assert!(!out.contains("abc"));
    }
}
