// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # IPFS Gateway
//!
//! Rewrites content-addressed `ipfs://` URLs into HTTPS URLs served by a gateway.
//!
//! The gateway is described by a template such as `https://gw.example/ipfs/PATH`; the
//! content identifier (and any path after it) replaces the `PATH` token. URLs with any
//! other scheme are returned untouched.

use crate::{
    env_keys::{GATEWAY_PATH_PLACEHOLDER, IPFS_SCHEME_PREFIX},
    errors::ConfigsError,
};
use serde::Serialize;
use tracing::error;

/// A validated gateway URL template.
///
/// Construction guarantees the template holds the `PATH` placeholder exactly once, so
/// [`GatewayTemplate::transform`] can never silently drop the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GatewayTemplate(String);

impl GatewayTemplate {
    /// Validates and wraps `template`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigsError::InvalidGatewayTemplate` when the placeholder is missing or
    /// appears more than once.
    pub fn new(template: impl Into<String>) -> Result<GatewayTemplate, ConfigsError> {
        let template = template.into();
        let occurrences = template.matches(GATEWAY_PATH_PLACEHOLDER).count();

        if occurrences != 1 {
            error!(occurrences = occurrences, "invalid ipfs gateway template");
            return Err(ConfigsError::InvalidGatewayTemplate {
                template,
                occurrences,
            });
        }

        Ok(GatewayTemplate(template))
    }

    /// Converts an `ipfs://` URL into an HTTPS gateway URL; any other input is
    /// returned as is.
    ///
    /// The prefix check is exact and anchored at the start, so `IPFS://x` and
    /// `https://host/ipfs://x` are both left alone.
    ///
    /// # Example
    ///
    /// ```rust
    /// use site_configs::GatewayTemplate;
    ///
    /// let gateway = GatewayTemplate::new("https://gw.example/PATH").unwrap();
    /// assert_eq!(gateway.transform("ipfs://bafy/1.png"), "https://gw.example/bafy/1.png");
    /// assert_eq!(gateway.transform("https://a.b/c"), "https://a.b/c");
    /// ```
    pub fn transform(&self, candidate: &str) -> String {
        match candidate.strip_prefix(IPFS_SCHEME_PREFIX) {
            Some(path) => self.0.replacen(GATEWAY_PATH_PLACEHOLDER, path, 1),
            None => candidate.to_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
