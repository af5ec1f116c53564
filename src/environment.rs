// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Deployment Environment
//!
//! Classifies the build context the site runs in. The value drives two decisions:
//! which env file is loaded and how the public site URL is derived.

use crate::env_keys::{
    DEV_ENV_FILE_NAME, LOCAL_ENV_FILE_NAME, PREVIEW_ENV_FILE_NAME, PROD_ENV_FILE_NAME,
};
use serde::Serialize;
use std::fmt;

/// Deployment context reported by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum DeploymentEnvironment {
    Production,
    Preview,
    Development,
    /// Any value the platform reports that is not one of the known contexts.
    Other(String),
}

impl DeploymentEnvironment {
    /// Parses the indicator, treating an absent or empty value as "not set".
    ///
    /// Matching is exact: `Production` is not `production`.
    pub fn from_indicator(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => None,
            Some(v) => Some(Self::from(v)),
        }
    }

    /// Exported for callers gating production-only behavior; the site URL derivation
    /// matches on the variant directly.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// The env file consulted for this deployment.
    pub fn env_file_name(env: Option<&Self>) -> &'static str {
        match env {
            Some(Self::Production) => PROD_ENV_FILE_NAME,
            Some(Self::Preview) => PREVIEW_ENV_FILE_NAME,
            Some(Self::Development) => DEV_ENV_FILE_NAME,
            _ => LOCAL_ENV_FILE_NAME,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Production => "production",
            Self::Preview => "preview",
            Self::Development => "development",
            Self::Other(v) => v,
        }
    }
}

impl From<&str> for DeploymentEnvironment {
    fn from(value: &str) -> Self {
        match value {
            "production" => Self::Production,
            "preview" => Self::Preview,
            "development" => Self::Development,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<DeploymentEnvironment> for String {
    fn from(value: DeploymentEnvironment) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for DeploymentEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_indicator_is_unset() {
        assert_eq!(DeploymentEnvironment::from_indicator(None), None);
        assert_eq!(DeploymentEnvironment::from_indicator(Some("")), None);
    }

    #[test]
    fn known_indicators() {
        assert_eq!(
            DeploymentEnvironment::from_indicator(Some("production")),
            Some(DeploymentEnvironment::Production)
        );
        assert_eq!(
            DeploymentEnvironment::from_indicator(Some("preview")),
            Some(DeploymentEnvironment::Preview)
        );
        assert_eq!(
            DeploymentEnvironment::from_indicator(Some("development")),
            Some(DeploymentEnvironment::Development)
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let env = DeploymentEnvironment::from("Production");
        assert_eq!(env, DeploymentEnvironment::Other("Production".into()));
        assert!(!env.is_production());
        assert_eq!(env.to_string(), "Production");
    }

    #[test]
    fn env_file_per_deployment() {
        assert_eq!(
            DeploymentEnvironment::env_file_name(Some(&DeploymentEnvironment::Production)),
            PROD_ENV_FILE_NAME
        );
        assert_eq!(
            DeploymentEnvironment::env_file_name(Some(&DeploymentEnvironment::Preview)),
            PREVIEW_ENV_FILE_NAME
        );
        assert_eq!(
            DeploymentEnvironment::env_file_name(Some(&DeploymentEnvironment::Other("qa".into()))),
            LOCAL_ENV_FILE_NAME
        );
        assert_eq!(DeploymentEnvironment::env_file_name(None), LOCAL_ENV_FILE_NAME);
    }
}
