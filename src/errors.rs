// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Errors
//!
//! Error types for the site_configs crate.
//!
//! Every error is raised while the configuration is being built, so a misconfigured
//! deployment fails at startup instead of producing broken values later on. Each
//! variant names the offending key; secret values are never carried in an error.

use thiserror::Error;

/// Errors that can occur during configuration building.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigsError {
    /// A key required by the enabled sections was absent or empty.
    #[error("missing required configuration key `{0}`")]
    MissingRequiredKey(String),

    /// The gateway template does not contain the `PATH` placeholder exactly once.
    ///
    /// # Arguments
    ///
    /// * `template` - The rejected template
    /// * `occurrences` - How many placeholders were found
    #[error(
        "gateway template `{template}` must contain the `PATH` placeholder exactly once, found {occurrences}"
    )]
    InvalidGatewayTemplate { template: String, occurrences: usize },

    /// A numeric key held a value that could not be parsed.
    #[error("configuration key `{key}` expects a number, got `{value}`")]
    InvalidNumber { key: String, value: String },

    /// Error that occurred while loading secrets from a secret manager.
    ///
    /// # Arguments
    ///
    /// * `0` - A description of the secret loading error
    #[error("error to load secrets from secret manager - `{0}`")]
    SecretLoadingError(String),

    /// A `!!` secret was fetched but is not valid base64-encoded UTF-8.
    #[error("secret referenced by `{key}` is not valid base64 encoded utf-8")]
    SecretDecodingError { key: String },

    /// A recognized key in the process environment holds a value that is not UTF-8.
    #[error("configuration key `{key}` holds a value that is not valid utf-8")]
    InvalidUnicode { key: String },

    /// The env file for the current deployment exists but could not be read.
    #[error("failed to read env file - `{0}`")]
    EnvFileError(String),

    /// The public configuration view could not be serialized.
    #[error("failed to serialize configs - `{0}`")]
    SerializationError(String),
}
