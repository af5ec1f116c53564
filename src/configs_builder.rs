// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Configuration Builder
//!
//! This module provides the `ConfigBuilder`, which turns environment variables into an
//! immutable [`Configs`] snapshot.
//!
//! ## Architecture
//!
//! The builder works in three phases:
//!
//! 1. **Initialization**: a new builder is created and the optional sections the
//!    application depends on are enabled (`nft_storage()`, `web_socket()`,
//!    `web_push()`). Enabling a section makes its keys required.
//!
//! 2. **Environment Loading**: the env file matching the deployment environment is read
//!    (`.env.production`, `.env.preview`, `.env.development` or `.env.local`), then the
//!    process environment is layered on top. The process environment is never written.
//!
//! 3. **Configuration Building**: recognized keys are collected, secret references are
//!    resolved, values are coerced to their types and validated. Any problem is reported
//!    as a [`ConfigsError`] naming the key, so a bad deployment fails at startup.
//!
//! ## Value Coercion
//!
//! - Empty values are treated exactly like absent ones.
//! - Flags are `true` only for the literal string `"true"` (see [`parse_flag`]).
//! - Lists are comma separated; absent or empty input yields an empty list (see
//!   [`parse_list`]).
//! - Numbers fall back to their default when absent and are rejected when malformed.
//!
//! ## Secret Management
//!
//! Values prefixed with `!` are fetched from the configured [`SecretClient`]; values
//! prefixed with `!!` are fetched and then base64 decoded.

use crate::{
    configs::{Configs, WebSocketPusherConfigs},
    env_keys::{
        DEFAULT_WEB_SOCKET_PUSHER_PORT, DISABLED_ACTIONS_ENV_KEY, IPFS_GATEWAY_TEMPLATE_ENV_KEY,
        NFT_STORAGE_API_KEY_ENV_KEY, SECRET_PREFIX, SECRET_PREFIX_TO_DECODE, SITE_ENV_KEYS,
        SITE_URL_ENV_KEY, VERCEL_ENV_ENV_KEY, VERCEL_URL_ENV_KEY, WEB_PUSH_PUBLIC_KEY_ENV_KEY,
        WEB_SOCKET_PUSHER_APP_KEY_ENV_KEY, WEB_SOCKET_PUSHER_HOST_ENV_KEY,
        WEB_SOCKET_PUSHER_PORT_ENV_KEY,
    },
    environment::DeploymentEnvironment,
    errors::ConfigsError,
    gateway::GatewayTemplate,
    secrets::{Secret, SecretClient},
};
use base64::{Engine, engine::general_purpose};
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};
use tracing::{debug, error, info};

/// The main configuration builder struct.
///
/// `ConfigBuilder` provides a fluent interface for building the site configuration.
/// The gateway template and the site URL are always required; the remaining sections
/// are optional and only become required once enabled through the builder methods.
///
/// # Example
///
/// ```rust,no_run
/// use site_configs::ConfigBuilder;
///
/// # fn main() -> Result<(), site_configs::errors::ConfigsError> {
/// let configs = ConfigBuilder::new()
///     .nft_storage()
///     .web_socket()
///     .build()?;
///
/// let image = configs.transform_url("ipfs://bafybeigdyrzt5/0.png");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
    client: Option<Arc<dyn SecretClient>>,
    env_file: Option<PathBuf>,
    nft_storage: bool,
    web_socket: bool,
    web_push: bool,
}

/// Raw values as found in the environment, before secrets and types are resolved.
///
/// Later sources overwrite earlier ones, which is how the process environment takes
/// precedence over the env file.
#[derive(Default)]
struct RawConfigs {
    vercel_env: Option<String>,
    vercel_url: Option<String>,
    site_url: Option<String>,
    ipfs_gateway_template: Option<String>,
    nft_storage_api_key: Option<String>,
    disabled_actions: Option<String>,
    pusher_app_key: Option<String>,
    pusher_host: Option<String>,
    pusher_port: Option<String>,
    web_push_public_key: Option<String>,
}

impl ConfigBuilder {
    /// Creates a new instance of the `ConfigBuilder` with every optional section
    /// disabled and no secret client.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reads the env file for the current deployment environment.
    ///
    /// The file is chosen from `NEXT_PUBLIC_VERCEL_ENV` in the process environment unless
    /// an explicit file was set with [`ConfigBuilder::env_file`]:
    /// - "production" → `.env.production`
    /// - "preview" → `.env.preview`
    /// - "development" → `.env.development`
    /// - any other value or not set → `.env.local`
    ///
    /// A missing file is skipped. The file's pairs are returned in order and the process
    /// environment is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigsError::EnvFileError` if the file exists but cannot be read or
    /// parsed.
    pub fn load_envs(&self) -> Result<Vec<(String, String)>, ConfigsError> {
        let indicator = env::var(VERCEL_ENV_ENV_KEY).ok();
        self.read_env_file(&self.env_file_path(indicator.as_deref()))
    }

    /// Uses `path` instead of the env file derived from the deployment environment.
    pub fn env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the client used to resolve `!` and `!!` prefixed values.
    pub fn secret_client(mut self, client: Arc<dyn SecretClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Requires the storage API key.
    ///
    /// # Environment Variables
    ///
    /// - `NFT_STORAGE_API_KEY`: server-only key, kept as a redacted [`Secret`]
    pub fn nft_storage(mut self) -> Self {
        self.nft_storage = true;
        self
    }

    /// Requires the real-time messaging connection settings.
    ///
    /// # Environment Variables
    ///
    /// - `NEXT_PUBLIC_WEB_SOCKET_PUSHER_APP_KEY`: application key
    /// - `NEXT_PUBLIC_WEB_SOCKET_PUSHER_HOST`: host name
    /// - `NEXT_PUBLIC_WEB_SOCKET_PUSHER_PORT`: port (default: 6001)
    pub fn web_socket(mut self) -> Self {
        self.web_socket = true;
        self
    }

    /// Requires the web push public key.
    ///
    /// # Environment Variables
    ///
    /// - `NEXT_PUBLIC_WEB_PUSH_PUBLIC_KEY`: VAPID public key
    pub fn web_push(mut self) -> Self {
        self.web_push = true;
        self
    }

    /// Builds the configuration from the env file and the process environment.
    ///
    /// Values from the process environment override those from the env file.
    ///
    /// # Errors
    ///
    /// - `ConfigsError::InvalidUnicode` if a recognized key holds a non UTF-8 value
    /// - `ConfigsError::EnvFileError` if the env file cannot be parsed
    /// - any error returned by [`ConfigBuilder::build_from`]
    pub fn build(&self) -> Result<Configs, ConfigsError> {
        self.build_with_env(env::vars_os())
    }

    /// Builds the configuration from the env file and the given process environment.
    ///
    /// `process_env` takes the place of the real process environment: it selects the
    /// env file through `NEXT_PUBLIC_VERCEL_ENV` and overrides the file's values.
    /// Variables whose name or value is not valid UTF-8 are skipped, unless the name
    /// is one of the recognized keys.
    ///
    /// # Errors
    ///
    /// - `ConfigsError::InvalidUnicode` if a recognized key holds a non UTF-8 value
    /// - `ConfigsError::EnvFileError` if the env file cannot be parsed
    /// - any error returned by [`ConfigBuilder::build_from`]
    pub fn build_with_env<I>(&self, process_env: I) -> Result<Configs, ConfigsError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let process_vars = utf8_vars(process_env)?;

        let indicator = process_vars
            .iter()
            .rev()
            .find(|(key, _)| key == VERCEL_ENV_ENV_KEY)
            .map(|(_, value)| value.as_str());

        let mut vars = self.read_env_file(&self.env_file_path(indicator))?;
        vars.extend(process_vars);
        self.build_from(vars)
    }

    /// Builds the configuration from explicit `(key, value)` pairs.
    ///
    /// Nothing is read from the process environment. When a key appears more than once
    /// the last value wins.
    ///
    /// # Errors
    ///
    /// - `ConfigsError::MissingRequiredKey` if a required key is absent or empty
    /// - `ConfigsError::InvalidGatewayTemplate` if the gateway template is malformed
    /// - `ConfigsError::InvalidNumber` if the pusher port is not a valid port number
    /// - `ConfigsError::SecretLoadingError` / `SecretDecodingError` if a secret
    ///   reference cannot be resolved
    pub fn build_from<I, K, V>(&self, vars: I) -> Result<Configs, ConfigsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut raw = RawConfigs::default();

        for (key, value) in vars {
            let key: String = key.into();
            let value: String = value.into();

            if self.fill_site(&mut raw, &key, &value) {
                continue;
            }
            if self.fill_nft_storage(&mut raw, &key, &value) {
                continue;
            }
            if self.fill_web_socket(&mut raw, &key, &value) {
                continue;
            }
            self.fill_web_push(&mut raw, &key, &value);
        }

        self.resolve(raw)
    }
}

// Configuration filling methods
impl ConfigBuilder {
    /// Fills the always-present site keys.
    ///
    /// # Returns
    ///
    /// `true` if the key was recognized and stored, `false` otherwise.
    fn fill_site(&self, raw: &mut RawConfigs, key: &str, value: &str) -> bool {
        let slot = match key {
            VERCEL_ENV_ENV_KEY => &mut raw.vercel_env,
            VERCEL_URL_ENV_KEY => &mut raw.vercel_url,
            SITE_URL_ENV_KEY => &mut raw.site_url,
            IPFS_GATEWAY_TEMPLATE_ENV_KEY => &mut raw.ipfs_gateway_template,
            DISABLED_ACTIONS_ENV_KEY => &mut raw.disabled_actions,
            _ => return false,
        };
        *slot = Some(value.to_owned());
        true
    }

    fn fill_nft_storage(&self, raw: &mut RawConfigs, key: &str, value: &str) -> bool {
        match key {
            NFT_STORAGE_API_KEY_ENV_KEY => {
                raw.nft_storage_api_key = Some(value.to_owned());
                true
            }
            _ => false,
        }
    }

    fn fill_web_socket(&self, raw: &mut RawConfigs, key: &str, value: &str) -> bool {
        let slot = match key {
            WEB_SOCKET_PUSHER_APP_KEY_ENV_KEY => &mut raw.pusher_app_key,
            WEB_SOCKET_PUSHER_HOST_ENV_KEY => &mut raw.pusher_host,
            WEB_SOCKET_PUSHER_PORT_ENV_KEY => &mut raw.pusher_port,
            _ => return false,
        };
        *slot = Some(value.to_owned());
        true
    }

    fn fill_web_push(&self, raw: &mut RawConfigs, key: &str, value: &str) -> bool {
        match key {
            WEB_PUSH_PUBLIC_KEY_ENV_KEY => {
                raw.web_push_public_key = Some(value.to_owned());
                true
            }
            _ => false,
        }
    }
}

// Env file helpers
impl ConfigBuilder {
    /// The explicit env file if one was set, otherwise the file for `indicator`.
    fn env_file_path(&self, indicator: Option<&str>) -> PathBuf {
        match &self.env_file {
            Some(path) => path.clone(),
            None => {
                let deployment = DeploymentEnvironment::from_indicator(indicator);
                PathBuf::from(DeploymentEnvironment::env_file_name(deployment.as_ref()))
            }
        }
    }

    fn read_env_file(&self, path: &Path) -> Result<Vec<(String, String)>, ConfigsError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(err) if err.not_found() => {
                debug!(path = %path.display(), "env file not found, skipping");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(path = %path.display(), error = err.to_string(), "failed to open env file");
                return Err(ConfigsError::EnvFileError(err.to_string()));
            }
        };

        let vars = iter
            .map(|item| {
                item.map_err(|err| {
                    error!(path = %path.display(), error = err.to_string(), "failed to parse env file");
                    ConfigsError::EnvFileError(err.to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(path = %path.display(), entries = vars.len(), "env file loaded");
        Ok(vars)
    }
}

// Resolution and validation
impl ConfigBuilder {
    fn resolve(&self, raw: RawConfigs) -> Result<Configs, ConfigsError> {
        let vercel_env = self.resolve_value(VERCEL_ENV_ENV_KEY, raw.vercel_env)?;
        let deployment_environment = DeploymentEnvironment::from_indicator(vercel_env.as_deref());

        let ipfs_gateway = GatewayTemplate::new(
            self.required(IPFS_GATEWAY_TEMPLATE_ENV_KEY, raw.ipfs_gateway_template)?,
        )?;

        // Local and production builds use the configured domain, every other
        // deployment is served from its own platform host.
        let site_url = match &deployment_environment {
            None | Some(DeploymentEnvironment::Production) => {
                self.required(SITE_URL_ENV_KEY, raw.site_url)?
            }
            Some(_) => format!(
                "https://{}",
                self.required(VERCEL_URL_ENV_KEY, raw.vercel_url)?
            ),
        };

        let nft_storage_api_key = self
            .section_value(
                self.nft_storage,
                NFT_STORAGE_API_KEY_ENV_KEY,
                raw.nft_storage_api_key,
            )?
            .map(Secret::new);

        let disabled_actions = parse_list(
            self.resolve_value(DISABLED_ACTIONS_ENV_KEY, raw.disabled_actions)?
                .as_deref(),
        );

        let web_socket = WebSocketPusherConfigs {
            app_key: self.section_value(
                self.web_socket,
                WEB_SOCKET_PUSHER_APP_KEY_ENV_KEY,
                raw.pusher_app_key,
            )?,
            host: self.section_value(
                self.web_socket,
                WEB_SOCKET_PUSHER_HOST_ENV_KEY,
                raw.pusher_host,
            )?,
            port: parse_number(
                WEB_SOCKET_PUSHER_PORT_ENV_KEY,
                self.resolve_value(WEB_SOCKET_PUSHER_PORT_ENV_KEY, raw.pusher_port)?
                    .as_deref(),
                DEFAULT_WEB_SOCKET_PUSHER_PORT,
            )?,
        };

        let web_push_public_key = self.section_value(
            self.web_push,
            WEB_PUSH_PUBLIC_KEY_ENV_KEY,
            raw.web_push_public_key,
        )?;

        info!(
            deployment = deployment_environment
                .as_ref()
                .map(DeploymentEnvironment::as_str)
                .unwrap_or("local"),
            site_url = site_url,
            nft_storage = self.nft_storage,
            web_socket = self.web_socket,
            web_push = self.web_push,
            disabled_actions = disabled_actions.len(),
            "configs built"
        );

        Ok(Configs {
            deployment_environment,
            ipfs_gateway,
            site_url,
            nft_storage_api_key,
            disabled_actions,
            web_socket,
            web_push_public_key,
        })
    }

    /// Resolves a value of an optional section, failing when the section is enabled and
    /// the value is missing.
    fn section_value(
        &self,
        enabled: bool,
        key: &str,
        raw: Option<String>,
    ) -> Result<Option<String>, ConfigsError> {
        if enabled {
            return self.required(key, raw).map(Some);
        }
        self.resolve_value(key, raw)
    }

    fn required(&self, key: &str, raw: Option<String>) -> Result<String, ConfigsError> {
        self.resolve_value(key, raw)?.ok_or_else(|| {
            error!(key = key, "missing required configuration key");
            ConfigsError::MissingRequiredKey(key.to_owned())
        })
    }

    /// Turns a raw value into its final string form.
    ///
    /// Empty values become `None`. Secret references are fetched through the secret
    /// client, and `!!` references are base64 decoded afterwards.
    fn resolve_value(&self, key: &str, raw: Option<String>) -> Result<Option<String>, ConfigsError> {
        let Some(value) = raw.filter(|v| !v.is_empty()) else {
            return Ok(None);
        };

        let resolved = if let Some(name) = value.strip_prefix(SECRET_PREFIX_TO_DECODE) {
            let encoded = self.get_from_secret(key, name)?;
            self.decoded(key, encoded)?
        } else if let Some(name) = value.strip_prefix(SECRET_PREFIX) {
            self.get_from_secret(key, name)?
        } else {
            value
        };

        Ok(Some(resolved).filter(|v| !v.is_empty()))
    }
}

// Helper methods
impl ConfigBuilder {
    /// Fetches the secret `name` referenced by the configuration key `key`.
    ///
    /// Only the configuration key is logged; neither the secret name's value nor the
    /// fetched secret ever reach the logs.
    fn get_from_secret(&self, key: &str, name: &str) -> Result<String, ConfigsError> {
        let Some(client) = &self.client else {
            error!(key = key, "secret reference found but no secret client configured");
            return Err(ConfigsError::SecretLoadingError(format!(
                "`{key}` references a secret but no secret client is configured"
            )));
        };

        client.get_by_key(name).map_err(|err| {
            error!(key = key, error = err.as_str(), "secret key was not found");
            ConfigsError::SecretLoadingError(err)
        })
    }

    /// Decodes a base64-encoded secret into a UTF-8 string.
    fn decoded(&self, key: &str, text: String) -> Result<String, ConfigsError> {
        let d = general_purpose::STANDARD.decode(text.trim()).map_err(|err| {
            error!(key = key, error = err.to_string(), "base64 decoded error");
            ConfigsError::SecretDecodingError { key: key.to_owned() }
        })?;

        String::from_utf8(d).map_err(|err| {
            error!(key = key, error = err.to_string(), "error to convert to String");
            ConfigsError::SecretDecodingError { key: key.to_owned() }
        })
    }
}

/// Interprets a flag value: only the literal `"true"` is `true`.
///
/// `"TRUE"`, `"1"`, `""` and an absent value are all `false`. None of the site's keys
/// is a flag; this is exported for callers reading their own flags alongside.
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Splits a comma-separated value into its elements, kept exactly as written.
///
/// An absent or empty value yields an empty list, never a list holding an empty
/// string. Otherwise every element is kept in order, including blank ones and
/// surrounding whitespace.
pub fn parse_list(value: Option<&str>) -> Vec<String> {
    match value {
        None | Some("") => Vec::new(),
        Some(value) => value.split(',').map(str::to_owned).collect(),
    }
}

/// Converts process environment pairs to strings.
///
/// Unrelated variables that are not valid UTF-8 are skipped; a recognized key with a
/// non UTF-8 value is an error.
fn utf8_vars<I>(vars: I) -> Result<Vec<(String, String)>, ConfigsError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut out = Vec::new();

    for (key, value) in vars {
        let Ok(key) = key.into_string() else {
            debug!("skipping environment variable with a non utf-8 name");
            continue;
        };

        match value.into_string() {
            Ok(value) => out.push((key, value)),
            Err(_) if SITE_ENV_KEYS.contains(&key.as_str()) => {
                error!(key = key.as_str(), "configuration value is not valid utf-8");
                return Err(ConfigsError::InvalidUnicode { key });
            }
            Err(_) => {
                debug!(key = key.as_str(), "skipping environment variable with a non utf-8 value");
            }
        }
    }

    Ok(out)
}

fn parse_number<T>(key: &str, value: Option<&str>, default: T) -> Result<T, ConfigsError>
where
    T: FromStr,
{
    let Some(value) = value else {
        return Ok(default);
    };

    value.trim().parse().map_err(|_| {
        error!(key = key, "failed to parse numeric configuration");
        ConfigsError::InvalidNumber {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    })
}
