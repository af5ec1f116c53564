// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Configs
//!
//! The configuration snapshot produced by [`ConfigBuilder`](crate::ConfigBuilder).
//!
//! A [`Configs`] value is built once at startup and never changes afterwards. It has no
//! setters and holds no interior mutability, so it can be shared freely between threads
//! behind an `Arc` and every read of a field returns the same value for the lifetime of
//! the process.

use crate::{
    environment::DeploymentEnvironment, errors::ConfigsError, gateway::GatewayTemplate,
    secrets::Secret,
};
use serde::Serialize;
use tracing::error;

/// Connection settings for the real-time messaging service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebSocketPusherConfigs {
    pub app_key: Option<String>,
    pub host: Option<String>,
    pub port: u16,
}

/// Immutable configuration snapshot.
#[derive(Debug, Clone)]
pub struct Configs {
    pub(crate) deployment_environment: Option<DeploymentEnvironment>,
    pub(crate) ipfs_gateway: GatewayTemplate,
    pub(crate) site_url: String,
    pub(crate) nft_storage_api_key: Option<Secret>,
    pub(crate) disabled_actions: Vec<String>,
    pub(crate) web_socket: WebSocketPusherConfigs,
    pub(crate) web_push_public_key: Option<String>,
}

impl Configs {
    /// Deployment context, `None` on local builds.
    pub fn deployment_environment(&self) -> Option<&DeploymentEnvironment> {
        self.deployment_environment.as_ref()
    }

    pub fn ipfs_gateway(&self) -> &GatewayTemplate {
        &self.ipfs_gateway
    }

    /// Public base URL of the site, resolved once for the current deployment.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn nft_storage_api_key(&self) -> Option<&Secret> {
        self.nft_storage_api_key.as_ref()
    }

    pub fn disabled_actions(&self) -> &[String] {
        &self.disabled_actions
    }

    pub fn is_action_disabled(&self, action: &str) -> bool {
        self.disabled_actions.iter().any(|a| a == action)
    }

    pub fn web_socket(&self) -> &WebSocketPusherConfigs {
        &self.web_socket
    }

    pub fn web_push_public_key(&self) -> Option<&str> {
        self.web_push_public_key.as_deref()
    }

    /// Converts an `ipfs://` URL into a gateway URL using the configured template.
    ///
    /// See [`GatewayTemplate::transform`].
    pub fn transform_url(&self, candidate: &str) -> String {
        self.ipfs_gateway.transform(candidate)
    }

    /// Browser-safe view of this snapshot. Server-only secrets are left out.
    pub fn public(&self) -> PublicConfigs<'_> {
        PublicConfigs {
            vercel_env: self.deployment_environment.as_ref(),
            ipfs_gateway_template: &self.ipfs_gateway,
            site_url: &self.site_url,
            disabled_actions: &self.disabled_actions,
            web_socket_pusher: &self.web_socket,
            web_push_public_key: self.web_push_public_key.as_deref(),
        }
    }
}

/// The subset of [`Configs`] that may be shipped to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfigs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vercel_env: Option<&'a DeploymentEnvironment>,
    pub ipfs_gateway_template: &'a GatewayTemplate,
    pub site_url: &'a str,
    pub disabled_actions: &'a [String],
    pub web_socket_pusher: &'a WebSocketPusherConfigs,
    pub web_push_public_key: Option<&'a str>,
}

impl PublicConfigs<'_> {
    /// Serializes the public configuration to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ConfigsError::SerializationError` if `serde_json` rejects the value.
    pub fn to_json(&self) -> Result<String, ConfigsError> {
        serde_json::to_string(self).map_err(|err| {
            error!(error = err.to_string(), "failed to serialize public configs");
            ConfigsError::SerializationError(err.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> Configs {
        Configs {
            deployment_environment: Some(DeploymentEnvironment::Preview),
            ipfs_gateway: GatewayTemplate::new("https://gw.example/PATH").unwrap(),
            site_url: "https://dao-abc.vercel.app".into(),
            nft_storage_api_key: Some(Secret::new("storage-secret")),
            disabled_actions: vec!["mint".into()],
            web_socket: WebSocketPusherConfigs {
                app_key: Some("app".into()),
                host: Some("ws.daodao.zone".into()),
                port: 6001,
            },
            web_push_public_key: None,
        }
    }

    #[test]
    fn public_json_has_no_server_secrets() {
        let json = configs().public().to_json().unwrap();

        assert!(!json.contains("storage-secret"));
        assert!(!json.contains("nftStorage"));
    }

    #[test]
    fn public_json_shape() {
        let json = configs().public().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["vercelEnv"], "preview");
        assert_eq!(value["ipfsGatewayTemplate"], "https://gw.example/PATH");
        assert_eq!(value["siteUrl"], "https://dao-abc.vercel.app");
        assert_eq!(value["disabledActions"], serde_json::json!(["mint"]));
        assert_eq!(value["webSocketPusher"]["port"], 6001);
        assert_eq!(value["webSocketPusher"]["host"], "ws.daodao.zone");
        assert!(value["webPushPublicKey"].is_null());
    }

    #[test]
    fn local_build_omits_vercel_env() {
        let mut configs = configs();
        configs.deployment_environment = None;

        let json = configs.public().to_json().unwrap();
        assert!(!json.contains("vercelEnv"));
    }

    #[test]
    fn snapshot_reads_are_stable() {
        let configs = std::sync::Arc::new(configs());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let configs = configs.clone();
                std::thread::spawn(move || configs.transform_url("ipfs://bafy"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "https://gw.example/bafy");
        }
        assert_eq!(configs.site_url(), "https://dao-abc.vercel.app");
    }
}
