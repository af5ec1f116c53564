// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Site Configs
//!
//! `site_configs` loads the site's environment configuration into an immutable, typed
//! snapshot and rewrites content-addressed `ipfs://` URLs into gateway URLs.
//!
//! ## Features
//!
//! - Per-deployment env files (`.env.production`, `.env.preview`, ...) layered under the
//!   process environment
//! - Fail-fast validation: missing keys, malformed numbers and broken gateway templates
//!   are reported at startup with the offending key
//! - Secret references resolved through a pluggable [`SecretClient`]
//! - A browser-safe [`PublicConfigs`] view without server-only secrets
//!
//! ## Example
//!
//! ```rust
//! use site_configs::ConfigBuilder;
//!
//! let configs = ConfigBuilder::new()
//!     .build_from([
//!         ("NEXT_PUBLIC_IPFS_GATEWAY_TEMPLATE", "https://gw.example/ipfs/PATH"),
//!         ("NEXT_PUBLIC_SITE_URL", "https://daodao.zone"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(
//!     configs.transform_url("ipfs://bafy/0.png"),
//!     "https://gw.example/ipfs/bafy/0.png"
//! );
//! assert_eq!(configs.web_socket().port, 6001);
//! ```

mod configs;
mod configs_builder;
pub mod env_keys;
pub mod environment;
pub mod errors;
mod gateway;
mod secrets;

pub use configs::{Configs, PublicConfigs, WebSocketPusherConfigs};
pub use configs_builder::{ConfigBuilder, parse_flag, parse_list};
pub use environment::DeploymentEnvironment;
pub use gateway::GatewayTemplate;
pub use secrets::{MapSecretClient, Secret, SecretClient};
