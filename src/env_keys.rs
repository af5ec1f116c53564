// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Environment Keys
//!
//! Names of every environment variable the site reads, together with the env file
//! names and the defaults applied when a value is absent.
//!
//! Keys prefixed with `NEXT_PUBLIC_` are safe to expose to browsers. Everything
//! else is server-only and must never leave the process.

/// Environment file names for the different deployment environments
pub const LOCAL_ENV_FILE_NAME: &str = "./.env.local";
pub const DEV_ENV_FILE_NAME: &str = "./.env.development";
pub const PREVIEW_ENV_FILE_NAME: &str = "./.env.preview";
pub const PROD_ENV_FILE_NAME: &str = "./.env.production";

/// Secret management prefixes
pub const SECRET_PREFIX: &str = "!";
pub const SECRET_PREFIX_TO_DECODE: &str = "!!";

/// Deployment environment indicator (`production`, `preview`, `development`).
pub const VERCEL_ENV_ENV_KEY: &str = "NEXT_PUBLIC_VERCEL_ENV";
/// Host of the current preview/development deployment, without scheme.
pub const VERCEL_URL_ENV_KEY: &str = "NEXT_PUBLIC_VERCEL_URL";
/// Site URL used on production and local builds.
pub const SITE_URL_ENV_KEY: &str = "NEXT_PUBLIC_SITE_URL";

/// Gateway template used to turn `ipfs://` URLs into fetchable ones.
pub const IPFS_GATEWAY_TEMPLATE_ENV_KEY: &str = "NEXT_PUBLIC_IPFS_GATEWAY_TEMPLATE";

/// Storage API key. Server-only.
pub const NFT_STORAGE_API_KEY_ENV_KEY: &str = "NFT_STORAGE_API_KEY";

/// Comma-separated list of disabled action identifiers.
pub const DISABLED_ACTIONS_ENV_KEY: &str = "NEXT_PUBLIC_DISABLED_ACTIONS";

/// Real-time messaging (pusher protocol) settings.
pub const WEB_SOCKET_PUSHER_APP_KEY_ENV_KEY: &str = "NEXT_PUBLIC_WEB_SOCKET_PUSHER_APP_KEY";
pub const WEB_SOCKET_PUSHER_HOST_ENV_KEY: &str = "NEXT_PUBLIC_WEB_SOCKET_PUSHER_HOST";
pub const WEB_SOCKET_PUSHER_PORT_ENV_KEY: &str = "NEXT_PUBLIC_WEB_SOCKET_PUSHER_PORT";

/// VAPID public key for web push subscriptions.
pub const WEB_PUSH_PUBLIC_KEY_ENV_KEY: &str = "NEXT_PUBLIC_WEB_PUSH_PUBLIC_KEY";

/// Every key the builder reads.
pub const SITE_ENV_KEYS: [&str; 10] = [
    VERCEL_ENV_ENV_KEY,
    VERCEL_URL_ENV_KEY,
    SITE_URL_ENV_KEY,
    IPFS_GATEWAY_TEMPLATE_ENV_KEY,
    NFT_STORAGE_API_KEY_ENV_KEY,
    DISABLED_ACTIONS_ENV_KEY,
    WEB_SOCKET_PUSHER_APP_KEY_ENV_KEY,
    WEB_SOCKET_PUSHER_HOST_ENV_KEY,
    WEB_SOCKET_PUSHER_PORT_ENV_KEY,
    WEB_PUSH_PUBLIC_KEY_ENV_KEY,
];

pub const DEFAULT_WEB_SOCKET_PUSHER_PORT: u16 = 6001;

/// Placeholder token the gateway template must contain exactly once.
pub const GATEWAY_PATH_PLACEHOLDER: &str = "PATH";
/// Scheme prefix of content-addressed URLs.
pub const IPFS_SCHEME_PREFIX: &str = "ipfs://";
