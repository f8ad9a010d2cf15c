//! Process configuration read once at startup
//!
//! ## Environment Variables
//! - `HOST` - bind host (default: `0.0.0.0`)
//! - `PORT` - listen port (default: `3000`)
//! - `UPSTREAM_USER_AGENT` - user agent sent to the unlocking endpoints (optional)
//! - `DOUYIN_API_URL`, `XIAOHONGSHU_API_URL`, `BILIBILI_API_URL`, `WEIBO_API_URL`,
//!   `PIPIX_API_URL`, `QISHUI_API_URL` - upstream endpoint per platform. Unset
//!   falls back to the built-in endpoint; set to an empty string to disable the
//!   platform.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};
use crate::domain::platform::Platform;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}

/// Read-only table of upstream endpoints keyed by platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    endpoints: HashMap<Platform, String>,
}

impl PlatformConfig {
    /// Configured endpoint for `platform`, if any.
    pub fn endpoint(&self, platform: Platform) -> Option<&str> {
        self.endpoints.get(&platform).map(String::as_str)
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let endpoints = Platform::ALL
            .into_iter()
            .filter_map(|platform| {
                let endpoint = match lookup(platform.endpoint_env_var()) {
                    Some(value) => value.trim().to_string(),
                    None => platform.default_endpoint().to_string(),
                };
                (!endpoint.is_empty()).then_some((platform, endpoint))
            })
            .collect();

        Self { endpoints }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub user_agent: Option<String>,
    pub platforms: PlatformConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };
        let user_agent = lookup("UPSTREAM_USER_AGENT").filter(|ua| !ua.trim().is_empty());

        Ok(Self {
            host,
            port,
            user_agent,
            platforms: PlatformConfig::from_lookup(&lookup),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
