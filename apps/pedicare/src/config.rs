//! # Server Configuration
//!
//! Settings for `pedicare serve`.
//!
//! Precedence: CLI flags > environment variables > defaults.
//!
//! | variable                | default     |
//! |-------------------------|-------------|
//! | `PEDICARE_HOST`         | `127.0.0.1` |
//! | `PEDICARE_PORT`         | `8080`      |
//! | `PEDICARE_CORS_ORIGINS` | (none)      |
//! | `PEDICARE_RATE_LIMIT`   | `20`        |
//!
//! `PEDICARE_CORS_ORIGINS` is a comma-separated list of allowed origins.
//! `PEDICARE_RATE_LIMIT` is the global request budget per second.

use crate::error::AppError;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RATE_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub rate_limit_per_second: NonZeroU32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
            rate_limit_per_second: NonZeroU32::MIN.saturating_add(DEFAULT_RATE_LIMIT - 1),
        }
    }
}

impl ServerConfig {
    /// Defaults overlaid with `PEDICARE_*` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(host) = lookup("PEDICARE_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup("PEDICARE_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("PEDICARE_PORT is not a port: {port}")))?;
        }
        if let Some(origins) = lookup("PEDICARE_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(limit) = lookup("PEDICARE_RATE_LIMIT") {
            config.rate_limit_per_second = limit
                .trim()
                .parse::<NonZeroU32>()
                .map_err(|_| {
                    AppError::Config(format!(
                        "PEDICARE_RATE_LIMIT must be a positive integer: {limit}"
                    ))
                })?;
        }

        Ok(config)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Listen address. `host` must be an IPv4 or IPv6 literal; IPv6 hosts
    /// may be given with or without brackets.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');
        let ip = host
            .parse::<IpAddr>()
            .map_err(|_| AppError::Config(format!("invalid listen host: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

// =============================================================================
// TESTS
// =============================================================================
