// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses bind address, CORS origins, timeouts and body limits from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use super::{env_parse_or, DatabaseConfig};
use crate::constants::http;
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// CORS (Cross-Origin Resource Sharing) configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

impl CorsConfig {
    /// Load CORS configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        env::var("CORS_ALLOWED_ORIGINS")
            .map(|allowed_origins| Self { allowed_origins })
            .unwrap_or_default()
    }

    /// Explicit origins, or `None` when any origin is allowed
    #[must_use]
    pub fn origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: http::DEFAULT_HOST.to_owned(),
            http_port: http::DEFAULT_HTTP_PORT,
            database: DatabaseConfig::default(),
            cors: CorsConfig::default(),
            request_timeout_secs: http::DEFAULT_REQUEST_TIMEOUT_SECS,
            max_body_bytes: http::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if any variable is set to an unparseable value
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| http::DEFAULT_HOST.to_owned()),
            http_port: env_parse_or("HTTP_PORT", http::DEFAULT_HTTP_PORT)?,
            database: DatabaseConfig::from_env()?,
            cors: CorsConfig::from_env(),
            request_timeout_secs: env_parse_or(
                "REQUEST_TIMEOUT_SECS",
                http::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            max_body_bytes: env_parse_or("MAX_REQUEST_BODY_BYTES", http::DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    /// Per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Bind address as `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// One-line configuration summary for the startup log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Recipe Server Configuration: bind={} database={} pool={} cors={} timeout={}s body_limit={}B",
            self.bind_address(),
            self.database.url,
            if self.database.url.is_memory() {
                1
            } else {
                self.database.max_connections
            },
            self.cors.allowed_origins,
            self.request_timeout_secs,
            self.max_body_bytes,
        )
    }
}
