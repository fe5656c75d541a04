// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads bind address, database pool and HTTP limits from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the recipe server
//!
//! - **Environment**: Server configuration from environment variables
//! - **Database**: Typed database URL and pool settings

use std::env;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// Environment and server configuration
pub mod environment;

/// Database URL and connection pool configuration
pub mod database;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{CorsConfig, ServerConfig};

/// Parse an environment variable, falling back to `default` when it is unset
///
/// # Errors
///
/// Returns `ConfigInvalid` when the variable is set but does not parse
pub(crate) fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            AppError::config(format!("Invalid {key} value '{raw}': {e}"))
        }),
        Err(_) => Ok(default),
    }
}
