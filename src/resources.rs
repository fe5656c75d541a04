// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the database handle and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;

/// Resources shared by all request handlers
///
/// Constructed once at startup and passed around as `Arc<ServerResources>`.
#[derive(Clone)]
pub struct ServerResources {
    /// Database handle owning the connection pool
    pub database: Database,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle an open database with its configuration
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        Self {
            database,
            config: Arc::new(config),
        }
    }
}
