// ABOUTME: Application constants for the recipe server organized by domain
// ABOUTME: Field limits, query limits, storage defaults and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded limits and defaults. Environment-driven values live in the
//! server crate's `config` module and fall back to the defaults here.

/// Field and collection limits for recipe submissions and searches
pub mod limits {
    /// Maximum recipe title length in characters
    pub const MAX_TITLE_LENGTH: usize = 100;

    /// Maximum recipe description length in characters
    pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

    /// Minimum cooking time in minutes
    pub const MIN_COOKING_TIME: u32 = 1;

    /// Maximum cooking time in minutes
    pub const MAX_COOKING_TIME: u32 = 300;

    /// Maximum number of ingredient entries in one submission
    pub const MAX_INGREDIENTS: usize = 20;

    /// Maximum ingredient name length in characters
    pub const MAX_INGREDIENT_NAME_LENGTH: usize = 50;

    /// Maximum title search term length in characters
    pub const MAX_SEARCH_TITLE_LENGTH: usize = 100;

    /// Number of recipes returned by the popularity listing
    pub const TOP_RECIPES_LIMIT: u32 = 10;
}

/// Storage defaults
pub mod database {
    /// Default `SQLite` database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/recipes.db";

    /// Default connection pool size for file databases
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Default pool acquire timeout
    pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

    /// Default `SQLite` busy timeout
    pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

    /// Attempts for a write transaction that hits lock contention
    pub const MAX_TRANSACTION_RETRIES: u32 = 3;
}

/// HTTP server defaults
pub mod http {
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;

    /// Default per-request timeout
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Default request body limit
    pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

    /// Request correlation header
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// Service identifiers used in logs
pub mod service_names {
    /// Name of the HTTP server binary and log target
    pub const RECIPE_SERVER: &str = "recipe-server";
}
