// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, router and recipe fixture helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `recipe_server`

use anyhow::Result;
use axum::Router;
use recipe_server::{
    config::{DatabaseConfig, DatabaseUrl, ServerConfig},
    database::Database,
    models::{NewRecipe, Recipe},
    resources::ServerResources,
    server::build_router,
};
use std::path::Path;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; default is quiet
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        // Another test binary component may already have installed one
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::in_memory().await?)
}

/// File-backed database with a multi-connection pool, for concurrency tests
pub async fn create_file_database(dir: &Path, max_connections: u32) -> Result<Database> {
    init_test_logging();
    let config = DatabaseConfig {
        url: DatabaseUrl::SQLite {
            path: dir.join("recipes.db"),
        },
        max_connections,
        ..DatabaseConfig::default()
    };
    Ok(Database::new(&config).await?)
}

/// Router over a fresh in-memory database, plus the database for assertions
pub async fn create_test_router() -> Result<(Router, Database)> {
    let database = create_test_database().await?;
    let config = ServerConfig {
        database: DatabaseConfig::in_memory(),
        ..ServerConfig::default()
    };
    Ok((create_router_with(&database, config), database))
}

/// Router over `database` with a custom server configuration
pub fn create_router_with(database: &Database, config: ServerConfig) -> Router {
    let resources = Arc::new(ServerResources::new(database.clone(), config));
    build_router(resources)
}

/// Build a submission with no description
pub fn new_recipe(title: &str, cooking_time: i64, ingredients: &[&str]) -> NewRecipe {
    NewRecipe::new(title, None, cooking_time, ingredients.iter().copied())
}

/// Create a recipe and view it `views` times
pub async fn create_viewed_recipe(
    database: &Database,
    title: &str,
    ingredients: &[&str],
    views: u64,
) -> Result<Recipe> {
    let store = database.recipes();
    let mut recipe = store.create(&new_recipe(title, 30, ingredients)).await?;
    for _ in 0..views {
        recipe = store.get_by_id(recipe.id).await?;
    }
    Ok(recipe)
}

/// Number of rows in `table`
pub async fn count_rows(database: &Database, table: &str) -> Result<i64> {
    let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(database.pool())
        .await?;
    Ok(count)
}
