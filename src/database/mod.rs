// ABOUTME: Database handle owning the SQLite pool, schema migration and store accessors
// ABOUTME: Entry point for the ingredient vocabulary, recipe store and query engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Three tables back the service:
//!
//! - `ingredients`: the deduplicated vocabulary (`name` is unique, case-sensitive)
//! - `recipes`: title, description, cooking time and the view counter
//! - `recipe_ingredients`: ordered links, unique per `(recipe_id, ingredient_id)`
//!   and per `(recipe_id, "order")`
//!
//! Foreign keys are enforced on every connection. File databases run in WAL
//! mode so readers never block the single writer.

mod ingredients;
mod queries;
mod recipes;
/// Transaction guard and retry helpers
pub mod transactions;

pub use ingredients::IngredientVocabulary;
pub use queries::RecipeQueries;
pub use recipes::RecipeStore;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};

/// Database manager for recipe storage
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    url: DatabaseUrl,
}

impl Database {
    /// Open the database described by `config` and run migrations
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an unusable location, `StorageUnavailable` if
    /// the database cannot be opened, or a database error if migration fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let url = config.url.clone();
        if let Some(path) = url.file_path() {
            ensure_parent_dir(path).await?;
        }

        let mut options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid database URL '{url}': {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));
        if !url.is_memory() {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool_options = if url.is_memory() {
            // Each connection to `sqlite::memory:` is a separate database, so the
            // pool holds exactly one connection for its whole lifetime
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to open database", e))?;

        let db = Self { pool, url };
        db.migrate().await?;

        info!(database = %db.url, "Database ready");
        Ok(db)
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or migration fails
    pub async fn in_memory() -> AppResult<Self> {
        Self::new(&DatabaseConfig::in_memory()).await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Recipe store bound to this database
    #[must_use]
    pub fn recipes(&self) -> RecipeStore {
        RecipeStore::new(self.pool.clone())
    }

    /// Read-only query engine bound to this database
    #[must_use]
    pub fn queries(&self) -> RecipeQueries {
        RecipeQueries::new(self.pool.clone())
    }

    /// Check that a connection can be acquired and answers a trivial query
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` or a database error if the check fails
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Database health check", e))?;
        Ok(())
    }

    /// Close every pooled connection, waiting for checked-out ones to return
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }

    /// Run database migrations
    ///
    /// Idempotent: every statement is `IF NOT EXISTS`.
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_ingredients().await?;
        self.migrate_recipes().await?;
        self.migrate_recipe_ingredients().await?;
        debug!("Database schema up to date");
        Ok(())
    }

    async fn migrate_ingredients(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE CHECK (length(name) BETWEEN 1 AND 50)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create ingredients table", e))?;
        Ok(())
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(title) BETWEEN 1 AND 100),
                description TEXT CHECK (description IS NULL OR length(description) <= 1000),
                cooking_time INTEGER NOT NULL CHECK (cooking_time BETWEEN 1 AND 300),
                views INTEGER NOT NULL DEFAULT 0 CHECK (views >= 0)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create recipes table", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_views ON recipes(views DESC, id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to create recipes index", e))?;
        Ok(())
    }

    async fn migrate_recipe_ingredients(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
                "order" INTEGER NOT NULL CHECK ("order" >= 0),
                PRIMARY KEY (recipe_id, ingredient_id),
                UNIQUE (recipe_id, "order")
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create recipe_ingredients table", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients(ingredient_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create recipe_ingredients index", e))?;
        Ok(())
    }
}

async fn ensure_parent_dir(path: &std::path::Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::config(format!(
                    "Cannot create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}
