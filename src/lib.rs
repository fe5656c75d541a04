// ABOUTME: Main library entry point for the recipe server
// ABOUTME: Provides recipe storage, ingredient search and the REST API over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Server
//!
//! An HTTP service for cooking recipes. Each recipe carries an ordered list of
//! ingredients drawn from a shared, deduplicated vocabulary, and a view
//! counter that grows every time the recipe is fetched by id.
//!
//! ## Features
//!
//! - **Transactional creation**: a recipe and all its ingredient links commit
//!   together or not at all
//! - **Atomic view counting**: concurrent reads never lose an increment
//! - **Search**: most viewed, title substring, and "contains all of these
//!   ingredients"
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` schema, ingredient vocabulary, recipe store, queries
//! - **Routes**: thin axum handlers over the database layer
//! - **Middleware**: request ids, tracing spans, CORS
//! - **Config**: environment-driven server and pool settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_server::database::Database;
//! use recipe_server::errors::AppResult;
//! use recipe_server::models::NewRecipe;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let database = Database::in_memory().await?;
//!     let recipe = database
//!         .recipes()
//!         .create(&NewRecipe::new("Caprese", None, 10, ["Tomato", "Mozzarella", "Basil"]))
//!         .await?;
//!
//!     let matches = database
//!         .queries()
//!         .search_by_ingredients(&["Tomato".to_owned(), "Basil".to_owned()])
//!         .await?;
//!     assert_eq!(matches[0].id, recipe.id);
//!     Ok(())
//! }
//! ```

/// Application constants organized by domain
pub use recipe_core::constants;

/// Environment-driven configuration
pub mod config;

/// `SQLite` storage: schema, ingredient vocabulary, recipe store and queries
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: request ids, tracing spans, CORS
pub mod middleware;

/// Recipe and ingredient data models
pub mod models;

/// Shared state handed to route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Input validation for submissions and searches
pub mod validation;
