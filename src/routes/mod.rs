// ABOUTME: Route module organization for the recipe server HTTP endpoints
// ABOUTME: Provides route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the recipe server
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the database layer.

/// Health check and system status routes
pub mod health;
/// Recipe CRUD and search routes
pub mod recipes;

pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;
