// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides the root banner, liveness and database-backed readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/ready` answers 503 while the database cannot serve queries.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn root_handler() -> Json<serde_json::Value> {
            Json(json!({ "message": "Recipe API is running" }))
        }

        async fn health_handler() -> Json<serde_json::Value> {
            Json(json!({
                "status": "healthy",
                "service": crate::constants::service_names::RECIPE_SERVER,
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(State(resources): State<Arc<ServerResources>>) -> Response {
            let database = resources.database.health_check().await;
            let recipes = match database {
                Ok(()) => resources.database.recipes().count().await,
                Err(e) => Err(e),
            };

            match recipes {
                Ok(count) => Json(json!({
                    "status": "ready",
                    "database": "ok",
                    "recipes": count,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }))
                .into_response(),
                Err(e) => {
                    warn!(error = %e, "Readiness check failed");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        Json(json!({
                            "status": "unavailable",
                            "database": "error",
                            "timestamp": chrono::Utc::now().to_rfc3339()
                        })),
                    )
                        .into_response()
                }
            }
        }

        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}
