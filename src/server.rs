// ABOUTME: HTTP server assembly: router, middleware stack and graceful shutdown
// ABOUTME: Owns the server lifecycle from binding the listener to closing the database pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! Layers, outermost first: request id assignment, tracing span, request id
//! propagation to the response, CORS, timeout. The body limit is enforced by
//! the JSON extractor and answered with 413.

use std::future::Future;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use http::HeaderName;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::ServerConfig;
use crate::constants::http::REQUEST_ID_HEADER;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::middleware::{make_request_span, setup_cors, MakeRequestUuid};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, RecipeRoutes};

/// Build the complete application router with its middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let config = Arc::clone(&resources.config);
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    request_id_header.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(make_request_span)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::new(request_id_header))
                .layer(setup_cors(&config.cors))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
}

/// Serve `router` on `listener` until `shutdown` resolves, then drain in-flight requests
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))
}

/// Open the database, bind the listener and run until Ctrl-C or SIGTERM
///
/// The database pool is closed after the server has drained.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the address cannot be
/// bound or the server fails
pub async fn run(config: ServerConfig) -> AppResult<()> {
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    let address = config.bind_address();
    let resources = Arc::new(ServerResources::new(database.clone(), config));

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::config(format!("Cannot bind {address}: {e}")))?;
    info!("Recipe API listening on http://{address}");
    display_endpoints(&address);

    let result = serve(listener, build_router(resources), shutdown_signal()).await;

    info!("Server stopped, closing database");
    database.close().await;
    result
}

fn display_endpoints(address: &str) {
    info!("Available endpoints:");
    info!("  GET  http://{address}/");
    info!("  GET  http://{address}/health");
    info!("  GET  http://{address}/ready");
    info!("  POST http://{address}/recipes/");
    info!("  GET  http://{address}/recipes/");
    info!("  GET  http://{address}/recipes/{{id}}");
    info!("  GET  http://{address}/recipes/search/by-title?title=...");
    info!("  GET  http://{address}/recipes/search/by-ingredients?ingredients=...");
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM
///
/// If a handler cannot be installed, that signal is ignored and the other one
/// still triggers shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
