// ABOUTME: Server binary for the recipe API
// ABOUTME: Loads configuration from the environment, applies CLI overrides and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Server Binary
//!
//! Starts the recipe REST API backed by `SQLite`.

use anyhow::Result;
use clap::Parser;
use recipe_server::{
    config::{DatabaseUrl, ServerConfig},
    logging, server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-server")]
#[command(about = "Recipe API - recipes, ingredients, view counts and ingredient search")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }

    logging::init_from_env()?;
    info!("Starting Recipe API");

    if let Err(e) = server::run(config).await {
        error!(error = %e, "Recipe server failed");
        return Err(e.into());
    }

    info!("Recipe server shut down cleanly");
    Ok(())
}
