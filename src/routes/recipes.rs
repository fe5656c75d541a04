// ABOUTME: Route handlers for the Recipes REST API
// ABOUTME: Create, fetch (counting views), list most viewed and search by title or ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! Malformed bodies, non-integer ids and bad query strings are answered with
//! 422 and the standard error body, the same as field validation failures.
//! Bodies over the configured limit are answered with 413.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::{Query as MultiQuery, QueryRejection as MultiQueryRejection};
use serde::Deserialize;

use crate::{
    constants::limits::TOP_RECIPES_LIMIT,
    errors::{AppError, ErrorCode},
    middleware::RequestContext,
    models::{NewRecipe, RecipeIngredient},
    resources::ServerResources,
    validation::validate_title_search,
};

/// Request body for creating a recipe
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateRecipeBody {
    /// Title, 1 to 100 characters
    pub title: String,
    /// Optional description, up to 1000 characters
    #[serde(default)]
    pub description: Option<String>,
    /// Cooking time in minutes, 1 to 300
    pub cooking_time: i64,
    /// Up to 20 ingredients in order
    pub ingredients: Vec<RecipeIngredient>,
}

impl From<CreateRecipeBody> for NewRecipe {
    fn from(body: CreateRecipeBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            cooking_time: body.cooking_time,
            ingredients: body.ingredients.into_iter().map(|i| i.name).collect(),
        }
    }
}

/// Query parameters for title search
#[derive(Debug, Deserialize)]
pub struct TitleSearchQuery {
    /// Substring to look for
    pub title: Option<String>,
}

/// Query parameters for ingredient search (`?ingredients=a&ingredients=b`)
#[derive(Debug, Deserialize)]
pub struct IngredientSearchQuery {
    /// Names every match must contain
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/recipes",
                get(Self::handle_list_top).post(Self::handle_create),
            )
            .route(
                "/recipes/",
                get(Self::handle_list_top).post(Self::handle_create),
            )
            .route("/recipes/search/by-title", get(Self::handle_search_by_title))
            .route(
                "/recipes/search/by-ingredients",
                get(Self::handle_search_by_ingredients),
            )
            .route("/recipes/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle POST /recipes/ - Create a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        context: RequestContext,
        body: Result<Json<CreateRecipeBody>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(body) = body.map_err(|e| context.attach(Self::body_error(&e)))?;

        let recipe = resources
            .database
            .recipes()
            .create(&body.into())
            .await
            .map_err(|e| context.attach(e))?;

        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle GET /recipes/:id - Fetch a recipe and count the view
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        context: RequestContext,
        id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        let Path(id) = id.map_err(|e| {
            context.attach(
                AppError::invalid_input(format!("Recipe id must be an integer: {}", e.body_text()))
                    .with_details(serde_json::json!({ "field": "id" })),
            )
        })?;

        let recipe = resources
            .database
            .recipes()
            .get_by_id(id)
            .await
            .map_err(|e| context.attach(e))?;

        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle GET /recipes/ - Most viewed recipes
    async fn handle_list_top(
        State(resources): State<Arc<ServerResources>>,
        context: RequestContext,
    ) -> Result<Response, AppError> {
        let recipes = resources
            .database
            .queries()
            .top_recipes(TOP_RECIPES_LIMIT)
            .await
            .map_err(|e| context.attach(e))?;

        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /recipes/search/by-title
    async fn handle_search_by_title(
        State(resources): State<Arc<ServerResources>>,
        context: RequestContext,
        query: Result<Query<TitleSearchQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) = query
            .map_err(|e| context.attach(AppError::invalid_input(e.body_text())))?;
        let term = validate_title_search(query.title.as_deref()).map_err(|e| context.attach(e))?;

        let recipes = resources
            .database
            .queries()
            .search_by_title(term)
            .await
            .map_err(|e| context.attach(e))?;

        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /recipes/search/by-ingredients
    async fn handle_search_by_ingredients(
        State(resources): State<Arc<ServerResources>>,
        context: RequestContext,
        query: Result<MultiQuery<IngredientSearchQuery>, MultiQueryRejection>,
    ) -> Result<Response, AppError> {
        let MultiQuery(query) =
            query.map_err(|e| context.attach(AppError::invalid_input(e.to_string())))?;

        let recipes = resources
            .database
            .queries()
            .search_by_ingredients(&query.ingredients)
            .await
            .map_err(|e| context.attach(e))?;

        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    fn body_error(rejection: &JsonRejection) -> AppError {
        let text = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::new(ErrorCode::PayloadTooLarge, text)
        } else if text.contains("missing field") {
            AppError::new(ErrorCode::MissingRequiredField, text)
        } else {
            AppError::invalid_input(text)
        }
    }
}
