// ABOUTME: Read-only recipe queries: most viewed, title substring and ingredient superset
// ABOUTME: All results are summaries ordered by views descending, then by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::recipes::row_to_recipe_summary;
use crate::errors::{AppError, AppResult};
use crate::models::RecipeSummary;
use crate::validation::{validate_ingredient_search, validate_title_search};

/// Read-only recipe queries; none of them touch the view counter
#[derive(Clone)]
pub struct RecipeQueries {
    pool: SqlitePool,
}

impl RecipeQueries {
    /// Create a new query engine
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The `limit` most viewed recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub async fn top_recipes(&self, limit: u32) -> AppResult<Vec<RecipeSummary>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, views, cooking_time
            FROM recipes
            ORDER BY views DESC, id ASC
            LIMIT ?
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to list top recipes", e))?;

        rows.iter().map(row_to_recipe_summary).collect()
    }

    /// Recipes whose title contains `term`, case-sensitively
    ///
    /// `%` and `_` have no special meaning.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or over-long term, or a storage error
    #[instrument(skip(self))]
    pub async fn search_by_title(&self, term: &str) -> AppResult<Vec<RecipeSummary>> {
        let term = validate_title_search(Some(term))?;

        let rows = sqlx::query(
            r"
            SELECT id, title, views, cooking_time
            FROM recipes
            WHERE instr(title, ?) > 0
            ORDER BY views DESC, id ASC
            ",
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to search recipes by title", e))?;

        rows.iter().map(row_to_recipe_summary).collect()
    }

    /// Recipes containing every one of `names`; extra ingredients are allowed
    ///
    /// Repeated names count once.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when `names` is empty, or a storage error
    #[instrument(skip(self))]
    pub async fn search_by_ingredients(&self, names: &[String]) -> AppResult<Vec<RecipeSummary>> {
        validate_ingredient_search(names)?;

        let distinct: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        let placeholders = vec!["?"; distinct.len()].join(", ");
        let sql = format!(
            r"
            SELECT r.id, r.title, r.views, r.cooking_time
            FROM recipes r
            JOIN recipe_ingredients ri ON ri.recipe_id = r.id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE i.name IN ({placeholders})
            GROUP BY r.id
            HAVING COUNT(DISTINCT i.id) = ?
            ORDER BY r.views DESC, r.id ASC
            "
        );

        let required = i64::try_from(distinct.len())
            .map_err(|_| AppError::invalid_input("Too many ingredient names"))?;
        let mut query = sqlx::query(&sql);
        for name in &distinct {
            query = query.bind(*name);
        }
        let rows = query
            .bind(required)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to search recipes by ingredients", e))?;

        debug!(required = distinct.len(), matches = rows.len(), "Ingredient search");
        rows.iter().map(row_to_recipe_summary).collect()
    }
}
