// ABOUTME: Recipe store with transactional creation and view-counting reads
// ABOUTME: Links ingredients in submission order and increments views atomically in storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{info, instrument, warn};

use super::ingredients::IngredientVocabulary;
use super::transactions::{retry_transaction, SqliteTransactionGuard};
use crate::constants::database::MAX_TRANSACTION_RETRIES;
use crate::errors::{AppError, AppResult};
use crate::models::{NewRecipe, Recipe, RecipeIngredient, RecipeSummary};
use crate::validation::validate_new_recipe;

/// Transactional recipe persistence
#[derive(Clone)]
pub struct RecipeStore {
    pool: SqlitePool,
}

impl RecipeStore {
    /// Create a new recipe store
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and persist a recipe with its ingredient links
    ///
    /// Repeated ingredient names are linked once, at their first position.
    /// Either the recipe, every link and every new ingredient commit together
    /// or nothing is written.
    ///
    /// # Errors
    ///
    /// Returns a validation error before touching storage, or a storage error
    /// after rolling back
    #[instrument(skip(self, recipe), fields(title = %recipe.title, ingredients = recipe.ingredients.len()))]
    pub async fn create(&self, recipe: &NewRecipe) -> AppResult<Recipe> {
        validate_new_recipe(recipe)?;

        match retry_transaction(move || self.create_once(recipe), MAX_TRANSACTION_RETRIES).await {
            Ok(created) => {
                info!(
                    recipe.id = created.id,
                    ingredients = created.ingredients.len(),
                    "Recipe created"
                );
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, code = ?e.code, "Recipe creation rolled back");
                Err(e)
            }
        }
    }

    async fn create_once(&self, recipe: &NewRecipe) -> AppResult<Recipe> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_sqlx("Failed to begin transaction", e))?;
        let mut guard = SqliteTransactionGuard::new(tx);

        match insert_recipe(guard.executor()?, recipe).await {
            Ok(created) => {
                guard.commit().await?;
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback_error) = guard.rollback().await {
                    warn!(error = %rollback_error, "Explicit rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Fetch a recipe by id, counting the read as one view
    ///
    /// The returned recipe already includes this view.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no recipe has this id (nothing is written),
    /// or a storage error
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> AppResult<Recipe> {
        retry_transaction(move || self.get_by_id_once(id), MAX_TRANSACTION_RETRIES).await
    }

    async fn get_by_id_once(&self, id: i64) -> AppResult<Recipe> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_sqlx("Failed to begin transaction", e))?;
        let mut guard = SqliteTransactionGuard::new(tx);

        let updated = sqlx::query("UPDATE recipes SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to increment views", e))?
            .rows_affected();
        if updated == 0 {
            return Err(recipe_not_found(id));
        }

        let recipe = fetch_recipe(guard.executor()?, id)
            .await?
            .ok_or_else(|| recipe_not_found(id))?;

        guard.commit().await?;
        Ok(recipe)
    }

    /// Number of stored recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to count recipes", e))?;
        column_u64("count", count)
    }
}

/// Insert the recipe row and its ordered ingredient links on `conn`
async fn insert_recipe(conn: &mut SqliteConnection, recipe: &NewRecipe) -> AppResult<Recipe> {
    // Writing first takes the write lock up front instead of upgrading later
    let recipe_id = sqlx::query(
        "INSERT INTO recipes (title, description, cooking_time, views) VALUES (?, ?, ?, 0)",
    )
    .bind(&recipe.title)
    .bind(recipe.description.as_deref())
    .bind(recipe.cooking_time)
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::from_sqlx("Failed to insert recipe", e))?
    .last_insert_rowid();

    let mut vocabulary = IngredientVocabulary::new();
    let mut order: i64 = 0;
    for name in &recipe.ingredients {
        if vocabulary.is_resolved(name) {
            continue;
        }
        let ingredient = vocabulary.get_or_create(&mut *conn, name).await?;

        sqlx::query(
            r#"INSERT INTO recipe_ingredients (recipe_id, ingredient_id, "order") VALUES (?, ?, ?)"#,
        )
        .bind(recipe_id)
        .bind(ingredient.id)
        .bind(order)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to link ingredient", e))?;
        order += 1;
    }

    fetch_recipe(conn, recipe_id)
        .await?
        .ok_or_else(|| AppError::database(format!("Recipe {recipe_id} missing after insert")))
}

fn recipe_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Recipe {id}")).with_resource_id(id.to_string())
}

async fn fetch_recipe(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Recipe>> {
    let Some(row) = sqlx::query(
        "SELECT id, title, description, cooking_time, views FROM recipes WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::from_sqlx("Failed to fetch recipe", e))?
    else {
        return Ok(None);
    };

    let ingredients: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT i.name
        FROM recipe_ingredients ri
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = ?
        ORDER BY ri."order"
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::from_sqlx("Failed to fetch recipe ingredients", e))?;

    row_to_recipe(&row, ingredients).map(Some)
}

fn row_to_recipe(row: &SqliteRow, ingredients: Vec<String>) -> AppResult<Recipe> {
    Ok(Recipe {
        id: row.get("id"),
        title: row.get("title"),
        description: row
            .get::<Option<String>, _>("description")
            .filter(|description| !description.is_empty()),
        cooking_time: column_u32("cooking_time", row.get("cooking_time"))?,
        views: column_u64("views", row.get("views"))?,
        ingredients: ingredients
            .into_iter()
            .map(|name| RecipeIngredient { name })
            .collect(),
    })
}

pub(super) fn row_to_recipe_summary(row: &SqliteRow) -> AppResult<RecipeSummary> {
    Ok(RecipeSummary {
        id: row.get("id"),
        title: row.get("title"),
        views: column_u64("views", row.get("views"))?,
        cooking_time: column_u32("cooking_time", row.get("cooking_time"))?,
    })
}

fn column_u32(column: &str, value: i64) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::database(format!("Column {column} holds invalid value {value}")))
}

fn column_u64(column: &str, value: i64) -> AppResult<u64> {
    u64::try_from(value)
        .map_err(|_| AppError::database(format!("Column {column} holds invalid value {value}")))
}
