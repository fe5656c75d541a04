// ABOUTME: Ingredient vocabulary with get-or-create semantics inside a recipe transaction
// ABOUTME: Guarantees one row per distinct ingredient name, even under concurrent creators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqliteExecutor};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::Ingredient;

/// Ingredient lookups scoped to a single recipe creation
///
/// Names resolved once are served from memory for the rest of the
/// transaction. Create a fresh vocabulary per transaction; it must not outlive
/// the transaction whose rows it caches.
#[derive(Debug, Default)]
pub struct IngredientVocabulary {
    resolved: HashMap<String, Ingredient>,
}

impl IngredientVocabulary {
    /// Empty vocabulary
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has already been resolved in this vocabulary
    #[must_use]
    pub fn is_resolved(&self, name: &str) -> bool {
        self.resolved.contains_key(name)
    }

    /// Return the ingredient called `name`, inserting it if it does not exist
    ///
    /// The insert is a no-op when another transaction already created the
    /// name, so the follow-up lookup always sees exactly one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or lookup fails, including constraint
    /// violations raised by storage
    pub async fn get_or_create(
        &mut self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> AppResult<Ingredient> {
        if let Some(ingredient) = self.resolved.get(name) {
            return Ok(ingredient.clone());
        }

        sqlx::query("INSERT INTO ingredients (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to insert ingredient", e))?;

        let ingredient = Self::find_by_name(&mut *conn, name)
            .await?
            .ok_or_else(|| AppError::database(format!("Ingredient '{name}' vanished after insert")))?;

        debug!(ingredient.id = ingredient.id, ingredient.name = %ingredient.name, "Resolved ingredient");
        self.resolved.insert(name.to_owned(), ingredient.clone());
        Ok(ingredient)
    }

    /// Look up an ingredient by exact (case-sensitive) name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_by_name<'e, E>(executor: E, name: &str) -> AppResult<Option<Ingredient>>
    where
        E: SqliteExecutor<'e>,
    {
        let row = sqlx::query("SELECT id, name FROM ingredients WHERE name = ?")
            .bind(name)
            .fetch_optional(executor)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to look up ingredient", e))?;

        Ok(row.as_ref().map(row_to_ingredient))
    }
}

fn row_to_ingredient(row: &SqliteRow) -> Ingredient {
    Ingredient {
        id: row.get("id"),
        name: row.get("name"),
    }
}
