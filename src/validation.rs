// ABOUTME: Request validation for recipe submissions and search parameters
// ABOUTME: Enforces field bounds before data reaches the store; the store reuses it to fail closed

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Input validation shared by the HTTP layer and the recipe store
//!
//! Lengths are counted in characters, not bytes.

use crate::constants::limits::{
    MAX_COOKING_TIME, MAX_DESCRIPTION_LENGTH, MAX_INGREDIENTS, MAX_INGREDIENT_NAME_LENGTH,
    MAX_SEARCH_TITLE_LENGTH, MAX_TITLE_LENGTH, MIN_COOKING_TIME,
};
use crate::errors::{AppError, AppResult};
use crate::models::NewRecipe;
use serde_json::json;

/// Validate a text field against `1..=max` characters (or `0..=max` when empty is allowed)
///
/// # Errors
/// * Returns `AppError::InvalidInput` if the value is empty or too long
///
/// # Examples
/// ```
/// # use recipe_server::validation::validate_text;
/// assert!(validate_text("title", "Pizza", 100, false).is_ok());
/// assert!(validate_text("title", "", 100, false).is_err());
/// assert!(validate_text("description", "", 1000, true).is_ok());
/// assert!(validate_text("title", &"a".repeat(101), 100, false).is_err());
/// ```
pub fn validate_text(field: &str, value: &str, max: usize, allow_empty: bool) -> AppResult<()> {
    if value.is_empty() && !allow_empty {
        return Err(AppError::invalid_input(format!("{field} must not be empty"))
            .with_details(json!({ "field": field })));
    }
    let length = value.chars().count();
    if length > max {
        return Err(AppError::invalid_input(format!(
            "{field} must be at most {max} characters, got {length}"
        ))
        .with_details(json!({ "field": field, "max_length": max })));
    }
    Ok(())
}

/// Validate a cooking time in minutes
///
/// # Errors
/// * Returns `AppError::ValueOutOfRange` outside `[1, 300]`
pub fn validate_cooking_time(minutes: i64) -> AppResult<()> {
    if !(i64::from(MIN_COOKING_TIME)..=i64::from(MAX_COOKING_TIME)).contains(&minutes) {
        return Err(AppError::out_of_range(
            "cooking_time",
            minutes,
            i64::from(MIN_COOKING_TIME),
            i64::from(MAX_COOKING_TIME),
        ));
    }
    Ok(())
}

/// Validate a complete recipe submission
///
/// Repeated ingredient names are accepted here; they collapse when stored.
///
/// # Errors
/// * Returns a validation `AppError` naming the first offending field
pub fn validate_new_recipe(recipe: &NewRecipe) -> AppResult<()> {
    validate_text("title", &recipe.title, MAX_TITLE_LENGTH, false)?;
    if let Some(description) = &recipe.description {
        validate_text("description", description, MAX_DESCRIPTION_LENGTH, true)?;
    }
    validate_cooking_time(recipe.cooking_time)?;

    if recipe.ingredients.len() > MAX_INGREDIENTS {
        return Err(AppError::invalid_input(format!(
            "ingredients must contain at most {MAX_INGREDIENTS} items, got {}",
            recipe.ingredients.len()
        ))
        .with_details(json!({ "field": "ingredients", "max_items": MAX_INGREDIENTS })));
    }
    for name in &recipe.ingredients {
        validate_text("ingredients.name", name, MAX_INGREDIENT_NAME_LENGTH, false)?;
    }
    Ok(())
}

/// Validate a title search term
///
/// # Errors
/// * Returns `AppError::MissingRequiredField` when absent, `AppError::InvalidInput`
///   when empty or longer than 100 characters
pub fn validate_title_search(term: Option<&str>) -> AppResult<&str> {
    let term = term.ok_or_else(|| AppError::missing_field("title"))?;
    validate_text("title", term, MAX_SEARCH_TITLE_LENGTH, false)?;
    Ok(term)
}

/// Validate an ingredient search
///
/// # Errors
/// * Returns `AppError::MissingRequiredField` when no ingredient name is given
pub fn validate_ingredient_search(names: &[String]) -> AppResult<()> {
    if names.is_empty() {
        return Err(AppError::missing_field("ingredients"));
    }
    Ok(())
}
