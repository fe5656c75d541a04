// ABOUTME: Core data models for recipes, ingredients and recipe summaries
// ABOUTME: Shared by the store, the query engine and the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Ingredient`: a row of the deduplicated ingredient vocabulary
//! - `Recipe`: a fully hydrated recipe with its ingredients in order
//! - `RecipeSummary`: the listing/search projection (no description, no ingredients)
//! - `NewRecipe`: an unvalidated creation request as handed to the store

use serde::{Deserialize, Serialize};

/// An entry of the ingredient vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Storage identifier
    pub id: i64,
    /// Unique, case-sensitive name
    pub name: String,
}

/// An ingredient as it appears inside a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeIngredient {
    /// Ingredient name
    pub name: String,
}

impl From<&str> for RecipeIngredient {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

/// A recipe with its ingredients sorted by position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Storage identifier
    pub id: i64,
    /// Title
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Cooking time in minutes
    pub cooking_time: u32,
    /// Number of times the recipe has been fetched by id
    pub views: u64,
    /// Ingredients in submission order, duplicates collapsed
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Ingredient names in order
    #[must_use]
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Listing and search projection of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Storage identifier
    pub id: i64,
    /// Title
    pub title: String,
    /// View counter at query time
    pub views: u64,
    /// Cooking time in minutes
    pub cooking_time: u32,
}

/// A recipe submission before validation and storage
///
/// `cooking_time` stays signed so that negative input reaches validation and
/// is reported as out of range instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    /// Title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Ingredient names in submission order, possibly repeated
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    /// Build a submission from borrowed parts
    pub fn new<I, S>(title: &str, description: Option<&str>, cooking_time: i64, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.to_owned(),
            description: description.map(str::to_owned),
            cooking_time,
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}
