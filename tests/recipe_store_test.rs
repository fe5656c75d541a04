// ABOUTME: Integration tests for the recipe store and ingredient vocabulary
// ABOUTME: Covers creation order, duplicate collapse, view counting and atomic rollback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{count_rows, create_file_database, create_test_database, new_recipe};
use futures_util::future::join_all;
use recipe_server::{
    database::IngredientVocabulary,
    errors::ErrorCode,
    models::{NewRecipe, RecipeIngredient},
};

#[tokio::test]
async fn test_create_returns_hydrated_recipe() -> Result<()> {
    let database = create_test_database().await?;

    let recipe = database
        .recipes()
        .create(&NewRecipe::new(
            "Pizza Margherita",
            Some("Classic Neapolitan pizza"),
            25,
            ["Dough", "Tomato", "Mozzarella", "Basil"],
        ))
        .await?;

    assert!(recipe.id > 0);
    assert_eq!(recipe.title, "Pizza Margherita");
    assert_eq!(recipe.description.as_deref(), Some("Classic Neapolitan pizza"));
    assert_eq!(recipe.cooking_time, 25);
    assert_eq!(recipe.views, 0);
    assert_eq!(
        recipe.ingredient_names(),
        vec!["Dough", "Tomato", "Mozzarella", "Basil"]
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_description_reads_back_as_none() -> Result<()> {
    let database = create_test_database().await?;
    let store = database.recipes();

    let created = store
        .create(&NewRecipe::new("Plain Rice", Some(""), 20, ["Rice"]))
        .await?;
    assert_eq!(created.description, None);

    let fetched = store.get_by_id(created.id).await?;
    assert_eq!(fetched.description, None);
    Ok(())
}

#[tokio::test]
async fn test_get_by_id_preserves_submission_order() -> Result<()> {
    let database = create_test_database().await?;
    let names = ["Zucchini", "Apple", "Mango", "Carrot", "Basil"];

    let created = database.recipes().create(&new_recipe("Mix", 10, &names)).await?;
    let fetched = database.recipes().get_by_id(created.id).await?;

    assert_eq!(fetched.ingredient_names(), names.to_vec());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_ingredients_collapse_to_first_position() -> Result<()> {
    let database = create_test_database().await?;

    let recipe = database
        .recipes()
        .create(&new_recipe("Salad", 5, &["Tomato", "Cheese", "Tomato"]))
        .await?;

    assert_eq!(
        recipe.ingredients,
        vec![RecipeIngredient::from("Tomato"), RecipeIngredient::from("Cheese")]
    );

    let orders: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT i.name, ri."order"
        FROM recipe_ingredients ri JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = ?
        ORDER BY ri."order"
        "#,
    )
    .bind(recipe.id)
    .fetch_all(database.pool())
    .await?;
    assert_eq!(
        orders,
        vec![("Tomato".to_owned(), 0), ("Cheese".to_owned(), 1)]
    );
    Ok(())
}

#[tokio::test]
async fn test_ingredients_are_shared_between_recipes() -> Result<()> {
    let database = create_test_database().await?;
    let store = database.recipes();

    store.create(&new_recipe("Soup", 40, &["Salt", "Water"])).await?;
    store.create(&new_recipe("Bread", 60, &["Flour", "Salt"])).await?;

    assert_eq!(count_rows(&database, "ingredients").await?, 3);
    let salt_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE name = 'Salt'")
        .fetch_one(database.pool())
        .await?;
    assert_eq!(salt_rows, 1);

    let salt = IngredientVocabulary::find_by_name(database.pool(), "Salt")
        .await?
        .expect("Salt should exist");
    let links: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM recipe_ingredients WHERE ingredient_id = ?")
            .bind(salt.id)
            .fetch_one(database.pool())
            .await?;
    assert_eq!(links, 2);
    Ok(())
}

#[tokio::test]
async fn test_ingredient_names_are_case_sensitive() -> Result<()> {
    let database = create_test_database().await?;

    database
        .recipes()
        .create(&new_recipe("Mixed", 5, &["salt", "Salt"]))
        .await?;

    assert_eq!(count_rows(&database, "ingredients").await?, 2);
    assert!(IngredientVocabulary::find_by_name(database.pool(), "SALT")
        .await?
        .is_none());
    Ok(())
}

#[tokio::test]
async fn test_vocabulary_get_or_create_is_idempotent() -> Result<()> {
    let database = create_test_database().await?;
    let mut conn = database.pool().acquire().await?;

    let mut first = IngredientVocabulary::new();
    let created = first.get_or_create(&mut conn, "Pepper").await?;
    assert!(first.is_resolved("Pepper"));
    assert!(!first.is_resolved("pepper"));

    let mut second = IngredientVocabulary::new();
    let existing = second.get_or_create(&mut conn, "Pepper").await?;
    assert_eq!(created, existing);
    drop(conn);

    assert_eq!(count_rows(&database, "ingredients").await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_views_increment_on_each_read() -> Result<()> {
    let database = create_test_database().await?;
    let store = database.recipes();
    let recipe = store.create(&new_recipe("Tea", 3, &["Water", "Tea"])).await?;

    for expected in 1..=3 {
        let fetched = store.get_by_id(recipe.id).await?;
        assert_eq!(fetched.views, expected);
    }
    Ok(())
}

#[tokio::test]
async fn test_get_missing_recipe_is_not_found() -> Result<()> {
    let database = create_test_database().await?;

    let error = database.recipes().get_by_id(4242).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.http_status(), 404);
    assert_eq!(database.recipes().count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_too_many_ingredients_writes_nothing() -> Result<()> {
    let database = create_test_database().await?;
    let names: Vec<String> = (0..21).map(|i| format!("Ingredient {i}")).collect();

    let error = database
        .recipes()
        .create(&NewRecipe::new("Feast", None, 120, names))
        .await
        .unwrap_err();

    assert!(error.code.is_validation());
    assert_eq!(database.recipes().count().await?, 0);
    assert_eq!(count_rows(&database, "ingredients").await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_invalid_fields_are_rejected_before_storage() -> Result<()> {
    let database = create_test_database().await?;
    let store = database.recipes();

    let cases = [
        new_recipe("", 10, &["Salt"]),
        new_recipe(&"t".repeat(101), 10, &["Salt"]),
        new_recipe("Soup", 0, &["Salt"]),
        new_recipe("Soup", 301, &["Salt"]),
        new_recipe("Soup", 10, &[""]),
    ];
    for case in &cases {
        let error = store.create(case).await.unwrap_err();
        assert!(error.code.is_validation(), "{case:?} gave {error}");
    }

    assert_eq!(store.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_storage_failure_midway_rolls_back_everything() -> Result<()> {
    let database = create_test_database().await?;
    sqlx::query(
        r"
        CREATE TRIGGER reject_poison BEFORE INSERT ON ingredients
        WHEN NEW.name = 'Poison'
        BEGIN
            SELECT RAISE(ABORT, 'poisoned ingredient');
        END
        ",
    )
    .execute(database.pool())
    .await?;

    let error = database
        .recipes()
        .create(&new_recipe("Doomed", 10, &["Salt", "Poison"]))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::IntegrityViolation);
    assert_eq!(database.recipes().count().await?, 0);
    assert_eq!(count_rows(&database, "recipe_ingredients").await?, 0);
    assert!(IngredientVocabulary::find_by_name(database.pool(), "Salt")
        .await?
        .is_none());

    // The store stays usable after the rollback
    let recipe = database
        .recipes()
        .create(&new_recipe("Fine", 10, &["Salt"]))
        .await?;
    assert_eq!(recipe.ingredient_names(), vec!["Salt"]);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_reads_count_every_view() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let database = create_file_database(dir.path(), 4).await?;
    let recipe = database
        .recipes()
        .create(&new_recipe("Popular", 15, &["Rice"]))
        .await?;

    let reads = 25;
    let handles = (0..reads).map(|_| {
        let store = database.recipes();
        tokio::spawn(async move { store.get_by_id(recipe.id).await })
    });
    for result in join_all(handles).await {
        result??;
    }

    let fetched = database.recipes().get_by_id(recipe.id).await?;
    assert_eq!(fetched.views, reads + 1);
    database.close().await;
    Ok(())
}

#[tokio::test]
async fn test_concurrent_creations_share_one_ingredient_row() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let database = create_file_database(dir.path(), 4).await?;

    let handles = (0..8).map(|i| {
        let store = database.recipes();
        tokio::spawn(async move {
            store
                .create(&new_recipe(&format!("Dish {i}"), 20, &["Garlic", "Oil"]))
                .await
        })
    });
    for result in join_all(handles).await {
        result??;
    }

    assert_eq!(database.recipes().count().await?, 8);
    assert_eq!(count_rows(&database, "ingredients").await?, 2);
    assert_eq!(count_rows(&database, "recipe_ingredients").await?, 16);
    database.close().await;
    Ok(())
}
