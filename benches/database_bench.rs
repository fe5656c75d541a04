// ABOUTME: Criterion benchmarks for recipe storage using the SQLite backend
// ABOUTME: Measures recipe creation, view-counting reads and the search queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for database operations.
//!
//! Measures recipe creation, fetch by id and the three read-only queries
//! against an in-memory `SQLite` database.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recipe_server::database::Database;
use recipe_server::models::NewRecipe;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::runtime::Runtime;

/// Counter for unique recipe titles across benchmark iterations
static RECIPE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Shared pantry the generated recipes draw from
const PANTRY: &[&str] = &[
    "Tomato", "Cheese", "Basil", "Garlic", "Onion", "Olive Oil", "Salt", "Pepper", "Flour",
    "Egg", "Butter", "Milk", "Rice", "Chicken", "Lemon", "Parsley",
];

/// Generate a recipe with `size` ingredients rotating through the pantry
fn generate_recipe(size: usize) -> NewRecipe {
    let counter = RECIPE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let ingredients = (0..size).map(|i| PANTRY[(counter + i) % PANTRY.len()]);
    NewRecipe::new(&format!("Bench Recipe {counter}"), None, 30, ingredients)
}

async fn create_test_db() -> Database {
    Database::in_memory().await.unwrap()
}

/// Benchmark recipe creation for different ingredient counts
fn bench_recipe_create(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_create");

    let db = rt.block_on(create_test_db());
    let store = db.recipes();

    for size in [1_usize, 5, 20] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("ingredients", size), &size, |b, &size| {
            b.iter(|| {
                let recipe = generate_recipe(size);
                rt.block_on(async { store.create(black_box(&recipe)).await.unwrap() })
            });
        });
    }

    group.finish();
}

/// Benchmark fetch by id, which also increments the view counter
fn bench_recipe_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_get");

    let db = rt.block_on(create_test_db());
    let store = db.recipes();
    let ids: Vec<i64> = rt.block_on(async {
        let mut ids = Vec::new();
        for _ in 0..100 {
            ids.push(store.create(&generate_recipe(8)).await.unwrap().id);
        }
        ids
    });

    group.bench_function("by_id", |b| {
        let mut index = 0;
        b.iter(|| {
            let id = ids[index % ids.len()];
            index += 1;
            rt.block_on(async { store.get_by_id(black_box(id)).await.unwrap() })
        });
    });

    group.bench_function("by_id_miss", |b| {
        b.iter(|| rt.block_on(async { store.get_by_id(black_box(-1)).await.is_err() }));
    });

    group.finish();
}

/// Benchmark the read-only queries over a populated database
fn bench_recipe_queries(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_queries");

    let db = rt.block_on(create_test_db());
    rt.block_on(async {
        let store = db.recipes();
        for _ in 0..500 {
            let recipe = store.create(&generate_recipe(6)).await.unwrap();
            store.get_by_id(recipe.id).await.unwrap();
        }
    });
    let queries = db.queries();

    group.bench_function("top_recipes", |b| {
        b.iter(|| rt.block_on(async { queries.top_recipes(black_box(10)).await.unwrap() }));
    });

    group.bench_function("search_by_title", |b| {
        b.iter(|| {
            rt.block_on(async { queries.search_by_title(black_box("Recipe 4")).await.unwrap() })
        });
    });

    for required in [1_usize, 2, 4] {
        let names: Vec<String> = PANTRY[..required].iter().map(|&n| n.to_owned()).collect();
        group.bench_with_input(
            BenchmarkId::new("search_by_ingredients", required),
            &names,
            |b, names| {
                b.iter(|| {
                    rt.block_on(async {
                        queries.search_by_ingredients(black_box(names)).await.unwrap()
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_recipe_create,
    bench_recipe_get,
    bench_recipe_queries
);
criterion_main!(benches);
