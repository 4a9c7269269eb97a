// ABOUTME: Integration tests for the relational recipe cache store
// ABOUTME: Covers lookup, nested load, transactional write, rollback, and nutrient filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration as ChronoDuration, Utc};
use common::{create_test_database, ingredient, scrambled_eggs, tomato_pasta};
use recipe_finder::database::CacheDatabase;
use recipe_finder::errors::ErrorCode;
use recipe_finder::models::{NutrientKind, QueryKey, Recipe};
use sqlx::Row;

const CACHE_TABLES: [&str; 5] = [
    "query_keys",
    "recipes",
    "used_ingredients",
    "missing_ingredients",
    "nutrients",
];

async fn count_rows(db: &CacheDatabase, table: &str) -> i64 {
    sqlx::query(&format!("SELECT COUNT(*) AS count FROM {table}"))
        .fetch_one(db.pool())
        .await
        .expect("count query")
        .get::<i64, _>("count")
}

#[tokio::test]
async fn test_lookup_on_empty_store_finds_nothing() {
    let db = create_test_database().await;
    let key = QueryKey::new("eggs,pasta,tomatoes", 2).unwrap();

    assert!(db.lookup(&key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_then_load_round_trips_nested_graph() {
    let db = create_test_database().await;
    let key = QueryKey::new("pasta,tomatoes", 1).unwrap();
    let recipe = tomato_pasta();

    let summary = db.store(&key, std::slice::from_ref(&recipe)).await.unwrap();
    assert_eq!(summary.recipes, 1);
    assert_eq!(summary.ingredients, 3);
    assert_eq!(summary.nutrients, 3);

    let cached = db.lookup(&key).await.unwrap().expect("entry stored");
    assert_eq!(cached.key, key);
    assert!(Utc::now() - cached.created_at < ChronoDuration::minutes(1));

    let loaded = db.load(&cached).await.unwrap();
    assert_eq!(loaded, vec![recipe]);

    let pasta = &loaded[0];
    assert_eq!(pasta.servings, 4);
    assert_eq!(pasta.used_ingredients.len(), 2);
    assert_eq!(pasta.used_ingredients[1].unit, "");
    assert_eq!(pasta.missing_ingredients.len(), 1);
    let calories = pasta.nutrition.get(NutrientKind::Calories).unwrap();
    assert!((calories.amount - 500.0).abs() < f64::EPSILON);
    assert_eq!(calories.unit, "");
    assert!(pasta.nutrition.get(NutrientKind::Carbohydrates).is_some());
    assert!(pasta.nutrition.get(NutrientKind::Protein).is_some());
}

#[tokio::test]
async fn test_recipe_and_ingredient_order_is_preserved() {
    let db = create_test_database().await;
    let key = QueryKey::new("eggs,pasta,tomatoes", 2).unwrap();

    let mut eggs = scrambled_eggs();
    eggs.used_ingredients.push(ingredient(1077, "milk", 0.25, "cup"));
    eggs.used_ingredients.push(ingredient(1145, "butter", 1.0, "tbsp"));
    let recipes = vec![eggs, tomato_pasta()];

    db.store(&key, &recipes).await.unwrap();
    let cached = db.lookup(&key).await.unwrap().unwrap();
    let loaded = db.load(&cached).await.unwrap();

    let titles: Vec<&str> = loaded.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Scrambled Eggs", "Easy Tomato Pasta"]);
    let names: Vec<&str> = loaded[0]
        .used_ingredients
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, ["eggs", "milk", "butter"]);
}

#[tokio::test]
async fn test_unrecognized_nutrient_never_reaches_table() {
    let db = create_test_database().await;
    let key = QueryKey::new("eggs", 1).unwrap();

    // Reported with Calories and Fiber; only Calories is retained
    db.store(&key, &[scrambled_eggs()]).await.unwrap();

    assert_eq!(count_rows(&db, "nutrients").await, 1);
    let fiber = sqlx::query("SELECT COUNT(*) AS count FROM nutrients WHERE name = 'Fiber'")
        .fetch_one(db.pool())
        .await
        .unwrap()
        .get::<i64, _>("count");
    assert_eq!(fiber, 0);

    let cached = db.lookup(&key).await.unwrap().unwrap();
    let loaded = db.load(&cached).await.unwrap();
    assert!(loaded[0].nutrition.get(NutrientKind::Protein).is_none());
    assert_eq!(loaded[0].nutrition.facts().count(), 1);
}

#[tokio::test]
async fn test_failed_write_leaves_no_entry_and_no_orphans() {
    let db = create_test_database().await;
    sqlx::query(
        r"
        CREATE TRIGGER fail_on_explode BEFORE INSERT ON missing_ingredients
        WHEN NEW.name = 'explode'
        BEGIN
            SELECT RAISE(ABORT, 'injected failure');
        END
        ",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let key = QueryKey::new("pasta,tomatoes", 2).unwrap();
    let mut broken: Recipe = tomato_pasta();
    broken.external_id = 1;
    broken
        .missing_ingredients
        .push(ingredient(9999, "explode", 1.0, ""));

    // The first recipe is fully written before the second one fails
    let err = db.store(&key, &[tomato_pasta(), broken]).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::WriteError);
    assert!(err.message.contains("injected failure"));

    assert!(db.lookup(&key).await.unwrap().is_none());
    for table in CACHE_TABLES {
        assert_eq!(count_rows(&db, table).await, 0, "rows left in {table}");
    }
}

#[tokio::test]
async fn test_storing_same_key_twice_is_rejected() {
    let db = create_test_database().await;
    let key = QueryKey::new("eggs", 1).unwrap();

    db.store(&key, &[scrambled_eggs()]).await.unwrap();
    let err = db.store(&key, &[scrambled_eggs()]).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::WriteError);
    assert_eq!(count_rows(&db, "query_keys").await, 1);
    assert_eq!(count_rows(&db, "recipes").await, 1);
}

#[tokio::test]
async fn test_same_ingredients_with_other_count_is_separate_entry() {
    let db = create_test_database().await;
    let one = QueryKey::new("eggs,pasta", 1).unwrap();
    let two = QueryKey::new("pasta,eggs", 2).unwrap();

    db.store(&one, &[scrambled_eggs()]).await.unwrap();

    assert!(db.lookup(&one).await.unwrap().is_some());
    assert!(db.lookup(&two).await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_result_is_cached() {
    let db = create_test_database().await;
    let key = QueryKey::new("unobtainium", 3).unwrap();

    db.store(&key, &[]).await.unwrap();

    let cached = db.lookup(&key).await.unwrap().expect("key row stored");
    assert!(db.load(&cached).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_row_is_read_failure() {
    let db = create_test_database().await;
    let key = QueryKey::new("eggs", 1).unwrap();
    db.store(&key, &[scrambled_eggs()]).await.unwrap();

    // SQLite lets a TEXT value into an INTEGER column
    sqlx::query("UPDATE recipes SET servings = 'lots'")
        .execute(db.pool())
        .await
        .unwrap();

    let cached = db.lookup(&key).await.unwrap().unwrap();
    let err = db.load(&cached).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StoreReadFailure);
}

#[tokio::test]
async fn test_closed_store_is_unavailable() {
    let db = create_test_database().await;
    let key = QueryKey::new("eggs", 1).unwrap();
    db.close().await;

    let err = db.lookup(&key).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StoreUnavailable);
}
