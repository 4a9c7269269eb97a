// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging init, in-memory cache stores, and a scripted recipe source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `recipe_finder`

use async_trait::async_trait;
use recipe_finder::database::CacheDatabase;
use recipe_finder::errors::{AppError, AppResult};
use recipe_finder::external::RecipeSource;
use recipe_finder::models::{
    IngredientRef, NamedNutrient, NutritionSummary, QueryKey, Recipe, RecipeNutrition,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> CacheDatabase {
    init_test_logging();
    CacheDatabase::in_memory()
        .await
        .expect("in-memory cache store should open")
}

pub fn ingredient(external_id: i64, name: &str, amount: f64, unit: &str) -> IngredientRef {
    IngredientRef {
        external_id,
        name: name.to_owned(),
        amount,
        unit: unit.to_owned(),
    }
}

pub fn nutrient(name: &str, amount: f64, unit: &str) -> NamedNutrient {
    NamedNutrient {
        name: name.to_owned(),
        amount,
        unit: unit.to_owned(),
    }
}

/// Recipe with 2 used, 1 missing ingredient and all three nutrients (empty units)
pub fn tomato_pasta() -> Recipe {
    let mut recipe = Recipe {
        external_id: 641_803,
        title: "Easy Tomato Pasta".to_owned(),
        servings: 0,
        used_ingredients: vec![
            ingredient(20_420, "pasta", 8.0, "oz"),
            ingredient(11_529, "tomatoes", 2.0, ""),
        ],
        missing_ingredients: vec![ingredient(4053, "olive oil", 2.0, "tbsp")],
        nutrition: NutritionSummary::default(),
    };
    recipe.apply_nutrition(&RecipeNutrition {
        recipe_id: 641_803,
        servings: 4,
        nutrients: vec![
            nutrient("Calories", 500.0, ""),
            nutrient("Carbohydrates", 40.0, ""),
            nutrient("Protein", 20.0, ""),
        ],
    });
    recipe
}

pub fn scrambled_eggs() -> Recipe {
    let mut recipe = Recipe {
        external_id: 715_381,
        title: "Scrambled Eggs".to_owned(),
        servings: 0,
        used_ingredients: vec![ingredient(1123, "eggs", 3.0, "")],
        missing_ingredients: Vec::new(),
        nutrition: NutritionSummary::default(),
    };
    recipe.apply_nutrition(&RecipeNutrition {
        recipe_id: 715_381,
        servings: 1,
        nutrients: vec![nutrient("Calories", 210.5, "kcal"), nutrient("Fiber", 0.0, "g")],
    });
    recipe
}

/// Scripted `RecipeSource` counting calls, with optional latency and failure
pub struct FakeRecipeSource {
    recipes: Vec<Recipe>,
    delay: Option<Duration>,
    fail_search: bool,
    search_calls: AtomicUsize,
    nutrition_calls: AtomicUsize,
}

impl FakeRecipeSource {
    /// Answers every search with `recipes` (nutrition is served separately by id)
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            delay: None,
            fail_search: false,
            search_calls: AtomicUsize::new(0),
            nutrition_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn nutrition_calls(&self) -> usize {
        self.nutrition_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeSource for FakeRecipeSource {
    async fn search_by_ingredients(&self, key: &QueryKey) -> AppResult<Vec<Recipe>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_search {
            return Err(AppError::fetch("Fake recipe service", "HTTP 402: quota exceeded"));
        }

        let limit = key.result_count() as usize;
        Ok(self
            .recipes
            .iter()
            .take(limit)
            .map(|r| Recipe {
                servings: 0,
                nutrition: NutritionSummary::default(),
                ..r.clone()
            })
            .collect())
    }

    async fn fetch_nutrition(&self, recipe_ids: &[i64]) -> AppResult<Vec<RecipeNutrition>> {
        self.nutrition_calls.fetch_add(1, Ordering::SeqCst);

        // Reverse order so callers must match by id rather than position;
        // every answer also reports an unrecognized nutrient
        Ok(self
            .recipes
            .iter()
            .rev()
            .filter(|r| recipe_ids.contains(&r.external_id))
            .map(|r| RecipeNutrition {
                recipe_id: r.external_id,
                servings: r.servings,
                nutrients: r
                    .nutrition
                    .facts()
                    .map(|f| nutrient(f.name(), f.amount, &f.unit))
                    .chain(std::iter::once(nutrient("Fiber", 3.5, "g")))
                    .collect(),
            })
            .collect())
    }
}
