// ABOUTME: External recipe service abstraction and its Spoonacular HTTP client
// ABOUTME: RecipeSource is the seam the orchestrator fetches through on a cache miss
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External Recipe Service
//!
//! A cache miss asks the recipe service twice: once for recipes matching the
//! ingredient list, then once for the nutrition of the recipes found. Both
//! calls go through [`RecipeSource`] so tests can script the service.

pub mod spoonacular_client;

pub use spoonacular_client::SpoonacularClient;

use crate::errors::AppResult;
use crate::models::{QueryKey, Recipe, RecipeNutrition};
use async_trait::async_trait;

/// Recipe search and nutrition lookups against an external service
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Find up to `key.result_count()` recipes using the key's ingredients
    ///
    /// Returned recipes carry used and missing ingredients; servings and
    /// nutrition are left empty.
    ///
    /// # Errors
    ///
    /// Returns `FetchFailure` on transport, status, or decode errors and
    /// `Timeout` if the service does not answer in time.
    async fn search_by_ingredients(&self, key: &QueryKey) -> AppResult<Vec<Recipe>>;

    /// Fetch servings and nutrients for the given recipe ids
    ///
    /// # Errors
    ///
    /// Same as [`RecipeSource::search_by_ingredients`].
    async fn fetch_nutrition(&self, recipe_ids: &[i64]) -> AppResult<Vec<RecipeNutrition>>;
}
