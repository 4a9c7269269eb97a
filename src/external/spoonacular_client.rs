// ABOUTME: Spoonacular API client for ingredient-based recipe search and bulk nutrition
// ABOUTME: Decodes findByIngredients and informationBulk responses into recipe models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Spoonacular API Client
//!
//! Two endpoints are used:
//! - `GET /recipes/findByIngredients` with `ranking=2`, which orders results to
//!   minimize missing ingredients;
//! - `GET /recipes/informationBulk` with `includeNutrition=true`, which reports
//!   servings and per-serving nutrients for a comma-separated id list.
//!
//! # Example
//! ```rust,no_run
//! use recipe_finder::config::{DatabaseUrl, RecipeFinderConfig};
//! use recipe_finder::external::{RecipeSource, SpoonacularClient};
//! use recipe_finder::models::QueryKey;
//!
//! # async fn example() -> recipe_finder::errors::AppResult<()> {
//! let config = RecipeFinderConfig::new(DatabaseUrl::Memory, "your_api_key");
//! let client = SpoonacularClient::new(&config);
//! let key = QueryKey::new("eggs,pasta,tomatoes", 2)?;
//! let recipes = client.search_by_ingredients(&key).await?;
//! # Ok(())
//! # }
//! ```

use super::RecipeSource;
use crate::config::RecipeFinderConfig;
use crate::constants::service;
use crate::errors::{AppError, AppResult};
use crate::models::{
    IngredientRef, NamedNutrient, NutritionSummary, QueryKey, Recipe, RecipeNutrition,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoundRecipe {
    id: i64,
    title: String,
    #[serde(default)]
    used_ingredients: Vec<FoundIngredient>,
    #[serde(default)]
    missed_ingredients: Vec<FoundIngredient>,
}

#[derive(Debug, Deserialize)]
struct FoundIngredient {
    id: i64,
    name: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    unit: String,
}

impl From<FoundIngredient> for IngredientRef {
    fn from(found: FoundIngredient) -> Self {
        Self {
            external_id: found.id,
            name: found.name,
            amount: found.amount,
            unit: found.unit,
        }
    }
}

impl From<FoundRecipe> for Recipe {
    fn from(found: FoundRecipe) -> Self {
        Self {
            external_id: found.id,
            title: found.title,
            servings: 0,
            used_ingredients: found.used_ingredients.into_iter().map(Into::into).collect(),
            missing_ingredients: found
                .missed_ingredients
                .into_iter()
                .map(Into::into)
                .collect(),
            nutrition: NutritionSummary::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecipeInformation {
    id: i64,
    #[serde(default)]
    servings: u32,
    #[serde(default)]
    nutrition: Option<NutritionBlock>,
}

#[derive(Debug, Deserialize)]
struct NutritionBlock {
    #[serde(default)]
    nutrients: Vec<NamedNutrient>,
}

impl From<RecipeInformation> for RecipeNutrition {
    fn from(info: RecipeInformation) -> Self {
        Self {
            recipe_id: info.id,
            servings: info.servings,
            nutrients: info.nutrition.map(|n| n.nutrients).unwrap_or_default(),
        }
    }
}

/// Spoonacular recipe service client
pub struct SpoonacularClient {
    api_key: String,
    base_url: String,
    http_client: Client,
}

impl SpoonacularClient {
    /// Create a client from the service credentials and fetch deadline in `config`
    #[must_use]
    pub fn new(config: &RecipeFinderConfig) -> Self {
        let http_client = ClientBuilder::new()
            .timeout(config.fetch_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.fetch_timeout))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
            http_client,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::from_fetch_error(service::SPOONACULAR, e))?;

        let response = check_status(response).await?;

        response.json().await.map_err(|e| {
            AppError::fetch(service::SPOONACULAR, format!("JSON parse error: {e}")).with_source(e)
        })
    }
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(AppError::fetch(
        service::SPOONACULAR,
        format!(
            "HTTP {status}: {}",
            response.text().await.unwrap_or_default()
        ),
    ))
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    async fn search_by_ingredients(&self, key: &QueryKey) -> AppResult<Vec<Recipe>> {
        let number = key.result_count().to_string();
        let found: Vec<FoundRecipe> = self
            .get_json(
                "/recipes/findByIngredients",
                &[
                    ("ingredients", key.ingredient_text()),
                    ("number", number.as_str()),
                    ("ranking", service::MINIMIZE_MISSING_RANKING),
                ],
            )
            .await?;

        debug!(key = %key, recipes = found.len(), "Recipe search returned");
        Ok(found.into_iter().map(Recipe::from).collect())
    }

    async fn fetch_nutrition(&self, recipe_ids: &[i64]) -> AppResult<Vec<RecipeNutrition>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = join_ids(recipe_ids);
        let info: Vec<RecipeInformation> = self
            .get_json(
                "/recipes/informationBulk",
                &[("ids", ids.as_str()), ("includeNutrition", "true")],
            )
            .await?;

        debug!(requested = recipe_ids.len(), returned = info.len(), "Nutrition fetch returned");
        Ok(info.into_iter().map(RecipeNutrition::from).collect())
    }
}
