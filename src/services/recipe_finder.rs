// ABOUTME: Cached recipe search orchestrator: normalize, look up, then load or fetch and store
// ABOUTME: Serializes misses per key so one fetch and one write happen per normalized query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Finder
//!
//! Every search walks the same states:
//!
//! ```text
//! Normalizing ──> Deciding ──┬──> Hitting ──> Done (stored graph)
//!                            └──> Missing ──> Done (fetched graph)
//! ```
//!
//! Any failure ends the search with an error tagged by the state it happened
//! in. Nothing is retried, and a failed hit never falls back to the miss path.
//!
//! Concurrent misses on the same key inside one process queue on a per-key
//! gate. The first caller fetches and writes; the others re-check the store
//! once they get the gate and load the entry it committed.

use crate::config::RecipeFinderConfig;
use crate::constants::defaults;
use crate::database::{CacheDatabase, CachedQuery};
use crate::errors::{AppResult, SearchPhase};
use crate::external::{RecipeSource, SpoonacularClient};
use crate::models::{QueryKey, Recipe, RecipeNutrition};
use crate::utils::timeout::with_timeout;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Where the recipes of a search came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOrigin {
    /// Loaded from the relational cache
    Hit,
    /// Fetched from the recipe service and then cached
    Miss,
}

impl CacheOrigin {
    /// Label used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

/// Result of a cached recipe search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Normalized key the search ran under
    pub key: QueryKey,
    /// Whether the answer came from the cache or the recipe service
    pub origin: CacheOrigin,
    /// Fully populated recipes
    pub recipes: Vec<Recipe>,
}

/// Per-key miss gate; the last clone to drop clears the map entry
///
/// Cleanup runs in `Drop`, so a search cancelled while queued or while
/// fetching leaves nothing behind in the map.
struct InFlightGate<'a> {
    map: &'a DashMap<QueryKey, Arc<Mutex<()>>>,
    key: QueryKey,
    lock: Arc<Mutex<()>>,
}

impl<'a> InFlightGate<'a> {
    fn enter(map: &'a DashMap<QueryKey, Arc<Mutex<()>>>, key: QueryKey) -> Self {
        let lock = map.entry(key.clone()).or_default().value().clone();
        Self { map, key, lock }
    }
}

impl Drop for InFlightGate<'_> {
    fn drop(&mut self) {
        // One reference in the map plus ours; queued callers hold more
        self.map
            .remove_if(&self.key, |_, entry| Arc::strong_count(entry) <= 2);
    }
}

/// Recipe search backed by the relational cache
pub struct RecipeFinder {
    database: CacheDatabase,
    source: Arc<dyn RecipeSource>,
    fetch_timeout: Duration,
    store_timeout: Duration,
    in_flight: DashMap<QueryKey, Arc<Mutex<()>>>,
}

impl RecipeFinder {
    /// Create a finder with default deadlines
    #[must_use]
    pub fn new(database: CacheDatabase, source: Arc<dyn RecipeSource>) -> Self {
        Self {
            database,
            source,
            fetch_timeout: Duration::from_secs(defaults::FETCH_TIMEOUT_SECS),
            store_timeout: Duration::from_secs(defaults::STORE_TIMEOUT_SECS),
            in_flight: DashMap::new(),
        }
    }

    /// Open the configured store and talk to Spoonacular with the configured credentials
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` or `ConfigInvalid` if the store cannot be opened.
    pub async fn from_config(config: &RecipeFinderConfig) -> AppResult<Self> {
        let database = CacheDatabase::connect(config).await?;
        let source = Arc::new(SpoonacularClient::new(config));
        Ok(Self::new(database, source).with_timeouts(config.fetch_timeout, config.store_timeout))
    }

    /// Override the external fetch and store operation deadlines
    #[must_use]
    pub fn with_timeouts(mut self, fetch_timeout: Duration, store_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self.store_timeout = store_timeout;
        self
    }

    /// The cache store this finder reads and writes
    #[must_use]
    pub const fn database(&self) -> &CacheDatabase {
        &self.database
    }

    /// Find up to `result_count` recipes for a comma-separated ingredient list
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty list or a zero count. Store, fetch
    /// and deadline errors are returned tagged with the phase they happened in.
    pub async fn find_recipes(
        &self,
        raw_ingredients: &str,
        result_count: u32,
    ) -> AppResult<SearchOutcome> {
        let search_id = Uuid::new_v4();
        let span = info_span!("recipe_search", %search_id, result_count);
        self.search(raw_ingredients, result_count)
            .instrument(span)
            .await
    }

    async fn search(&self, raw_ingredients: &str, result_count: u32) -> AppResult<SearchOutcome> {
        let key = QueryKey::new(raw_ingredients, result_count)
            .map_err(|e| e.in_phase(SearchPhase::Normalize))?;

        if let Some(cached) = self.decide(&key).await? {
            return self.hit(key, &cached).await;
        }
        self.miss(key).await
    }

    async fn decide(&self, key: &QueryKey) -> AppResult<Option<CachedQuery>> {
        with_timeout(self.store_timeout, "cache lookup", self.database.lookup(key))
            .await
            .map_err(|e| e.in_phase(SearchPhase::Decide))
    }

    async fn hit(&self, key: QueryKey, cached: &CachedQuery) -> AppResult<SearchOutcome> {
        let recipes = with_timeout(self.store_timeout, "cache load", self.database.load(cached))
            .await
            .map_err(|e| e.in_phase(SearchPhase::Hit))?;

        info!(
            key = %key,
            origin = CacheOrigin::Hit.as_str(),
            cached_at = %cached.created_at,
            recipes = recipes.len(),
            "Recipe search answered from cache"
        );
        Ok(SearchOutcome {
            key,
            origin: CacheOrigin::Hit,
            recipes,
        })
    }

    async fn miss(&self, key: QueryKey) -> AppResult<SearchOutcome> {
        let gate = InFlightGate::enter(&self.in_flight, key);
        let _permit = gate.lock.lock().await;
        self.miss_exclusive(gate.key.clone()).await
    }

    async fn miss_exclusive(&self, key: QueryKey) -> AppResult<SearchOutcome> {
        // Another caller may have committed this key while we queued
        if let Some(cached) = self.decide(&key).await? {
            debug!(key = %key, "Entry stored by a concurrent search");
            return self.hit(key, &cached).await;
        }

        info!(key = %key, origin = CacheOrigin::Miss.as_str(), "Fetching recipes from service");

        let recipes = self
            .fetch_with_nutrition(&key)
            .await
            .map_err(|e| e.in_phase(SearchPhase::Miss))?;

        let summary = with_timeout(
            self.store_timeout,
            "cache write",
            self.database.store(&key, &recipes),
        )
        .await
        .map_err(|e| e.in_phase(SearchPhase::Miss))?;

        debug!(key = %key, recipes = summary.recipes, "Fetched graph committed");
        Ok(SearchOutcome {
            key,
            origin: CacheOrigin::Miss,
            recipes,
        })
    }

    async fn fetch_with_nutrition(&self, key: &QueryKey) -> AppResult<Vec<Recipe>> {
        let mut recipes = with_timeout(
            self.fetch_timeout,
            "recipe search",
            self.source.search_by_ingredients(key),
        )
        .await?;

        if recipes.is_empty() {
            debug!(key = %key, "Recipe service found nothing; skipping nutrition fetch");
            return Ok(recipes);
        }

        let ids: Vec<i64> = recipes.iter().map(|r| r.external_id).collect();
        let nutrition = with_timeout(
            self.fetch_timeout,
            "nutrition fetch",
            self.source.fetch_nutrition(&ids),
        )
        .await?;

        let by_id: HashMap<i64, &RecipeNutrition> =
            nutrition.iter().map(|n| (n.recipe_id, n)).collect();
        for recipe in &mut recipes {
            match by_id.get(&recipe.external_id) {
                Some(info) => recipe.apply_nutrition(info),
                None => warn!(
                    recipe_id = recipe.external_id,
                    "No nutrition returned for recipe"
                ),
            }
        }

        Ok(recipes)
    }
}
