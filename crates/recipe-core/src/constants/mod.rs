// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Nutrient names, cache table names, and external service defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Nutrient names recognized by the nutrition fold
pub mod nutrients {
    /// Energy per serving
    pub const CALORIES: &str = "Calories";
    /// Carbohydrates per serving
    pub const CARBOHYDRATES: &str = "Carbohydrates";
    /// Protein per serving
    pub const PROTEIN: &str = "Protein";
}

/// Names of the five cache tables
pub mod tables {
    /// One row per normalized search
    pub const QUERY_KEYS: &str = "query_keys";
    /// Recipes owned by a search
    pub const RECIPES: &str = "recipes";
    /// Ingredients a recipe uses from the search
    pub const USED_INGREDIENTS: &str = "used_ingredients";
    /// Ingredients a recipe needs beyond the search
    pub const MISSING_INGREDIENTS: &str = "missing_ingredients";
    /// Retained nutrient amounts per recipe
    pub const NUTRIENTS: &str = "nutrients";
}

/// Recipe service defaults
pub mod service {
    /// Display name used in logs and errors
    pub const SPOONACULAR: &str = "Spoonacular API";
    /// Default API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
    /// Ranking mode 2 minimizes missing ingredients
    pub const MINIMIZE_MISSING_RANKING: &str = "2";
}

/// Configuration defaults
pub mod defaults {
    /// Default cache store location
    pub const DATABASE_URL: &str = "sqlite:./data/recipes.db";
    /// Deadline for one external fetch, in seconds
    pub const FETCH_TIMEOUT_SECS: u64 = 30;
    /// Deadline for one store operation, in seconds
    pub const STORE_TIMEOUT_SECS: u64 = 10;
    /// Connection pool size for file-backed stores
    pub const MAX_CONNECTIONS: u32 = 5;
    /// Result count when the caller does not pass one
    pub const RESULT_COUNT: u32 = 1;
}

/// Environment variable names
pub mod env_vars {
    /// Cache store URL
    pub const DATABASE_URL: &str = "RECIPE_FINDER_DATABASE_URL";
    /// Recipe service API key
    pub const API_KEY: &str = "SPOONACULAR_API_KEY";
    /// Recipe service base URL
    pub const API_BASE_URL: &str = "SPOONACULAR_BASE_URL";
    /// External fetch deadline in seconds
    pub const FETCH_TIMEOUT_SECS: &str = "RECIPE_FETCH_TIMEOUT_SECS";
    /// Store operation deadline in seconds
    pub const STORE_TIMEOUT_SECS: &str = "RECIPE_STORE_TIMEOUT_SECS";
    /// Connection pool size
    pub const MAX_CONNECTIONS: &str = "RECIPE_DB_MAX_CONNECTIONS";
}
