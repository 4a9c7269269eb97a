// ABOUTME: Core data models for cached recipe searches
// ABOUTME: Re-exports QueryKey, Recipe, IngredientRef, and nutrition summary types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! The nested recipe graph handed to callers: a [`QueryKey`] owns recipes, each
//! [`Recipe`] owns its used and missing [`IngredientRef`]s and a
//! [`NutritionSummary`]. Persistence flattens this graph into five tables and
//! rebuilds it on a cache hit.

mod nutrition;
mod query;
mod recipe;

pub use nutrition::{NamedNutrient, NutrientFact, NutrientKind, NutritionSummary, RecipeNutrition};
pub use query::{normalize_ingredients, QueryKey};
pub use recipe::{IngredientRef, IngredientUsage, Recipe};
