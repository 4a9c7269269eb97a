// ABOUTME: Recipe graph models re-exported from recipe-core
// ABOUTME: QueryKey, Recipe, IngredientRef, and nutrition summary types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_core::models::*;
