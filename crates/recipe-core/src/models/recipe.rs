// ABOUTME: Recipe graph model with used and missing ingredient references
// ABOUTME: Recipe, IngredientRef, and the used/missing IngredientUsage tag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrition::{NutritionSummary, RecipeNutrition};
use serde::{Deserialize, Serialize};

/// Whether an ingredient is already on hand or still needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientUsage {
    /// Ingredient from the user's list that the recipe uses
    Used,
    /// Ingredient the recipe needs that the user did not list
    Missing,
}

impl IngredientUsage {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Used => "used",
            Self::Missing => "missing",
        }
    }
}

/// An ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRef {
    /// Opaque ingredient id from the recipe service
    pub external_id: i64,
    /// Ingredient name
    pub name: String,
    /// Amount required
    pub amount: f64,
    /// Unit of `amount`; empty for countable items
    pub unit: String,
}

/// A recipe with its ingredients and nutrition, as handed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque recipe id from the recipe service
    pub external_id: i64,
    /// Recipe title
    pub title: String,
    /// Servings the recipe yields (0 when unknown)
    pub servings: u32,
    /// Ingredients from the query that the recipe uses
    pub used_ingredients: Vec<IngredientRef>,
    /// Ingredients the recipe needs beyond the query
    pub missing_ingredients: Vec<IngredientRef>,
    /// Calories, carbohydrates and protein per serving
    pub nutrition: NutritionSummary,
}

impl Recipe {
    /// Ingredients carrying the given usage tag
    #[must_use]
    pub fn ingredients(&self, usage: IngredientUsage) -> &[IngredientRef] {
        match usage {
            IngredientUsage::Used => &self.used_ingredients,
            IngredientUsage::Missing => &self.missing_ingredients,
        }
    }

    /// Mutable access to the ingredients carrying the given usage tag
    pub fn ingredients_mut(&mut self, usage: IngredientUsage) -> &mut Vec<IngredientRef> {
        match usage {
            IngredientUsage::Used => &mut self.used_ingredients,
            IngredientUsage::Missing => &mut self.missing_ingredients,
        }
    }

    /// Fill servings and nutrition from a bulk information result
    pub fn apply_nutrition(&mut self, nutrition: &RecipeNutrition) {
        self.servings = nutrition.servings;
        self.nutrition = NutritionSummary::from_named(&nutrition.nutrients);
    }
}
