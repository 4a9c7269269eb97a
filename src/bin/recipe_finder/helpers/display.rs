// ABOUTME: Output formatting helpers for recipe-finder
// ABOUTME: Renders each recipe as a boxed block with nutrition and ingredient lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_finder::models::{IngredientRef, IngredientUsage, NutrientKind, Recipe};
use recipe_finder::services::{CacheOrigin, SearchOutcome};
use std::fmt;

const BOLD_LINE: &str = "+=================================================+";
const SEPARATING_LINE: &str = "+-------------------------------------------------+";

/// A recipe formatted for the terminal
pub struct RecipeCard<'a>(pub &'a Recipe);

impl fmt::Display for RecipeCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = self.0;
        writeln!(f, "{BOLD_LINE}")?;
        writeln!(f, "+ {}", recipe.title)?;
        writeln!(f, "{SEPARATING_LINE}")?;

        writeln!(f, "+ Recipe servings: {}", recipe.servings)?;
        writeln!(f, "+ Nutrients per serving:")?;
        for kind in [
            NutrientKind::Carbohydrates,
            NutrientKind::Protein,
            NutrientKind::Calories,
        ] {
            match recipe.nutrition.get(kind) {
                Some(fact) => writeln!(f, "+ {} = {:.2}{}", fact.name(), fact.amount, fact.unit)?,
                None => writeln!(f, "+ {} = not reported", kind.as_str())?,
            }
        }

        write_ingredients(f, recipe, IngredientUsage::Used)?;
        write_ingredients(f, recipe, IngredientUsage::Missing)?;

        writeln!(f, "{BOLD_LINE}")
    }
}

fn write_ingredients(
    f: &mut fmt::Formatter<'_>,
    recipe: &Recipe,
    usage: IngredientUsage,
) -> fmt::Result {
    let (heading, empty) = match usage {
        IngredientUsage::Used => ("Used Ingredients:", "Nothing was used!"),
        IngredientUsage::Missing => ("Missing Ingredients:", "Nothing is missing!"),
    };

    writeln!(f, "{SEPARATING_LINE}")?;
    writeln!(f, "+ {heading}")?;

    let ingredients = recipe.ingredients(usage);
    if ingredients.is_empty() {
        return writeln!(f, "+ {empty}");
    }
    for ingredient in ingredients {
        writeln!(f, "+ {}", IngredientLine(ingredient))?;
    }
    Ok(())
}

struct IngredientLine<'a>(&'a IngredientRef);

impl fmt::Display for IngredientLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ingredient = self.0;
        if ingredient.unit.is_empty() {
            write!(f, "{:.2} {}", ingredient.amount, ingredient.name)
        } else {
            write!(
                f,
                "{:.2} {} {}",
                ingredient.amount, ingredient.unit, ingredient.name
            )
        }
    }
}

/// Echo of the normalized request, printed before the search runs
pub struct SearchHeader<'a> {
    pub ingredient_text: &'a str,
    pub result_count: u32,
}

impl fmt::Display for SearchHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ingredients: {}", self.ingredient_text)?;
        writeln!(f, "Recipes number: {}", self.result_count)
    }
}

/// Print the origin line and every recipe
pub fn display_outcome(outcome: &SearchOutcome) {
    match outcome.origin {
        CacheOrigin::Hit => println!("Input already exists in the database\n"),
        CacheOrigin::Miss => println!("Getting information from API\n"),
    }

    if outcome.recipes.is_empty() {
        println!("No recipes found for these ingredients.");
        return;
    }

    for recipe in &outcome.recipes {
        println!("{}", RecipeCard(recipe));
    }
}
