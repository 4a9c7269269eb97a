// ABOUTME: Nutrition summary model folding named nutrients into three fixed kinds
// ABOUTME: NutrientKind, NutrientFact, NamedNutrient, NutritionSummary, RecipeNutrition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::nutrients;
use serde::{Deserialize, Serialize};

/// The closed set of nutrients retained per recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutrientKind {
    /// Energy
    Calories,
    /// Total carbohydrates
    Carbohydrates,
    /// Total protein
    Protein,
}

impl NutrientKind {
    /// Every recognized kind, in storage order
    pub const ALL: [Self; 3] = [Self::Calories, Self::Carbohydrates, Self::Protein];

    /// Name used by the recipe service and in the nutrient table
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Calories => nutrients::CALORIES,
            Self::Carbohydrates => nutrients::CARBOHYDRATES,
            Self::Protein => nutrients::PROTEIN,
        }
    }

    /// Parse an exact nutrient name; unrecognized names yield `None`
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            nutrients::CALORIES => Some(Self::Calories),
            nutrients::CARBOHYDRATES => Some(Self::Carbohydrates),
            nutrients::PROTEIN => Some(Self::Protein),
            _ => None,
        }
    }
}

/// A nutrient as reported by the recipe service or stored in a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedNutrient {
    /// Nutrient name (e.g. "Calories", "Fiber")
    pub name: String,
    /// Amount per serving
    pub amount: f64,
    /// Unit (e.g. "kcal", "g")
    #[serde(default)]
    pub unit: String,
}

/// A retained nutrient amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientFact {
    /// Which of the three recognized nutrients this is
    pub kind: NutrientKind,
    /// Amount per serving
    pub amount: f64,
    /// Unit (may be empty)
    pub unit: String,
}

impl NutrientFact {
    /// Nutrient name as stored
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Per-recipe nutrition: one optional slot per recognized kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    /// Calories per serving
    pub calories: Option<NutrientFact>,
    /// Carbohydrates per serving
    pub carbohydrates: Option<NutrientFact>,
    /// Protein per serving
    pub protein: Option<NutrientFact>,
}

impl NutritionSummary {
    /// Fold named nutrients into the three fixed slots
    ///
    /// Unrecognized names are ignored. When a kind appears more than once the
    /// last occurrence wins.
    pub fn from_named<'a, I>(nutrients: I) -> Self
    where
        I: IntoIterator<Item = &'a NamedNutrient>,
    {
        nutrients
            .into_iter()
            .filter_map(|n| {
                NutrientKind::parse(&n.name).map(|kind| NutrientFact {
                    kind,
                    amount: n.amount,
                    unit: n.unit.clone(),
                })
            })
            .fold(Self::default(), Self::with_fact)
    }

    /// Return a copy with `fact` placed in its slot
    #[must_use]
    pub fn with_fact(mut self, fact: NutrientFact) -> Self {
        match fact.kind {
            NutrientKind::Calories => self.calories = Some(fact),
            NutrientKind::Carbohydrates => self.carbohydrates = Some(fact),
            NutrientKind::Protein => self.protein = Some(fact),
        }
        self
    }

    /// Slot for a given kind
    #[must_use]
    pub const fn get(&self, kind: NutrientKind) -> Option<&NutrientFact> {
        match kind {
            NutrientKind::Calories => self.calories.as_ref(),
            NutrientKind::Carbohydrates => self.carbohydrates.as_ref(),
            NutrientKind::Protein => self.protein.as_ref(),
        }
    }

    /// Populated facts in storage order
    pub fn facts(&self) -> impl Iterator<Item = &NutrientFact> {
        NutrientKind::ALL.into_iter().filter_map(|kind| self.get(kind))
    }
}

/// Nutrition data for one recipe as returned by the bulk information call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeNutrition {
    /// External recipe id this data belongs to
    pub recipe_id: i64,
    /// Number of servings the recipe yields
    pub servings: u32,
    /// Every nutrient reported, recognized or not
    pub nutrients: Vec<NamedNutrient>,
}
