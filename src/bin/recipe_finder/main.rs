// ABOUTME: recipe-finder CLI - find recipes for an ingredient list with a local result cache
// ABOUTME: Parses flags, loads configuration, runs one cached search, and prints the recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # First run fetches from Spoonacular and caches the answer
//! SPOONACULAR_API_KEY=... recipe-finder --ingredients eggs,pasta,tomatoes --numberOfRecipes 2
//!
//! # Same ingredients in any order are answered from the cache
//! recipe-finder --ingredients tomatoes,eggs,pasta --numberOfRecipes 2
//!
//! # Use another store and show debug logs on stderr
//! recipe-finder --ingredients rice --database-url sqlite:/tmp/recipes.db -v
//! ```

mod helpers;

use clap::Parser;
use recipe_finder::config::{DatabaseUrl, RecipeFinderConfig};
use recipe_finder::constants::defaults;
use recipe_finder::errors::AppResult;
use recipe_finder::logging::LoggingConfig;
use recipe_finder::models::normalize_ingredients;
use recipe_finder::services::RecipeFinder;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "recipe-finder",
    about = "Find recipes for the ingredients you have",
    long_about = "Searches recipes by ingredient list, reports used and missing ingredients plus \
                  nutrition, and caches every answer in a local SQLite database."
)]
struct Cli {
    /// Comma-separated ingredient list (order does not matter)
    #[arg(long)]
    ingredients: String,

    /// Maximum number of recipes to return
    #[arg(
        long = "numberOfRecipes",
        alias = "number-of-recipes",
        default_value_t = defaults::RESULT_COUNT
    )]
    number_of_recipes: u32,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Spoonacular API key override
    #[arg(long)]
    api_key: Option<String>,

    /// Spoonacular base URL override
    #[arg(long)]
    api_base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.verbose();
    }
    if let Err(e) = logging.init() {
        eprintln!("Warning: could not initialize logging: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, phase = ?e.phase, "Recipe search failed");
            eprintln!("Error: {e}");
            ExitCode::from(u8::try_from(e.code.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // Echoed before validation so failed runs still show what was searched
    println!(
        "{}",
        helpers::display::SearchHeader {
            ingredient_text: &normalize_ingredients(&cli.ingredients),
            result_count: cli.number_of_recipes,
        }
    );

    let mut config = RecipeFinderConfig::from_env_with_api_key(cli.api_key)?;
    if let Some(url) = cli.database_url.as_deref() {
        config.store_connection = DatabaseUrl::parse_url(url)?;
    }
    if let Some(base_url) = cli.api_base_url.as_deref() {
        config = config.with_api_base_url(base_url);
    }
    info!(?config, "Starting recipe search");

    let finder = RecipeFinder::from_config(&config).await?;
    let outcome = finder
        .find_recipes(&cli.ingredients, cli.number_of_recipes)
        .await;
    finder.database().close().await;

    helpers::display::display_outcome(&outcome?);
    Ok(())
}
