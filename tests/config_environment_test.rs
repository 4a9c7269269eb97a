// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates env var parsing, defaults, overrides, and configuration errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use recipe_finder::config::{DatabaseUrl, RecipeFinderConfig};
use recipe_finder::constants::env_vars;
use recipe_finder::errors::ErrorCode;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const ALL_VARS: [&str; 6] = [
    env_vars::DATABASE_URL,
    env_vars::API_KEY,
    env_vars::API_BASE_URL,
    env_vars::FETCH_TIMEOUT_SECS,
    env_vars::STORE_TIMEOUT_SECS,
    env_vars::MAX_CONNECTIONS,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_missing_api_key_is_config_missing() {
    clear_env();

    let err = RecipeFinderConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains(env_vars::API_KEY));
}

#[test]
#[serial]
fn test_blank_api_key_is_config_missing() {
    clear_env();
    env::set_var(env_vars::API_KEY, "   ");

    let err = RecipeFinderConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);

    clear_env();
}

#[test]
#[serial]
fn test_defaults_apply_when_only_key_is_set() {
    clear_env();
    env::set_var(env_vars::API_KEY, "test-key");

    let config = RecipeFinderConfig::from_env().unwrap();
    assert_eq!(config.api_key, "test-key");
    assert_eq!(
        config.store_connection,
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/recipes.db")
        }
    );
    assert_eq!(config.api_base_url, "https://api.spoonacular.com");
    assert_eq!(config.fetch_timeout, Duration::from_secs(30));
    assert_eq!(config.store_timeout, Duration::from_secs(10));
    assert_eq!(config.max_connections, 5);

    clear_env();
}

#[test]
#[serial]
fn test_every_variable_is_honored() {
    clear_env();
    env::set_var(env_vars::API_KEY, "test-key");
    env::set_var(env_vars::DATABASE_URL, "sqlite::memory:");
    env::set_var(env_vars::API_BASE_URL, "http://localhost:9000/");
    env::set_var(env_vars::FETCH_TIMEOUT_SECS, "3");
    env::set_var(env_vars::STORE_TIMEOUT_SECS, " 2 ");
    env::set_var(env_vars::MAX_CONNECTIONS, "8");

    let config = RecipeFinderConfig::from_env().unwrap();
    assert_eq!(config.store_connection, DatabaseUrl::Memory);
    assert_eq!(config.api_base_url, "http://localhost:9000");
    assert_eq!(config.fetch_timeout, Duration::from_secs(3));
    assert_eq!(config.store_timeout, Duration::from_secs(2));
    assert_eq!(config.max_connections, 8);

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_number_is_config_invalid() {
    clear_env();
    env::set_var(env_vars::API_KEY, "test-key");
    env::set_var(env_vars::FETCH_TIMEOUT_SECS, "soon");

    let err = RecipeFinderConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains(env_vars::FETCH_TIMEOUT_SECS));

    clear_env();
}

#[test]
#[serial]
fn test_unsupported_store_scheme_is_config_invalid() {
    clear_env();
    env::set_var(env_vars::API_KEY, "test-key");
    env::set_var(env_vars::DATABASE_URL, "mysql://localhost/recipes");

    let err = RecipeFinderConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    clear_env();
}

#[test]
#[serial]
fn test_api_key_override_replaces_environment() {
    clear_env();

    let config = RecipeFinderConfig::from_env_with_api_key(Some("cli-key".to_owned())).unwrap();
    assert_eq!(config.api_key, "cli-key");

    env::set_var(env_vars::API_KEY, "env-key");
    let config = RecipeFinderConfig::from_env_with_api_key(Some("cli-key".to_owned())).unwrap();
    assert_eq!(config.api_key, "cli-key");

    clear_env();
}

#[test]
fn test_memory_store_is_pinned_to_one_connection() {
    assert_eq!(DatabaseUrl::Memory.effective_max_connections(10), 1);
    let file = DatabaseUrl::parse_url("./recipes.db").unwrap();
    assert_eq!(file.effective_max_connections(10), 10);
    assert_eq!(file.effective_max_connections(0), 1);
}
