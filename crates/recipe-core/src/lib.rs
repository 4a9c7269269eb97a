// ABOUTME: Core types and constants for the recipe finder query cache
// ABOUTME: Foundation crate with error handling, recipe graph models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types and constants for the recipe finder.
//! It has no I/O of its own; the store and the HTTP client live in the main crate.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the `SearchPhase` an error surfaced in
//! - **models**: the nested recipe graph and the canonical `QueryKey`
//! - **constants**: nutrient names, table names, and configuration defaults

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`QueryKey`, `Recipe`, `IngredientRef`, nutrition)
pub mod models;
