// ABOUTME: System-wide constants re-exported from recipe-core
// ABOUTME: Nutrient names, table names, service defaults, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_core::constants::*;
