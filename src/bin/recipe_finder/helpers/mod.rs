// ABOUTME: Re-exports helper modules for recipe-finder
// ABOUTME: Provides terminal display formatting for search results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
