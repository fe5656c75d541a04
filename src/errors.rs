// ABOUTME: Unified error handling re-exported from the recipe-core crate
// ABOUTME: Keeps `crate::errors` paths stable for the server modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! `AppError`, `ErrorCode` and the JSON error body live in `recipe_core`,
//! together with the `sqlx` classification and the axum `IntoResponse`
//! implementation.

pub use recipe_core::errors::*;
