// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitlog-Tracker: Log strength workouts and follow per-body-part progress
//!
//! This crate provides the backend API for parsing free-form workout text,
//! estimating calories burned and aggregating training volume per body part.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::WorkoutStore;
use services::WorkoutService;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn WorkoutStore>,
    pub workout_service: WorkoutService,
}

impl AppState {
    /// Build state around a storage backend.
    pub fn new(config: Config, store: Arc<dyn WorkoutStore>) -> Self {
        Self {
            config,
            workout_service: WorkoutService::new(store.clone()),
            store,
        }
    }
}
