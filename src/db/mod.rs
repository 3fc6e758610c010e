// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Handlers talk to a [`WorkoutStore`]; Firestore backs production and an
//! in-memory store backs local development and tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{ProgressRecord, WorkoutRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Collection names as constants.
pub mod collections {
    /// Append-only workout records
    pub const WORKOUTS: &str = "workouts";
    /// Progress aggregates (keyed by `{user_id}_{body_part}`)
    pub const PROGRESS: &str = "progress";
}

/// Storage operations for workouts and their progress aggregates.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Atomically store a workout and fold it into the user's progress record
    /// for its body part, creating the record if needed.
    ///
    /// The workout's `created_at` is used as the update time. Returns the
    /// progress record as written.
    async fn record_workout(&self, workout: &WorkoutRecord) -> Result<ProgressRecord, AppError>;

    /// Workouts created in `[start, end)`, oldest first.
    async fn get_workouts_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutRecord>, AppError>;

    /// All workouts for a user, oldest first.
    async fn get_workouts_for_user(&self, user_id: &str) -> Result<Vec<WorkoutRecord>, AppError>;

    /// Progress record for one body part.
    async fn get_progress(
        &self,
        user_id: &str,
        body_part: &str,
    ) -> Result<Option<ProgressRecord>, AppError>;

    /// All progress records for a user, ordered by body part.
    async fn get_progress_for_user(&self, user_id: &str) -> Result<Vec<ProgressRecord>, AppError>;
}
