// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout ingestion and read-side service.
//!
//! Handles the core workflow:
//! 1. Parse the submitted text (the whole submission is validated first)
//! 2. Annotate each exercise with its calorie estimate
//! 3. Store each workout and fold it into its body-part progress record,
//!    one atomic store operation per workout, in source order

use chrono::{NaiveDate, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::db::WorkoutStore;
use crate::error::{AppError, Result};
use crate::models::{DashboardSummary, ProgressInsight, WorkoutRecord};
use crate::services::dashboard::{build_dashboard, WEEK_DAYS};
use crate::services::parser::parse_workouts;
use crate::time_utils::{local_date, local_day_bounds};

/// Entry point for workout submissions and the views derived from them.
#[derive(Clone)]
pub struct WorkoutService {
    store: Arc<dyn WorkoutStore>,
}

impl WorkoutService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Parse and record a workout submission for `user_id`.
    ///
    /// Nothing is stored unless the entire text parses. Each workout is then
    /// recorded atomically with its progress update; if the store fails part
    /// way through, workouts already recorded stay recorded.
    ///
    /// Submitting the same text twice records it twice.
    pub async fn submit(&self, user_id: &str, text: &str) -> Result<Vec<WorkoutRecord>> {
        let parsed = parse_workouts(text).inspect_err(|e| {
            tracing::info!(user_id, error = %e, "Rejected workout submission");
        })?;

        let now = Utc::now();
        let records: Vec<WorkoutRecord> = parsed
            .into_iter()
            .map(|p| WorkoutRecord::from_parsed(user_id, p, now))
            .collect();

        for (index, record) in records.iter().enumerate() {
            if let Err(e) = self.store.record_workout(record).await {
                tracing::error!(
                    user_id,
                    recorded = index,
                    remaining = records.len() - index,
                    error = %e,
                    "Workout submission failed part way"
                );
                return Err(e);
            }
        }

        tracing::info!(user_id, count = records.len(), "Workouts recorded");
        Ok(records)
    }

    /// Workouts created on a local calendar day.
    pub async fn workouts_on(&self, user_id: &str, day: NaiveDate) -> Result<Vec<WorkoutRecord>> {
        let (start, end) = local_day_bounds(day);
        self.store.get_workouts_between(user_id, start, end).await
    }

    /// Dashboard rollups for `today`.
    pub async fn dashboard(&self, user_id: &str, today: NaiveDate) -> Result<DashboardSummary> {
        let week_start = today - chrono::Duration::days(i64::from(WEEK_DAYS) - 1);
        let (start, _) = local_day_bounds(week_start);
        let (_, end) = local_day_bounds(today);

        let recent = self.store.get_workouts_between(user_id, start, end).await?;
        let workout_days: BTreeSet<NaiveDate> = self
            .store
            .get_workouts_for_user(user_id)
            .await?
            .iter()
            .map(|w| local_date(w.created_at))
            .collect();

        Ok(build_dashboard(&recent, &workout_days, today))
    }

    /// Progress insights for every body part the user has trained.
    pub async fn progress_insights(&self, user_id: &str) -> Result<Vec<ProgressInsight>> {
        let records = self.store.get_progress_for_user(user_id).await?;
        if records.is_empty() {
            return Err(AppError::NotFound(
                "No progress data found for this user.".to_string(),
            ));
        }

        Ok(records.iter().map(ProgressInsight::from).collect())
    }
}
