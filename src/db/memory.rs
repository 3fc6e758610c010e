// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for local development and tests.
//!
//! Lock order: a progress entry is always locked before the owner's workout
//! list, never the reverse.

use crate::db::WorkoutStore;
use crate::error::AppError;
use crate::models::progress::progress_doc_id;
use crate::models::{ProgressRecord, WorkoutRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Process-local workout store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    /// Workouts keyed by user ID, in insertion order
    workouts: Arc<DashMap<String, Vec<WorkoutRecord>>>,
    /// Progress records keyed by progress document ID
    progress: Arc<DashMap<String, ProgressRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn append_workout(&self, workout: &WorkoutRecord) {
        self.workouts
            .entry(workout.user_id.clone())
            .or_default()
            .push(workout.clone());
    }
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn record_workout(&self, workout: &WorkoutRecord) -> Result<ProgressRecord, AppError> {
        let progress_id = progress_doc_id(&workout.user_id, &workout.category);

        // The entry guard is held across the merge and the workout append.
        let progress = match self.progress.entry(progress_id) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().apply_workout(workout, workout.created_at)?;
                self.append_workout(workout);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let record = ProgressRecord::from_workout(workout, workout.created_at);
                self.append_workout(workout);
                entry.insert(record).clone()
            }
        };

        tracing::debug!(
            user_id = %workout.user_id,
            body_part = %workout.category,
            entries = progress.entries.len(),
            "Workout recorded and progress updated (memory)"
        );

        Ok(progress)
    }

    async fn get_workouts_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutRecord>, AppError> {
        let mut workouts: Vec<WorkoutRecord> = self
            .workouts
            .get(user_id)
            .map(|list| {
                list.iter()
                    .filter(|w| w.created_at >= start && w.created_at < end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        workouts.sort_by_key(|w| w.created_at);
        Ok(workouts)
    }

    async fn get_workouts_for_user(&self, user_id: &str) -> Result<Vec<WorkoutRecord>, AppError> {
        let mut workouts = self
            .workouts
            .get(user_id)
            .map(|list| list.clone())
            .unwrap_or_default();
        workouts.sort_by_key(|w| w.created_at);
        Ok(workouts)
    }

    async fn get_progress(
        &self,
        user_id: &str,
        body_part: &str,
    ) -> Result<Option<ProgressRecord>, AppError> {
        Ok(self
            .progress
            .get(&progress_doc_id(user_id, body_part))
            .map(|record| record.clone()))
    }

    async fn get_progress_for_user(&self, user_id: &str) -> Result<Vec<ProgressRecord>, AppError> {
        let mut records: Vec<ProgressRecord> = self
            .progress
            .iter()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.clone())
            .collect();
        records.sort_by(|a, b| a.body_part.cmp(&b.body_part));
        Ok(records)
    }
}
