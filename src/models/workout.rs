// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout models for parsing, storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::calories::calories_burned;

/// One exercise line parsed from a submission, before it is owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWorkout {
    /// Exercise name (e.g., "Bench Press")
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Load in kilograms
    pub weight_kg: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Body part declared by the nearest preceding `#` line
    pub category: String,
}

/// Stored workout record in the `workouts` collection.
///
/// Append-only: written once per exercise line of a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Document ID
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Body part (e.g., "Chest")
    pub category: String,
    /// Exercise name
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Load in kilograms
    pub weight_kg: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Estimated energy cost
    pub calories_burned: f64,
    /// When this workout was submitted
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl WorkoutRecord {
    /// Build a record for `user_id` from a parsed line, annotating calories.
    pub fn from_parsed(user_id: &str, parsed: ParsedWorkout, now: DateTime<Utc>) -> Self {
        let calories_burned = calories_burned(parsed.duration_min, parsed.weight_kg);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category: parsed.category,
            name: parsed.name,
            sets: parsed.sets,
            reps: parsed.reps,
            weight_kg: parsed.weight_kg,
            duration_min: parsed.duration_min,
            calories_burned,
            created_at: now,
        }
    }
}

/// Workout as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSummary {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f64,
    pub duration_min: f64,
    pub category: String,
    pub calories_burned: f64,
}

impl From<&WorkoutRecord> for WorkoutSummary {
    fn from(record: &WorkoutRecord) -> Self {
        Self {
            name: record.name.clone(),
            sets: record.sets,
            reps: record.reps,
            weight_kg: record.weight_kg,
            duration_min: record.duration_min,
            category: record.category.clone(),
            calories_burned: record.calories_burned,
        }
    }
}
