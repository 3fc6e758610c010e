// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-body-part progress aggregates.
//!
//! One document per (user, body part), folded forward as workouts arrive so
//! progress views never have to scan the full workout history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutRecord;
use crate::time_utils::{format_utc_rfc3339, same_local_day};

/// Document ID for the progress record of a (user, body part) pair.
///
/// Deterministic so the store itself enforces at most one record per pair.
/// Both parts are percent-encoded, which always escapes the `:` separator,
/// so distinct pairs never share an ID.
pub fn progress_doc_id(user_id: &str, body_part: &str) -> String {
    format!(
        "{}:{}",
        urlencoding::encode(user_id),
        urlencoding::encode(body_part)
    )
}

/// Reasons a workout cannot be folded into a progress record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProgressUpdateError {
    #[error("Progress record for {owner}/{body_part} cannot take a workout from {user_id}/{category}")]
    WrongOwner {
        owner: String,
        body_part: String,
        user_id: String,
        category: String,
    },

    #[error("Progress totals for {body_part} are too large to add to")]
    Overflow { body_part: String },
}

/// One dated data point within a progress time series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressEntry {
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub date: DateTime<Utc>,
    pub weight_kg: f64,
    pub sets: u32,
    pub reps: u32,
    /// Exercise names logged on this day, comma-joined
    #[serde(default)]
    pub exercises: String,
}

/// Running totals for one user and body part.
///
/// Stored in the `progress` collection, keyed by [`progress_doc_id`].
/// Totals always equal the sum of the entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressRecord {
    pub user_id: String,
    pub body_part: String,
    #[serde(default)]
    pub total_weight_kg: f64,
    #[serde(default)]
    pub total_sets: u32,
    #[serde(default)]
    pub total_reps: u32,
    #[serde(default)]
    pub entries: Vec<ProgressEntry>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub latest_date: DateTime<Utc>,
}

impl ProgressRecord {
    /// Seed a new record from the first workout logged for its body part.
    pub fn from_workout(workout: &WorkoutRecord, now: DateTime<Utc>) -> Self {
        Self {
            user_id: workout.user_id.clone(),
            body_part: workout.category.clone(),
            total_weight_kg: workout.weight_kg,
            total_sets: workout.sets,
            total_reps: workout.reps,
            entries: vec![new_entry(workout, now)],
            latest_date: now,
        }
    }

    /// Fold a workout into this record.
    ///
    /// A workout on a local calendar day that already has an entry is merged
    /// into it; otherwise a new entry is appended.
    ///
    /// Not idempotent: applying the same workout twice counts it twice.
    /// Callers must submit each workout at most once.
    ///
    /// The record is left untouched on error.
    pub fn apply_workout(
        &mut self,
        workout: &WorkoutRecord,
        now: DateTime<Utc>,
    ) -> Result<(), ProgressUpdateError> {
        if self.user_id != workout.user_id || self.body_part != workout.category {
            return Err(ProgressUpdateError::WrongOwner {
                owner: self.user_id.clone(),
                body_part: self.body_part.clone(),
                user_id: workout.user_id.clone(),
                category: workout.category.clone(),
            });
        }

        let total_sets = self
            .total_sets
            .checked_add(workout.sets)
            .ok_or_else(|| self.overflow())?;
        let total_reps = self
            .total_reps
            .checked_add(workout.reps)
            .ok_or_else(|| self.overflow())?;
        let total_weight_kg = self.total_weight_kg + workout.weight_kg;
        if !total_weight_kg.is_finite() {
            return Err(self.overflow());
        }

        match self
            .entries
            .iter()
            .position(|entry| same_local_day(entry.date, now))
        {
            Some(index) => {
                let current = &self.entries[index];
                let sets = current
                    .sets
                    .checked_add(workout.sets)
                    .ok_or_else(|| self.overflow())?;
                let reps = current
                    .reps
                    .checked_add(workout.reps)
                    .ok_or_else(|| self.overflow())?;

                let entry = &mut self.entries[index];
                entry.weight_kg += workout.weight_kg;
                entry.sets = sets;
                entry.reps = reps;
                if entry.exercises.is_empty() {
                    entry.exercises = workout.name.clone();
                } else {
                    entry.exercises = format!("{}, {}", entry.exercises, workout.name);
                }
            }
            None => self.entries.push(new_entry(workout, now)),
        }

        self.total_weight_kg = total_weight_kg;
        self.total_sets = total_sets;
        self.total_reps = total_reps;
        self.latest_date = now;
        Ok(())
    }

    fn overflow(&self) -> ProgressUpdateError {
        ProgressUpdateError::Overflow {
            body_part: self.body_part.clone(),
        }
    }
}

fn new_entry(workout: &WorkoutRecord, now: DateTime<Utc>) -> ProgressEntry {
    ProgressEntry {
        date: now,
        weight_kg: workout.weight_kg,
        sets: workout.sets,
        reps: workout.reps,
        exercises: workout.name.clone(),
    }
}

// ─── Read-side Insights ──────────────────────────────────────

/// Progress summary for one body part as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressInsight {
    pub body_part: String,
    pub total_weight_kg: f64,
    pub total_sets: u32,
    pub total_reps: u32,
    pub number_of_entries: u32,
    pub latest_date: String,
    /// Change between the first and latest entry weight, two decimal places
    pub improvement_percentage: f64,
    pub entries: Vec<InsightEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InsightEntry {
    pub date: String,
    pub weight_kg: f64,
    pub sets: u32,
    pub reps: u32,
    pub exercises: String,
}

impl From<&ProgressRecord> for ProgressInsight {
    fn from(record: &ProgressRecord) -> Self {
        let first_weight = record.entries.first().map_or(0.0, |e| e.weight_kg);
        let latest_weight = record.entries.last().map_or(0.0, |e| e.weight_kg);

        Self {
            body_part: record.body_part.clone(),
            total_weight_kg: record.total_weight_kg,
            total_sets: record.total_sets,
            total_reps: record.total_reps,
            number_of_entries: record.entries.len() as u32,
            latest_date: format_utc_rfc3339(record.latest_date),
            improvement_percentage: improvement_percentage(first_weight, latest_weight),
            entries: record
                .entries
                .iter()
                .map(|e| InsightEntry {
                    date: format_utc_rfc3339(e.date),
                    weight_kg: e.weight_kg,
                    sets: e.sets,
                    reps: e.reps,
                    exercises: e.exercises.clone(),
                })
                .collect(),
        }
    }
}

/// Percentage change from `first` to `latest`, rounded to two decimals.
///
/// Returns 0 when `first` is 0.
pub fn improvement_percentage(first: f64, latest: f64) -> f64 {
    if first == 0.0 {
        return 0.0;
    }
    let pct = (latest - first) / first * 100.0;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_workout(name: &str, category: &str, sets: u32, reps: u32, weight: f64) -> WorkoutRecord {
        WorkoutRecord {
            id: format!("w-{}", name),
            user_id: "user-1".to_string(),
            category: category.to_string(),
            name: name.to_string(),
            sets,
            reps,
            weight_kg: weight,
            duration_min: 10.0,
            calories_burned: 10.0 * weight * 5.0,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap()
    }

    fn assert_totals_match_entries(record: &ProgressRecord) {
        let weight: f64 = record.entries.iter().map(|e| e.weight_kg).sum();
        let sets: u32 = record.entries.iter().map(|e| e.sets).sum();
        let reps: u32 = record.entries.iter().map(|e| e.reps).sum();
        assert_eq!(record.total_weight_kg, weight);
        assert_eq!(record.total_sets, sets);
        assert_eq!(record.total_reps, reps);
    }

    #[test]
    fn test_from_workout_seeds_totals() {
        let workout = make_workout("Bench Press", "Chest", 3, 10, 80.0);
        let record = ProgressRecord::from_workout(&workout, at(1, 12, 0));

        assert_eq!(record.body_part, "Chest");
        assert_eq!(record.total_weight_kg, 80.0);
        assert_eq!(record.total_sets, 3);
        assert_eq!(record.total_reps, 10);
        assert_eq!(record.entries.len(), 1);
        assert_eq!(record.entries[0].exercises, "Bench Press");
        assert_eq!(record.latest_date, at(1, 12, 0));
    }

    #[test]
    fn test_same_day_workouts_merge_into_one_entry() {
        let row = make_workout("Row", "Back", 3, 10, 40.0);
        let pulldown = make_workout("Back", "Back", 3, 8, 50.0);

        let mut record = ProgressRecord::from_workout(&row, at(1, 12, 0));
        record.apply_workout(&pulldown, at(1, 12, 30)).unwrap();

        assert_eq!(record.entries.len(), 1);
        let entry = &record.entries[0];
        assert_eq!(entry.sets, 6);
        assert_eq!(entry.reps, 18);
        assert_eq!(entry.weight_kg, 90.0);
        assert_eq!(entry.exercises, "Row, Back");
        assert_eq!(record.latest_date, at(1, 12, 30));
        assert_totals_match_entries(&record);
    }

    #[test]
    fn test_different_day_appends_entry() {
        let first = make_workout("Squat", "Legs", 5, 5, 100.0);
        let second = make_workout("Squat", "Legs", 5, 5, 105.0);

        let mut record = ProgressRecord::from_workout(&first, at(1, 12, 0));
        record.apply_workout(&second, at(2, 12, 0)).unwrap();

        assert_eq!(record.entries.len(), 2);
        assert_eq!(record.entries[1].weight_kg, 105.0);
        assert_eq!(record.total_weight_kg, 205.0);
        assert_totals_match_entries(&record);
    }

    #[test]
    fn test_applying_same_workout_twice_doubles_totals() {
        // Known limitation: aggregation is not idempotent.
        let workout = make_workout("Bench Press", "Chest", 3, 10, 80.0);

        let mut once = ProgressRecord::from_workout(&workout, at(1, 12, 0));
        let mut twice = once.clone();
        twice.apply_workout(&workout, at(1, 12, 0)).unwrap();
        once.latest_date = twice.latest_date;

        assert_eq!(twice.total_weight_kg, 2.0 * once.total_weight_kg);
        assert_eq!(twice.total_sets, 2 * once.total_sets);
        assert_eq!(twice.total_reps, 2 * once.total_reps);
        assert_eq!(twice.entries.len(), 1);
    }

    #[test]
    fn test_doc_id_encodes_body_part() {
        assert_eq!(progress_doc_id("u1", "Chest"), "u1:Chest");
        assert_eq!(progress_doc_id("u1", "Upper Back/Lats"), "u1:Upper%20Back%2FLats");
        assert_eq!(progress_doc_id("auth0|a/b", "Core"), "auth0%7Ca%2Fb:Core");
    }

    #[test]
    fn test_doc_id_distinguishes_underscore_splits() {
        assert_ne!(progress_doc_id("a", "b_c"), progress_doc_id("a_b", "c"));
        assert_ne!(progress_doc_id("a:b", "c"), progress_doc_id("a", "b:c"));
    }

    #[test]
    fn test_workout_from_other_owner_rejected() {
        let mine = make_workout("Row", "Back", 3, 10, 40.0);
        let mut record = ProgressRecord::from_workout(&mine, at(1, 12, 0));
        let before = record.clone();

        let mut other_user = make_workout("Curl", "Back", 1, 1, 5.0);
        other_user.user_id = "user-2".to_string();
        let other_part = make_workout("Curl", "Arms", 1, 1, 5.0);

        for workout in [&other_user, &other_part] {
            let err = record.apply_workout(workout, at(1, 13, 0)).unwrap_err();
            assert!(matches!(err, ProgressUpdateError::WrongOwner { .. }));
        }
        assert_eq!(record, before);
    }

    #[test]
    fn test_count_overflow_rejected_without_changes() {
        let first = make_workout("Row", "Back", u32::MAX, 1, 1.0);
        let mut record = ProgressRecord::from_workout(&first, at(1, 12, 0));
        let before = record.clone();

        // Different day, so only the totals can overflow
        let second = make_workout("Row", "Back", 1, 1, 1.0);
        let err = record.apply_workout(&second, at(2, 12, 0)).unwrap_err();

        assert_eq!(
            err,
            ProgressUpdateError::Overflow {
                body_part: "Back".to_string()
            }
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_weight_overflow_rejected() {
        let first = make_workout("Sled", "Legs", 1, 1, f64::MAX);
        let mut record = ProgressRecord::from_workout(&first, at(1, 12, 0));

        let second = make_workout("Sled", "Legs", 1, 1, f64::MAX);
        assert!(record.apply_workout(&second, at(1, 12, 5)).is_err());
        assert_eq!(record.total_weight_kg, f64::MAX);
        assert_totals_match_entries(&record);
    }

    #[test]
    fn test_improvement_percentage() {
        assert_eq!(improvement_percentage(80.0, 100.0), 25.0);
        assert_eq!(improvement_percentage(100.0, 80.0), -20.0);
        assert_eq!(improvement_percentage(30.0, 40.0), 33.33);
    }

    #[test]
    fn test_improvement_percentage_zero_first_weight() {
        assert_eq!(improvement_percentage(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_insight_from_record() {
        let first = make_workout("Curl", "Arms", 3, 12, 10.0);
        let second = make_workout("Curl", "Arms", 3, 12, 12.0);
        let mut record = ProgressRecord::from_workout(&first, at(1, 12, 0));
        record.apply_workout(&second, at(3, 9, 15)).unwrap();

        let insight = ProgressInsight::from(&record);

        assert_eq!(insight.body_part, "Arms");
        assert_eq!(insight.number_of_entries, 2);
        assert_eq!(insight.improvement_percentage, 20.0);
        assert_eq!(insight.latest_date, "2024-03-03T09:15:00Z");
        assert_eq!(insight.entries[0].date, "2024-03-01T12:00:00Z");
        assert_eq!(insight.total_sets, 6);
    }

    #[test]
    fn test_insight_with_no_entries() {
        let record = ProgressRecord {
            user_id: "u".to_string(),
            body_part: "Core".to_string(),
            total_weight_kg: 0.0,
            total_sets: 0,
            total_reps: 0,
            entries: vec![],
            latest_date: at(1, 0, 0),
        };

        let insight = ProgressInsight::from(&record);
        assert_eq!(insight.number_of_entries, 0);
        assert_eq!(insight.improvement_percentage, 0.0);
    }
}
