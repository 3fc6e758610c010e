// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Dashboard response models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::WorkoutSummary;

/// Rollups for the current day plus the trailing week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardSummary {
    pub total_calories_burned: f64,
    pub total_workouts: u32,
    pub avg_calories_per_workout: f64,
    pub total_active_minutes: f64,
    pub weekly_calories: WeeklyCalories,
    /// Today's calories per body part (pie chart data)
    pub category_breakdown: Vec<CategorySlice>,
    /// Consecutive days with at least one workout, up to today
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
}

/// Calories per day for the last 7 days, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyCalories {
    /// Short weekday names ("Mon", "Tue", ...)
    pub days: Vec<String>,
    pub calories_burned: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategorySlice {
    pub id: u32,
    pub value: f64,
    pub label: String,
}

/// Workouts logged on a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayWorkouts {
    pub date: String,
    pub workouts: Vec<WorkoutSummary>,
    pub total_calories_burned: f64,
}
