// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod dashboard;
pub mod progress;
pub mod workout;

pub use dashboard::{CategorySlice, DashboardSummary, DayWorkouts, WeeklyCalories};
pub use progress::{ProgressEntry, ProgressInsight, ProgressRecord, ProgressUpdateError};
pub use workout::{ParsedWorkout, WorkoutRecord, WorkoutSummary};
