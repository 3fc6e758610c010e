// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only dashboard rollups over stored workouts.
//!
//! Everything here is computed on demand from workout records; nothing is
//! persisted.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{CategorySlice, DashboardSummary, WeeklyCalories, WorkoutRecord};
use crate::time_utils::local_date;

/// Number of days shown in the weekly calorie chart (including today).
pub const WEEK_DAYS: u32 = 7;

/// Build the dashboard for `today`.
///
/// `recent` must cover at least the last [`WEEK_DAYS`] local days; `workout_days`
/// is every local day on which the user logged a workout.
pub fn build_dashboard(
    recent: &[WorkoutRecord],
    workout_days: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> DashboardSummary {
    let todays: Vec<&WorkoutRecord> = recent
        .iter()
        .filter(|w| local_date(w.created_at) == today)
        .collect();

    let total_calories_burned: f64 = todays.iter().map(|w| w.calories_burned).sum();
    let total_active_minutes: f64 = todays.iter().map(|w| w.duration_min).sum();
    let total_workouts = todays.len() as u32;
    let avg_calories_per_workout = if total_workouts > 0 {
        total_calories_burned / f64::from(total_workouts)
    } else {
        0.0
    };

    let (current_streak_days, longest_streak_days) = streaks(workout_days, today);

    DashboardSummary {
        total_calories_burned,
        total_workouts,
        avg_calories_per_workout,
        total_active_minutes,
        weekly_calories: weekly_calories(recent, today),
        category_breakdown: category_breakdown(&todays),
        current_streak_days,
        longest_streak_days,
    }
}

/// Calories per local day for the week ending `today`, oldest first.
pub fn weekly_calories(workouts: &[WorkoutRecord], today: NaiveDate) -> WeeklyCalories {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for workout in workouts {
        *by_day.entry(local_date(workout.created_at)).or_insert(0.0) += workout.calories_burned;
    }

    let mut days = Vec::with_capacity(WEEK_DAYS as usize);
    let mut calories_burned = Vec::with_capacity(WEEK_DAYS as usize);
    for offset in (0..i64::from(WEEK_DAYS)).rev() {
        let day = today - chrono::Duration::days(offset);
        days.push(day.format("%a").to_string());
        calories_burned.push(by_day.get(&day).copied().unwrap_or(0.0));
    }

    WeeklyCalories {
        days,
        calories_burned,
    }
}

/// Calories per body part, sorted by label.
pub fn category_breakdown(workouts: &[&WorkoutRecord]) -> Vec<CategorySlice> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for workout in workouts {
        *by_category.entry(workout.category.as_str()).or_insert(0.0) += workout.calories_burned;
    }

    by_category
        .into_iter()
        .enumerate()
        .map(|(id, (label, value))| CategorySlice {
            id: id as u32,
            value,
            label: label.to_string(),
        })
        .collect()
}

/// Current and longest runs of consecutive workout days.
///
/// The current streak ends today, or yesterday if nothing has been logged
/// yet today.
pub fn streaks(workout_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> (u32, u32) {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &day in workout_days.iter().filter(|&&d| d <= today) {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }

    let anchor = if workout_days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|d| workout_days.contains(d))
    };

    let mut current = 0;
    let mut cursor = anchor;
    while let Some(day) = cursor.filter(|d| workout_days.contains(d)) {
        current += 1;
        cursor = day.pred_opt();
    }

    (current, longest)
}
