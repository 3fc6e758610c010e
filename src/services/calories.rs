// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calorie estimation for logged workouts.

/// Calories per minute per kilogram lifted.
///
/// A flat domain simplification, not a physiological model. Stored workouts
/// depend on this exact value.
pub const CALORIES_PER_MINUTE_KG: f64 = 5.0;

/// Estimate calories burned: `duration_min * weight_kg * 5`.
pub fn calories_burned(duration_min: f64, weight_kg: f64) -> f64 {
    duration_min * weight_kg * CALORIES_PER_MINUTE_KG
}
