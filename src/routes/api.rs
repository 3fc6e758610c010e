// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{DashboardSummary, DayWorkouts, ProgressInsight, WorkoutSummary};
use crate::time_utils::local_date;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Largest accepted workout text.
const MAX_WORKOUT_TEXT_BYTES: usize = 20 * 1024;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(get_workouts_by_date).post(add_workouts))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/progress", get(get_progress))
}

// ─── Workout Submission ──────────────────────────────────────

#[derive(Deserialize)]
struct AddWorkoutRequest {
    #[serde(default, alias = "workoutString")]
    workout_string: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AddWorkoutResponse {
    pub message: String,
    pub workouts: Vec<WorkoutSummary>,
}

/// Parse a workout text block and record every exercise in it.
async fn add_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<AddWorkoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddWorkoutResponse>)> {
    let Json(body) = payload?;
    let text = body
        .workout_string
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Workout string is missing".to_string()))?;

    if text.len() > MAX_WORKOUT_TEXT_BYTES {
        return Err(AppError::BadRequest(format!(
            "Workout string exceeds {} bytes",
            MAX_WORKOUT_TEXT_BYTES
        )));
    }

    tracing::debug!(user_id = %user.user_id, bytes = text.len(), "Workout submission");

    let records = state.workout_service.submit(&user.user_id, &text).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddWorkoutResponse {
            message: "Workouts added and progress updated successfully".to_string(),
            workouts: records.iter().map(WorkoutSummary::from).collect(),
        }),
    ))
}

// ─── Workouts By Date ────────────────────────────────────────

#[derive(Deserialize)]
struct WorkoutsQuery {
    /// Local calendar date (YYYY-MM-DD); defaults to today
    date: Option<String>,
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest("Invalid 'date' parameter: must be YYYY-MM-DD".to_string())
        }),
        None => Ok(local_date(Utc::now())),
    }
}

/// Get the user's workouts for one day.
async fn get_workouts_by_date(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<WorkoutsQuery>,
) -> Result<Json<DayWorkouts>> {
    let day = parse_date(params.date.as_deref())?;

    let workouts = state.workout_service.workouts_on(&user.user_id, day).await?;
    let total_calories_burned = workouts.iter().map(|w| w.calories_burned).sum();

    Ok(Json(DayWorkouts {
        date: day.format("%Y-%m-%d").to_string(),
        workouts: workouts.iter().map(WorkoutSummary::from).collect(),
        total_calories_burned,
    }))
}

// ─── Dashboard ───────────────────────────────────────────────

/// Get today's totals, the weekly calorie chart and streaks.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardSummary>> {
    let today = local_date(Utc::now());
    let summary = state.workout_service.dashboard(&user.user_id, today).await?;
    Ok(Json(summary))
}

// ─── Progress ────────────────────────────────────────────────

/// Get progress insights for every body part.
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ProgressInsight>>> {
    let insights = state.workout_service.progress_insights(&user.user_id).await?;
    Ok(Json(insights))
}
