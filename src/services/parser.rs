// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parser for the line-oriented workout text format.
//!
//! ```text
//! #Chest
//! Bench Press; 3 sets 10 reps; 80 kg; 15 min
//! Incline Press; 3 sets 8 reps; 60 kg; 10 min
//! #Back
//! Row; 4 sets 10 reps; 50 kg; 12 min
//! ```
//!
//! A `#` line declares the body part for every exercise line below it, until
//! the next `#` line. Blank lines are ignored. Any malformed line rejects the
//! whole submission.

use crate::models::ParsedWorkout;
use crate::services::calories::calories_burned;

/// Minimum number of `;`-separated fields on an exercise line.
const EXERCISE_FIELDS: usize = 4;

/// Largest accepted sets or reps count on one line.
pub const MAX_COUNT: u32 = 10_000;
/// Largest accepted weight on one line.
pub const MAX_WEIGHT_KG: f64 = 10_000.0;
/// Largest accepted duration on one line (one day).
pub const MAX_DURATION_MIN: f64 = 24.0 * 60.0;

/// Errors from parsing workout text. Line numbers are 1-based positions in the
/// submitted text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkoutParseError {
    #[error("Invalid workout format at line {line}: expected 4 fields separated by ';', found {found}")]
    TooFewFields { line: usize, found: usize },

    #[error("Exercise at line {line} has no body part; add a '#<body part>' line above it")]
    MissingCategory { line: usize },

    #[error("Empty body part at line {line}")]
    EmptyCategory { line: usize },

    #[error("Missing exercise name at line {line}")]
    MissingName { line: usize },

    #[error("Invalid {field} at line {line}: '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Parse a workout submission into exercise records in source order.
///
/// Text with no exercise lines yields an empty list.
pub fn parse_workouts(text: &str) -> Result<Vec<ParsedWorkout>, WorkoutParseError> {
    let (_, workouts) = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .try_fold(
            (None::<String>, Vec::new()),
            |(category, mut workouts), (line_no, line)| {
                if let Some(label) = line.strip_prefix('#') {
                    let label = label.trim();
                    if label.is_empty() {
                        return Err(WorkoutParseError::EmptyCategory { line: line_no });
                    }
                    return Ok((Some(label.to_string()), workouts));
                }

                workouts.push(parse_exercise_line(line_no, line, category.as_deref())?);
                Ok((category, workouts))
            },
        )?;

    Ok(workouts)
}

/// Parse `name; <sets> sets <reps> reps; <weight> kg; <duration> min`.
fn parse_exercise_line(
    line_no: usize,
    line: &str,
    category: Option<&str>,
) -> Result<ParsedWorkout, WorkoutParseError> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() < EXERCISE_FIELDS {
        return Err(WorkoutParseError::TooFewFields {
            line: line_no,
            found: fields.len(),
        });
    }

    let category = category.ok_or(WorkoutParseError::MissingCategory { line: line_no })?;

    let name = fields[0];
    if name.is_empty() {
        return Err(WorkoutParseError::MissingName { line: line_no });
    }

    let (sets, reps) = parse_sets_reps(line_no, fields[1])?;
    let weight_kg = parse_decimal(line_no, "weight", fields[2], "kg", MAX_WEIGHT_KG)?;
    let duration_min = parse_decimal(line_no, "duration", fields[3], "min", MAX_DURATION_MIN)?;

    if duration_min <= 0.0 {
        return Err(invalid(line_no, "duration", fields[3]));
    }
    if !calories_burned(duration_min, weight_kg).is_finite() {
        return Err(invalid(line_no, "duration", fields[3]));
    }

    Ok(ParsedWorkout {
        name: name.to_string(),
        sets,
        reps,
        weight_kg,
        duration_min,
        category: category.to_string(),
    })
}

/// Parse `"<sets> sets <reps> reps"`.
fn parse_sets_reps(line_no: usize, field: &str) -> Result<(u32, u32), WorkoutParseError> {
    let (sets_raw, rest) = field
        .split_once("sets")
        .ok_or_else(|| invalid(line_no, "sets", field))?;
    let reps_raw = rest.split("reps").next().unwrap_or_default();

    let sets = parse_count(line_no, "sets", sets_raw)?;
    let reps = parse_count(line_no, "reps", reps_raw)?;
    Ok((sets, reps))
}

fn parse_count(line_no: usize, field: &'static str, raw: &str) -> Result<u32, WorkoutParseError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_COUNT).contains(&n) => Ok(n),
        _ => Err(invalid(line_no, field, raw)),
    }
}

/// Parse a decimal in `[0, max]`, stripping everything from `unit` onward.
fn parse_decimal(
    line_no: usize,
    field: &'static str,
    raw: &str,
    unit: &str,
    max: f64,
) -> Result<f64, WorkoutParseError> {
    let number = raw.split(unit).next().unwrap_or_default().trim();
    match number.parse::<f64>() {
        Ok(n) if (0.0..=max).contains(&n) => Ok(n),
        _ => Err(invalid(line_no, field, raw)),
    }
}

fn invalid(line_no: usize, field: &'static str, value: &str) -> WorkoutParseError {
    WorkoutParseError::InvalidField {
        line: line_no,
        field,
        value: value.trim().to_string(),
    }
}
