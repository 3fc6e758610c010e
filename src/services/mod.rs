// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod calories;
pub mod dashboard;
pub mod parser;
pub mod workout;

pub use calories::calories_burned;
pub use parser::{parse_workouts, WorkoutParseError};
pub use workout::WorkoutService;
