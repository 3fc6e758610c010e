use criterion::{criterion_group, criterion_main, Criterion};
use fitlog_tracker::services::parse_workouts;
use std::hint::black_box;

const EXERCISES: &[&str] = &[
    "Bench Press; 3 sets 10 reps; 80 kg; 15 min",
    "Incline Press; 4 sets 8 reps; 60.5 kg; 12 min",
    "Row; 3 sets 8 reps; 50 kg; 10 min",
    "Squat; 5 sets 5 reps; 100 kg; 20 min",
];

/// A long session log with a category header every few exercises.
fn session_log(exercise_count: usize) -> String {
    let mut text = String::new();
    for i in 0..exercise_count {
        if i % 4 == 0 {
            text.push_str(&format!("#Group {}\n", i / 4));
        }
        text.push_str(EXERCISES[i % EXERCISES.len()]);
        text.push('\n');
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let short = "#Chest\nBench Press; 3 sets 10 reps; 80 kg; 15 min";
    let long = session_log(400);

    // Error discovered at the very end, after every earlier line was parsed
    let trailing_error = format!("{}Bench Press; 3 sets 10 reps; 80 kg\n", long);

    let mut group = c.benchmark_group("parse_workouts");

    group.bench_function("single_exercise", |b| {
        b.iter(|| parse_workouts(black_box(short)))
    });

    group.bench_function("long_session", |b| {
        b.iter(|| parse_workouts(black_box(&long)))
    });

    group.bench_function("long_session_trailing_error", |b| {
        b.iter(|| parse_workouts(black_box(&trailing_error)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_parse);
criterion_main!(benches);
