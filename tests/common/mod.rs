// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitlog_tracker::config::Config;
use fitlog_tracker::db::{FirestoreDb, MemoryStore, WorkoutStore};
use fitlog_tracker::middleware::auth::create_jwt;
use fitlog_tracker::routes::create_router;
use fitlog_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by the given store.
#[allow(dead_code)]
pub fn create_test_app_with(store: Arc<dyn WorkoutStore>) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(), store));
    (create_router(state.clone()), state)
}

/// Create a test app backed by a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Arc::new(MemoryStore::new()))
}

/// Create a test app whose store is an offline Firestore client.
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Arc::new(FirestoreDb::new_mock()))
}

/// Mint a session token for `user_id`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

/// Generate a unique user ID for test isolation.
#[allow(dead_code)]
pub fn unique_user_id() -> String {
    format!("test-user-{}", uuid::Uuid::new_v4())
}
