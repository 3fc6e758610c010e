// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Workouts (append-only exercise records)
//! - Progress (per-body-part aggregates, updated transactionally)

use crate::db::{collections, WorkoutStore};
use crate::error::AppError;
use crate::models::progress::progress_doc_id;
use crate::models::{ProgressRecord, WorkoutRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use firestore::{FirestoreConsistencySelector, FirestoreQueryDirection, FirestoreTimestamp};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // The emulator accepts any bearer token; hand it an unsigned one.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

#[async_trait]
impl WorkoutStore for FirestoreDb {
    // ─── Atomic Workout Recording ────────────────────────────────

    /// Store the workout and upsert-and-merge its progress record in one
    /// transaction.
    ///
    /// The progress read goes through the transaction, so a concurrent
    /// submission for the same user and body part conflicts at commit instead
    /// of silently overwriting this update.
    async fn record_workout(&self, workout: &WorkoutRecord) -> Result<ProgressRecord, AppError> {
        let client = self.get_client()?;
        let progress_id = progress_doc_id(&workout.user_id, &workout.category);

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // 1. Read the current progress document within the transaction
        let tx_client = client.clone_with_consistency_selector(
            FirestoreConsistencySelector::Transaction(transaction.transaction_id().clone()),
        );
        let current: Option<ProgressRecord> = tx_client
            .fluent()
            .select()
            .by_id_in(collections::PROGRESS)
            .obj()
            .one(&progress_id)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read progress in transaction: {}", e))
            })?;

        // 2. Merge in memory
        let progress = match current {
            Some(mut progress) => match progress.apply_workout(workout, workout.created_at) {
                Ok(()) => progress,
                Err(e) => {
                    if let Err(rollback_err) = transaction.rollback().await {
                        tracing::warn!(error = %rollback_err, "Transaction rollback failed");
                    }
                    return Err(e.into());
                }
            },
            None => ProgressRecord::from_workout(workout, workout.created_at),
        };

        // 3. Add workout write to transaction
        client
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.id)
            .object(workout)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add workout to transaction: {}", e))
            })?;

        // 4. Add progress write to transaction
        client
            .fluent()
            .update()
            .in_col(collections::PROGRESS)
            .document_id(&progress_id)
            .object(&progress)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add progress to transaction: {}", e))
            })?;

        // 5. Commit both writes atomically
        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::debug!(
            user_id = %workout.user_id,
            body_part = %workout.category,
            entries = progress.entries.len(),
            "Workout recorded and progress updated"
        );

        Ok(progress)
    }

    // ─── Workout Queries ─────────────────────────────────────────

    async fn get_workouts_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(|q| {
                q.for_all([
                    q.field("user_id").eq(user_id),
                    q.field("created_at")
                        .greater_than_or_equal(FirestoreTimestamp(start)),
                    q.field("created_at").less_than(FirestoreTimestamp(end)),
                ])
            })
            .order_by([("created_at", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn get_workouts_for_user(&self, user_id: &str) -> Result<Vec<WorkoutRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("created_at", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Progress Queries ────────────────────────────────────────

    async fn get_progress(
        &self,
        user_id: &str,
        body_part: &str,
    ) -> Result<Option<ProgressRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROGRESS)
            .obj()
            .one(&progress_doc_id(user_id, body_part))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn get_progress_for_user(&self, user_id: &str) -> Result<Vec<ProgressRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PROGRESS)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("body_part", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
