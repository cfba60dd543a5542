//! Record Loader — the seam between the analytics engine and application storage.
//!
//! The engine never queries storage directly; it asks a `RecordSource` for the
//! full record set of one user. `AppState` carries an `Arc<dyn RecordSource>`,
//! `PgRecordSource` in production and an in-memory source in tests.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::{ApplicationRecord, ApplicationRow};

#[derive(Debug, Error)]
pub enum RecordSourceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("application {id} is not a valid record: {reason}")]
    InvalidRecord { id: Uuid, reason: String },
}

/// Supplies every application record owned by a user.
///
/// Callers authenticate `user_id` upstream; implementations only filter by it.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load_for_user(&self, user_id: Uuid)
        -> Result<Vec<ApplicationRecord>, RecordSourceError>;
}

/// PostgreSQL-backed record source reading the `applications` table.
pub struct PgRecordSource {
    pool: PgPool,
}

impl PgRecordSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordSource for PgRecordSource {
    async fn load_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ApplicationRecord>, RecordSourceError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, user_id, status, date_applied, updated_at
            FROM applications
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows_to_records(rows)
    }
}

/// Converts storage rows into snapshots, failing on the first invalid row.
pub fn rows_to_records(
    rows: Vec<ApplicationRow>,
) -> Result<Vec<ApplicationRecord>, RecordSourceError> {
    rows.into_iter()
        .map(|row| {
            let id = row.id;
            ApplicationRecord::try_from(row).map_err(|e| RecordSourceError::InvalidRecord {
                id,
                reason: e.to_string(),
            })
        })
        .collect()
}
