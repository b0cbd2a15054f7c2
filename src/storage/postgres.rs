//! src/storage/postgres.rs
use crate::domain::ContactSubmission;
use crate::storage::{ContactStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Writes into the `contacts` table. Values are always bound, never interpolated.
#[derive(Debug, Clone)]
pub struct PostgresContactStore {
    pool: PgPool,
}

impl PostgresContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PostgresContactStore {
    #[tracing::instrument(
        name = "Saving new contact submission in the database",
        skip(self, submission)
    )]
    async fn insert(&self, submission: &ContactSubmission) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
    INSERT INTO contacts (id, name, email, subject, message, received_at)
    VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(submission.name())
        .bind(submission.email())
        .bind(submission.subject())
        .bind(submission.message())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:#?}", e);
            e
        })?;

        Ok(id)
    }
}
