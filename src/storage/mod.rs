//! src/storage/mod.rs
//!
//! Append-only persistence of accepted contact submissions.
use crate::domain::ContactSubmission;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

mod memory;
pub use memory::InMemoryContactStore;

mod postgres;
pub use postgres::PostgresContactStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to store the contact submission")]
    Database(#[from] sqlx::Error),
}

/// A submission as it was persisted.
#[derive(Debug, Clone)]
pub struct StoredContact {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub submission: ContactSubmission,
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Appends a new record and returns its id. Records are never updated or deleted.
    async fn insert(&self, submission: &ContactSubmission) -> Result<Uuid, StoreError>;
}
