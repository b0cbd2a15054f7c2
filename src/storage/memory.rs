//! src/storage/memory.rs
use crate::domain::ContactSubmission;
use crate::storage::{ContactStore, StoreError, StoredContact};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Keeps submissions in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    records: Mutex<Vec<StoredContact>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<StoredContact> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    #[tracing::instrument(name = "Saving new contact submission in memory", skip(self, submission))]
    async fn insert(&self, submission: &ContactSubmission) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.records.lock().await.push(StoredContact {
            id,
            received_at: Utc::now(),
            submission: submission.clone(),
        });

        Ok(id)
    }
}
