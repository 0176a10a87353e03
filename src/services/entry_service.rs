use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::models::entry::{CreateEntryRequest, Entry};
use crate::models::filters::DateRange;
use crate::repositories::entry_repository::EntryRepository;
use crate::repositories::RepositoryError;

/// Entry service errors
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("Invalid amount: amount must be a finite number")]
    InvalidAmount,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RepositoryError> for EntryError {
    fn from(e: RepositoryError) -> Self {
        EntryError::DatabaseError(e.to_string())
    }
}

/// Trait defining entry operations for one direction of money flow. The
/// incoming and outgoing services share this contract over distinct storage.
#[async_trait]
pub trait EntryService: Send + Sync {
    /// Record a new entry for a user, stamped with the current server time
    async fn add_entry(
        &self,
        user_id: i64,
        request: CreateEntryRequest,
    ) -> Result<Entry, EntryError>;

    /// List a user's entries, optionally bounded by an inclusive date range,
    /// ordered ascending by date then id
    async fn list_entries(&self, user_id: i64, range: DateRange)
        -> Result<Vec<Entry>, EntryError>;
}

/// Implementation of EntryService
pub struct EntryServiceImpl {
    entry_repository: Arc<dyn EntryRepository>,
}

impl EntryServiceImpl {
    pub fn new(entry_repository: Arc<dyn EntryRepository>) -> Self {
        Self { entry_repository }
    }
}

#[async_trait]
impl EntryService for EntryServiceImpl {
    async fn add_entry(
        &self,
        user_id: i64,
        request: CreateEntryRequest,
    ) -> Result<Entry, EntryError> {
        // Zero and negative amounts are legitimate; only non-finite values
        // are rejected
        if !request.amount.is_finite() {
            return Err(EntryError::InvalidAmount);
        }

        // The entry date is the server clock, never client input
        let entry = self
            .entry_repository
            .insert(user_id, request.amount, Utc::now())
            .await?;

        Ok(entry)
    }

    async fn list_entries(
        &self,
        user_id: i64,
        range: DateRange,
    ) -> Result<Vec<Entry>, EntryError> {
        let entries = self.entry_repository.find_by_user(user_id, &range).await?;
        Ok(entries)
    }
}
