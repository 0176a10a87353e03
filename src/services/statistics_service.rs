use async_trait::async_trait;
use std::sync::Arc;

use crate::models::statistics::Statistics;
use crate::repositories::entry_repository::EntryRepository;
use crate::repositories::RepositoryError;

/// Statistics service errors
#[derive(Debug, thiserror::Error)]
pub enum StatisticsError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RepositoryError> for StatisticsError {
    fn from(e: RepositoryError) -> Self {
        StatisticsError::DatabaseError(e.to_string())
    }
}

/// Trait defining the statistics operations
#[async_trait]
pub trait StatisticsService: Send + Sync {
    /// Sum a user's incoming and outgoing entries over all time and compute
    /// the net difference. Recomputed from the store on every call.
    async fn get_statistics(&self, user_id: i64) -> Result<Statistics, StatisticsError>;
}

/// Implementation of StatisticsService over the two entry stores
pub struct StatisticsServiceImpl {
    incoming_repository: Arc<dyn EntryRepository>,
    outgoing_repository: Arc<dyn EntryRepository>,
}

impl StatisticsServiceImpl {
    pub fn new(
        incoming_repository: Arc<dyn EntryRepository>,
        outgoing_repository: Arc<dyn EntryRepository>,
    ) -> Self {
        Self {
            incoming_repository,
            outgoing_repository,
        }
    }
}

#[async_trait]
impl StatisticsService for StatisticsServiceImpl {
    async fn get_statistics(&self, user_id: i64) -> Result<Statistics, StatisticsError> {
        let incoming_total = self.incoming_repository.total(user_id).await?;
        let outgoing_total = self.outgoing_repository.total(user_id).await?;

        Ok(Statistics {
            incoming_total,
            outgoing_total,
            net: incoming_total - outgoing_total,
        })
    }
}
