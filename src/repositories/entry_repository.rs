use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::entry::Entry;
use crate::models::filters::DateRange;
use crate::repositories::RepositoryError;

/// The two entry tables. SQL statements only ever interpolate table names
/// taken from this enum, never request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTable {
    Incoming,
    Outgoing,
}

impl EntryTable {
    fn name(self) -> &'static str {
        match self {
            EntryTable::Incoming => "incoming_entries",
            EntryTable::Outgoing => "outgoing_entries",
        }
    }
}

/// Trait defining entry storage operations for one table
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Persist a new entry and return it with its assigned id
    async fn insert(
        &self,
        user_id: i64,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Result<Entry, RepositoryError>;

    /// Fetch a user's entries within the optional date bounds, ordered
    /// ascending by date then id
    async fn find_by_user(
        &self,
        user_id: i64,
        range: &DateRange,
    ) -> Result<Vec<Entry>, RepositoryError>;

    /// Sum of all entry amounts for a user, 0 when there are none
    async fn total(&self, user_id: i64) -> Result<f64, RepositoryError>;
}

/// SQLite implementation of EntryRepository, bound to one entry table
pub struct SqliteEntryRepository {
    pool: SqlitePool,
    table: EntryTable,
}

impl SqliteEntryRepository {
    pub fn new(pool: SqlitePool, table: EntryTable) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl EntryRepository for SqliteEntryRepository {
    async fn insert(
        &self,
        user_id: i64,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Result<Entry, RepositoryError> {
        let sql = format!(
            "INSERT INTO {} (user_id, amount, date) VALUES (?, ?, ?) \
             RETURNING id, user_id, amount, date",
            self.table.name()
        );

        sqlx::query_as::<_, Entry>(&sql)
            .bind(user_id)
            .bind(amount)
            .bind(date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn find_by_user(
        &self,
        user_id: i64,
        range: &DateRange,
    ) -> Result<Vec<Entry>, RepositoryError> {
        let mut sql = format!(
            "SELECT id, user_id, amount, date FROM {} WHERE user_id = ?",
            self.table.name()
        );
        if range.start_bound().is_some() {
            sql.push_str(" AND date >= ?");
        }
        if range.end_bound_exclusive().is_some() {
            sql.push_str(" AND date < ?");
        }
        sql.push_str(" ORDER BY date ASC, id ASC");

        let mut query = sqlx::query_as::<_, Entry>(&sql).bind(user_id);
        if let Some(start) = range.start_bound() {
            query = query.bind(start);
        }
        if let Some(end) = range.end_bound_exclusive() {
            query = query.bind(end);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn total(&self, user_id: i64) -> Result<f64, RepositoryError> {
        let sql = format!(
            "SELECT COALESCE(SUM(amount), 0.0) FROM {} WHERE user_id = ?",
            self.table.name()
        );

        sqlx::query_scalar::<_, f64>(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}
