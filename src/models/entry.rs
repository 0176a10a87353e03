use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::validate_finite_amount;

/// A single monetary event owned by a user. The same shape backs both the
/// incoming and the outgoing table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Entry {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub amount: f64,
    /// Server-assigned creation timestamp; clients cannot backdate entries
    pub date: DateTime<Utc>,
}

/// Direction of money flow, selecting which table an entry lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Incoming,
    Outgoing,
}

/// Request payload for recording a new entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "amount": 42.50
}))]
pub struct CreateEntryRequest {
    #[validate(custom(function = "validate_finite_amount"))]
    pub amount: f64,
}
