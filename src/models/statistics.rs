use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate totals over all of a user's entries, with no date filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "incoming_total": 100.0,
    "outgoing_total": 40.0,
    "net": 60.0
}))]
pub struct Statistics {
    pub incoming_total: f64,
    pub outgoing_total: f64,
    pub net: f64,
}
