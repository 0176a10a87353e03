use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::user::User;

/// Request payload for user login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "alice",
    "password": "correct horse battery staple"
}))]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A signed bearer token together with its absolute expiry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Response payload for successful registration or login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "username": "alice",
    "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
}))]
pub struct AuthResponse {
    pub id: i64,
    pub username: String,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: &User, token: &AuthToken) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            token: token.token.clone(),
        }
    }
}
