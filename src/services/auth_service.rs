use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::auth::{AuthToken, LoginRequest};
use crate::models::user::{RegisterRequest, User};
use crate::repositories::user_repository::UserRepository;
use crate::repositories::RepositoryError;

/// Hours a token stays valid after issuance; not renewable without
/// re-authentication
const TOKEN_VALIDITY_HOURS: i64 = 24;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: i64,    // expiration timestamp
}

/// Authentication service errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Trait defining authentication operations
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue a token for the fresh session
    async fn register(&self, request: RegisterRequest) -> Result<(User, AuthToken), AuthError>;

    /// Authenticate a user and issue a token
    async fn login(&self, request: LoginRequest) -> Result<(User, AuthToken), AuthError>;

    /// Validate a token and resolve the user it was issued to
    async fn verify_token(&self, token: &str) -> Result<User, AuthError>;
}

/// Implementation of AuthService. The signing secret is injected at
/// construction and lives nowhere else.
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    jwt_secret: String,
}

impl AuthServiceImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        Self {
            user_repository,
            jwt_secret,
        }
    }

    /// Hash a password using bcrypt
    fn hash_password(password: &str) -> Result<String, AuthError> {
        hash(password, DEFAULT_COST)
            .map_err(|e| AuthError::DatabaseError(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against a stored hash
    fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
        verify(password, password_hash)
            .map_err(|e| AuthError::DatabaseError(format!("Password verification failed: {}", e)))
    }

    /// Generate a signed token embedding the user id and an absolute expiry
    fn generate_token(&self, user_id: i64) -> Result<AuthToken, AuthError> {
        let expires_at = Utc::now() + Duration::hours(TOKEN_VALIDITY_HOURS);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::DatabaseError(format!("Token generation failed: {}", e)))?;

        Ok(AuthToken { token, expires_at })
    }

    /// Decode and validate a token, returning the embedded user id
    fn decode_token(&self, token: &str) -> Result<i64, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, request: RegisterRequest) -> Result<(User, AuthToken), AuthError> {
        let password_hash = Self::hash_password(&request.password)?;

        // The UNIQUE constraint on username is the source of truth for
        // duplicates; concurrent registrations cannot both pass it
        let user = self
            .user_repository
            .create(&request.username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => AuthError::DuplicateUsername,
                RepositoryError::DatabaseError(msg) => AuthError::DatabaseError(msg),
                RepositoryError::NotFound => {
                    AuthError::DatabaseError("Unexpected error".to_string())
                }
            })?;

        let token = self.generate_token(user.id)?;
        Ok((user, token))
    }

    async fn login(&self, request: LoginRequest) -> Result<(User, AuthToken), AuthError> {
        // An unknown username and a wrong password are indistinguishable
        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = Self::verify_password(&request.password, &user.password_hash)?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.generate_token(user.id)?;
        Ok((user, token))
    }

    async fn verify_token(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.decode_token(token)?;

        // A token for a user that no longer exists is rejected the same way
        // as a forged one
        self.user_repository
            .find_by_id(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidToken)
    }
}
