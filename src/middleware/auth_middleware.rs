use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::models::user::User;
use crate::services::auth_service::{self, AuthService};

/// Extension type carrying the resolved user through protected requests
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Auth middleware that validates bearer tokens and injects the resolved
/// user into request extensions before any protected handler runs
pub async fn auth_middleware(
    State(auth_service): State<Arc<dyn AuthService>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Extract Authorization header
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    // Parse Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidTokenFormat)?;

    // Validate the token and resolve its user
    let user = auth_service
        .verify_token(token)
        .await
        .map_err(|e| match e {
            auth_service::AuthError::TokenExpired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

    request.extensions_mut().insert(AuthenticatedUser { user });

    // Continue to next handler
    Ok(next.run(request).await)
}

/// Auth middleware errors
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidTokenFormat,
    InvalidToken,
    TokenExpired,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
            AuthError::InvalidTokenFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid authorization header format. Expected: Bearer <token>",
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or malformed token"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token has expired"),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::RegisterRequest;
    use crate::repositories::user_repository::UserRepository;
    use crate::repositories::RepositoryError;
    use crate::services::auth_service::AuthServiceImpl;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use chrono::{Duration, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    // Mock repository for testing
    struct MockUserRepository {
        users: Mutex<HashMap<String, User>>,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(
            &self,
            username: &str,
            password_hash: &str,
        ) -> Result<User, RepositoryError> {
            let mut users = self.users.lock().unwrap();

            if users.contains_key(username) {
                return Err(RepositoryError::ConstraintViolation(
                    "Username already exists".to_string(),
                ));
            }

            let new_user = User {
                id: users.len() as i64 + 1,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            };

            users.insert(new_user.username.clone(), new_user.clone());
            Ok(new_user)
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).cloned())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.id == id).cloned())
        }
    }

    // Test handler that requires authentication
    async fn protected_handler(
        axum::Extension(authenticated): axum::Extension<AuthenticatedUser>,
    ) -> impl IntoResponse {
        Json(json!({
            "user_id": authenticated.user.id,
            "username": authenticated.user.username,
        }))
    }

    fn create_test_app(auth_service: Arc<dyn AuthService>) -> Router {
        Router::new()
            .route("/protected", get(protected_handler))
            .layer(middleware::from_fn_with_state(
                auth_service.clone(),
                auth_middleware,
            ))
            .with_state(auth_service)
    }

    async fn register_test_user(auth_service: &Arc<dyn AuthService>) -> (User, String) {
        let (user, token) = auth_service
            .register(RegisterRequest {
                username: "alice".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        (user, token.token)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_middleware_with_valid_token() {
        let repo = Arc::new(MockUserRepository::new());
        let auth_service: Arc<dyn AuthService> =
            Arc::new(AuthServiceImpl::new(repo, "test_secret".to_string()));

        let (user, token) = register_test_user(&auth_service).await;
        let app = create_test_app(auth_service);

        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["user_id"], user.id);
        assert_eq!(body["username"], "alice");
    }

    #[tokio::test]
    async fn test_middleware_without_token() {
        let repo = Arc::new(MockUserRepository::new());
        let auth_service: Arc<dyn AuthService> =
            Arc::new(AuthServiceImpl::new(repo, "test_secret".to_string()));

        let app = create_test_app(auth_service);

        let request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Missing authorization token"));
    }

    #[tokio::test]
    async fn test_middleware_with_invalid_token() {
        let repo = Arc::new(MockUserRepository::new());
        let auth_service: Arc<dyn AuthService> =
            Arc::new(AuthServiceImpl::new(repo, "test_secret".to_string()));

        let app = create_test_app(auth_service);

        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", "Bearer invalid_token_here")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Invalid or malformed token"));
    }

    #[tokio::test]
    async fn test_middleware_with_malformed_header() {
        let repo = Arc::new(MockUserRepository::new());
        let auth_service: Arc<dyn AuthService> =
            Arc::new(AuthServiceImpl::new(repo, "test_secret".to_string()));

        let app = create_test_app(auth_service);

        // No "Bearer " prefix
        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", "some_token")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Invalid authorization header format"));
    }

    #[tokio::test]
    async fn test_middleware_with_expired_token() {
        let repo = Arc::new(MockUserRepository::new());
        let auth_service: Arc<dyn AuthService> =
            Arc::new(AuthServiceImpl::new(repo, "test_secret".to_string()));

        let (user, _) = register_test_user(&auth_service).await;
        let app = create_test_app(auth_service);

        let expired = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &json!({
                "sub": user.id.to_string(),
                "exp": (Utc::now() - Duration::hours(2)).timestamp(),
            }),
            &jsonwebtoken::EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", format!("Bearer {}", expired))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Token has expired"));
    }

    #[tokio::test]
    async fn test_middleware_with_token_for_vanished_user() {
        let repo = Arc::new(MockUserRepository::new());
        let auth_service: Arc<dyn AuthService> =
            Arc::new(AuthServiceImpl::new(repo, "test_secret".to_string()));

        let app = create_test_app(auth_service);

        // Properly signed, but the store has no user with this id
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &json!({
                "sub": "42",
                "exp": (Utc::now() + Duration::hours(1)).timestamp(),
            }),
            &jsonwebtoken::EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
