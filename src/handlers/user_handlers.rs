use axum::{Extension, Json};

use crate::middleware::auth_middleware::AuthenticatedUser;
use crate::models::user::UserProfile;

/// Handler for the authenticated user's profile
#[utoipa::path(
    get,
    path = "/user/profile",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserProfile),
        (status = 401, description = "Missing or invalid token", body = crate::handlers::auth_handlers::ErrorResponse)
    ),
    tag = "user"
)]
pub async fn profile_handler(
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Json<UserProfile> {
    Json(UserProfile::from(&authenticated.user))
}
