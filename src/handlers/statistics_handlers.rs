use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::app::AppState;
use crate::handlers::auth_handlers::ErrorResponse;
use crate::middleware::auth_middleware::AuthenticatedUser;
use crate::models::statistics::Statistics;
use crate::services::statistics_service::StatisticsError;

/// Convert StatisticsError to HTTP response
impl IntoResponse for StatisticsError {
    fn into_response(self) -> Response {
        let StatisticsError::DatabaseError(ref msg) = self;
        tracing::error!("statistics store failure: {msg}");

        let error_response = ErrorResponse::new("internal_error", "Internal server error");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)).into_response()
    }
}

/// Handler for a user's aggregate statistics
///
/// Sums all incoming and outgoing entries for the authenticated user and
/// reports the net difference.
#[utoipa::path(
    get,
    path = "/statistics",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Totals and net difference", body = Statistics),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "statistics"
)]
pub async fn statistics_handler(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<Json<Statistics>, Response> {
    match state
        .statistics_service
        .get_statistics(authenticated.user.id)
        .await
    {
        Ok(statistics) => Ok(Json(statistics)),
        Err(e) => Err(e.into_response()),
    }
}
