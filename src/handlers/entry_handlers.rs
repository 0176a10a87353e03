use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use validator::Validate;

use crate::app::AppState;
use crate::handlers::auth_handlers::ErrorResponse;
use crate::handlers::validation_failure;
use crate::middleware::auth_middleware::AuthenticatedUser;
use crate::models::entry::{CreateEntryRequest, Entry, EntryKind};
use crate::models::filters::{DateRange, DateRangeQuery};
use crate::services::entry_service::EntryError;

/// Convert EntryError to HTTP response
impl IntoResponse for EntryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            EntryError::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                "invalid_amount",
                "Amount must be a finite number",
            ),
            EntryError::DatabaseError(ref msg) => {
                tracing::error!("entry store failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };

        let error_response = ErrorResponse::new(error_type, message);
        (status, Json(error_response)).into_response()
    }
}

/// Handler for recording a new entry
///
/// The entry's date is the server clock at creation time.
#[utoipa::path(
    post,
    path = "/entries/{kind}",
    params(
        ("kind" = EntryKind, Path, description = "Direction of money flow")
    ),
    request_body = CreateEntryRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Entry created", body = Entry),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "entries"
)]
pub async fn create_entry_handler(
    State(state): State<AppState>,
    Path(kind): Path<EntryKind>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<Entry>), Response> {
    // Validate request body
    if let Err(validation_errors) = request.validate() {
        return Err(validation_failure(&validation_errors));
    }

    match state
        .entry_service(kind)
        .add_entry(authenticated.user.id, request)
        .await
    {
        Ok(entry) => Ok((StatusCode::CREATED, Json(entry))),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for listing a user's entries
///
/// Optional `start_date` and `end_date` query parameters bound the listing
/// inclusively; entries come back ordered ascending by date then id.
#[utoipa::path(
    get,
    path = "/entries/{kind}",
    params(
        ("kind" = EntryKind, Path, description = "Direction of money flow"),
        DateRangeQuery
    ),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Entries within the requested range", body = [Entry]),
        (status = 400, description = "Malformed date filter", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "entries"
)]
pub async fn list_entries_handler(
    State(state): State<AppState>,
    Path(kind): Path<EntryKind>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<Entry>>, Response> {
    // Reject malformed date filters before they reach the store
    let range = match DateRange::try_from(&query) {
        Ok(range) => range,
        Err(e) => {
            let error_response = ErrorResponse::new("invalid_date", &e.to_string());
            return Err((StatusCode::BAD_REQUEST, Json(error_response)).into_response());
        }
    };

    match state
        .entry_service(kind)
        .list_entries(authenticated.user.id, range)
        .await
    {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => Err(e.into_response()),
    }
}
