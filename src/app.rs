use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::auth_handlers::{login_handler, register_handler};
use crate::handlers::entry_handlers::{create_entry_handler, list_entries_handler};
use crate::handlers::statistics_handlers::statistics_handler;
use crate::handlers::user_handlers::profile_handler;
use crate::middleware::auth_middleware::auth_middleware;
use crate::models::entry::EntryKind;
use crate::services::auth_service::AuthService;
use crate::services::entry_service::EntryService;
use crate::services::statistics_service::StatisticsService;

/// Shared application state: one Arc'd trait object per service
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub incoming_entries: Arc<dyn EntryService>,
    pub outgoing_entries: Arc<dyn EntryService>,
    pub statistics_service: Arc<dyn StatisticsService>,
}

impl AppState {
    /// The entry service backing the given direction
    pub fn entry_service(&self, kind: EntryKind) -> &Arc<dyn EntryService> {
        match kind {
            EntryKind::Incoming => &self.incoming_entries,
            EntryKind::Outgoing => &self.outgoing_entries,
        }
    }
}

/// Build the API router. Protected routes sit behind the bearer-token
/// middleware; registration, login, and the health check stay open.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/user/profile", get(profile_handler))
        .route(
            "/entries/{kind}",
            post(create_entry_handler).get(list_entries_handler),
        )
        .route("/statistics", get(statistics_handler))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .merge(protected)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
