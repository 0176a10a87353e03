use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use finance_tracker::app::{create_router, AppState};
use finance_tracker::config::Config;
use finance_tracker::handlers::auth_handlers::ErrorResponse;
use finance_tracker::models::{
    AuthResponse, CreateEntryRequest, Entry, EntryKind, LoginRequest, RegisterRequest, Statistics,
    UserProfile,
};
use finance_tracker::repositories::entry_repository::{EntryTable, SqliteEntryRepository};
use finance_tracker::repositories::user_repository::SqliteUserRepository;
use finance_tracker::services::auth_service::AuthServiceImpl;
use finance_tracker::services::entry_service::EntryServiceImpl;
use finance_tracker::services::statistics_service::StatisticsServiceImpl;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        finance_tracker::handlers::auth_handlers::register_handler,
        finance_tracker::handlers::auth_handlers::login_handler,
        finance_tracker::handlers::user_handlers::profile_handler,
        finance_tracker::handlers::entry_handlers::create_entry_handler,
        finance_tracker::handlers::entry_handlers::list_entries_handler,
        finance_tracker::handlers::statistics_handlers::statistics_handler,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserProfile,
        CreateEntryRequest,
        Entry,
        EntryKind,
        Statistics,
        ErrorResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "user", description = "Profile of the authenticated user"),
        (name = "entries", description = "Incoming and outgoing entries"),
        (name = "statistics", description = "Aggregate totals and net difference")
    ),
    info(
        title = "Finance Tracker API",
        version = "0.1.0",
        description = "REST API for tracking personal income and spending",
    )
)]
struct ApiDoc;

/// Registers the bearer-token security scheme referenced by protected paths
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Open the database, creating the file on first run
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database ready");

    // Initialize repositories
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let incoming_repository =
        Arc::new(SqliteEntryRepository::new(pool.clone(), EntryTable::Incoming));
    let outgoing_repository =
        Arc::new(SqliteEntryRepository::new(pool.clone(), EntryTable::Outgoing));

    // Initialize services
    let state = AppState {
        auth_service: Arc::new(AuthServiceImpl::new(
            user_repository,
            config.jwt_secret.clone(),
        )),
        incoming_entries: Arc::new(EntryServiceImpl::new(incoming_repository.clone())),
        outgoing_entries: Arc::new(EntryServiceImpl::new(outgoing_repository.clone())),
        statistics_service: Arc::new(StatisticsServiceImpl::new(
            incoming_repository,
            outgoing_repository,
        )),
    };

    let app = create_router(state)
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
