//! # Server Configuration
//!
//! This module contains the server setup and configuration for the Realty API.

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::handlers;
use crate::services::{
    ClientService, DbClientService, DbPropertyService, DbTransactionService, PropertyService,
    TransactionService,
};
use crate::telemetry::{self, TraceContext};

/// Application state containing shared resources. Handlers reach the store
/// only through the service trait objects.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub clients: Arc<dyn ClientService>,
    pub properties: Arc<dyn PropertyService>,
    pub transactions: Arc<dyn TransactionService>,
}

impl AppState {
    /// Wires the SeaORM-backed services over one pooled connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            clients: Arc::new(DbClientService::new(db.clone())),
            properties: Arc::new(DbPropertyService::new(db.clone())),
            transactions: Arc::new(DbTransactionService::new(db.clone())),
            db,
        }
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route(
            "/properties",
            get(handlers::properties::list_properties).post(handlers::properties::create_property),
        )
        .route(
            "/properties/{id}",
            get(handlers::properties::get_property)
                .put(handlers::properties::update_property)
                .delete(handlers::properties::delete_property),
        )
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route("/transactions/{id}", get(handlers::transactions::get_transaction));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_v1)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Assigns each request a correlation id, scopes it into the task-local trace
/// context and echoes it back as `X-Trace-Id`.
async fn trace_context_middleware(request: Request, next: Next) -> Response {
    let trace_id = Uuid::new_v4().to_string();
    let context = TraceContext {
        trace_id: trace_id.clone(),
    };

    let mut response = telemetry::with_trace_context(context, next.run(request)).await;

    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert("X-Trace-Id", value);
    }

    response
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(db);
    let app = create_app(state);

    // Resolve the configured bind address
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, profile = %config.profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::clients::list_clients,
        crate::handlers::clients::get_client,
        crate::handlers::clients::create_client,
        crate::handlers::clients::update_client,
        crate::handlers::clients::delete_client,
        crate::handlers::properties::list_properties,
        crate::handlers::properties::get_property,
        crate::handlers::properties::create_property,
        crate::handlers::properties::update_property,
        crate::handlers::properties::delete_property,
        crate::handlers::transactions::list_transactions,
        crate::handlers::transactions::get_transaction,
        crate::handlers::transactions::create_transaction,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::pagination::PagedResult<crate::services::ClientDto>,
            crate::pagination::PagedResult<crate::services::PropertyDto>,
            crate::pagination::PagedResult<crate::services::TransactionDto>,
            crate::services::ClientDto,
            crate::services::CreateClientDto,
            crate::services::UpdateClientDto,
            crate::services::PropertyDto,
            crate::services::CreatePropertyDto,
            crate::services::UpdatePropertyDto,
            crate::services::TransactionDto,
            crate::services::CreateTransactionDto,
        )
    ),
    info(
        title = "Realty API",
        description = "REST API for managing real-estate clients, properties and transactions",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
