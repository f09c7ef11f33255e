use std::{path::PathBuf, sync::Arc};

use axum::{extract::State, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, Welcome};
use service::drivers::{CsvDriverRepository, DriverRepository, DriverService};

use crate::openapi::ApiDoc;

pub mod drivers;

/// Shared handler state: the driver service over the backing file and the
/// landing payload.
#[derive(Clone)]
pub struct ServerState {
    pub drivers: Arc<DriverService<dyn DriverRepository>>,
    pub welcome: Arc<Welcome>,
}

impl ServerState {
    /// State backed by the CSV file at `drivers_file`.
    pub fn new(drivers_file: impl Into<PathBuf>, docs_url: impl Into<String>) -> Self {
        let repo: Arc<dyn DriverRepository> = Arc::new(CsvDriverRepository::new(drivers_file));
        Self::with_repository(repo, docs_url)
    }

    pub fn with_repository(repo: Arc<dyn DriverRepository>, docs_url: impl Into<String>) -> Self {
        Self {
            drivers: Arc::new(DriverService::new(repo)),
            welcome: Arc::new(Welcome::new(docs_url)),
        }
    }
}

#[utoipa::path(get, path = "/", tag = "meta", responses((status = 200, description = "Welcome message", body = crate::openapi::WelcomeMessage)))]
pub async fn root(State(state): State<ServerState>) -> Json<Welcome> {
    Json(state.welcome.as_ref().clone())
}

#[utoipa::path(get, path = "/health", tag = "meta", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: landing, health, driver CRUD and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let docs = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/drivers", get(drivers::list_drivers).post(drivers::create_driver))
        .route("/drivers/:id", get(drivers::get_driver).put(drivers::update_driver))
        .merge(docs)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
