pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use gridscan_extraction::ExtractionService;
use gridscan_store::TableStore;

/// Shared application state, built once at startup and injected into
/// every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ExtractionService>,
    pub store: Arc<dyn TableStore>,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/", get(routes::root))
        .route("/api/upload-image", post(routes::upload_image))
        .route(
            "/api/generate-excel/{processing_id}",
            post(routes::generate_excel),
        )
        .route("/api/extractions", get(routes::list_extractions))
        // Dev posture of the original deployment: allow everything.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
