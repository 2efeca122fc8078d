//! Rutas de la API
//!
//! Todas las rutas bajo `/api` requieren sesión salvo el login.

pub mod auth_routes;
pub mod catalog_routes;
pub mod dashboard_routes;
pub mod document_routes;
pub mod vehicle_routes;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::Json,
    routing::get,
    BoxError, Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

/// Tiempo máximo de una request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Ficheros por request que caben en el límite de cuerpo
const MAX_FILES_PER_REQUEST: usize = 8;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/documents", document_routes::create_document_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/api/catalog", catalog_routes::create_catalog_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let body_limit = state.config.max_upload_size.saturating_mul(MAX_FILES_PER_REQUEST);
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(REQUEST_TIMEOUT),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn handle_timeout_error(error: BoxError) -> (StatusCode, Json<Value>) {
    if error.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request Timeout", "code": "TIMEOUT" })),
        )
    } else {
        tracing::error!("Error no controlado en middleware: {}", error);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal Server Error", "code": "INTERNAL_ERROR" })),
        )
    }
}
