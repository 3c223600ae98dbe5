//! Composición de rutas
//!
//! Un router por superficie, montados bajo /api como en el resto de
//! nuestros backends.

pub mod analytics_routes;
pub mod tracking_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest(
            "/api",
            tracking_routes::create_tracking_router()
                .merge(analytics_routes::create_analytics_router()),
        )
        .layer(cors_middleware())
        .with_state(state)
}

/// Health check
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "fleet-tracker",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
