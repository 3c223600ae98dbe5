//! Rutas de analytics

use axum::{extract::State, routing::get, Json, Router};

use crate::models::vehicle::VehicleQuery;
use crate::services::analytics_service::fleet_analytics;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_analytics_router() -> Router<AppState> {
    Router::new().route("/analytics", get(get_analytics))
}

/// Resumen de flota calculado sobre una única lectura del store
async fn get_analytics(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let vehicles = state.store.list(&VehicleQuery::default()).await?;
    let analytics = fleet_analytics(&vehicles);
    Ok(Json(serde_json::json!({
        "success": true,
        "data": analytics,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
