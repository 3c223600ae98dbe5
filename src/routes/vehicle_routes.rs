//! Rutas del CRUD de vehículos y del ingest de ubicación

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::response::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, LocationUpdateRequest, UpdateVehicleRequest};
use crate::middleware::auth::require_track_token;
use crate::models::vehicle::{TrackingSnapshot, Vehicle, VehicleQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/tracking", get(tracking_snapshot))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/location", put(update_location))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.list(query).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.get(&id).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.update(&id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.delete(&id).await?))
}

/// Ingest de ubicación de un tracker. La credencial se verifica antes de
/// tocar el store.
async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<LocationUpdateRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    require_track_token(&headers, state.config.track_token.as_deref())?;
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.update_location(&id, request).await?))
}

/// Proyección puntual de la flota para clientes que hacen polling en vez
/// de suscribirse al feed.
async fn tracking_snapshot(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let vehicles = state.store.list(&VehicleQuery::default()).await?;
    let data: Vec<TrackingSnapshot> = vehicles.iter().map(TrackingSnapshot::from).collect();
    Ok(Json(serde_json::json!({
        "success": true,
        "data": data,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
