//! Controller de Vehicle
//!
//! Lógica de negocio del CRUD de flota y del ingest de ubicación. Trabaja
//! contra el trait del store, sin saber qué backend hay detrás.

use std::sync::Arc;

use validator::Validate;

use crate::dto::response::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, LocationUpdateRequest, UpdateVehicleRequest};
use crate::models::vehicle::{Vehicle, VehicleQuery};
use crate::repositories::VehicleStore;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: VehicleQuery) -> AppResult<ApiResponse<Vec<Vehicle>>> {
        let vehicles = self.store.list(&query).await?;
        let total = vehicles.len();
        Ok(ApiResponse::success_with_total(vehicles, total))
    }

    pub async fn get(&self, id: &str) -> AppResult<ApiResponse<Vehicle>> {
        let vehicle = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        Ok(ApiResponse::success(vehicle))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;
        let vehicle = self.store.create(request.into_new_vehicle()).await?;
        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle created successfully",
        ))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;
        let vehicle = self
            .store
            .merge(id, request.into_changes())
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle updated successfully",
        ))
    }

    pub async fn delete(&self, id: &str) -> AppResult<ApiResponse<()>> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }
        Ok(ApiResponse::message("Vehicle deleted successfully"))
    }

    /// Ingest de ubicación de un tracker. El merge conserva los campos no
    /// enviados y estampa `lastUpdate`; una velocidad mayor que cero fuerza
    /// el estado a `active`. Nunca crea registros: id desconocido es 404.
    pub async fn update_location(
        &self,
        id: &str,
        request: LocationUpdateRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;
        let vehicle = self
            .store
            .merge(id, request.into_changes())
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle location updated successfully",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{NewVehicle, VehicleStatus};
    use crate::repositories::MemoryVehicleStore;

    async fn controller_with_vehicle() -> (VehicleController, String) {
        let store = Arc::new(MemoryVehicleStore::new());
        let vehicle = store
            .create(NewVehicle {
                id: Some("VH001".to_string()),
                status: Some(VehicleStatus::Inactive),
                speed: Some(0.0),
                fuel: Some(78.0),
                ..Default::default()
            })
            .await
            .unwrap();
        (VehicleController::new(store), vehicle.id)
    }

    #[tokio::test]
    async fn location_update_derives_active_status() {
        let (controller, id) = controller_with_vehicle().await;
        let response = controller
            .update_location(
                &id,
                LocationUpdateRequest {
                    lat: None,
                    lng: None,
                    speed: Some(45.0),
                    heading: None,
                    location: None,
                },
            )
            .await
            .unwrap();

        let vehicle = response.data.unwrap();
        assert_eq!(vehicle.speed, 45.0);
        assert_eq!(vehicle.status, VehicleStatus::Active);
        assert_eq!(vehicle.fuel, 78.0);
    }

    #[tokio::test]
    async fn location_update_unknown_id_is_not_found() {
        let (controller, _) = controller_with_vehicle().await;
        let result = controller
            .update_location(
                "VH999",
                LocationUpdateRequest {
                    lat: Some(40.0),
                    lng: None,
                    speed: None,
                    heading: None,
                    location: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn location_update_rejects_invalid_coordinates() {
        let (controller, id) = controller_with_vehicle().await;
        let result = controller
            .update_location(
                &id,
                LocationUpdateRequest {
                    lat: Some(200.0),
                    lng: None,
                    speed: None,
                    heading: None,
                    location: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
