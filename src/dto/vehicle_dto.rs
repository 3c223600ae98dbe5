//! DTOs de Vehicle
//!
//! Requests HTTP tipados para el CRUD de vehículos y para el ingest de
//! ubicación de los trackers. Los campos llegan en camelCase.

use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{NewVehicle, VehicleChanges, VehicleStatus};

/// Request para crear un vehículo. Todo es opcional: el store asigna id y
/// defaults para lo que falte.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub id: Option<String>,

    pub name: Option<String>,
    pub driver: Option<String>,
    pub status: Option<VehicleStatus>,
    pub location: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,

    #[validate(range(min = 0.0))]
    pub speed: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub fuel: Option<f64>,

    pub route: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,

    #[validate(range(min = 1900, max = 2035))]
    pub year: Option<i32>,

    pub make: Option<String>,
    pub model: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    pub next_maintenance: Option<String>,
    pub notes: Option<String>,

    #[validate(range(min = 0.0, max = 360.0))]
    pub heading: Option<f64>,
}

impl CreateVehicleRequest {
    pub fn into_new_vehicle(self) -> NewVehicle {
        NewVehicle {
            id: self.id,
            name: self.name,
            driver: self.driver,
            status: self.status,
            location: self.location,
            lat: self.lat,
            lng: self.lng,
            speed: self.speed,
            fuel: self.fuel,
            route: self.route,
            vehicle_type: self.vehicle_type,
            license_plate: self.license_plate,
            year: self.year,
            make: self.make,
            model: self.model,
            mileage: self.mileage,
            next_maintenance: self.next_maintenance,
            notes: self.notes,
            heading: self.heading,
        }
    }
}

/// Request para editar un vehículo existente. Merge campo a campo, el id no
/// es editable.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub name: Option<String>,
    pub driver: Option<String>,
    pub status: Option<VehicleStatus>,
    pub location: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,

    #[validate(range(min = 0.0))]
    pub speed: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub fuel: Option<f64>,

    pub route: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,

    #[validate(range(min = 1900, max = 2035))]
    pub year: Option<i32>,

    pub make: Option<String>,
    pub model: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    pub next_maintenance: Option<String>,
    pub notes: Option<String>,

    #[validate(range(min = 0.0, max = 360.0))]
    pub heading: Option<f64>,
}

impl UpdateVehicleRequest {
    pub fn into_changes(self) -> VehicleChanges {
        VehicleChanges {
            name: self.name,
            driver: self.driver,
            status: self.status,
            location: self.location,
            lat: self.lat,
            lng: self.lng,
            speed: self.speed,
            fuel: self.fuel,
            route: self.route,
            vehicle_type: self.vehicle_type,
            license_plate: self.license_plate,
            year: self.year,
            make: self.make,
            model: self.model,
            mileage: self.mileage,
            next_maintenance: self.next_maintenance,
            notes: self.notes,
            heading: self.heading,
        }
    }
}

/// Update parcial de ubicación que envía un tracker. Solo se reconocen
/// estos cinco campos; cualquier otro se ignora en la deserialización.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdateRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,

    #[validate(range(min = 0.0))]
    pub speed: Option<f64>,

    #[validate(range(min = 0.0, max = 360.0))]
    pub heading: Option<f64>,

    pub location: Option<String>,
}

impl LocationUpdateRequest {
    /// Convertir a merge de store derivando el estado: velocidad reportada
    /// mayor que cero fuerza `active`, en otro caso el estado no se toca.
    pub fn into_changes(self) -> VehicleChanges {
        let status = match self.speed {
            Some(speed) if speed > 0.0 => Some(VehicleStatus::Active),
            _ => None,
        };
        VehicleChanges {
            lat: self.lat,
            lng: self.lng,
            speed: self.speed,
            heading: self.heading,
            location: self.location,
            status,
            ..Default::default()
        }
    }
}
