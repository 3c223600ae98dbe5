//! Modelo de Vehicle
//!
//! Este módulo contiene el registro de vehículo, sus variantes parciales para
//! creación y merge, y la proyección de tracking que se emite a los viewers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Coordenadas por defecto cuando un vehículo se crea sin posición
pub const DEFAULT_LAT: f64 = 40.7128;
pub const DEFAULT_LNG: f64 = -74.0060;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Inactive => "inactive",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

/// Registro principal de vehículo. Se serializa en camelCase porque los
/// clientes del dashboard esperan ese formato.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub driver: String,
    pub status: VehicleStatus,
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub speed: f64,
    pub fuel: f64,
    pub last_update: DateTime<Utc>,
    pub route: String,
    pub vehicle_type: String,
    pub license_plate: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub mileage: i64,
    pub next_maintenance: String,
    pub notes: String,
    pub heading: f64,
}

/// Campos opcionales para crear un vehículo. El store asigna el id
/// (secuencia VH###) cuando no viene del caller y aplica los defaults.
#[derive(Debug, Clone, Default)]
pub struct NewVehicle {
    pub id: Option<String>,
    pub name: Option<String>,
    pub driver: Option<String>,
    pub status: Option<VehicleStatus>,
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub speed: Option<f64>,
    pub fuel: Option<f64>,
    pub route: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub mileage: Option<i64>,
    pub next_maintenance: Option<String>,
    pub notes: Option<String>,
    pub heading: Option<f64>,
}

/// Merge parcial sobre un registro existente: cada `Some` sobreescribe el
/// campo correspondiente, cada `None` conserva el valor almacenado.
/// `last_update` nunca viene del caller, lo estampa el store.
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub name: Option<String>,
    pub driver: Option<String>,
    pub status: Option<VehicleStatus>,
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub speed: Option<f64>,
    pub fuel: Option<f64>,
    pub route: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub mileage: Option<i64>,
    pub next_maintenance: Option<String>,
    pub notes: Option<String>,
    pub heading: Option<f64>,
}

impl Vehicle {
    /// Construir un registro completo a partir de los campos opcionales,
    /// aplicando los defaults de la flota.
    pub fn from_new(data: NewVehicle, id: String, now: DateTime<Utc>) -> Self {
        Self {
            name: data.name.unwrap_or_else(|| format!("Vehicle {}", id)),
            driver: data.driver.unwrap_or_default(),
            status: data.status.unwrap_or(VehicleStatus::Inactive),
            location: data.location.unwrap_or_default(),
            lat: data.lat.unwrap_or(DEFAULT_LAT),
            lng: data.lng.unwrap_or(DEFAULT_LNG),
            speed: data.speed.unwrap_or(0.0),
            fuel: data.fuel.unwrap_or(0.0),
            last_update: now,
            route: data.route.unwrap_or_default(),
            vehicle_type: data.vehicle_type.unwrap_or_default(),
            license_plate: data.license_plate.unwrap_or_default(),
            year: data.year.unwrap_or(0),
            make: data.make.unwrap_or_default(),
            model: data.model.unwrap_or_default(),
            mileage: data.mileage.unwrap_or(0),
            next_maintenance: data.next_maintenance.unwrap_or_default(),
            notes: data.notes.unwrap_or_default(),
            heading: data.heading.unwrap_or(0.0),
            id,
        }
    }

    /// Aplicar un merge parcial estampando `last_update`.
    pub fn apply(&mut self, changes: VehicleChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(driver) = changes.driver {
            self.driver = driver;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        if let Some(lat) = changes.lat {
            self.lat = lat;
        }
        if let Some(lng) = changes.lng {
            self.lng = lng;
        }
        if let Some(speed) = changes.speed {
            self.speed = speed;
        }
        if let Some(fuel) = changes.fuel {
            self.fuel = fuel;
        }
        if let Some(route) = changes.route {
            self.route = route;
        }
        if let Some(vehicle_type) = changes.vehicle_type {
            self.vehicle_type = vehicle_type;
        }
        if let Some(license_plate) = changes.license_plate {
            self.license_plate = license_plate;
        }
        if let Some(year) = changes.year {
            self.year = year;
        }
        if let Some(make) = changes.make {
            self.make = make;
        }
        if let Some(model) = changes.model {
            self.model = model;
        }
        if let Some(mileage) = changes.mileage {
            self.mileage = mileage;
        }
        if let Some(next_maintenance) = changes.next_maintenance {
            self.next_maintenance = next_maintenance;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        if let Some(heading) = changes.heading {
            self.heading = heading;
        }
        self.last_update = now;
    }
}

/// Filtros de listado. `status = "all"` equivale a no filtrar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl VehicleQuery {
    pub fn is_empty(&self) -> bool {
        self.status_filter().is_none() && self.search.is_none()
    }

    /// Filtro de estado efectivo ("all" se descarta)
    pub fn status_filter(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| *s != "all")
    }
}

/// Proyección de tracking de un vehículo: el subconjunto de campos que se
/// emite a los viewers en cada tick. Se calcula fresca desde el store,
/// nunca se cachea entre ticks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSnapshot {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub speed: f64,
    pub heading: f64,
    pub status: VehicleStatus,
    pub fuel: f64,
    pub driver: String,
    pub last_update: DateTime<Utc>,
}

impl From<&Vehicle> for TrackingSnapshot {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            name: vehicle.name.clone(),
            lat: vehicle.lat,
            lng: vehicle.lng,
            speed: vehicle.speed,
            heading: vehicle.heading,
            status: vehicle.status,
            fuel: vehicle.fuel,
            driver: vehicle.driver.clone(),
            last_update: vehicle.last_update,
        }
    }
}

/// Payload de un tick de broadcast: timestamp de captura en milisegundos
/// epoch más la proyección de toda la flota.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingFrame {
    pub timestamp: i64,
    pub vehicles: Vec<TrackingSnapshot>,
}

impl TrackingFrame {
    pub fn capture(vehicles: &[Vehicle]) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis(),
            vehicles: vehicles.iter().map(TrackingSnapshot::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_new_applies_defaults() {
        let vehicle = Vehicle::from_new(NewVehicle::default(), "VH007".to_string(), Utc::now());
        assert_eq!(vehicle.id, "VH007");
        assert_eq!(vehicle.name, "Vehicle VH007");
        assert_eq!(vehicle.status, VehicleStatus::Inactive);
        assert_eq!(vehicle.lat, DEFAULT_LAT);
        assert_eq!(vehicle.lng, DEFAULT_LNG);
        assert_eq!(vehicle.speed, 0.0);
        assert_eq!(vehicle.year, 0);
        assert!(vehicle.driver.is_empty());
    }

    #[test]
    fn apply_preserves_omitted_fields() {
        let mut vehicle = Vehicle::from_new(
            NewVehicle {
                driver: Some("John Smith".to_string()),
                fuel: Some(78.0),
                ..Default::default()
            },
            "VH001".to_string(),
            Utc::now(),
        );
        let before = vehicle.last_update;

        vehicle.apply(
            VehicleChanges {
                speed: Some(45.0),
                status: Some(VehicleStatus::Active),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(vehicle.speed, 45.0);
        assert_eq!(vehicle.status, VehicleStatus::Active);
        assert_eq!(vehicle.fuel, 78.0);
        assert_eq!(vehicle.driver, "John Smith");
        assert!(vehicle.last_update >= before);
    }

    #[test]
    fn snapshot_projects_tracking_fields() {
        let vehicle = Vehicle::from_new(
            NewVehicle {
                name: Some("Truck 3".to_string()),
                lat: Some(40.7282),
                lng: Some(-73.7949),
                speed: Some(32.0),
                heading: Some(180.0),
                ..Default::default()
            },
            "VH003".to_string(),
            Utc::now(),
        );

        let snapshot = TrackingSnapshot::from(&vehicle);
        assert_eq!(snapshot.id, "VH003");
        assert_eq!(snapshot.name, "Truck 3");
        assert_eq!(snapshot.heading, 180.0);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("licensePlate").is_none());
        assert!(json.get("lastUpdate").is_some());
    }

    #[test]
    fn status_query_treats_all_as_no_filter() {
        let query = VehicleQuery {
            status: Some("all".to_string()),
            search: None,
        };
        assert!(query.status_filter().is_none());
        assert!(query.is_empty());

        let query = VehicleQuery {
            status: Some("active".to_string()),
            search: None,
        };
        assert_eq!(query.status_filter(), Some("active"));
    }
}
