//! Store de vehículos en memoria
//!
//! Backend por defecto cuando no hay DATABASE_URL configurada. Un mapa
//! protegido por RwLock; las escrituras toman el lock de escritura solo
//! durante el merge, así que el tick del broadcaster nunca espera detrás
//! de una escritura lenta de I/O.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges, VehicleQuery};
use crate::repositories::vehicle_store::VehicleStore;
use crate::utils::errors::AppResult;

pub struct MemoryVehicleStore {
    vehicles: RwLock<HashMap<String, Vehicle>>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self {
            vehicles: RwLock::new(HashMap::new()),
        }
    }

    /// Store sembrado con la flota mínima por defecto, para arrancar el
    /// dashboard con algo visible.
    pub fn with_default_fleet() -> Self {
        let now = Utc::now();
        let seed = Vehicle::from_new(
            NewVehicle {
                id: Some("VH001".to_string()),
                name: Some("Delivery Truck 1".to_string()),
                driver: Some("John Smith".to_string()),
                status: Some(crate::models::vehicle::VehicleStatus::Active),
                location: Some("Manhattan, NY".to_string()),
                lat: Some(40.7589),
                lng: Some(-73.9851),
                speed: Some(0.0),
                fuel: Some(78.0),
                route: Some("Route A".to_string()),
                vehicle_type: Some("Truck".to_string()),
                license_plate: Some("ABC-123".to_string()),
                year: Some(2022),
                make: Some("Ford".to_string()),
                model: Some("Transit".to_string()),
                mileage: Some(25000),
                ..Default::default()
            },
            "VH001".to_string(),
            now,
        );
        let mut vehicles = HashMap::new();
        vehicles.insert(seed.id.clone(), seed);
        Self {
            vehicles: RwLock::new(vehicles),
        }
    }

    fn matches(vehicle: &Vehicle, query: &VehicleQuery) -> bool {
        if let Some(status) = query.status_filter() {
            if vehicle.status.as_str() != status {
                return false;
            }
        }
        if let Some(term) = query.search.as_deref() {
            let term = term.to_lowercase();
            let hit = vehicle.name.to_lowercase().contains(&term)
                || vehicle.driver.to_lowercase().contains(&term)
                || vehicle.license_plate.to_lowercase().contains(&term)
                || vehicle.make.to_lowercase().contains(&term)
                || vehicle.model.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        true
    }
}

impl Default for MemoryVehicleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn list(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut result: Vec<Vehicle> = vehicles
            .values()
            .filter(|v| Self::matches(v, query))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    async fn get(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.get(id).cloned())
    }

    async fn create(&self, data: NewVehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let id = match &data.id {
            Some(id) => id.clone(),
            None => {
                // Secuencia VH### a partir del tamaño actual, saltando
                // huecos dejados por borrados
                let mut seq = vehicles.len() + 1;
                while vehicles.contains_key(&format!("VH{:03}", seq)) {
                    seq += 1;
                }
                format!("VH{:03}", seq)
            }
        };
        let vehicle = Vehicle::from_new(data, id, Utc::now());
        vehicles.insert(vehicle.id.clone(), vehicle.clone());
        Ok(vehicle)
    }

    async fn merge(&self, id: &str, changes: VehicleChanges) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.get_mut(id) {
            Some(vehicle) => {
                vehicle.apply(changes, Utc::now());
                Ok(Some(vehicle.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut vehicles = self.vehicles.write().await;
        Ok(vehicles.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleStatus;

    fn new_vehicle(name: &str) -> NewVehicle {
        NewVehicle {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MemoryVehicleStore::new();
        let first = store.create(new_vehicle("Truck 1")).await.unwrap();
        let second = store.create(new_vehicle("Truck 2")).await.unwrap();
        assert_eq!(first.id, "VH001");
        assert_eq!(second.id, "VH002");
    }

    #[tokio::test]
    async fn create_respects_caller_id() {
        let store = MemoryVehicleStore::new();
        let vehicle = store
            .create(NewVehicle {
                id: Some("FLEET-9".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(vehicle.id, "FLEET-9");
        assert_eq!(vehicle.name, "Vehicle FLEET-9");
    }

    #[tokio::test]
    async fn merge_keeps_omitted_fields_and_stamps_last_update() {
        let store = MemoryVehicleStore::new();
        let created = store
            .create(NewVehicle {
                driver: Some("Sarah Johnson".to_string()),
                fuel: Some(45.0),
                ..Default::default()
            })
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = store
            .merge(
                &created.id,
                VehicleChanges {
                    speed: Some(30.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("el registro existe");

        assert_eq!(updated.speed, 30.0);
        assert_eq!(updated.driver, "Sarah Johnson");
        assert_eq!(updated.fuel, 45.0);
        assert!(updated.last_update > created.last_update);
    }

    #[tokio::test]
    async fn merge_unknown_id_returns_none_without_creating() {
        let store = MemoryVehicleStore::new();
        let result = store
            .merge(
                "VH999",
                VehicleChanges {
                    speed: Some(10.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(store.list(&VehicleQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_immediate() {
        let store = MemoryVehicleStore::new();
        let vehicle = store.create(new_vehicle("Van 2")).await.unwrap();
        assert!(store.delete(&vehicle.id).await.unwrap());
        assert!(!store.delete(&vehicle.id).await.unwrap());
        assert!(store.get(&vehicle.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_once_at_the_store() {
        let store = MemoryVehicleStore::new();
        store
            .create(NewVehicle {
                name: Some("Delivery Truck 1".to_string()),
                status: Some(VehicleStatus::Active),
                make: Some("Ford".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create(NewVehicle {
                name: Some("Van 2".to_string()),
                status: Some(VehicleStatus::Inactive),
                model: Some("Sprinter".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let active = store
            .list(&VehicleQuery {
                status: Some("active".to_string()),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Delivery Truck 1");

        // Búsqueda sin distinguir mayúsculas sobre el modelo
        let found = store
            .list(&VehicleQuery {
                status: None,
                search: Some("SPRINTER".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Van 2");

        // "all" no filtra
        let all = store
            .list(&VehicleQuery {
                status: Some("all".to_string()),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn default_fleet_contains_seed_vehicle() {
        let store = MemoryVehicleStore::with_default_fleet();
        let seed = store.get("VH001").await.unwrap().expect("vehículo sembrado");
        assert_eq!(seed.driver, "John Smith");
        assert_eq!(seed.fuel, 78.0);
    }
}
