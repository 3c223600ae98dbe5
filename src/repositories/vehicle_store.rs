//! Interfaz del store de vehículos
//!
//! El resto del sistema depende únicamente de estas cinco operaciones.
//! El backend concreto (memoria o PostgreSQL) se elige en el arranque y es
//! intercambiable; la única garantía que se exige es merge atómico por id
//! bajo callers concurrentes.

use async_trait::async_trait;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges, VehicleQuery};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Listar la flota. El filtrado (estado y búsqueda de subcadena sobre
    /// name/driver/licensePlate/make/model, sin distinguir mayúsculas) se
    /// aplica aquí y solo aquí. Con un query vacío devuelve el conjunto
    /// completo ordenado por id: esa es la lectura que hace el broadcaster
    /// una vez por tick.
    async fn list(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>>;

    /// Obtener un vehículo por id
    async fn get(&self, id: &str) -> AppResult<Option<Vehicle>>;

    /// Crear un registro: asigna id secuencial VH### si el caller no trae
    /// uno, aplica defaults y estampa `lastUpdate`.
    async fn create(&self, data: NewVehicle) -> AppResult<Vehicle>;

    /// Merge parcial sobre un registro existente. Estampa `lastUpdate` en
    /// la misma operación atómica. Devuelve `None` si el id no existe:
    /// nunca crea implícitamente.
    async fn merge(&self, id: &str, changes: VehicleChanges) -> AppResult<Option<Vehicle>>;

    /// Borrado inmediato e irreversible. `false` si el id no existía.
    async fn delete(&self, id: &str) -> AppResult<bool>;
}
